#![forbid(unsafe_code)]

//! Window lifecycle and interaction state machine.
//!
//! # Role in DivWindow
//! `divwin-window` turns container elements on a [`divwin_core::Surface`] into
//! floating windows and runs everything that happens to them afterwards:
//!
//! - construction and chrome ([`chrome`], [`options`]),
//! - the normal / minimized / maximized state machine ([`window`]),
//! - drag routing with containment ([`drag`]),
//! - z-order and tray-slot arbitration ([`arrange`]),
//! - layout persistence through a [`divwin_core::KeyValueStore`] ([`layout`]).
//!
//! [`WindowHost`] is the entry point; it owns the registry and the drag
//! session, so no state is global.

pub mod arrange;
pub mod chrome;
pub mod config;
pub mod drag;
pub mod error;
pub mod host;
pub mod layout;
pub mod options;
pub mod registry;
pub mod window;

pub use chrome::ChromeIds;
pub use config::{HostConfig, HostConfigError};
pub use drag::{
    DragEffect, DragNoopReason, DragRouter, DragSession, DragState, DragTransition,
    HandlerCommand,
};
pub use error::{WindowError, WindowResult};
pub use host::{
    CaptionAction, CaptionDispatch, CaptionTarget, ClosedWindow, DragMove, WindowHost, WindowMut,
};
pub use layout::{LayoutLoadReport, LayoutSaveReport, WindowStateRecord};
pub use options::{InitialMode, OptionsSource, WindowOptions};
pub use registry::{WindowId, WindowRegistry};
pub use window::{DivWindow, SavedBounds, WindowMode};
