#![forbid(unsafe_code)]

//! DivWindow public facade crate.
//!
//! Re-exports the window host, its collaborator traits and the headless
//! implementations, plus a prelude for day-to-day use. The browser layer is
//! available under the default `web` feature.

// --- Core re-exports -------------------------------------------------------

pub use divwin_core::{
    ContainerInfo, ControlKind, ElementRole, KeyValueStore, Length, MemoryStore, MemorySurface,
    Position, Rect, Size, StoreError, StyleProperty, Surface, SurfaceError, contain, contain_in,
};

// --- Window re-exports -----------------------------------------------------

pub use divwin_window::{
    CaptionAction, CaptionDispatch, CaptionTarget, DivWindow, DragState, DragTransition,
    HandlerCommand, HostConfig, HostConfigError, LayoutLoadReport, LayoutSaveReport, WindowError,
    WindowHost, WindowId, WindowMode, WindowMut, WindowOptions, WindowResult,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use divwin_web::{PointerButton, WindowPointerAdapter, WindowPointerConfig};

pub mod demo;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CaptionTarget, KeyValueStore, MemoryStore, MemorySurface, Position, Size, Surface,
        WindowError, WindowHost, WindowMode, WindowOptions, WindowResult,
    };

    #[cfg(feature = "web")]
    pub use crate::{PointerButton, WindowPointerAdapter, web};

    pub use crate::{core, window};
}

pub use divwin_core as core;
pub use divwin_window as window;
#[cfg(feature = "web")]
pub use divwin_web as web;
