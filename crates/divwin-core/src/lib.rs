#![forbid(unsafe_code)]

//! Core: geometry, containment math, and the collaborator traits.
//!
//! # Role in DivWindow
//! `divwin-core` is the bottom layer. It owns the value types windows are
//! measured in, the [`geometry::contain`] rule applied on every drag step,
//! and the two collaborators the window state machine is written against:
//!
//! - **[`Surface`]**: the rendering tree (element lookup, inline style,
//!   offset/client geometry, window-marker queries).
//! - **[`KeyValueStore`]**: string get/set used for layout persistence.
//!
//! Headless implementations ([`MemorySurface`], [`MemoryStore`]) make the
//! whole window stack runnable and testable without a browser.

pub mod geometry;
pub mod length;
pub mod memory_surface;
pub mod store;
pub mod surface;

pub use geometry::{ContainerInfo, Position, Rect, Size, contain, contain_in};
pub use length::Length;
pub use memory_surface::MemorySurface;
pub use store::{KeyValueStore, MemoryStore, StoreError, StoreResult};
pub use surface::{ControlKind, ElementRole, StyleProperty, Surface, SurfaceError, SurfaceResult};
