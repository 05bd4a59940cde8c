#![forbid(unsafe_code)]

//! Browser layer for DivWindow.
//!
//! - [`pointer_adapter`]: host-agnostic pointer lifecycle handling (buttons,
//!   pointer ids, blur/visibility cancellation, listener install/remove
//!   commands). Runs natively and is tested headlessly.
//! - `wasm` (only on `wasm32`): `DomSurface`, `LocalStorageStore` and the
//!   `DivWindowApp` export for JavaScript hosts.

pub mod pointer_adapter;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DivWindowApp, DomSurface, LocalStorageStore};

pub use pointer_adapter::{
    PointerButton, WindowPointerAdapter, WindowPointerConfig, WindowPointerDispatch,
    WindowPointerIgnoredReason, WindowPointerLogEntry, WindowPointerOutcome, WindowPointerPhase,
    caption_target_from_label,
};
