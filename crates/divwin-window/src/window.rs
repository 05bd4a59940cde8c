#![forbid(unsafe_code)]

//! Per-window state: identity, chrome, options, mode, and the saved bounds
//! used by restore.
//!
//! A [`DivWindow`] never touches the surface itself; the host applies its
//! transitions. Keeping the state here plain makes the mode invariants
//! checkable without a surface.

use serde::{Deserialize, Serialize};

use crate::chrome::ChromeIds;
use crate::options::WindowOptions;
use crate::registry::WindowId;

/// Interactive state of a window.
///
/// Minimized and maximized are variants of one enum, so a window can never be
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowMode {
    #[default]
    Normal,
    /// `parked` is true when the window was moved to the tray row.
    Minimized { parked: bool },
    Maximized,
}

impl WindowMode {
    /// Rebuild a mode from persisted flags. `None` when both flags are set.
    #[must_use]
    pub const fn from_flags(minimized: bool, maximized: bool, parked: bool) -> Option<Self> {
        match (minimized, maximized) {
            (true, true) => None,
            (true, false) => Some(Self::Minimized { parked }),
            (false, true) => Some(Self::Maximized),
            (false, false) => Some(Self::Normal),
        }
    }

    #[must_use]
    pub const fn is_minimized(self) -> bool {
        matches!(self, Self::Minimized { .. })
    }

    #[must_use]
    pub const fn is_maximized(self) -> bool {
        matches!(self, Self::Maximized)
    }

    #[must_use]
    pub const fn is_parked(self) -> bool {
        matches!(self, Self::Minimized { parked: true })
    }

    /// Whether the user may resize the window.
    #[must_use]
    pub const fn resize_enabled(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Whether the drag strip starts a drag.
    #[must_use]
    pub const fn drag_enabled(self) -> bool {
        match self {
            Self::Normal => true,
            Self::Minimized { parked } => !parked,
            Self::Maximized => false,
        }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Minimized { parked: true } => "minimized-parked",
            Self::Minimized { parked: false } => "minimized",
            Self::Maximized => "maximized",
        }
    }
}

/// Bounds captured immediately before entering minimized or maximized.
///
/// `left`/`top` keep the inline style strings verbatim; `width`/`height` are
/// the client size at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBounds {
    pub left: String,
    pub top: String,
    pub width: i32,
    pub height: i32,
}

/// One live window.
#[derive(Debug, Clone)]
pub struct DivWindow {
    id: WindowId,
    chrome: ChromeIds,
    options: WindowOptions,
    parent: Option<WindowId>,
    mode: WindowMode,
    saved: Option<SavedBounds>,
}

impl DivWindow {
    pub(crate) fn new(
        id: WindowId,
        chrome: ChromeIds,
        options: WindowOptions,
        parent: Option<WindowId>,
    ) -> Self {
        Self {
            id,
            chrome,
            options,
            parent,
            mode: WindowMode::Normal,
            saved: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    #[must_use]
    pub fn chrome(&self) -> &ChromeIds {
        &self.chrome
    }

    #[must_use]
    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// The window whose `create()` built this one.
    #[must_use]
    pub fn parent(&self) -> Option<&WindowId> {
        self.parent.as_ref()
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.parent.is_some()
    }

    #[must_use]
    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    #[must_use]
    pub fn is_minimized(&self) -> bool {
        self.mode.is_minimized()
    }

    #[must_use]
    pub fn is_maximized(&self) -> bool {
        self.mode.is_maximized()
    }

    #[must_use]
    pub fn saved_bounds(&self) -> Option<&SavedBounds> {
        self.saved.as_ref()
    }

    pub(crate) fn set_mode(&mut self, mode: WindowMode) {
        self.mode = mode;
    }

    pub(crate) fn set_saved_bounds(&mut self, saved: Option<SavedBounds>) {
        self.saved = saved;
    }
}
