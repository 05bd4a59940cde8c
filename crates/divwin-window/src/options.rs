#![forbid(unsafe_code)]

//! Per-window construction options.
//!
//! Options come from three places, highest precedence first:
//!
//! 1. an explicit [`WindowOptions`] passed to the constructor,
//! 2. JSON declared on the container's options attribute,
//! 3. [`WindowOptions::default`].
//!
//! Declared JSON uses camelCase keys (`hasClose`, `moveMinimizedToBottom`,
//! `isMaximized`, ...). Missing keys take their defaults; a malformed
//! declaration is logged and treated as absent.

use divwin_core::ControlKind;
use serde::{Deserialize, Serialize};

/// Construction-time window configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowOptions {
    pub has_close: bool,
    pub has_minimize: bool,
    pub has_maximize: bool,
    /// Park minimized windows in the tray row at the container's bottom.
    pub move_minimized_to_bottom: bool,
    pub left: Option<String>,
    pub top: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    /// Border and caption-bar color.
    pub color: Option<String>,
    pub is_minimized: bool,
    pub is_maximized: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            has_close: true,
            has_minimize: true,
            has_maximize: true,
            move_minimized_to_bottom: true,
            left: None,
            top: None,
            width: None,
            height: None,
            color: None,
            is_minimized: false,
            is_maximized: false,
        }
    }
}

/// Where a window's resolved options came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsSource {
    Explicit,
    Declared,
    Default,
}

/// State a window enters right after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialMode {
    Normal,
    Minimized,
    Maximized,
}

impl WindowOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declared JSON object.
    pub fn from_declared(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_close(mut self, enabled: bool) -> Self {
        self.has_close = enabled;
        self
    }

    #[must_use]
    pub fn with_minimize(mut self, enabled: bool) -> Self {
        self.has_minimize = enabled;
        self
    }

    #[must_use]
    pub fn with_maximize(mut self, enabled: bool) -> Self {
        self.has_maximize = enabled;
        self
    }

    #[must_use]
    pub fn with_move_minimized_to_bottom(mut self, enabled: bool) -> Self {
        self.move_minimized_to_bottom = enabled;
        self
    }

    /// Initial position as unit strings (`"300px"`).
    #[must_use]
    pub fn with_position(mut self, left: impl Into<String>, top: impl Into<String>) -> Self {
        self.left = Some(left.into());
        self.top = Some(top.into());
        self
    }

    /// Initial size as unit strings.
    #[must_use]
    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn minimized(mut self) -> Self {
        self.is_minimized = true;
        self
    }

    #[must_use]
    pub fn maximized(mut self) -> Self {
        self.is_maximized = true;
        self
    }

    /// Whether a caption-bar control is shown and acts on click.
    #[must_use]
    pub const fn control_enabled(&self, kind: ControlKind) -> bool {
        match kind {
            ControlKind::Close => self.has_close,
            ControlKind::Minimize => self.has_minimize,
            ControlKind::Maximize => self.has_maximize,
        }
    }

    /// Initial state; maximize wins when both flags are set.
    #[must_use]
    pub const fn initial_mode(&self) -> InitialMode {
        if self.is_maximized {
            InitialMode::Maximized
        } else if self.is_minimized {
            InitialMode::Minimized
        } else {
            InitialMode::Normal
        }
    }
}

/// Pick the effective options for a window being constructed.
#[must_use]
pub fn resolve_options(
    window: &str,
    explicit: Option<WindowOptions>,
    declared: Option<&str>,
) -> (WindowOptions, OptionsSource) {
    if let Some(options) = explicit {
        return (options, OptionsSource::Explicit);
    }
    if let Some(text) = declared {
        match WindowOptions::from_declared(text) {
            Ok(options) => return (options, OptionsSource::Declared),
            Err(err) => {
                tracing::warn!(
                    target: "divwin.options",
                    window,
                    error = %err,
                    "declared options are malformed, using defaults"
                );
            }
        }
    }
    (WindowOptions::default(), OptionsSource::Default)
}
