#![forbid(unsafe_code)]

//! Persisted layout format.
//!
//! A layout is a JSON array of [`WindowStateRecord`] stored under
//! `"divWindowState" + scope`. Field names are camelCase so payloads written
//! by earlier browser builds load unchanged:
//!
//! ```json
//! [{"id":"window1","minimizedState":false,"maximizedState":true,
//!   "left":"3px","top":"3px","width":"99%","height":"99%",
//!   "restoreLeft":"100px","restoreTop":"100px",
//!   "restoreWidth":300,"restoreHeight":200}]
//! ```
//!
//! `minimizedParked` is an additive field; records without it fall back to
//! the window's `moveMinimizedToBottom` option.

use serde::{Deserialize, Serialize};

use crate::window::{SavedBounds, WindowMode};

/// One window's persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStateRecord {
    pub id: String,
    #[serde(default)]
    pub minimized_state: bool,
    #[serde(default)]
    pub maximized_state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimized_parked: Option<bool>,
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub top: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub restore_left: Option<String>,
    #[serde(default)]
    pub restore_top: Option<String>,
    #[serde(default)]
    pub restore_width: Option<i32>,
    #[serde(default)]
    pub restore_height: Option<i32>,
}

/// Rendered inline bounds of a window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineBounds {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
}

impl WindowStateRecord {
    /// Build a record from a window's state and its current inline bounds.
    #[must_use]
    pub fn capture(
        id: &str,
        mode: WindowMode,
        saved: Option<&SavedBounds>,
        bounds: InlineBounds,
    ) -> Self {
        Self {
            id: id.to_string(),
            minimized_state: mode.is_minimized(),
            maximized_state: mode.is_maximized(),
            minimized_parked: mode.is_minimized().then(|| mode.is_parked()),
            left: bounds.left,
            top: bounds.top,
            width: bounds.width,
            height: bounds.height,
            restore_left: saved.map(|s| s.left.clone()),
            restore_top: saved.map(|s| s.top.clone()),
            restore_width: saved.map(|s| s.width),
            restore_height: saved.map(|s| s.height),
        }
    }

    /// Mode described by the record; `None` when both flags are set.
    #[must_use]
    pub fn mode(&self, default_parked: bool) -> Option<WindowMode> {
        WindowMode::from_flags(
            self.minimized_state,
            self.maximized_state,
            self.minimized_parked.unwrap_or(default_parked),
        )
    }

    /// Saved-bounds snapshot; `None` unless all four restore fields are set.
    #[must_use]
    pub fn saved_bounds(&self) -> Option<SavedBounds> {
        Some(SavedBounds {
            left: self.restore_left.clone()?,
            top: self.restore_top.clone()?,
            width: self.restore_width?,
            height: self.restore_height?,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> InlineBounds {
        InlineBounds {
            left: self.left.clone(),
            top: self.top.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
}

/// Serialize a layout.
pub fn encode_layout(records: &[WindowStateRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Parse a stored layout. An unparsable payload reads as no layout.
#[must_use]
pub fn decode_layout(key: &str, text: &str) -> Option<Vec<WindowStateRecord>> {
    match serde_json::from_str(text) {
        Ok(records) => Some(records),
        Err(err) => {
            tracing::warn!(
                target: "divwin.layout",
                key,
                error = %err,
                "stored layout is unparsable, ignoring"
            );
            None
        }
    }
}

/// Outcome of `save_layout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSaveReport {
    pub key: String,
    /// Records written.
    pub saved: usize,
    /// Window markers in scope with no live window.
    pub skipped: usize,
}

/// Outcome of `load_layout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutLoadReport {
    pub key: String,
    /// Whether a parsable layout was stored under the key.
    pub found: bool,
    pub applied: usize,
    /// Records whose window is gone or whose flags conflict.
    pub skipped: usize,
}

impl LayoutLoadReport {
    pub(crate) fn empty(key: String) -> Self {
        Self {
            key,
            found: false,
            applied: 0,
            skipped: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved() -> SavedBounds {
        SavedBounds {
            left: "100px".into(),
            top: "100px".into(),
            width: 300,
            height: 200,
        }
    }

    fn bounds() -> InlineBounds {
        InlineBounds {
            left: "3px".into(),
            top: "3px".into(),
            width: "99%".into(),
            height: "99%".into(),
        }
    }

    #[test]
    fn record_uses_camel_case_field_names() {
        let record =
            WindowStateRecord::capture("window1", WindowMode::Maximized, Some(&saved()), bounds());
        let json = encode_layout(&[record]).unwrap();
        assert!(json.contains("\"minimizedState\":false"));
        assert!(json.contains("\"maximizedState\":true"));
        assert!(json.contains("\"restoreLeft\":\"100px\""));
        assert!(json.contains("\"restoreWidth\":300"));
        assert!(!json.contains("minimizedParked"));
    }

    #[test]
    fn parked_flag_written_only_when_minimized() {
        let record = WindowStateRecord::capture(
            "w",
            WindowMode::Minimized { parked: false },
            Some(&saved()),
            bounds(),
        );
        assert_eq!(record.minimized_parked, Some(false));
        assert_eq!(record.mode(true), Some(WindowMode::Minimized { parked: false }));
    }

    #[test]
    fn legacy_record_without_parked_flag_uses_default() {
        let text = r#"[{"id":"w","minimizedState":true,"maximizedState":false,
            "left":"0px","top":"743px","width":"200px","height":"23px",
            "restoreLeft":"10px","restoreTop":"20px","restoreWidth":300,"restoreHeight":200}]"#;
        let records = decode_layout("divWindowState", text).unwrap();
        assert_eq!(records[0].mode(true), Some(WindowMode::Minimized { parked: true }));
        assert_eq!(records[0].saved_bounds().map(|s| s.width), Some(300));
    }

    #[test]
    fn record_without_snapshot_has_no_saved_bounds() {
        let record = WindowStateRecord::capture("w", WindowMode::Normal, None, bounds());
        assert_eq!(record.saved_bounds(), None);
        assert_eq!(record.restore_left, None);
    }

    #[test]
    fn conflicting_flags_have_no_mode() {
        let mut record = WindowStateRecord::capture("w", WindowMode::Normal, None, bounds());
        record.minimized_state = true;
        record.maximized_state = true;
        assert_eq!(record.mode(true), None);
    }

    #[test]
    fn garbage_decodes_to_none() {
        assert!(decode_layout("k", "not json").is_none());
        assert!(decode_layout("k", r#"{"id":"w"}"#).is_none());
    }
}
