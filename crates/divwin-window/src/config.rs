#![forbid(unsafe_code)]

//! Host-wide window configuration.
//!
//! [`HostConfig`] carries the chrome metrics and attribute names every window
//! on a host shares. The defaults reproduce the stock DivWindow look:
//!
//! ```toml
//! caption_height = 24
//! minimized_width = 200
//! minimized_height = 23
//! tray_margin = 1
//! maximized_padding = 3
//! maximized_extent = "99%"
//! nested_maximize_margin = 6
//! marker_attribute = "divWindow"
//! options_attribute = "divWindowOptions"
//! caption_attribute = "caption"
//! layout_key_prefix = "divWindowState"
//! ```
//!
//! ```rust,ignore
//! let config = HostConfig::from_json_str(r#"{"caption_height": 28}"#)?;
//! let config = HostConfig::from_toml_str(text)?; // `policy-config` feature
//! ```

#[cfg(feature = "policy-config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Shared chrome metrics and host attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Height of the caption bar; also the vertical offset applied to windows
    /// nested inside another window.
    pub caption_height: i32,
    /// Width a parked minimized window takes in the tray row.
    pub minimized_width: i32,
    /// Height of a minimized window.
    pub minimized_height: i32,
    /// Gap kept between the tray row and the container's bottom edge.
    pub tray_margin: i32,
    /// Inset of a maximized window from its container's edges.
    pub maximized_padding: i32,
    /// Width/height written while maximized.
    pub maximized_extent: String,
    /// Extra space subtracted from a nested maximized window's height.
    pub nested_maximize_margin: i32,
    /// Attribute marking window roots on DOM surfaces.
    pub marker_attribute: String,
    /// Attribute holding declared JSON options on a container.
    pub options_attribute: String,
    /// Attribute holding the declared caption on a container.
    pub caption_attribute: String,
    /// Prefix of the layout key in the persistent store.
    pub layout_key_prefix: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            caption_height: 24,
            minimized_width: 200,
            minimized_height: 23,
            tray_margin: 1,
            maximized_padding: 3,
            maximized_extent: "99%".to_string(),
            nested_maximize_margin: 6,
            marker_attribute: "divWindow".to_string(),
            options_attribute: "divWindowOptions".to_string(),
            caption_attribute: "caption".to_string(),
            layout_key_prefix: "divWindowState".to_string(),
        }
    }
}

impl HostConfig {
    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, HostConfigError> {
        let config: Self = serde_json::from_str(s).map_err(HostConfigError::Json)?;
        config.validated()
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, HostConfigError> {
        let config: Self = toml::from_str(s).map_err(HostConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, HostConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(HostConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Check every metric is usable.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let positive = [
            ("caption_height", self.caption_height),
            ("minimized_width", self.minimized_width),
            ("minimized_height", self.minimized_height),
        ];
        for (name, value) in positive {
            if value <= 0 {
                errors.push(format!("{name} must be > 0, got {value}"));
            }
        }
        let non_negative = [
            ("tray_margin", self.tray_margin),
            ("maximized_padding", self.maximized_padding),
            ("nested_maximize_margin", self.nested_maximize_margin),
        ];
        for (name, value) in non_negative {
            if value < 0 {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }
        let names = [
            ("maximized_extent", &self.maximized_extent),
            ("marker_attribute", &self.marker_attribute),
            ("options_attribute", &self.options_attribute),
            ("caption_attribute", &self.caption_attribute),
            ("layout_key_prefix", &self.layout_key_prefix),
        ];
        for (name, value) in names {
            if value.trim().is_empty() {
                errors.push(format!("{name} must not be empty"));
            }
        }
        errors
    }

    /// Consume and return `self` when valid.
    pub fn validated(self) -> Result<Self, HostConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(HostConfigError::Validation(errors))
        }
    }

    /// Store key for a layout saved under `scope` (document-wide for `None`).
    #[must_use]
    pub fn layout_key(&self, scope: Option<&str>) -> String {
        format!("{}{}", self.layout_key_prefix, scope.unwrap_or_default())
    }
}

/// Errors from loading or validating a [`HostConfig`].
#[derive(Debug)]
pub enum HostConfigError {
    /// I/O error reading a file.
    #[cfg(feature = "policy-config")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for HostConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "policy-config")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for HostConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "policy-config")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
