#![forbid(unsafe_code)]

//! Errors raised by window operations.

use std::fmt;

use divwin_core::{StoreError, SurfaceError};

use crate::config::HostConfigError;
use crate::registry::WindowId;

/// Failure of a window lifecycle, geometry, or persistence operation.
#[derive(Debug)]
pub enum WindowError {
    /// The container element named at construction does not exist.
    ContainerNotFound { id: String },
    /// A window is already registered for this container.
    DuplicateWindow { id: WindowId },
    /// No registered window has this identity.
    UnknownWindow { id: String },
    /// The rendering surface rejected an operation.
    Surface(SurfaceError),
    /// The persistent store rejected an operation.
    Store(StoreError),
    /// A layout could not be encoded.
    Serialize(serde_json::Error),
    /// Host configuration was rejected.
    Config(HostConfigError),
}

impl WindowError {
    #[must_use]
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownWindow { id: id.into() }
    }
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerNotFound { id } => write!(f, "container '{id}' not found"),
            Self::DuplicateWindow { id } => write!(f, "window '{id}' is already registered"),
            Self::UnknownWindow { id } => write!(f, "no window registered as '{id}'"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Store(e) => write!(f, "store error: {e}"),
            Self::Serialize(e) => write!(f, "layout encode error: {e}"),
            Self::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::ContainerNotFound { .. }
            | Self::DuplicateWindow { .. }
            | Self::UnknownWindow { .. } => None,
        }
    }
}

impl From<SurfaceError> for WindowError {
    fn from(value: SurfaceError) -> Self {
        Self::Surface(value)
    }
}

impl From<StoreError> for WindowError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<HostConfigError> for WindowError {
    fn from(value: HostConfigError) -> Self {
        Self::Config(value)
    }
}

/// Result alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_names_the_window() {
        let err = WindowError::DuplicateWindow {
            id: WindowId::new("www"),
        };
        assert_eq!(err.to_string(), "window 'www' is already registered");
        assert_eq!(
            WindowError::unknown("nope").to_string(),
            "no window registered as 'nope'"
        );
    }

    #[test]
    fn surface_errors_convert_and_chain() {
        let err: WindowError = SurfaceError::not_found("x_root").into();
        assert!(matches!(err, WindowError::Surface(_)));
        assert!(err.source().is_some());
    }
}
