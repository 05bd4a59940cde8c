#![forbid(unsafe_code)]

//! Ordered collection of live windows.
//!
//! Insertion order is construction order. Lookups are linear scans; window
//! counts are in the tens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WindowError;
use crate::window::DivWindow;

/// Stable window identity: the id of the container the window decorates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WindowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for WindowId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WindowId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Live windows in construction order.
#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
    windows: Vec<DivWindow>,
}

impl WindowRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Add a window. Identities are unique.
    pub fn register(&mut self, window: DivWindow) -> Result<(), WindowError> {
        if self.contains(window.id().as_str()) {
            return Err(WindowError::DuplicateWindow {
                id: window.id().clone(),
            });
        }
        self.windows.push(window);
        Ok(())
    }

    /// Remove the entry with this identity, if present.
    pub fn remove(&mut self, id: &str) -> Option<DivWindow> {
        let index = self.position(id)?;
        Some(self.windows.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DivWindow> {
        self.windows.iter().find(|window| window.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DivWindow> {
        self.windows.iter_mut().find(|window| window.id() == id)
    }

    /// Entry whose chrome root has this element identity.
    #[must_use]
    pub fn find_by_root(&self, root: &str) -> Option<&DivWindow> {
        self.windows
            .iter()
            .find(|window| window.chrome().root == root)
    }

    /// Windows built by `parent.create()`, in construction order.
    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a DivWindow> + 'a {
        self.windows
            .iter()
            .filter(move |window| window.parent().is_some_and(|p| p == parent))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DivWindow> {
        self.windows.iter()
    }

    /// Identities in construction order.
    #[must_use]
    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|window| window.id().clone()).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.windows.iter().position(|window| window.id() == id)
    }
}
