#![forbid(unsafe_code)]

//! Rendering surface collaborator.
//!
//! A [`Surface`] is a tree of boxes addressed by string identity. Windows only
//! ever touch the surface through this trait, so the same state machine runs
//! against the browser DOM and against [`crate::memory_surface::MemorySurface`].

use std::fmt;

use crate::geometry::{Rect, Size};

/// Caption-bar control buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Close,
    Minimize,
    Maximize,
}

impl ControlKind {
    /// All controls in caption-bar order.
    pub const ALL: [Self; 3] = [Self::Close, Self::Minimize, Self::Maximize];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        }
    }
}

/// Structural role of an element created for the window chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// The window box. Carries the window marker.
    WindowRoot,
    CaptionBar,
    Control(ControlKind),
    /// Caption text.
    Caption,
    /// Strip of the caption bar that starts a drag.
    DragStrip,
    /// Region holding the relocated container content.
    Content,
}

impl ElementRole {
    /// Whether elements with this role are returned by [`Surface::window_roots`].
    #[must_use]
    pub const fn is_marked(self) -> bool {
        matches!(self, Self::WindowRoot)
    }

    /// Stable label, used as a CSS class suffix by DOM hosts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WindowRoot => "panel",
            Self::CaptionBar => "caption-bar",
            Self::Control(kind) => kind.as_str(),
            Self::Caption => "caption",
            Self::DragStrip => "drag-strip",
            Self::Content => "content",
        }
    }
}

/// Inline style properties windows read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Left,
    Top,
    Width,
    Height,
    Border,
    BackgroundColor,
    Resize,
    Cursor,
    ZIndex,
    Display,
}

impl StyleProperty {
    /// CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Width => "width",
            Self::Height => "height",
            Self::Border => "border",
            Self::BackgroundColor => "background-color",
            Self::Resize => "resize",
            Self::Cursor => "cursor",
            Self::ZIndex => "z-index",
            Self::Display => "display",
        }
    }
}

/// Errors reported by a surface implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// No element with this identity exists.
    ElementNotFound { id: String },
    /// An element with this identity already exists.
    DuplicateElement { id: String },
    /// The requested parent cannot host the element (e.g. a cycle).
    InvalidParent { id: String, parent: String },
    /// Host-specific failure (DOM exception text and similar).
    Host(String),
}

impl SurfaceError {
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound { id: id.into() }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementNotFound { id } => write!(f, "element '{id}' not found"),
            Self::DuplicateElement { id } => write!(f, "element '{id}' already exists"),
            Self::InvalidParent { id, parent } => {
                write!(f, "element '{parent}' cannot contain '{id}'")
            }
            Self::Host(message) => write!(f, "surface host error: {message}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Result alias for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// The rendering surface a window set lives on.
///
/// Style reads return the inline value (empty string when unset), matching
/// `element.style.<prop>`. Geometry reads return laid-out values.
pub trait Surface {
    /// Whether an element with this identity is attached to the document.
    fn contains(&self, id: &str) -> bool;

    /// Parent element identity; `None` for children of the document body.
    fn parent(&self, id: &str) -> SurfaceResult<Option<String>>;

    /// Read an attribute declared on an element.
    fn attribute(&self, id: &str, name: &str) -> SurfaceResult<Option<String>>;

    /// Create a new element as the last child of `parent`.
    fn create_element(&mut self, parent: &str, id: &str, role: ElementRole) -> SurfaceResult<()>;

    /// Move every child of `from` (elements and text) to the end of `to`,
    /// except the child whose subtree holds `to` itself.
    fn move_children(&mut self, from: &str, to: &str) -> SurfaceResult<()>;

    /// Re-parent one element as the last child of `parent`.
    fn append_child(&mut self, parent: &str, id: &str) -> SurfaceResult<()>;

    /// Serialised content of an element.
    fn inner_html(&self, id: &str) -> SurfaceResult<String>;

    /// Replace an element's content.
    fn set_inner_html(&mut self, id: &str, html: &str) -> SurfaceResult<()>;

    /// Inline style value; empty when unset.
    fn style(&self, id: &str, property: StyleProperty) -> SurfaceResult<String>;

    /// Write an inline style value verbatim.
    fn set_style(&mut self, id: &str, property: StyleProperty, value: &str) -> SurfaceResult<()>;

    /// Computed stacking index; `None` for `auto`.
    fn computed_z_index(&self, id: &str) -> SurfaceResult<Option<i32>>;

    /// Offset box (`offsetLeft/Top/Width/Height`).
    fn offset_rect(&self, id: &str) -> SurfaceResult<Rect>;

    /// Client box size (`clientWidth/Height`).
    fn client_size(&self, id: &str) -> SurfaceResult<Size>;

    /// Visible viewport size.
    fn viewport_size(&self) -> Size;

    /// Marker-tagged window roots under `scope`, or document-wide for `None`,
    /// in document order.
    fn window_roots(&self, scope: Option<&str>) -> SurfaceResult<Vec<String>>;

    /// Detach an element and its subtree.
    fn remove(&mut self, id: &str) -> SurfaceResult<()>;

    /// Whether `id` lies strictly inside `ancestor`.
    fn is_descendant_of(&self, id: &str, ancestor: &str) -> SurfaceResult<bool> {
        let mut current = self.parent(id)?;
        while let Some(parent) = current {
            if parent == ancestor {
                return Ok(true);
            }
            current = self.parent(&parent)?;
        }
        Ok(false)
    }
}
