#![forbid(unsafe_code)]

//! Geometric primitives and the containment rule used while dragging.
//!
//! All values are CSS pixels relative to the offset parent of the element
//! being measured (origin at top-left).

use serde::{Deserialize, Serialize};

/// Surface-relative offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a relative delta.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// An offset box: position plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from a position and a size.
    #[inline]
    #[must_use]
    pub const fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.w, size.h)
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Nesting-aware description of the surface a window is dragged within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerInfo {
    /// Offset size of the containing surface.
    pub size: Size,
    /// True when the container is the document itself.
    pub is_top_level: bool,
    /// Minimum `y`; the parent's caption height when nested, else 0.
    pub vertical_offset: i32,
}

impl ContainerInfo {
    /// The document-level container. Only the minimum bound applies.
    #[must_use]
    pub const fn top_level(viewport: Size) -> Self {
        Self {
            size: viewport,
            is_top_level: true,
            vertical_offset: 0,
        }
    }

    /// Another window's surface, offset below its caption bar.
    #[must_use]
    pub const fn nested(size: Size, vertical_offset: i32) -> Self {
        Self {
            size,
            is_top_level: false,
            vertical_offset,
        }
    }
}

/// Clamp a candidate window position against its container.
///
/// `x` is clamped to `>= 0` and `y` to `>= vertical_offset`. For nested
/// containers the far edge must stay strictly inside: a window whose far edge
/// reaches the container edge is pulled back to `container - window - 1`.
/// The far-edge rule runs last, so a window larger than its container ends up
/// at a negative coordinate.
#[must_use]
pub fn contain(
    candidate_x: i32,
    candidate_y: i32,
    window: Size,
    container: Size,
    container_is_top_level: bool,
    vertical_offset: i32,
) -> Position {
    let mut x = candidate_x.max(0);
    let mut y = candidate_y.max(vertical_offset);

    if !container_is_top_level {
        if x.saturating_add(window.w) >= container.w {
            x = container.w - window.w - 1;
        }
        if y.saturating_add(window.h) >= container.h {
            y = container.h - window.h - 1;
        }
    }

    Position::new(x, y)
}

/// [`contain`] with the container inputs bundled.
#[inline]
#[must_use]
pub fn contain_in(candidate: Position, window: Size, container: ContainerInfo) -> Position {
    contain(
        candidate.x,
        candidate.y,
        window,
        container.size,
        container.is_top_level,
        container.vertical_offset,
    )
}
