#![forbid(unsafe_code)]

//! Tray slot search and stacking-index arbitration.
//!
//! Both operate on values already read from the surface, so the host decides
//! which windows are in scope and these functions only do the arithmetic.

use divwin_core::Rect;

/// Left edge for a window being parked in the tray row at `row_y`.
///
/// Among the boxes whose top equals `row_y`, packing goes right-to-left from
/// the leftmost occupied edge while a full `minimized_width` slot fits before
/// it; otherwise the window goes right of the rightmost occupied edge. An
/// empty row yields `0`. The result is never negative.
#[must_use]
pub fn available_slot<I>(windows: I, row_y: i32, minimized_width: i32) -> i32
where
    I: IntoIterator<Item = Rect>,
{
    let mut leftmost: Option<i32> = None;
    let mut rightmost: Option<i32> = None;
    for rect in windows.into_iter().filter(|rect| rect.top() == row_y) {
        leftmost = Some(leftmost.map_or(rect.left(), |l| l.min(rect.left())));
        rightmost = Some(rightmost.map_or(rect.right(), |r| r.max(rect.right())));
    }
    match (leftmost, rightmost) {
        (Some(left), _) if left >= minimized_width => left - minimized_width,
        (_, Some(right)) => right.max(0),
        _ => 0,
    }
}

/// Stacking index that puts a window in front of every index given.
///
/// `None` stands for `auto` and counts as `0`.
#[must_use]
pub fn next_z_index<I>(indices: I) -> i32
where
    I: IntoIterator<Item = Option<i32>>,
{
    indices
        .into_iter()
        .map(|index| index.unwrap_or(0))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
