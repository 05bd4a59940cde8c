#![forbid(unsafe_code)]

//! Drag session routing.
//!
//! [`DragRouter`] owns the single optional drag session for a host. Starting a
//! drag while another is active replaces it in one explicit transition. Each
//! transition tells the input host whether its document-level move/up
//! handlers must be installed or removed, so handlers only exist while a
//! session does.

use divwin_core::Position;
use serde::{Deserialize, Serialize};

use crate::registry::WindowId;

/// Instruction for the input host's document-level move/up handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerCommand {
    Install,
    Remove,
}

impl HandlerCommand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Remove => "remove",
        }
    }
}

/// One active drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub window: WindowId,
    pub pointer_id: u32,
    /// Pointer position at drag start.
    pub origin: Position,
    /// Pointer position at the last applied move.
    pub last: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Why a step changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    PointerMismatch,
    WindowMismatch,
}

impl DragNoopReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdleWithoutActiveDrag => "idle_without_active_drag",
            Self::PointerMismatch => "pointer_mismatch",
            Self::WindowMismatch => "window_mismatch",
        }
    }
}

/// Effect of one drag step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        window: WindowId,
        pointer_id: u32,
        origin: Position,
    },
    Replaced {
        previous: WindowId,
        window: WindowId,
        pointer_id: u32,
        origin: Position,
    },
    Moved {
        window: WindowId,
        pointer_id: u32,
        delta_x: i32,
        delta_y: i32,
    },
    Ended {
        window: WindowId,
        pointer_id: u32,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// Result of one drag step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
    pub command: Option<HandlerCommand>,
}

impl DragTransition {
    /// Window and relative motion for a `Moved` step.
    #[must_use]
    pub fn movement(&self) -> Option<(&WindowId, i32, i32)> {
        match &self.effect {
            DragEffect::Moved {
                window,
                delta_x,
                delta_y,
                ..
            } => Some((window, *delta_x, *delta_y)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, DragEffect::Noop { .. })
    }
}

/// Owner of the current drag session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragRouter {
    state: DragState,
    transition_counter: u64,
}

impl DragRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    #[must_use]
    pub fn active_window(&self) -> Option<&WindowId> {
        self.session().map(|session| &session.window)
    }

    /// Start a drag, replacing any active session.
    pub fn begin(&mut self, window: WindowId, pointer_id: u32, position: Position) -> DragTransition {
        let from = self.state.clone();
        let effect = match &from {
            DragState::Dragging(previous) => DragEffect::Replaced {
                previous: previous.window.clone(),
                window: window.clone(),
                pointer_id,
                origin: position,
            },
            DragState::Idle => DragEffect::Started {
                window: window.clone(),
                pointer_id,
                origin: position,
            },
        };
        self.state = DragState::Dragging(DragSession {
            window,
            pointer_id,
            origin: position,
            last: position,
        });
        tracing::debug!(
            target: "divwin.drag",
            pointer_id,
            x = position.x,
            y = position.y,
            replaced = matches!(effect, DragEffect::Replaced { .. }),
            "drag started"
        );
        self.transition(from, effect, Some(HandlerCommand::Install))
    }

    /// Advance the session to `position`, yielding the relative motion since
    /// the last step.
    pub fn track(&mut self, pointer_id: u32, position: Position) -> DragTransition {
        let from = self.state.clone();
        let DragState::Dragging(session) = &mut self.state else {
            return self.noop(from, DragNoopReason::IdleWithoutActiveDrag);
        };
        if session.pointer_id != pointer_id {
            return self.noop(from, DragNoopReason::PointerMismatch);
        }
        let delta_x = position.x.saturating_sub(session.last.x);
        let delta_y = position.y.saturating_sub(session.last.y);
        session.last = position;
        let effect = DragEffect::Moved {
            window: session.window.clone(),
            pointer_id,
            delta_x,
            delta_y,
        };
        self.transition(from, effect, None)
    }

    /// End the active session regardless of which pointer is reported.
    pub fn end(&mut self) -> DragTransition {
        let from = std::mem::take(&mut self.state);
        let DragState::Dragging(session) = from.clone() else {
            return self.noop(from, DragNoopReason::IdleWithoutActiveDrag);
        };
        tracing::debug!(
            target: "divwin.drag",
            pointer_id = session.pointer_id,
            travel_x = session.last.x.saturating_sub(session.origin.x),
            travel_y = session.last.y.saturating_sub(session.origin.y),
            "drag ended"
        );
        let effect = DragEffect::Ended {
            window: session.window,
            pointer_id: session.pointer_id,
        };
        self.transition(from, effect, Some(HandlerCommand::Remove))
    }

    /// End the session only if it drags `window`.
    pub fn end_for(&mut self, window: &str) -> DragTransition {
        match self.active_window().map(|active| active == window) {
            Some(true) => self.end(),
            Some(false) => self.noop(self.state.clone(), DragNoopReason::WindowMismatch),
            None => self.noop(DragState::Idle, DragNoopReason::IdleWithoutActiveDrag),
        }
    }

    fn noop(&mut self, from: DragState, reason: DragNoopReason) -> DragTransition {
        self.transition(from, DragEffect::Noop { reason }, None)
    }

    fn transition(
        &mut self,
        from: DragState,
        effect: DragEffect,
        command: Option<HandlerCommand>,
    ) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.clone(),
            effect,
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn begin_from_idle_installs_handlers() {
        let mut router = DragRouter::new();
        let t = router.begin(WindowId::new("a"), 1, pos(10, 10));
        assert!(matches!(t.effect, DragEffect::Started { pointer_id: 1, .. }));
        assert_eq!(t.command, Some(HandlerCommand::Install));
        assert_eq!(t.from, DragState::Idle);
        assert_eq!(router.active_window().map(WindowId::as_str), Some("a"));
    }

    #[test]
    fn begin_while_dragging_replaces_session() {
        let mut router = DragRouter::new();
        router.begin(WindowId::new("a"), 1, pos(0, 0));
        let t = router.begin(WindowId::new("b"), 2, pos(5, 5));
        match t.effect {
            DragEffect::Replaced {
                previous, window, ..
            } => {
                assert_eq!(previous, "a");
                assert_eq!(window, "b");
            }
            other => panic!("expected replacement, got {other:?}"),
        }
        assert_eq!(router.session().map(|s| s.pointer_id), Some(2));
    }

    #[test]
    fn track_yields_relative_deltas() {
        let mut router = DragRouter::new();
        router.begin(WindowId::new("a"), 1, pos(100, 100));
        let first = router.track(1, pos(110, 95));
        assert_eq!(first.movement().map(|(_, dx, dy)| (dx, dy)), Some((10, -5)));
        let second = router.track(1, pos(112, 95));
        assert_eq!(second.movement().map(|(_, dx, dy)| (dx, dy)), Some((2, 0)));
        assert_eq!(router.session().map(|s| s.last), Some(pos(112, 95)));
        assert_eq!(router.session().map(|s| s.origin), Some(pos(100, 100)));
    }

    #[test]
    fn track_ignores_other_pointers_and_idle() {
        let mut router = DragRouter::new();
        let idle = router.track(1, pos(1, 1));
        assert_eq!(
            idle.effect,
            DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag
            }
        );
        router.begin(WindowId::new("a"), 1, pos(0, 0));
        let other = router.track(9, pos(50, 50));
        assert_eq!(
            other.effect,
            DragEffect::Noop {
                reason: DragNoopReason::PointerMismatch
            }
        );
        assert_eq!(router.session().map(|s| s.last), Some(pos(0, 0)));
    }

    #[test]
    fn end_removes_handlers_and_idles() {
        let mut router = DragRouter::new();
        router.begin(WindowId::new("a"), 1, pos(0, 0));
        let t = router.end();
        assert!(matches!(t.effect, DragEffect::Ended { .. }));
        assert_eq!(t.command, Some(HandlerCommand::Remove));
        assert_eq!(t.to, DragState::Idle);
        assert!(!router.is_dragging());

        let again = router.end();
        assert!(again.is_noop());
        assert_eq!(again.command, None);
    }

    #[test]
    fn end_for_only_ends_matching_window() {
        let mut router = DragRouter::new();
        router.begin(WindowId::new("a"), 1, pos(0, 0));
        assert!(router.end_for("b").is_noop());
        assert!(router.is_dragging());
        assert!(matches!(router.end_for("a").effect, DragEffect::Ended { .. }));
    }

    #[test]
    fn transition_ids_increase() {
        let mut router = DragRouter::new();
        let a = router.begin(WindowId::new("a"), 1, pos(0, 0)).transition_id;
        let b = router.track(1, pos(1, 1)).transition_id;
        let c = router.end().transition_id;
        assert!(a < b && b < c);
    }
}
