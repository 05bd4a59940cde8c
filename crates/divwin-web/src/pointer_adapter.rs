#![forbid(unsafe_code)]

//! Browser pointer lifecycle adapter for window dragging.
//!
//! Bridges raw DOM pointer signals into [`WindowHost`] calls while enforcing:
//! - an activation button and a non-zero pointer id on pointer-down,
//! - one active pointer, with a newer pointer-down replacing the session,
//! - cancellation on interruption paths (blur, visibility, pointer-cancel).
//!
//! Every dispatch yields a [`WindowPointerLogEntry`] and, where the drag
//! session starts or stops, a [`HandlerCommand`] for the JS host's
//! document-level `pointermove`/`pointerup` listeners.

use divwin_core::{ControlKind, KeyValueStore, Position, Surface};
use divwin_window::{
    CaptionAction, CaptionDispatch, CaptionTarget, DragState, DragTransition, HandlerCommand,
    WindowHost, WindowId, WindowResult,
};
use serde::{Deserialize, Serialize};

/// Pointer button as reported by `PointerEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `button` code; unknown codes have no mapping.
    #[must_use]
    pub const fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Parse the caption-part label a JS host reports on pointer-down.
///
/// Labels: `caption`, `drag`, and the control names `close`, `minimize`,
/// `maximize`.
#[must_use]
pub fn caption_target_from_label(label: &str) -> Option<CaptionTarget> {
    match label {
        "caption" => Some(CaptionTarget::Caption),
        "drag" => Some(CaptionTarget::DragStrip),
        other => ControlKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == other)
            .map(CaptionTarget::Control),
    }
}

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPointerConfig {
    /// Button required on caption pointer-down.
    pub activation_button: PointerButton,
}

impl Default for WindowPointerConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Primary,
        }
    }
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPointerPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Blur,
    VisibilityHidden,
}

/// Why an incoming signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPointerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    NoActiveDrag,
    PointerMismatch,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum WindowPointerOutcome {
    Forwarded,
    Ignored(WindowPointerIgnoredReason),
}

/// Structured record of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPointerLogEntry {
    pub phase: WindowPointerPhase,
    /// Monotonic sequence, assigned only to forwarded signals.
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub window: Option<WindowId>,
    pub outcome: WindowPointerOutcome,
    pub command: Option<HandlerCommand>,
}

/// Result of one lifecycle dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPointerDispatch {
    /// Host result for a forwarded caption pointer-down.
    pub caption: Option<CaptionDispatch>,
    /// Drag router transition, when the drag machine was consulted.
    pub transition: Option<DragTransition>,
    /// New window position after a forwarded move.
    pub position: Option<Position>,
    pub command: Option<HandlerCommand>,
    pub log: WindowPointerLogEntry,
}

impl WindowPointerDispatch {
    fn ignored(
        phase: WindowPointerPhase,
        reason: WindowPointerIgnoredReason,
        pointer_id: Option<u32>,
        window: Option<WindowId>,
    ) -> Self {
        Self {
            caption: None,
            transition: None,
            position: None,
            command: None,
            log: WindowPointerLogEntry {
                phase,
                sequence: None,
                pointer_id,
                window,
                outcome: WindowPointerOutcome::Ignored(reason),
                command: None,
            },
        }
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, WindowPointerOutcome::Ignored(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActivePointer {
    pointer_id: u32,
    window: WindowId,
}

/// Pointer lifecycle adapter owning a [`WindowHost`].
#[derive(Debug)]
pub struct WindowPointerAdapter<S, K> {
    host: WindowHost<S, K>,
    config: WindowPointerConfig,
    /// Button that started the current session.
    drag_button: Option<PointerButton>,
    next_sequence: u64,
    logs: Vec<WindowPointerLogEntry>,
}

impl<S: Surface, K: KeyValueStore> WindowPointerAdapter<S, K> {
    pub fn new(host: WindowHost<S, K>, config: WindowPointerConfig) -> Self {
        Self {
            host,
            config,
            drag_button: None,
            next_sequence: 1,
            logs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> WindowPointerConfig {
        self.config
    }

    #[must_use]
    pub fn host(&self) -> &WindowHost<S, K> {
        &self.host
    }

    /// Direct host access. Drags ended through the host are picked up on the
    /// next dispatch.
    pub fn host_mut(&mut self) -> &mut WindowHost<S, K> {
        &mut self.host
    }

    pub fn into_host(self) -> WindowHost<S, K> {
        self.host
    }

    /// Pointer id of the active drag, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active().map(|active| active.pointer_id)
    }

    /// Drain the accumulated log records.
    pub fn take_logs(&mut self) -> Vec<WindowPointerLogEntry> {
        std::mem::take(&mut self.logs)
    }

    /// Pointer-down on a caption-bar part of `window`.
    pub fn pointer_down(
        &mut self,
        window: &str,
        target: CaptionTarget,
        pointer_id: u32,
        button: PointerButton,
        position: Position,
    ) -> WindowResult<WindowPointerDispatch> {
        let phase = WindowPointerPhase::PointerDown;
        let window_id = Some(WindowId::new(window));
        if pointer_id == 0 {
            return Ok(self.record(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::InvalidPointerId,
                Some(pointer_id),
                window_id,
            )));
        }
        if button != self.config.activation_button {
            return Ok(self.record(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                window_id,
            )));
        }

        let caption = self
            .host
            .caption_pointer_down(window, target, pointer_id, position)?;
        let transition = caption.drag.clone();
        let command = caption.command();
        if caption.action == CaptionAction::DragStarted {
            self.drag_button = Some(button);
        } else if self.active().is_none() {
            self.drag_button = None;
        }
        let dispatch = WindowPointerDispatch {
            caption: Some(caption),
            transition,
            position: None,
            command,
            log: self.forwarded(phase, Some(pointer_id), window_id, command),
        };
        Ok(self.record(dispatch))
    }

    /// Pointer motion anywhere in the document.
    pub fn pointer_move(
        &mut self,
        pointer_id: u32,
        position: Position,
    ) -> WindowResult<WindowPointerDispatch> {
        let phase = WindowPointerPhase::PointerMove;
        let active = match self.check_active(phase, pointer_id) {
            Ok(active) => active,
            Err(ignored) => return Ok(self.record(*ignored)),
        };

        let moved = self.host.pointer_move(pointer_id, position)?;
        let command = moved.transition.command;
        let dispatch = WindowPointerDispatch {
            caption: None,
            transition: Some(moved.transition),
            position: moved.position,
            command,
            log: self.forwarded(phase, Some(pointer_id), Some(active.window), command),
        };
        Ok(self.record(dispatch))
    }

    /// Pointer release anywhere in the document.
    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        position: Position,
    ) -> WindowPointerDispatch {
        let phase = WindowPointerPhase::PointerUp;
        let active = match self.check_active(phase, pointer_id) {
            Ok(active) => active,
            Err(ignored) => return self.record(*ignored),
        };
        if self.drag_button.is_some_and(|started| started != button) {
            return self.record(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::ButtonMismatch,
                Some(pointer_id),
                Some(active.window),
            ));
        }

        let transition = self.host.pointer_up(pointer_id, position);
        self.finish(phase, active, transition)
    }

    /// Browser `pointercancel`. `None` cancels whatever pointer is active.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> WindowPointerDispatch {
        self.cancel_active(WindowPointerPhase::PointerCancel, pointer_id)
    }

    /// Window lost focus.
    pub fn blur(&mut self) -> WindowPointerDispatch {
        self.cancel_active(WindowPointerPhase::Blur, None)
    }

    /// Document became hidden.
    pub fn visibility_hidden(&mut self) -> WindowPointerDispatch {
        self.cancel_active(WindowPointerPhase::VisibilityHidden, None)
    }

    fn cancel_active(
        &mut self,
        phase: WindowPointerPhase,
        pointer_id: Option<u32>,
    ) -> WindowPointerDispatch {
        let Some(active) = self.active() else {
            return self.record(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::NoActiveDrag,
                pointer_id,
                None,
            ));
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return self.record(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::PointerMismatch,
                Some(id),
                Some(active.window),
            ));
        }

        let transition = self.host.cancel_drag();
        self.finish(phase, active, transition)
    }

    fn finish(
        &mut self,
        phase: WindowPointerPhase,
        active: ActivePointer,
        transition: DragTransition,
    ) -> WindowPointerDispatch {
        self.drag_button = None;
        let command = transition.command;
        let log = self.forwarded(phase, Some(active.pointer_id), Some(active.window), command);
        self.record(WindowPointerDispatch {
            caption: None,
            transition: Some(transition),
            position: None,
            command,
            log,
        })
    }

    /// Active session matching `pointer_id`, or the ignored dispatch to
    /// report instead.
    fn check_active(
        &self,
        phase: WindowPointerPhase,
        pointer_id: u32,
    ) -> Result<ActivePointer, Box<WindowPointerDispatch>> {
        let Some(active) = self.active() else {
            return Err(Box::new(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::NoActiveDrag,
                Some(pointer_id),
                None,
            )));
        };
        if active.pointer_id != pointer_id {
            return Err(Box::new(WindowPointerDispatch::ignored(
                phase,
                WindowPointerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.window),
            )));
        }
        Ok(active)
    }

    fn active(&self) -> Option<ActivePointer> {
        match self.host.drag_state() {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(ActivePointer {
                pointer_id: session.pointer_id,
                window: session.window.clone(),
            }),
        }
    }

    fn forwarded(
        &mut self,
        phase: WindowPointerPhase,
        pointer_id: Option<u32>,
        window: Option<WindowId>,
        command: Option<HandlerCommand>,
    ) -> WindowPointerLogEntry {
        WindowPointerLogEntry {
            phase,
            sequence: Some(self.next_sequence()),
            pointer_id,
            window,
            outcome: WindowPointerOutcome::Forwarded,
            command,
        }
    }

    fn record(&mut self, dispatch: WindowPointerDispatch) -> WindowPointerDispatch {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "divwin.web",
            phase = ?dispatch.log.phase,
            pointer_id = ?dispatch.log.pointer_id,
            outcome = ?dispatch.log.outcome,
            "pointer dispatch"
        );
        self.logs.push(dispatch.log.clone());
        dispatch
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}
