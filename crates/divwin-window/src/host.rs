#![forbid(unsafe_code)]

//! Application-level window controller.
//!
//! [`WindowHost`] owns everything a window set shares: the rendering surface,
//! the persistent store, the registry, the drag router, and the host config.
//! Windows are addressed by identity; [`WindowMut`] is a short-lived handle
//! for one window whose mutators return `&mut Self` so calls chain:
//!
//! ```rust,ignore
//! host.open("www", Some(WindowOptions::new().with_position("50px", "300px")))?
//!     .set_caption("Workspace")?
//!     .create("innerwindow1", None)?
//!     .set_color("#90EE90")?;
//! ```
//!
//! # Nesting
//!
//! A window built through [`WindowMut::create`] records its parent. Nested
//! windows are contained in the parent's box below its caption bar, and their
//! z-order and tray searches are scoped to the parent's content region.

use divwin_core::{
    ContainerInfo, ControlKind, KeyValueStore, Length, Position, Size, StyleProperty, Surface,
    SurfaceError, SurfaceResult, contain_in,
};

use crate::arrange;
use crate::chrome::{self, ChromeIds};
use crate::config::HostConfig;
use crate::drag::{DragRouter, DragState, DragTransition, HandlerCommand};
use crate::error::{WindowError, WindowResult};
use crate::layout::{
    InlineBounds, LayoutLoadReport, LayoutSaveReport, WindowStateRecord, decode_layout,
    encode_layout,
};
use crate::options::{InitialMode, WindowOptions, resolve_options};
use crate::registry::{WindowId, WindowRegistry};
use crate::window::{DivWindow, SavedBounds, WindowMode};

/// Part of the caption bar that received a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionTarget {
    /// Caption text or bare caption bar.
    Caption,
    DragStrip,
    Control(ControlKind),
}

/// What a caption pointer-down did after raising the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionAction {
    Focused,
    DragStarted,
    /// The window's mode does not allow dragging.
    DragRefused { mode: WindowMode },
    Closed,
    ModeChanged { mode: WindowMode },
    /// The control is disabled by the window's options.
    ControlDisabled(ControlKind),
}

/// Result of [`WindowHost::caption_pointer_down`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionDispatch {
    pub window: WindowId,
    /// Stacking index assigned by the raise.
    pub z_index: i32,
    pub action: CaptionAction,
    /// Drag transition caused by the pointer-down, if any.
    pub drag: Option<DragTransition>,
}

impl CaptionDispatch {
    /// Handler instruction for the input host.
    #[must_use]
    pub fn command(&self) -> Option<HandlerCommand> {
        self.drag.as_ref().and_then(|transition| transition.command)
    }
}

/// Result of [`WindowHost::pointer_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragMove {
    pub transition: DragTransition,
    /// New window offset when the move was applied.
    pub position: Option<Position>,
}

/// A window removed by `close()`.
#[derive(Debug, Clone)]
pub struct ClosedWindow {
    pub window: DivWindow,
    /// Nested windows closed along with it.
    pub descendants: Vec<WindowId>,
    /// Set when closing ended the active drag.
    pub drag: Option<DragTransition>,
}

/// Owner of a window set and its collaborators.
#[derive(Debug)]
pub struct WindowHost<S, K> {
    surface: S,
    store: K,
    registry: WindowRegistry,
    drag: DragRouter,
    config: HostConfig,
}

impl<S: Surface, K: KeyValueStore> WindowHost<S, K> {
    /// Create a host with the default configuration.
    pub fn new(surface: S, store: K) -> Self {
        Self {
            surface,
            store,
            registry: WindowRegistry::new(),
            drag: DragRouter::new(),
            config: HostConfig::default(),
        }
    }

    /// Create a host with a validated configuration.
    pub fn with_config(surface: S, store: K, config: HostConfig) -> WindowResult<Self> {
        let config = config.validated()?;
        Ok(Self {
            config,
            ..Self::new(surface, store)
        })
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn store(&self) -> &K {
        &self.store
    }

    #[must_use]
    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Look up a live window.
    #[must_use]
    pub fn window(&self, id: &str) -> Option<&DivWindow> {
        self.registry.get(id)
    }

    /// Decorate the container `id` as a top-level window.
    pub fn open(
        &mut self,
        id: &str,
        options: Option<WindowOptions>,
    ) -> WindowResult<WindowMut<'_, S, K>> {
        self.construct(id, options, None)?;
        Ok(WindowMut::new(self, id))
    }

    /// Handle for a live window.
    pub fn window_mut(&mut self, id: &str) -> WindowResult<WindowMut<'_, S, K>> {
        self.entry(id)?;
        Ok(WindowMut::new(self, id))
    }

    // ---- Pointer routing ----

    /// Pointer-down on a window's caption bar.
    ///
    /// Always raises the window first, then acts on the target.
    pub fn caption_pointer_down(
        &mut self,
        id: &str,
        target: CaptionTarget,
        pointer_id: u32,
        position: Position,
    ) -> WindowResult<CaptionDispatch> {
        let z_index = self.update_z_order(id)?;
        let window = self.entry(id)?;
        let window_id = window.id().clone();
        let mode = window.mode();
        let control_enabled = match target {
            CaptionTarget::Control(kind) => window.options().control_enabled(kind),
            CaptionTarget::Caption | CaptionTarget::DragStrip => true,
        };

        let (action, drag) = match target {
            CaptionTarget::Caption => (CaptionAction::Focused, None),
            CaptionTarget::DragStrip if mode.drag_enabled() => {
                let transition = self.drag.begin(window_id.clone(), pointer_id, position);
                (CaptionAction::DragStarted, Some(transition))
            }
            CaptionTarget::DragStrip => (CaptionAction::DragRefused { mode }, None),
            CaptionTarget::Control(kind) if !control_enabled => {
                (CaptionAction::ControlDisabled(kind), None)
            }
            CaptionTarget::Control(ControlKind::Close) => {
                let closed = self.close_window(id)?;
                (CaptionAction::Closed, closed.drag)
            }
            CaptionTarget::Control(ControlKind::Minimize) => {
                let drag = self.minimize_restore(id)?;
                (self.mode_changed(id)?, drag)
            }
            CaptionTarget::Control(ControlKind::Maximize) => {
                let drag = self.maximize_restore(id)?;
                (self.mode_changed(id)?, drag)
            }
        };

        Ok(CaptionDispatch {
            window: window_id,
            z_index,
            action,
            drag,
        })
    }

    /// Pointer motion while a drag may be active.
    pub fn pointer_move(&mut self, pointer_id: u32, position: Position) -> WindowResult<DragMove> {
        let transition = self.drag.track(pointer_id, position);
        let Some((window, dx, dy)) = transition
            .movement()
            .map(|(window, dx, dy)| (window.clone(), dx, dy))
        else {
            return Ok(DragMove {
                transition,
                position: None,
            });
        };

        let live = self
            .registry
            .get(window.as_str())
            .filter(|entry| self.surface.contains(&entry.chrome().root));
        let Some(entry) = live else {
            tracing::warn!(
                target: "divwin.drag",
                window = %window,
                "dragged window is gone, ending drag"
            );
            return Ok(DragMove {
                transition: self.drag.end(),
                position: None,
            });
        };
        let root = entry.chrome().root.clone();
        let parent = entry.parent().cloned();

        let rect = self.surface.offset_rect(&root)?;
        let container = self.container_info(parent.as_ref())?;
        let next = contain_in(rect.position().offset(dx, dy), rect.size(), container);
        self.surface
            .set_style(&root, StyleProperty::Left, &Length::px(next.x))?;
        self.surface
            .set_style(&root, StyleProperty::Top, &Length::px(next.y))?;
        tracing::trace!(
            target: "divwin.drag",
            window = %window,
            x = next.x,
            y = next.y,
            "window dragged"
        );
        Ok(DragMove {
            transition,
            position: Some(next),
        })
    }

    /// Pointer release. Ends any active drag.
    pub fn pointer_up(&mut self, pointer_id: u32, position: Position) -> DragTransition {
        tracing::trace!(
            target: "divwin.drag",
            pointer_id,
            x = position.x,
            y = position.y,
            "pointer up"
        );
        self.drag.end()
    }

    /// End the active drag without a pointer-up (focus loss, cancel).
    pub fn cancel_drag(&mut self) -> DragTransition {
        self.drag.end()
    }

    // ---- Layout persistence ----

    /// Persist every live window under `scope` (the whole document for
    /// `None`).
    pub fn save_layout(&mut self, scope: Option<&str>) -> WindowResult<LayoutSaveReport> {
        let key = self.config.layout_key(scope);
        let roots = self.surface.window_roots(scope)?;
        let mut records = Vec::with_capacity(roots.len());
        let mut skipped = 0;
        for root in &roots {
            let Some(window) = self.registry.find_by_root(root) else {
                skipped += 1;
                continue;
            };
            records.push(WindowStateRecord::capture(
                window.id().as_str(),
                window.mode(),
                window.saved_bounds(),
                self.inline_bounds(root)?,
            ));
        }
        let payload = encode_layout(&records).map_err(WindowError::Serialize)?;
        self.store.set(&key, &payload)?;
        tracing::info!(
            target: "divwin.layout",
            key = %key,
            saved = records.len(),
            skipped,
            "layout saved"
        );
        Ok(LayoutSaveReport {
            key,
            saved: records.len(),
            skipped,
        })
    }

    /// Replay the layout stored for `scope` onto live windows.
    ///
    /// A missing or unparsable payload is treated as no saved layout.
    pub fn load_layout(&mut self, scope: Option<&str>) -> WindowResult<LayoutLoadReport> {
        let key = self.config.layout_key(scope);
        let Some(text) = self.store.get(&key)? else {
            tracing::debug!(target: "divwin.layout", key = %key, "no stored layout");
            return Ok(LayoutLoadReport::empty(key));
        };
        let Some(records) = decode_layout(&key, &text) else {
            return Ok(LayoutLoadReport::empty(key));
        };

        let mut applied = 0;
        let mut skipped = 0;
        for record in records {
            let Some(window) = self.registry.get(&record.id) else {
                tracing::debug!(target: "divwin.layout", window = %record.id, "record has no live window");
                skipped += 1;
                continue;
            };
            let root = window.chrome().root.clone();
            if !self.surface.contains(&root) {
                skipped += 1;
                continue;
            }
            let Some(mode) = record.mode(window.options().move_minimized_to_bottom) else {
                tracing::warn!(
                    target: "divwin.layout",
                    window = %record.id,
                    "record is both minimized and maximized, skipping"
                );
                skipped += 1;
                continue;
            };

            self.write_bounds(&root, &record.bounds())?;
            let window = self.entry_mut(&record.id)?;
            window.set_mode(mode);
            window.set_saved_bounds(record.saved_bounds());
            self.apply_affordances(&record.id)?;
            self.release_drag_if_disabled(&record.id, mode);
            applied += 1;
        }
        tracing::info!(
            target: "divwin.layout",
            key = %key,
            applied,
            skipped,
            "layout loaded"
        );
        Ok(LayoutLoadReport {
            key,
            found: true,
            applied,
            skipped,
        })
    }

    // ---- Construction ----

    fn construct(
        &mut self,
        id: &str,
        explicit: Option<WindowOptions>,
        parent: Option<WindowId>,
    ) -> WindowResult<()> {
        if !self.surface.contains(id) {
            return Err(WindowError::ContainerNotFound { id: id.to_string() });
        }
        if self.registry.contains(id) {
            return Err(WindowError::DuplicateWindow {
                id: WindowId::new(id),
            });
        }

        let declared = self.surface.attribute(id, &self.config.options_attribute)?;
        let (options, source) = resolve_options(id, explicit, declared.as_deref());
        let caption = self
            .surface
            .attribute(id, &self.config.caption_attribute)?
            .unwrap_or_default();

        let ids = ChromeIds::for_window(id);
        if self.surface.contains(&ids.root) {
            return Err(SurfaceError::DuplicateElement { id: ids.root }.into());
        }

        let mut home = None;
        if let Some(parent) = &parent {
            let content = self.entry(parent.as_str())?.chrome().content.clone();
            if !self.surface.is_descendant_of(id, &content)? {
                home = self.surface.parent(id)?;
                self.surface.append_child(&content, id)?;
            }
        }

        let nested = parent.is_some();
        if let Err(err) = self.assemble(&ids, options, &caption, parent) {
            self.registry.remove(id);
            if let Err(unwind) = self.unwind_construction(&ids, home.as_deref()) {
                tracing::warn!(
                    target: "divwin.window",
                    window = id,
                    error = %unwind,
                    "construction rollback incomplete"
                );
            }
            return Err(err);
        }

        tracing::info!(
            target: "divwin.window",
            window = id,
            nested,
            source = ?source,
            "window constructed"
        );
        Ok(())
    }

    fn assemble(
        &mut self,
        ids: &ChromeIds,
        options: WindowOptions,
        caption: &str,
        parent: Option<WindowId>,
    ) -> WindowResult<()> {
        chrome::build(&mut self.surface, ids)?;
        for kind in ControlKind::ALL {
            chrome::set_control_visible(
                &mut self.surface,
                ids,
                kind,
                options.control_enabled(kind),
            )?;
        }
        self.surface.set_inner_html(&ids.caption, caption)?;

        let id = ids.container.clone();
        self.registry.register(DivWindow::new(
            WindowId::new(&id),
            ids.clone(),
            options.clone(),
            parent,
        ))?;
        self.apply_options(&id, &options)
    }

    /// Put a partially decorated container back the way it was found.
    ///
    /// A container that had no parent element before relocation stays in
    /// the parent window's content region.
    fn unwind_construction(&mut self, ids: &ChromeIds, home: Option<&str>) -> SurfaceResult<()> {
        if self.surface.contains(&ids.root) {
            if self.surface.contains(&ids.content)
                && self.surface.is_descendant_of(&ids.content, &ids.root)?
            {
                self.surface.move_children(&ids.content, &ids.container)?;
            }
            self.surface.remove(&ids.root)?;
        }
        if let Some(home) = home {
            self.surface.append_child(home, &ids.container)?;
        }
        Ok(())
    }

    fn apply_options(&mut self, id: &str, options: &WindowOptions) -> WindowResult<()> {
        let root = self.entry(id)?.chrome().root.clone();
        let geometry = [
            (StyleProperty::Left, &options.left),
            (StyleProperty::Top, &options.top),
            (StyleProperty::Width, &options.width),
            (StyleProperty::Height, &options.height),
        ];
        for (property, value) in geometry {
            if let Some(value) = value {
                self.surface.set_style(&root, property, value)?;
            }
        }
        if let Some(color) = &options.color {
            self.set_color(id, color)?;
        }
        self.apply_affordances(id)?;

        if options.is_minimized && options.is_maximized {
            tracing::warn!(
                target: "divwin.options",
                window = id,
                "both initial minimize and maximize requested, maximizing"
            );
        }
        match options.initial_mode() {
            InitialMode::Normal => {}
            InitialMode::Minimized => {
                self.minimize(id, false)?;
            }
            InitialMode::Maximized => {
                self.maximize(id)?;
            }
        }
        Ok(())
    }

    // ---- Mutators ----

    fn set_color(&mut self, id: &str, color: &str) -> WindowResult<()> {
        let ids = self.entry(id)?.chrome().clone();
        self.surface.set_style(
            &ids.root,
            StyleProperty::Border,
            &format!("1px solid {color}"),
        )?;
        self.surface
            .set_style(&ids.caption_bar, StyleProperty::BackgroundColor, color)?;
        Ok(())
    }

    fn set_root_style(&mut self, id: &str, property: StyleProperty, value: &str) -> WindowResult<()> {
        let root = self.entry(id)?.chrome().root.clone();
        self.surface.set_style(&root, property, value)?;
        Ok(())
    }

    // ---- State machine ----

    fn minimize(&mut self, id: &str, at_position: bool) -> WindowResult<Option<DragTransition>> {
        let window = self.entry(id)?;
        let root = window.chrome().root.clone();
        let parent = window.parent().cloned();
        let parked = window.options().move_minimized_to_bottom && !at_position;

        let saved = self.capture_bounds(&root)?;
        self.surface.set_style(
            &root,
            StyleProperty::Height,
            &Length::px(self.config.minimized_height),
        )?;

        if parked {
            let container = self.container_info(parent.as_ref())?;
            let row = container.size.h - self.config.caption_height - self.config.tray_margin;
            let left = self.find_available_minimized_slot(id, row)?;
            self.surface.set_style(
                &root,
                StyleProperty::Width,
                &Length::px(self.config.minimized_width),
            )?;
            self.surface
                .set_style(&root, StyleProperty::Top, &Length::px(row))?;
            self.surface
                .set_style(&root, StyleProperty::Left, &Length::px(left))?;
            tracing::debug!(target: "divwin.window", window = id, row, left, "window parked");
        }

        let mode = WindowMode::Minimized { parked };
        self.enter_mode(id, mode, Some(saved))
    }

    fn maximize(&mut self, id: &str) -> WindowResult<Option<DragTransition>> {
        let window = self.entry(id)?;
        let root = window.chrome().root.clone();
        let parent_root = match window.parent() {
            Some(parent) => Some(self.entry(parent.as_str())?.chrome().root.clone()),
            None => None,
        };

        let saved = self.capture_bounds(&root)?;
        let padding = Length::px(self.config.maximized_padding);
        let extent = self.config.maximized_extent.clone();
        match parent_root {
            Some(parent_root) => {
                let parent_height = self.surface.client_size(&parent_root)?.h;
                let height = parent_height
                    - self.config.caption_height
                    - self.config.nested_maximize_margin;
                self.write_bounds(
                    &root,
                    &InlineBounds {
                        left: padding,
                        top: Length::px(self.config.caption_height),
                        width: extent,
                        height: Length::px(height),
                    },
                )?;
            }
            None => {
                self.write_bounds(
                    &root,
                    &InlineBounds {
                        left: padding.clone(),
                        top: padding,
                        width: extent.clone(),
                        height: extent,
                    },
                )?;
            }
        }
        self.enter_mode(id, WindowMode::Maximized, Some(saved))
    }

    fn restore(&mut self, id: &str) -> WindowResult<()> {
        let window = self.entry(id)?;
        let root = window.chrome().root.clone();
        if let Some(saved) = window.saved_bounds().cloned() {
            self.write_bounds(
                &root,
                &InlineBounds {
                    left: saved.left,
                    top: saved.top,
                    width: Length::px(saved.width),
                    height: Length::px(saved.height),
                },
            )?;
        }
        self.entry_mut(id)?.set_mode(WindowMode::Normal);
        self.apply_affordances(id)?;
        tracing::debug!(target: "divwin.window", window = id, "window restored");
        Ok(())
    }

    fn minimize_restore(&mut self, id: &str) -> WindowResult<Option<DragTransition>> {
        if self.entry(id)?.is_minimized() {
            self.restore(id)?;
            Ok(None)
        } else {
            self.minimize(id, false)
        }
    }

    fn maximize_restore(&mut self, id: &str) -> WindowResult<Option<DragTransition>> {
        if self.entry(id)?.is_maximized() {
            self.restore(id)?;
            Ok(None)
        } else {
            self.maximize(id)
        }
    }

    fn enter_mode(
        &mut self,
        id: &str,
        mode: WindowMode,
        saved: Option<SavedBounds>,
    ) -> WindowResult<Option<DragTransition>> {
        let window = self.entry_mut(id)?;
        window.set_saved_bounds(saved);
        window.set_mode(mode);
        self.apply_affordances(id)?;
        tracing::debug!(
            target: "divwin.window",
            window = id,
            mode = mode.as_str(),
            "window mode changed"
        );
        Ok(self.release_drag_if_disabled(id, mode))
    }

    fn mode_changed(&self, id: &str) -> WindowResult<CaptionAction> {
        Ok(CaptionAction::ModeChanged {
            mode: self.entry(id)?.mode(),
        })
    }

    fn close_window(&mut self, id: &str) -> WindowResult<ClosedWindow> {
        let root = self.entry(id)?.chrome().root.clone();
        let descendants = self.descendants_of(id);
        let drag = std::iter::once(id)
            .chain(descendants.iter().map(WindowId::as_str))
            .map(|window| self.drag.end_for(window))
            .find(|transition| !transition.is_noop());
        if self.surface.contains(&root) {
            self.surface.remove(&root)?;
        }
        for child in &descendants {
            self.registry.remove(child.as_str());
        }
        let window = self
            .registry
            .remove(id)
            .ok_or_else(|| WindowError::unknown(id))?;
        tracing::info!(
            target: "divwin.window",
            window = id,
            descendants = descendants.len(),
            remaining = self.registry.len(),
            "window closed"
        );
        Ok(ClosedWindow {
            window,
            descendants,
            drag,
        })
    }

    /// Every window nested below `id`, parents before their children.
    fn descendants_of(&self, id: &str) -> Vec<WindowId> {
        let mut found: Vec<WindowId> = Vec::new();
        let mut next = 0;
        let mut parent = WindowId::new(id);
        loop {
            found.extend(
                self.registry
                    .children_of(parent.as_str())
                    .map(|child| child.id().clone()),
            );
            let Some(child) = found.get(next) else {
                return found;
            };
            parent = child.clone();
            next += 1;
        }
    }

    // ---- Stacking and tray ----

    fn update_z_order(&mut self, id: &str) -> WindowResult<i32> {
        let root = self.entry(id)?.chrome().root.clone();
        let scope = self.scope_of(id)?;
        let roots = self.surface.window_roots(scope.as_deref())?;
        let indices = roots
            .iter()
            .map(|root| self.surface.computed_z_index(root))
            .collect::<SurfaceResult<Vec<_>>>()?;
        let next = arrange::next_z_index(indices);
        self.surface
            .set_style(&root, StyleProperty::ZIndex, &next.to_string())?;
        tracing::trace!(target: "divwin.zorder", window = id, z_index = next, "window raised");
        Ok(next)
    }

    fn find_available_minimized_slot(&self, id: &str, row_y: i32) -> WindowResult<i32> {
        let root = &self.entry(id)?.chrome().root;
        let scope = self.scope_of(id)?;
        let rects = self
            .surface
            .window_roots(scope.as_deref())?
            .iter()
            .filter(|candidate| *candidate != root)
            .map(|candidate| self.surface.offset_rect(candidate))
            .collect::<SurfaceResult<Vec<_>>>()?;
        Ok(arrange::available_slot(
            rects,
            row_y,
            self.config.minimized_width,
        ))
    }

    // ---- Helpers ----

    fn entry(&self, id: &str) -> WindowResult<&DivWindow> {
        self.registry
            .get(id)
            .ok_or_else(|| WindowError::unknown(id))
    }

    fn entry_mut(&mut self, id: &str) -> WindowResult<&mut DivWindow> {
        self.registry
            .get_mut(id)
            .ok_or_else(|| WindowError::unknown(id))
    }

    /// Content region of the parent window; `None` for top-level windows.
    fn scope_of(&self, id: &str) -> WindowResult<Option<String>> {
        match self.entry(id)?.parent() {
            Some(parent) => Ok(Some(self.entry(parent.as_str())?.chrome().content.clone())),
            None => Ok(None),
        }
    }

    fn container_info(&self, parent: Option<&WindowId>) -> WindowResult<ContainerInfo> {
        match parent {
            None => Ok(ContainerInfo::top_level(self.surface.viewport_size())),
            Some(parent) => {
                let root = &self.entry(parent.as_str())?.chrome().root;
                let size = self.surface.offset_rect(root)?.size();
                Ok(ContainerInfo::nested(size, self.config.caption_height))
            }
        }
    }

    fn capture_bounds(&self, root: &str) -> WindowResult<SavedBounds> {
        let size = self.surface.client_size(root)?;
        Ok(SavedBounds {
            left: self.surface.style(root, StyleProperty::Left)?,
            top: self.surface.style(root, StyleProperty::Top)?,
            width: size.w,
            height: size.h,
        })
    }

    fn inline_bounds(&self, root: &str) -> WindowResult<InlineBounds> {
        Ok(InlineBounds {
            left: self.surface.style(root, StyleProperty::Left)?,
            top: self.surface.style(root, StyleProperty::Top)?,
            width: self.surface.style(root, StyleProperty::Width)?,
            height: self.surface.style(root, StyleProperty::Height)?,
        })
    }

    fn write_bounds(&mut self, root: &str, bounds: &InlineBounds) -> WindowResult<()> {
        self.surface
            .set_style(root, StyleProperty::Left, &bounds.left)?;
        self.surface.set_style(root, StyleProperty::Top, &bounds.top)?;
        self.surface
            .set_style(root, StyleProperty::Width, &bounds.width)?;
        self.surface
            .set_style(root, StyleProperty::Height, &bounds.height)?;
        Ok(())
    }

    /// Mirror the mode's resize and drag affordances onto the chrome.
    fn apply_affordances(&mut self, id: &str) -> WindowResult<()> {
        let window = self.entry(id)?;
        let mode = window.mode();
        let root = window.chrome().root.clone();
        let drag_strip = window.chrome().drag_strip.clone();
        let resize = if mode.resize_enabled() { "both" } else { "none" };
        let cursor = if mode.drag_enabled() { "move" } else { "default" };
        self.surface.set_style(&root, StyleProperty::Resize, resize)?;
        self.surface
            .set_style(&drag_strip, StyleProperty::Cursor, cursor)?;
        Ok(())
    }

    fn release_drag_if_disabled(&mut self, id: &str, mode: WindowMode) -> Option<DragTransition> {
        if mode.drag_enabled() {
            return None;
        }
        let transition = self.drag.end_for(id);
        (!transition.is_noop()).then_some(transition)
    }
}

/// Mutable handle to one live window.
///
/// Mutators write straight to the surface and return the handle for
/// chaining. Geometry setters take CSS unit strings verbatim.
#[derive(Debug)]
pub struct WindowMut<'a, S, K> {
    host: &'a mut WindowHost<S, K>,
    id: WindowId,
}

impl<'a, S: Surface, K: KeyValueStore> WindowMut<'a, S, K> {
    fn new(host: &'a mut WindowHost<S, K>, id: &str) -> Self {
        Self {
            host,
            id: WindowId::new(id),
        }
    }

    #[must_use]
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    /// Registry entry backing this handle.
    pub fn state(&self) -> WindowResult<&DivWindow> {
        self.host.entry(self.id.as_str())
    }

    pub fn mode(&self) -> WindowResult<WindowMode> {
        Ok(self.state()?.mode())
    }

    pub fn set_caption(&mut self, text: &str) -> WindowResult<&mut Self> {
        let caption = self.state()?.chrome().caption.clone();
        self.host.surface.set_inner_html(&caption, text)?;
        Ok(self)
    }

    /// Border and caption-bar background color.
    pub fn set_color(&mut self, color: &str) -> WindowResult<&mut Self> {
        self.host.set_color(self.id.as_str(), color)?;
        Ok(self)
    }

    pub fn set_content(&mut self, html: &str) -> WindowResult<&mut Self> {
        let content = self.state()?.chrome().content.clone();
        self.host.surface.set_inner_html(&content, html)?;
        Ok(self)
    }

    pub fn set_position(&mut self, left: &str, top: &str) -> WindowResult<&mut Self> {
        self.host
            .set_root_style(self.id.as_str(), StyleProperty::Left, left)?;
        self.host
            .set_root_style(self.id.as_str(), StyleProperty::Top, top)?;
        Ok(self)
    }

    pub fn set_size(&mut self, width: &str, height: &str) -> WindowResult<&mut Self> {
        self.set_width(width)?.set_height(height)
    }

    pub fn set_width(&mut self, width: &str) -> WindowResult<&mut Self> {
        self.host
            .set_root_style(self.id.as_str(), StyleProperty::Width, width)?;
        Ok(self)
    }

    pub fn set_height(&mut self, height: &str) -> WindowResult<&mut Self> {
        self.host
            .set_root_style(self.id.as_str(), StyleProperty::Height, height)?;
        Ok(self)
    }

    /// Rendered offset of the window box.
    pub fn position(&self) -> WindowResult<Position> {
        let root = &self.state()?.chrome().root;
        Ok(self.host.surface.offset_rect(root)?.position())
    }

    /// Rendered client size of the window box.
    pub fn size(&self) -> WindowResult<Size> {
        let root = &self.state()?.chrome().root;
        Ok(self.host.surface.client_size(root)?)
    }

    /// Minimize; parks in the tray row unless `at_position` or the window
    /// opted out of parking.
    pub fn minimize(&mut self, at_position: bool) -> WindowResult<&mut Self> {
        self.host.minimize(self.id.as_str(), at_position)?;
        Ok(self)
    }

    pub fn maximize(&mut self) -> WindowResult<&mut Self> {
        self.host.maximize(self.id.as_str())?;
        Ok(self)
    }

    /// Return to normal, re-applying the bounds saved on the last minimize
    /// or maximize.
    pub fn restore(&mut self) -> WindowResult<&mut Self> {
        self.host.restore(self.id.as_str())?;
        Ok(self)
    }

    pub fn minimize_restore(&mut self) -> WindowResult<&mut Self> {
        self.host.minimize_restore(self.id.as_str())?;
        Ok(self)
    }

    pub fn maximize_restore(&mut self) -> WindowResult<&mut Self> {
        self.host.maximize_restore(self.id.as_str())?;
        Ok(self)
    }

    /// Put this window in front of every window in its scope.
    pub fn update_z_order(&mut self) -> WindowResult<i32> {
        self.host.update_z_order(self.id.as_str())
    }

    /// Tray slot this window would take in the row at `row_y`.
    pub fn find_available_minimized_slot(&self, row_y: i32) -> WindowResult<i32> {
        self.host
            .find_available_minimized_slot(self.id.as_str(), row_y)
    }

    /// Build a window nested inside this window's content region.
    pub fn create(
        &mut self,
        id: &str,
        options: Option<WindowOptions>,
    ) -> WindowResult<WindowMut<'_, S, K>> {
        self.host.construct(id, options, Some(self.id.clone()))?;
        Ok(WindowMut::new(&mut *self.host, id))
    }

    /// Remove the window box and its registry entry.
    pub fn close(self) -> WindowResult<ClosedWindow> {
        self.host.close_window(self.id.as_str())
    }
}
