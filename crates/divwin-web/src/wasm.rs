#![forbid(unsafe_code)]

//! `wasm-bindgen` exports backed by the browser DOM and `localStorage`.
//!
//! Only compiled on `wasm32` targets.

use js_sys::{Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Storage};

use divwin_core::{
    ElementRole, KeyValueStore, Position, Rect, Size, StoreError, StoreResult, StyleProperty,
    Surface, SurfaceError, SurfaceResult,
};
use divwin_window::{HostConfig, WindowHost, WindowMut, WindowOptions, WindowResult};

use crate::pointer_adapter::{
    PointerButton, WindowPointerAdapter, WindowPointerConfig, WindowPointerDispatch,
    WindowPointerOutcome, caption_target_from_label,
};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn host_error(err: JsValue) -> SurfaceError {
    SurfaceError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

// ---- Surface ----

/// [`Surface`] over the live document.
///
/// Window roots carry the marker attribute; every created element also gets a
/// `divwin-<role>` class for stylesheets.
pub struct DomSurface {
    window: web_sys::Window,
    document: Document,
    marker_attribute: String,
}

impl DomSurface {
    pub fn new(marker_attribute: &str) -> SurfaceResult<Self> {
        let window = web_sys::window().ok_or_else(|| SurfaceError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SurfaceError::Host("no document".into()))?;
        Ok(Self {
            window,
            document,
            marker_attribute: marker_attribute.to_string(),
        })
    }

    fn element(&self, id: &str) -> SurfaceResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| SurfaceError::not_found(id))
    }

    fn html_element(&self, id: &str) -> SurfaceResult<HtmlElement> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SurfaceError::Host(format!("'{id}' is not an HTML element")))
    }
}

impl Surface for DomSurface {
    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn parent(&self, id: &str) -> SurfaceResult<Option<String>> {
        Ok(self
            .element(id)?
            .parent_element()
            .map(|parent| parent.id())
            .filter(|parent| !parent.is_empty()))
    }

    fn attribute(&self, id: &str, name: &str) -> SurfaceResult<Option<String>> {
        Ok(self.element(id)?.get_attribute(name))
    }

    fn create_element(&mut self, parent: &str, id: &str, role: ElementRole) -> SurfaceResult<()> {
        if self.contains(id) {
            return Err(SurfaceError::DuplicateElement { id: id.to_string() });
        }
        let parent = self.element(parent)?;
        let element = self.document.create_element("div").map_err(host_error)?;
        element.set_id(id);
        element.set_class_name(&format!("divwin-{}", role.label()));
        if role.is_marked() {
            element
                .set_attribute(&self.marker_attribute, "")
                .map_err(host_error)?;
        }
        parent.append_child(&element).map_err(host_error)?;
        Ok(())
    }

    fn move_children(&mut self, from: &str, to: &str) -> SurfaceResult<()> {
        let source = self.element(from)?;
        let destination = self.element(to)?;
        let children = source.child_nodes();
        let mut moved = Vec::new();
        for index in 0..children.length() {
            let Some(child) = children.item(index) else {
                continue;
            };
            // The branch holding the destination stays where it is.
            if !child.contains(Some(destination.as_ref())) {
                moved.push(child);
            }
        }
        for child in moved {
            destination.append_child(&child).map_err(host_error)?;
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &str, id: &str) -> SurfaceResult<()> {
        let parent_element = self.element(parent)?;
        let child = self.element(id)?;
        if child.contains(Some(parent_element.as_ref())) {
            return Err(SurfaceError::InvalidParent {
                id: id.to_string(),
                parent: parent.to_string(),
            });
        }
        parent_element.append_child(&child).map_err(host_error)?;
        Ok(())
    }

    fn inner_html(&self, id: &str) -> SurfaceResult<String> {
        Ok(self.element(id)?.inner_html())
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> SurfaceResult<()> {
        self.element(id)?.set_inner_html(html);
        Ok(())
    }

    fn style(&self, id: &str, property: StyleProperty) -> SurfaceResult<String> {
        self.html_element(id)?
            .style()
            .get_property_value(property.css_name())
            .map_err(host_error)
    }

    fn set_style(&mut self, id: &str, property: StyleProperty, value: &str) -> SurfaceResult<()> {
        let style = self.html_element(id)?.style();
        if value.is_empty() {
            style
                .remove_property(property.css_name())
                .map_err(host_error)?;
        } else {
            style
                .set_property(property.css_name(), value)
                .map_err(host_error)?;
        }
        Ok(())
    }

    fn computed_z_index(&self, id: &str) -> SurfaceResult<Option<i32>> {
        let element = self.element(id)?;
        let Some(computed) = self
            .window
            .get_computed_style(&element)
            .map_err(host_error)?
        else {
            return Ok(None);
        };
        let value = computed.get_property_value("z-index").map_err(host_error)?;
        Ok(value.trim().parse::<i32>().ok())
    }

    fn offset_rect(&self, id: &str) -> SurfaceResult<Rect> {
        let element = self.html_element(id)?;
        Ok(Rect::new(
            element.offset_left(),
            element.offset_top(),
            element.offset_width(),
            element.offset_height(),
        ))
    }

    fn client_size(&self, id: &str) -> SurfaceResult<Size> {
        let element = self.element(id)?;
        Ok(Size::new(element.client_width(), element.client_height()))
    }

    fn viewport_size(&self) -> Size {
        let dimension = |value: Result<JsValue, JsValue>| {
            value
                .ok()
                .and_then(|value| value.as_f64())
                .map_or(0, |value| value as i32)
        };
        Size::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn window_roots(&self, scope: Option<&str>) -> SurfaceResult<Vec<String>> {
        let selector = format!("[{}]", self.marker_attribute);
        let nodes = match scope {
            Some(scope) => self.element(scope)?.query_selector_all(&selector),
            None => self.document.query_selector_all(&selector),
        }
        .map_err(host_error)?;
        let mut roots = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            if let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                roots.push(element.id());
            }
        }
        Ok(roots)
    }

    fn remove(&mut self, id: &str) -> SurfaceResult<()> {
        self.element(id)?.remove();
        Ok(())
    }

    fn is_descendant_of(&self, id: &str, ancestor: &str) -> SurfaceResult<bool> {
        let element = self.element(id)?;
        let ancestor = self.element(ancestor)?;
        Ok(!element.is_same_node(Some(ancestor.as_ref()))
            && ancestor.contains(Some(element.as_ref())))
    }
}

// ---- Store ----

/// [`KeyValueStore`] backed by `window.localStorage`.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> StoreResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| StoreError::Backend {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StoreError::Backend {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }
}

// ---- Exports ----

/// Serde's snake_case name for a unit-like enum value.
fn snake_label<T: serde::Serialize>(value: T) -> JsValue {
    serde_json::to_value(value)
        .ok()
        .and_then(|value| value.as_str().map(JsValue::from_str))
        .unwrap_or(JsValue::NULL)
}

fn dispatch_to_js(dispatch: &WindowPointerDispatch) -> JsValue {
    let obj = Object::new();
    let log = &dispatch.log;
    set_js(&obj, "accepted", (!dispatch.is_ignored()).into());
    set_js(&obj, "phase", snake_label(log.phase));
    match log.sequence {
        Some(sequence) => set_js(&obj, "sequence", JsValue::from_f64(sequence as f64)),
        None => set_js(&obj, "sequence", JsValue::NULL),
    }
    match &log.window {
        Some(window) => set_js(&obj, "window", JsValue::from_str(window.as_str())),
        None => set_js(&obj, "window", JsValue::NULL),
    }
    match dispatch.command {
        Some(command) => set_js(&obj, "command", JsValue::from_str(command.as_str())),
        None => set_js(&obj, "command", JsValue::NULL),
    }
    match log.outcome {
        WindowPointerOutcome::Forwarded => set_js(&obj, "ignoredReason", JsValue::NULL),
        WindowPointerOutcome::Ignored(reason) => {
            set_js(&obj, "ignoredReason", snake_label(reason));
        }
    }
    match dispatch.position {
        Some(Position { x, y }) => {
            set_js(&obj, "x", JsValue::from_f64(f64::from(x)));
            set_js(&obj, "y", JsValue::from_f64(f64::from(y)));
        }
        None => {
            set_js(&obj, "x", JsValue::NULL);
            set_js(&obj, "y", JsValue::NULL);
        }
    }
    if let Some(caption) = &dispatch.caption {
        set_js(&obj, "zIndex", JsValue::from_f64(f64::from(caption.z_index)));
    }
    obj.into()
}

fn parse_options(json: Option<String>) -> Result<Option<WindowOptions>, JsError> {
    json.map(|text| WindowOptions::from_declared(&text))
        .transpose()
        .map_err(JsError::from)
}

fn button_from_dom(code: i16) -> Result<PointerButton, JsError> {
    PointerButton::from_dom(code).ok_or_else(|| JsError::new(&format!("unknown button {code}")))
}

type DomHost = WindowHost<DomSurface, LocalStorageStore>;

/// Browser-side window manager.
///
/// The JS host forwards caption `pointerdown` events and, while a drag is
/// active, document-level `pointermove`/`pointerup`. Each pointer call returns
/// `{ accepted, sequence, window, command, ignoredReason, x, y }`; `command`
/// tells the host to `install` or `remove` its document listeners.
#[wasm_bindgen]
pub struct DivWindowApp {
    inner: WindowPointerAdapter<DomSurface, LocalStorageStore>,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

impl DivWindowApp {
    fn host(&mut self) -> &mut DomHost {
        self.inner.host_mut()
    }

    fn with_window<F>(&mut self, id: &str, f: F) -> Result<(), JsError>
    where
        F: FnOnce(&mut WindowMut<'_, DomSurface, LocalStorageStore>) -> WindowResult<()>,
    {
        let mut window = self.host().window_mut(id)?;
        f(&mut window)?;
        Ok(())
    }
}

#[wasm_bindgen]
impl DivWindowApp {
    /// Create an app over the current document and `localStorage`.
    ///
    /// `config_json` optionally overrides [`HostConfig`] fields.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DivWindowApp, JsError> {
        install_panic_hook();
        let config = match config_json {
            Some(text) => HostConfig::from_json_str(&text)?,
            None => HostConfig::default(),
        };
        let surface = DomSurface::new(&config.marker_attribute)?;
        let store = LocalStorageStore::new()?;
        let host = WindowHost::with_config(surface, store, config)?;
        Ok(Self {
            inner: WindowPointerAdapter::new(host, WindowPointerConfig::default()),
        })
    }

    /// Decorate container `id` as a top-level window.
    pub fn open(&mut self, id: &str, options_json: Option<String>) -> Result<(), JsError> {
        let options = parse_options(options_json)?;
        self.host().open(id, options)?;
        Ok(())
    }

    /// Build `id` as a window nested inside `parent`.
    pub fn create(
        &mut self,
        parent: &str,
        id: &str,
        options_json: Option<String>,
    ) -> Result<(), JsError> {
        let options = parse_options(options_json)?;
        self.host().window_mut(parent)?.create(id, options)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setCaption)]
    pub fn set_caption(&mut self, id: &str, text: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.set_caption(text).map(|_| ()))
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, id: &str, color: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.set_color(color).map(|_| ()))
    }

    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, id: &str, html: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.set_content(html).map(|_| ()))
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, id: &str, left: &str, top: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.set_position(left, top).map(|_| ()))
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, id: &str, width: &str, height: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.set_size(width, height).map(|_| ()))
    }

    #[wasm_bindgen(js_name = setWidth)]
    pub fn set_width(&mut self, id: &str, width: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.set_width(width).map(|_| ()))
    }

    #[wasm_bindgen(js_name = setHeight)]
    pub fn set_height(&mut self, id: &str, height: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.set_height(height).map(|_| ()))
    }

    /// Minimize; `at_position` keeps the window where it is instead of
    /// parking it in the tray row.
    pub fn minimize(&mut self, id: &str, at_position: bool) -> Result<(), JsError> {
        self.with_window(id, |w| w.minimize(at_position).map(|_| ()))
    }

    pub fn maximize(&mut self, id: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.maximize().map(|_| ()))
    }

    pub fn restore(&mut self, id: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.restore().map(|_| ()))
    }

    #[wasm_bindgen(js_name = minimizeRestore)]
    pub fn minimize_restore(&mut self, id: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.minimize_restore().map(|_| ()))
    }

    #[wasm_bindgen(js_name = maximizeRestore)]
    pub fn maximize_restore(&mut self, id: &str) -> Result<(), JsError> {
        self.with_window(id, |w| w.maximize_restore().map(|_| ()))
    }

    /// Raise `id` above its siblings; returns the new stacking index.
    #[wasm_bindgen(js_name = updateZOrder)]
    pub fn update_z_order(&mut self, id: &str) -> Result<i32, JsError> {
        Ok(self.host().window_mut(id)?.update_z_order()?)
    }

    pub fn close(&mut self, id: &str) -> Result<(), JsError> {
        self.host().window_mut(id)?.close()?;
        Ok(())
    }

    /// Caption pointer-down. `target` is `caption`, `drag`, `close`,
    /// `minimize` or `maximize`; `button` is the DOM `PointerEvent.button`.
    #[wasm_bindgen(js_name = captionPointerDown)]
    pub fn caption_pointer_down(
        &mut self,
        id: &str,
        target: &str,
        pointer_id: u32,
        button: i16,
        x: i32,
        y: i32,
    ) -> Result<JsValue, JsError> {
        let target = caption_target_from_label(target)
            .ok_or_else(|| JsError::new(&format!("unknown caption target '{target}'")))?;
        let button = button_from_dom(button)?;
        let dispatch =
            self.inner
                .pointer_down(id, target, pointer_id, button, Position::new(x, y))?;
        Ok(dispatch_to_js(&dispatch))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, pointer_id: u32, x: i32, y: i32) -> Result<JsValue, JsError> {
        let dispatch = self.inner.pointer_move(pointer_id, Position::new(x, y))?;
        Ok(dispatch_to_js(&dispatch))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: i16,
        x: i32,
        y: i32,
    ) -> Result<JsValue, JsError> {
        let button = button_from_dom(button)?;
        let dispatch = self.inner.pointer_up(pointer_id, button, Position::new(x, y));
        Ok(dispatch_to_js(&dispatch))
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> JsValue {
        dispatch_to_js(&self.inner.pointer_cancel(pointer_id))
    }

    pub fn blur(&mut self) -> JsValue {
        dispatch_to_js(&self.inner.blur())
    }

    #[wasm_bindgen(js_name = visibilityHidden)]
    pub fn visibility_hidden(&mut self) -> JsValue {
        dispatch_to_js(&self.inner.visibility_hidden())
    }

    #[wasm_bindgen(js_name = activePointerId)]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.inner.active_pointer_id()
    }

    /// Persist windows under `scope` (document-wide when omitted); returns
    /// the number of records written.
    #[wasm_bindgen(js_name = saveLayout)]
    pub fn save_layout(&mut self, scope: Option<String>) -> Result<u32, JsError> {
        let report = self.host().save_layout(scope.as_deref())?;
        Ok(u32::try_from(report.saved).unwrap_or(u32::MAX))
    }

    /// Replay the stored layout for `scope`; returns the number of windows
    /// updated.
    #[wasm_bindgen(js_name = loadLayout)]
    pub fn load_layout(&mut self, scope: Option<String>) -> Result<u32, JsError> {
        let report = self.host().load_layout(scope.as_deref())?;
        Ok(u32::try_from(report.applied).unwrap_or(u32::MAX))
    }

    /// Drain pointer dispatch logs as a JSON array.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.take_logs())?)
    }
}
