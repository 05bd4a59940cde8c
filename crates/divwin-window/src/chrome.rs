#![forbid(unsafe_code)]

//! Window chrome: derived element ids and the structure built around a
//! container.
//!
//! ```text
//! {id}                       container (caller-owned)
//! └─ {id}_windowTemplate     root, marked as a window
//!    ├─ {id}_captionBar
//!    │  ├─ {id}_close
//!    │  ├─ {id}_minimize
//!    │  ├─ {id}_maximize
//!    │  ├─ {id}_windowCaption
//!    │  └─ {id}_windowDraggableArea
//!    └─ {id}_windowContent   receives the container's prior children
//! ```

use divwin_core::{ControlKind, ElementRole, Length, StyleProperty, Surface, SurfaceResult};

/// Left edge of the first control button.
const CONTROL_LEFT: i32 = 2;
/// Horizontal pitch between control buttons.
const CONTROL_PITCH: i32 = 15;
/// Square size of a control button.
const CONTROL_SIZE: i32 = 12;
/// Left edge of the caption text and drag strip, clear of the controls.
const DRAG_STRIP_LEFT: i32 = 65;

/// Element identities of one window's chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeIds {
    pub container: String,
    pub root: String,
    pub caption_bar: String,
    pub caption: String,
    pub drag_strip: String,
    pub content: String,
    pub close: String,
    pub minimize: String,
    pub maximize: String,
}

impl ChromeIds {
    /// Derive chrome identities from a container id.
    #[must_use]
    pub fn for_window(id: &str) -> Self {
        Self {
            container: id.to_string(),
            root: format!("{id}_windowTemplate"),
            caption_bar: format!("{id}_captionBar"),
            caption: format!("{id}_windowCaption"),
            drag_strip: format!("{id}_windowDraggableArea"),
            content: format!("{id}_windowContent"),
            close: format!("{id}_close"),
            minimize: format!("{id}_minimize"),
            maximize: format!("{id}_maximize"),
        }
    }

    /// Identity of a control button.
    #[must_use]
    pub fn control(&self, kind: ControlKind) -> &str {
        match kind {
            ControlKind::Close => &self.close,
            ControlKind::Minimize => &self.minimize,
            ControlKind::Maximize => &self.maximize,
        }
    }
}

/// Create the chrome under `ids.container` and relocate its prior children
/// into the content region.
pub(crate) fn build<S: Surface>(surface: &mut S, ids: &ChromeIds) -> SurfaceResult<()> {
    surface.create_element(&ids.container, &ids.root, ElementRole::WindowRoot)?;
    surface.create_element(&ids.root, &ids.caption_bar, ElementRole::CaptionBar)?;

    for (slot, kind) in (0_i32..).zip(ControlKind::ALL) {
        let id = ids.control(kind);
        surface.create_element(&ids.caption_bar, id, ElementRole::Control(kind))?;
        surface.set_style(
            id,
            StyleProperty::Left,
            &Length::px(CONTROL_LEFT + slot * CONTROL_PITCH),
        )?;
        surface.set_style(id, StyleProperty::Width, &Length::px(CONTROL_SIZE))?;
        surface.set_style(id, StyleProperty::Height, &Length::px(CONTROL_SIZE))?;
    }

    surface.create_element(&ids.caption_bar, &ids.caption, ElementRole::Caption)?;
    surface.set_style(&ids.caption, StyleProperty::Left, &Length::px(DRAG_STRIP_LEFT))?;

    surface.create_element(&ids.caption_bar, &ids.drag_strip, ElementRole::DragStrip)?;
    surface.set_style(&ids.drag_strip, StyleProperty::Left, &Length::px(DRAG_STRIP_LEFT))?;
    surface.set_style(&ids.drag_strip, StyleProperty::Cursor, "move")?;

    surface.create_element(&ids.root, &ids.content, ElementRole::Content)?;
    surface.move_children(&ids.container, &ids.content)
}

/// Show or hide one control button.
pub(crate) fn set_control_visible<S: Surface>(
    surface: &mut S,
    ids: &ChromeIds,
    kind: ControlKind,
    visible: bool,
) -> SurfaceResult<()> {
    let display = if visible { "" } else { "none" };
    surface.set_style(ids.control(kind), StyleProperty::Display, display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use divwin_core::{MemorySurface, Size};

    #[test]
    fn ids_follow_container_name() {
        let ids = ChromeIds::for_window("window1");
        assert_eq!(ids.root, "window1_windowTemplate");
        assert_eq!(ids.caption_bar, "window1_captionBar");
        assert_eq!(ids.caption, "window1_windowCaption");
        assert_eq!(ids.drag_strip, "window1_windowDraggableArea");
        assert_eq!(ids.content, "window1_windowContent");
        assert_eq!(ids.control(ControlKind::Minimize), "window1_minimize");
    }

    #[test]
    fn build_relocates_existing_content() {
        let mut surface = MemorySurface::new(Size::new(800, 600));
        surface.insert_element(None, "w").unwrap();
        surface.append_text("w", "All good men").unwrap();
        surface.insert_element(Some("w"), "w_child").unwrap();

        let ids = ChromeIds::for_window("w");
        build(&mut surface, &ids).unwrap();

        assert_eq!(surface.element_children(Some("w")).unwrap(), vec![ids.root.clone()]);
        assert_eq!(surface.text(&ids.content).unwrap(), "All good men");
        assert_eq!(
            surface.element_children(Some(&ids.content)).unwrap(),
            vec!["w_child".to_string()]
        );
        assert_eq!(
            surface.element_children(Some(&ids.caption_bar)).unwrap(),
            vec![
                "w_close".to_string(),
                "w_minimize".to_string(),
                "w_maximize".to_string(),
                "w_windowCaption".to_string(),
                "w_windowDraggableArea".to_string(),
            ]
        );
    }

    #[test]
    fn controls_get_fixed_positions() {
        let mut surface = MemorySurface::new(Size::new(800, 600));
        surface.insert_element(None, "w").unwrap();
        let ids = ChromeIds::for_window("w");
        build(&mut surface, &ids).unwrap();

        assert_eq!(surface.style("w_close", StyleProperty::Left).unwrap(), "2px");
        assert_eq!(surface.style("w_minimize", StyleProperty::Left).unwrap(), "17px");
        assert_eq!(surface.style("w_maximize", StyleProperty::Left).unwrap(), "32px");
        assert_eq!(
            surface.style(&ids.drag_strip, StyleProperty::Cursor).unwrap(),
            "move"
        );
    }

    #[test]
    fn hidden_control_uses_display_none() {
        let mut surface = MemorySurface::new(Size::new(800, 600));
        surface.insert_element(None, "w").unwrap();
        let ids = ChromeIds::for_window("w");
        build(&mut surface, &ids).unwrap();

        set_control_visible(&mut surface, &ids, ControlKind::Close, false).unwrap();
        assert_eq!(surface.style("w_close", StyleProperty::Display).unwrap(), "none");
        set_control_visible(&mut surface, &ids, ControlKind::Close, true).unwrap();
        assert_eq!(surface.style("w_close", StyleProperty::Display).unwrap(), "");
    }
}
