#![forbid(unsafe_code)]

//! Deterministic headless surface.
//!
//! [`MemorySurface`] keeps a node tree with inline styles and an intrinsic
//! size per node. Layout is intentionally small:
//!
//! - `left/top/width/height` resolve from inline style (px or percent),
//! - percentages resolve against the nearest marked ancestor (the window box
//!   acting as offset parent) or the viewport,
//! - unset sizes fall back to the node's intrinsic size,
//! - borders and padding are not modelled, so client size equals offset size.
//!
//! Content set through [`Surface::set_inner_html`] is stored as opaque text;
//! it is never parsed into elements.

use std::collections::BTreeMap;

use crate::geometry::{Rect, Size};
use crate::length::Length;
use crate::surface::{ElementRole, StyleProperty, Surface, SurfaceError, SurfaceResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Child {
    Element(String),
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct Node {
    parent: Option<String>,
    children: Vec<Child>,
    role: Option<ElementRole>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<StyleProperty, String>,
    intrinsic: Size,
}

/// In-memory [`Surface`] for tests and native hosts.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    viewport: Size,
    nodes: BTreeMap<String, Node>,
    body: Vec<Child>,
}

impl MemorySurface {
    /// Create an empty document with the given viewport.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            nodes: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Add a plain element under `parent` (or the body for `None`).
    pub fn insert_element(&mut self, parent: Option<&str>, id: &str) -> SurfaceResult<&mut Self> {
        self.insert_node(parent, id, None)?;
        Ok(self)
    }

    /// Declare an attribute on an element.
    pub fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> SurfaceResult<&mut Self> {
        self.node_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(self)
    }

    /// Append a text run to an element.
    pub fn append_text(&mut self, id: &str, text: &str) -> SurfaceResult<&mut Self> {
        self.node_mut(id)?.children.push(Child::Text(text.to_string()));
        Ok(self)
    }

    /// Size used when width or height is not set inline.
    pub fn set_intrinsic_size(&mut self, id: &str, size: Size) -> SurfaceResult<&mut Self> {
        self.node_mut(id)?.intrinsic = size;
        Ok(self)
    }

    /// Role an element was created with, if any.
    #[must_use]
    pub fn role(&self, id: &str) -> Option<ElementRole> {
        self.nodes.get(id).and_then(|node| node.role)
    }

    /// Identities of the element children of `id` (or of the body).
    pub fn element_children(&self, id: Option<&str>) -> SurfaceResult<Vec<String>> {
        let children = match id {
            Some(id) => &self.node(id)?.children,
            None => &self.body,
        };
        Ok(children
            .iter()
            .filter_map(|child| match child {
                Child::Element(id) => Some(id.clone()),
                Child::Text(_) => None,
            })
            .collect())
    }

    /// Concatenated text of an element's direct text children.
    pub fn text(&self, id: &str) -> SurfaceResult<String> {
        Ok(self
            .node(id)?
            .children
            .iter()
            .filter_map(|child| match child {
                Child::Text(text) => Some(text.as_str()),
                Child::Element(_) => None,
            })
            .collect())
    }

    /// Number of attached elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: &str) -> SurfaceResult<&Node> {
        self.nodes.get(id).ok_or_else(|| SurfaceError::not_found(id))
    }

    fn node_mut(&mut self, id: &str) -> SurfaceResult<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SurfaceError::not_found(id))
    }

    fn children_mut(&mut self, parent: Option<&str>) -> SurfaceResult<&mut Vec<Child>> {
        match parent {
            Some(parent) => Ok(&mut self.node_mut(parent)?.children),
            None => Ok(&mut self.body),
        }
    }

    fn insert_node(
        &mut self,
        parent: Option<&str>,
        id: &str,
        role: Option<ElementRole>,
    ) -> SurfaceResult<()> {
        if self.nodes.contains_key(id) {
            return Err(SurfaceError::DuplicateElement { id: id.to_string() });
        }
        self.children_mut(parent)?
            .push(Child::Element(id.to_string()));
        self.nodes.insert(
            id.to_string(),
            Node {
                parent: parent.map(str::to_string),
                role,
                ..Node::default()
            },
        );
        Ok(())
    }

    fn detach(&mut self, id: &str) -> SurfaceResult<()> {
        let parent = self.node(id)?.parent.clone();
        self.children_mut(parent.as_deref())?
            .retain(|child| !matches!(child, Child::Element(child_id) if child_id == id));
        Ok(())
    }

    fn drop_subtree(&mut self, id: &str) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children {
                if let Child::Element(child_id) = child {
                    self.drop_subtree(&child_id);
                }
            }
        }
    }

    fn is_self_or_ancestor(&self, candidate: &str, id: &str) -> bool {
        let mut current = Some(id.to_string());
        while let Some(cursor) = current {
            if cursor == candidate {
                return true;
            }
            current = self.nodes.get(&cursor).and_then(|node| node.parent.clone());
        }
        false
    }

    fn containing_block(&self, id: &str) -> SurfaceResult<Size> {
        let mut current = self.node(id)?.parent.clone();
        while let Some(parent) = current {
            let node = self.node(&parent)?;
            if node.role.is_some_and(ElementRole::is_marked) {
                return self.client_size(&parent);
            }
            current = node.parent.clone();
        }
        Ok(self.viewport)
    }

    fn collect_roots(&self, children: &[Child], out: &mut Vec<String>) {
        for child in children {
            if let Child::Element(id) = child
                && let Some(node) = self.nodes.get(id)
            {
                if node.role.is_some_and(ElementRole::is_marked) {
                    out.push(id.clone());
                }
                self.collect_roots(&node.children, out);
            }
        }
    }

    fn serialize(&self, children: &[Child], out: &mut String) {
        for child in children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(id) => {
                    out.push_str("<div id=\"");
                    out.push_str(id);
                    out.push_str("\">");
                    if let Some(node) = self.nodes.get(id) {
                        self.serialize(&node.children, out);
                    }
                    out.push_str("</div>");
                }
            }
        }
    }
}

impl Surface for MemorySurface {
    fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn parent(&self, id: &str) -> SurfaceResult<Option<String>> {
        Ok(self.node(id)?.parent.clone())
    }

    fn attribute(&self, id: &str, name: &str) -> SurfaceResult<Option<String>> {
        Ok(self.node(id)?.attributes.get(name).cloned())
    }

    fn create_element(&mut self, parent: &str, id: &str, role: ElementRole) -> SurfaceResult<()> {
        self.insert_node(Some(parent), id, Some(role))
    }

    fn move_children(&mut self, from: &str, to: &str) -> SurfaceResult<()> {
        self.node(to)?;
        let children = std::mem::take(&mut self.node_mut(from)?.children);
        let mut kept = Vec::new();
        let mut moved = Vec::new();
        for child in children {
            // The branch holding the destination stays where it is.
            let holds_destination =
                matches!(&child, Child::Element(id) if self.is_self_or_ancestor(id, to));
            if holds_destination {
                kept.push(child);
            } else {
                moved.push(child);
            }
        }
        for child in &moved {
            if let Child::Element(id) = child {
                self.node_mut(id)?.parent = Some(to.to_string());
            }
        }
        self.node_mut(from)?.children = kept;
        self.node_mut(to)?.children.extend(moved);
        Ok(())
    }

    fn append_child(&mut self, parent: &str, id: &str) -> SurfaceResult<()> {
        self.node(parent)?;
        if self.is_self_or_ancestor(id, parent) {
            return Err(SurfaceError::InvalidParent {
                id: id.to_string(),
                parent: parent.to_string(),
            });
        }
        self.detach(id)?;
        self.node_mut(id)?.parent = Some(parent.to_string());
        self.node_mut(parent)?
            .children
            .push(Child::Element(id.to_string()));
        Ok(())
    }

    fn inner_html(&self, id: &str) -> SurfaceResult<String> {
        let mut out = String::new();
        self.serialize(&self.node(id)?.children, &mut out);
        Ok(out)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> SurfaceResult<()> {
        let previous = std::mem::take(&mut self.node_mut(id)?.children);
        for child in previous {
            if let Child::Element(child_id) = child {
                self.drop_subtree(&child_id);
            }
        }
        if !html.is_empty() {
            self.node_mut(id)?.children.push(Child::Text(html.to_string()));
        }
        Ok(())
    }

    fn style(&self, id: &str, property: StyleProperty) -> SurfaceResult<String> {
        Ok(self
            .node(id)?
            .styles
            .get(&property)
            .cloned()
            .unwrap_or_default())
    }

    fn set_style(&mut self, id: &str, property: StyleProperty, value: &str) -> SurfaceResult<()> {
        let styles = &mut self.node_mut(id)?.styles;
        if value.is_empty() {
            styles.remove(&property);
        } else {
            styles.insert(property, value.to_string());
        }
        Ok(())
    }

    fn computed_z_index(&self, id: &str) -> SurfaceResult<Option<i32>> {
        Ok(self
            .node(id)?
            .styles
            .get(&StyleProperty::ZIndex)
            .and_then(|value| value.trim().parse::<i32>().ok()))
    }

    fn offset_rect(&self, id: &str) -> SurfaceResult<Rect> {
        let node = self.node(id)?;
        let block = self.containing_block(id)?;
        let read = |property: StyleProperty| {
            node.styles
                .get(&property)
                .map_or(Length::Auto, |value| Length::parse(value))
        };
        let x = read(StyleProperty::Left).resolve(block.w).unwrap_or(0);
        let y = read(StyleProperty::Top).resolve(block.h).unwrap_or(0);
        let width = read(StyleProperty::Width)
            .resolve(block.w)
            .unwrap_or(node.intrinsic.w);
        let height = read(StyleProperty::Height)
            .resolve(block.h)
            .unwrap_or(node.intrinsic.h);
        Ok(Rect::new(x, y, width, height))
    }

    fn client_size(&self, id: &str) -> SurfaceResult<Size> {
        Ok(self.offset_rect(id)?.size())
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn window_roots(&self, scope: Option<&str>) -> SurfaceResult<Vec<String>> {
        let children = match scope {
            Some(scope) => &self.node(scope)?.children,
            None => &self.body,
        };
        let mut out = Vec::new();
        self.collect_roots(children, &mut out);
        Ok(out)
    }

    fn remove(&mut self, id: &str) -> SurfaceResult<()> {
        self.detach(id)?;
        self.drop_subtree(id);
        Ok(())
    }
}
