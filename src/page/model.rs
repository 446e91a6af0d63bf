use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::core::{ElementId, Rect, Viewport},
    foundation::error::{ScrollFxError, ScrollFxResult},
    page::document::Document,
};

/// Serializable description of a page: viewport, scroll offset and elements.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    pub viewport: Viewport,
    #[serde(default)]
    pub scroll_y: f64,
    pub elements: Vec<ElementSpec>,
}

/// One element in document order. `rect` is in document coordinates.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ElementSpec {
    pub key: String,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

impl ElementSpec {
    pub fn new(key: impl Into<String>, rect: Rect) -> Self {
        Self {
            key: key.into(),
            rect,
            attributes: BTreeMap::new(),
            classes: Vec::new(),
        }
    }

    /// Full-width block spanning `[top, top + height)` in document space.
    pub fn block(key: impl Into<String>, top: f64, height: f64) -> Self {
        Self::new(key, Rect::new(0.0, top, 1280.0, top + height))
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Boolean-presence attribute (empty value).
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// Inline style and attributes of the document body.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Body {
    pub style: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
}

/// A single observable document write.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    ClassAdded { element: ElementId, class: String },
    ClassRemoved { element: ElementId, class: String },
    BodyStyle { property: String, value: String },
    BodyAttributeSet { name: String, value: String },
    BodyAttributeRemoved { name: String },
}

#[derive(Clone, Debug)]
struct Node {
    key: String,
    rect: Rect,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
}

/// In-memory [`Document`] with a vertical scroll offset and a mutation log.
#[derive(Clone, Debug)]
pub struct Page {
    viewport: Viewport,
    scroll_y: f64,
    nodes: Vec<Node>,
    keys: BTreeMap<String, ElementId>,
    body: Body,
    mutations: Vec<Mutation>,
}

impl Page {
    /// Build and validate a page from its description.
    pub fn from_spec(spec: PageSpec) -> ScrollFxResult<Self> {
        spec.viewport.validate()?;
        if !spec.scroll_y.is_finite() {
            return Err(ScrollFxError::validation("scroll_y must be finite"));
        }

        let mut page = Self {
            viewport: spec.viewport,
            scroll_y: 0.0,
            nodes: Vec::with_capacity(spec.elements.len()),
            keys: BTreeMap::new(),
            body: Body::default(),
            mutations: Vec::new(),
        };
        for element in spec.elements {
            page.insert(element)?;
        }
        page.scroll_to(spec.scroll_y);
        Ok(page)
    }

    /// Parse a [`PageSpec`] from JSON and build the page.
    pub fn from_json_str(s: &str) -> ScrollFxResult<Self> {
        let spec: PageSpec = serde_json::from_str(s)?;
        Self::from_spec(spec)
    }

    /// Append an element at the end of document order.
    pub fn insert(&mut self, spec: ElementSpec) -> ScrollFxResult<ElementId> {
        if spec.key.trim().is_empty() {
            return Err(ScrollFxError::markup("element key must be non-empty"));
        }
        if self.keys.contains_key(&spec.key) {
            return Err(ScrollFxError::markup(format!(
                "duplicate element key '{}'",
                spec.key
            )));
        }
        let r = spec.rect;
        if !(r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()) {
            return Err(ScrollFxError::markup(format!(
                "element '{}' has a non-finite rect",
                spec.key
            )));
        }
        if r.x0 > r.x1 || r.y0 > r.y1 {
            return Err(ScrollFxError::markup(format!(
                "element '{}' rect is not normalized (x0 <= x1, y0 <= y1)",
                spec.key
            )));
        }

        let id = ElementId(u32::try_from(self.nodes.len()).map_err(|_| {
            ScrollFxError::markup("too many elements for a single page")
        })?);
        self.keys.insert(spec.key.clone(), id);
        self.nodes.push(Node {
            key: spec.key,
            rect: r,
            attributes: spec.attributes,
            classes: spec.classes.into_iter().collect(),
        });
        Ok(id)
    }

    pub fn element(&self, key: &str) -> Option<ElementId> {
        self.keys.get(key).copied()
    }

    pub fn key(&self, id: ElementId) -> Option<&str> {
        self.node(id).map(|n| n.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Bottom edge of the lowest element, never less than the viewport height.
    pub fn document_height(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.rect.y1)
            .fold(self.viewport.height, f64::max)
    }

    /// Scroll to `y`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, y: f64) {
        let max = (self.document_height() - self.viewport.height).max(0.0);
        self.scroll_y = if y.is_finite() { y.clamp(0.0, max) } else { 0.0 };
    }

    pub fn resize(&mut self, viewport: Viewport) -> ScrollFxResult<()> {
        viewport.validate()?;
        self.viewport = viewport;
        let y = self.scroll_y;
        self.scroll_to(y);
        Ok(())
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Drain the mutation log.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }
}

impl Document for Page {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query_attribute(&self, name: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.attributes.contains_key(name))
            .map(|(i, _)| ElementId(i as u32))
            .collect()
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node(id)?.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.classes.contains(class))
    }

    fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        let r = self.node(id)?.rect;
        Some(Rect::new(r.x0, r.y0 - self.scroll_y, r.x1, r.y1 - self.scroll_y))
    }

    fn set_class(&mut self, id: ElementId, class: &str, present: bool) -> bool {
        let Some(node) = self.nodes.get_mut(id.0 as usize) else {
            return false;
        };
        let changed = if present {
            node.classes.insert(class.to_string())
        } else {
            node.classes.remove(class)
        };
        if changed {
            let class = class.to_string();
            self.mutations.push(if present {
                Mutation::ClassAdded { element: id, class }
            } else {
                Mutation::ClassRemoved { element: id, class }
            });
        }
        changed
    }

    fn set_body_style(&mut self, property: &str, value: &str) {
        self.body
            .style
            .insert(property.to_string(), value.to_string());
        self.mutations.push(Mutation::BodyStyle {
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn set_body_attribute(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.body.attributes.insert(name.to_string(), v.to_string());
                self.mutations.push(Mutation::BodyAttributeSet {
                    name: name.to_string(),
                    value: v.to_string(),
                });
            }
            None => {
                // Removing an absent attribute is not a write.
                if self.body.attributes.remove(name).is_some() {
                    self.mutations.push(Mutation::BodyAttributeRemoved {
                        name: name.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
