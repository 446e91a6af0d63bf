use crate::foundation::core::{ElementId, Rect, Viewport};

/// The slice of a host document the controllers read and write.
///
/// Reads are geometry and markup queries. Writes are limited to class toggles
/// on observed elements and to the body's inline style and attributes.
pub trait Document {
    /// Current layout viewport.
    fn viewport(&self) -> Viewport;

    /// Elements carrying attribute `name`, in document order.
    fn query_attribute(&self, name: &str) -> Vec<ElementId>;

    /// Value of attribute `name` on `id`, if present.
    fn attribute(&self, id: ElementId, name: &str) -> Option<&str>;

    /// Presence test for boolean marker attributes.
    fn has_attribute(&self, id: ElementId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// `true` when `class` is in the element's class list.
    fn has_class(&self, id: ElementId, class: &str) -> bool;

    /// Border box in client (viewport-relative) coordinates.
    ///
    /// `None` when the element is no longer part of the document.
    fn bounding_client_rect(&self, id: ElementId) -> Option<Rect>;

    /// Add or remove `class`. Returns `true` if the class list changed.
    fn set_class(&mut self, id: ElementId, class: &str, present: bool) -> bool;

    /// Set an inline style property on the body.
    fn set_body_style(&mut self, property: &str, value: &str);

    /// Set (`Some`) or remove (`None`) a body attribute.
    fn set_body_attribute(&mut self, name: &str, value: Option<&str>);
}
