//! Discovery pass: read marker attributes once and produce typed configs.

use crate::{foundation::core::ElementId, markup::markers::Markers, page::document::Document};

/// Reveal semantics for one animatable element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RevealConfig {
    /// When `true` the element hides again on exit and re-reveals on entry.
    pub repeatable: bool,
}

/// Background configuration for one section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SectionConfig {
    /// CSS color value applied to the body.
    pub color: String,
    pub is_dark: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animatable {
    pub id: ElementId,
    pub config: RevealConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: ElementId,
    pub config: SectionConfig,
}

pub fn reveal_config<D: Document + ?Sized>(
    doc: &D,
    id: ElementId,
    markers: &Markers,
) -> RevealConfig {
    RevealConfig {
        repeatable: doc.has_attribute(id, &markers.animate_repeat)
            || doc.has_class(id, &markers.repeat_class),
    }
}

/// Sections read their color verbatim; a missing value reads as empty.
pub fn section_config<D: Document + ?Sized>(
    doc: &D,
    id: ElementId,
    markers: &Markers,
) -> SectionConfig {
    SectionConfig {
        color: doc
            .attribute(id, &markers.background)
            .unwrap_or_default()
            .to_string(),
        is_dark: doc.has_attribute(id, &markers.background_dark),
    }
}

/// All elements carrying the animate marker, in document order.
pub fn discover_animatables<D: Document + ?Sized>(doc: &D, markers: &Markers) -> Vec<Animatable> {
    doc.query_attribute(&markers.animate)
        .into_iter()
        .map(|id| Animatable {
            id,
            config: reveal_config(doc, id, markers),
        })
        .collect()
}

/// All elements carrying the background marker, in document order.
pub fn discover_sections<D: Document + ?Sized>(doc: &D, markers: &Markers) -> Vec<Section> {
    doc.query_attribute(&markers.background)
        .into_iter()
        .map(|id| Section {
            id,
            config: section_config(doc, id, markers),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/markup/discover.rs"]
mod tests;
