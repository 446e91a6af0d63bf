//! Viewport-center scoring used to pick the dominant section.

use crate::{
    foundation::core::{ElementId, Rect},
    foundation::math,
    markup::discover::Section,
    page::document::Document,
};

/// Score breakdown for one candidate section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SectionScore {
    pub section: ElementId,
    pub visible_height: f64,
    pub center_distance: f64,
    pub score: f64,
}

/// Score `rect` against a viewport of `viewport_height`.
///
/// `None` unless the rect strictly spans the viewport's center line.
pub fn score_rect(
    section: ElementId,
    rect: Rect,
    viewport_height: f64,
    center_weight: f64,
) -> Option<SectionScore> {
    let center = viewport_height / 2.0;
    if !math::spans_y(rect, center) {
        return None;
    }
    let visible_height = math::visible_height(rect, viewport_height);
    let center_distance = math::center_distance(rect, center);
    Some(SectionScore {
        section,
        visible_height,
        center_distance,
        score: visible_height - center_weight * center_distance,
    })
}

/// Scores of every center-spanning section, in section order.
pub fn score_sections<D: Document + ?Sized>(
    doc: &D,
    sections: &[Section],
    center_weight: f64,
) -> Vec<SectionScore> {
    let viewport_height = doc.viewport().height;
    sections
        .iter()
        .filter_map(|s| {
            let rect = doc.bounding_client_rect(s.id)?;
            score_rect(s.id, rect, viewport_height, center_weight)
        })
        .collect()
}

/// Highest score wins; on ties the first one encountered is kept.
pub fn select_dominant(scores: &[SectionScore]) -> Option<ElementId> {
    let mut best: Option<&SectionScore> = None;
    for s in scores {
        if best.is_none_or(|b| s.score > b.score) {
            best = Some(s);
        }
    }
    best.map(|b| b.section)
}

/// First section in order whose box spans the viewport center.
pub fn first_spanning_center<D: Document + ?Sized>(
    doc: &D,
    sections: &[Section],
) -> Option<ElementId> {
    let center = doc.viewport().center_y();
    sections
        .iter()
        .find(|s| {
            doc.bounding_client_rect(s.id)
                .is_some_and(|r| math::spans_y(r, center))
        })
        .map(|s| s.id)
}

#[cfg(test)]
#[path = "../../tests/unit/background/score.rs"]
mod tests;
