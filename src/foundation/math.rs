use kurbo::Rect;

/// Edge-inclusive rectangle intersection.
///
/// Unlike [`Rect::intersect`], rectangles that only touch yield a zero-area
/// `Some`, and disjoint ones yield `None`. The intersection observer relies on
/// that distinction.
pub(crate) fn intersect_inclusive(a: Rect, b: Rect) -> Option<Rect> {
    let x0 = a.x0.max(b.x0);
    let y0 = a.y0.max(b.y0);
    let x1 = a.x1.min(b.x1);
    let y1 = a.y1.min(b.y1);
    if x0 <= x1 && y0 <= y1 {
        Some(Rect::new(x0, y0, x1, y1))
    } else {
        None
    }
}

/// Any vertical overlap with `[0, viewport_height]`, edges excluded.
pub(crate) fn overlaps_viewport(rect: Rect, viewport_height: f64) -> bool {
    rect.y0 < viewport_height && rect.y1 > 0.0
}

/// `true` when the line `y` lies strictly inside the rect's vertical extent.
pub(crate) fn spans_y(rect: Rect, y: f64) -> bool {
    rect.y0 < y && rect.y1 > y
}

/// Vertical extent of `rect` clipped to `[0, viewport_height]`.
pub(crate) fn visible_height(rect: Rect, viewport_height: f64) -> f64 {
    rect.y1.min(viewport_height) - rect.y0.max(0.0)
}

/// Distance between the rect's vertical midpoint and `y`.
pub(crate) fn center_distance(rect: Rect, y: f64) -> f64 {
    ((rect.y0 + rect.y1) / 2.0 - y).abs()
}
