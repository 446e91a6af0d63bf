use crate::{
    foundation::core::{ElementId, Rect, Timestamp},
    foundation::error::{ScrollFxError, ScrollFxResult},
    foundation::math,
    observe::margin::RootMargin,
    page::document::Document,
};

/// Thresholds and root margin of an [`IntersectionWatcher`].
#[derive(Clone, Debug, PartialEq)]
pub struct WatchOptions {
    thresholds: Vec<f64>,
    root_margin: RootMargin,
}

impl WatchOptions {
    /// Thresholds must be non-empty, within `[0, 1]` and ascending.
    pub fn new(thresholds: Vec<f64>, root_margin: RootMargin) -> ScrollFxResult<Self> {
        validate_thresholds(&thresholds)?;
        Ok(Self {
            thresholds,
            root_margin,
        })
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn root_margin(&self) -> RootMargin {
        self.root_margin
    }

    /// Number of thresholds at or below `ratio`.
    fn threshold_index(&self, ratio: f64) -> usize {
        self.thresholds.iter().take_while(|&&t| t <= ratio).count()
    }
}

pub(crate) fn validate_thresholds(thresholds: &[f64]) -> ScrollFxResult<()> {
    if thresholds.is_empty() {
        return Err(ScrollFxError::validation("thresholds must be non-empty"));
    }
    if thresholds
        .iter()
        .any(|t| !t.is_finite() || !(0.0..=1.0).contains(t))
    {
        return Err(ScrollFxError::validation(
            "each threshold must be within [0, 1]",
        ));
    }
    if thresholds.windows(2).any(|w| w[0] > w[1]) {
        return Err(ScrollFxError::validation(
            "thresholds must be in ascending order",
        ));
    }
    Ok(())
}

/// One observation delivered to a controller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub time: Timestamp,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    pub bounding_client_rect: Rect,
}

#[derive(Clone, Copy, Debug)]
struct Registration {
    target: ElementId,
    // (threshold index, is_intersecting) from the last emitted entry.
    previous: Option<(usize, bool)>,
}

/// Event-driven viewport intersection tracking.
///
/// Each call to [`take_records`](Self::take_records) corresponds to one
/// rendering update: targets whose threshold bucket or intersecting flag
/// changed since the last emitted entry produce a new entry. A freshly
/// observed target always produces one.
#[derive(Clone, Debug)]
pub struct IntersectionWatcher {
    options: WatchOptions,
    targets: Vec<Registration>,
}

impl IntersectionWatcher {
    pub fn new(options: WatchOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start watching `target`. Observing an already-watched target is a no-op.
    pub fn observe(&mut self, target: ElementId) {
        if self.is_observing(target) {
            return;
        }
        self.targets.push(Registration {
            target,
            previous: None,
        });
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.targets.retain(|r| r.target != target);
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.targets.iter().any(|r| r.target == target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Compute pending entries against the document's current geometry.
    ///
    /// Entries come back in observation order. Targets missing from the
    /// document are skipped and keep their previous state.
    pub fn take_records<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        now: Timestamp,
    ) -> Vec<IntersectionEntry> {
        let root = self.options.root_margin.apply(doc.viewport().rect());
        let mut out = Vec::new();

        for reg in &mut self.targets {
            let Some(rect) = doc.bounding_client_rect(reg.target) else {
                continue;
            };
            let hit = math::intersect_inclusive(rect, root);
            let is_intersecting = hit.is_some();
            let target_area = rect.area();
            let ratio = match hit {
                Some(h) if target_area > 0.0 => (h.area() / target_area).clamp(0.0, 1.0),
                Some(_) => 1.0,
                None => 0.0,
            };
            let index = if is_intersecting {
                self.options.threshold_index(ratio)
            } else {
                0
            };

            if reg.previous == Some((index, is_intersecting)) {
                continue;
            }
            reg.previous = Some((index, is_intersecting));
            out.push(IntersectionEntry {
                target: reg.target,
                time: now,
                is_intersecting,
                intersection_ratio: ratio,
                bounding_client_rect: rect,
            });
        }

        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/watcher.rs"]
mod tests;
