use crate::{
    background::pipeline::{FrameCoalescer, ThrottleGate},
    background::presentation::PresentationState,
    background::score::{self, SectionScore},
    foundation::core::{ElementId, Timestamp},
    foundation::error::{ScrollFxError, ScrollFxResult},
    markup::discover::{Section, discover_sections},
    markup::markers::Markers,
    observe::margin::{MarginLength, RootMargin},
    observe::watcher::{IntersectionEntry, IntersectionWatcher, WatchOptions, validate_thresholds},
    page::document::Document,
    schedule::event_loop::{FrameHandle, Scheduler},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BackgroundOptions {
    pub thresholds: Vec<f64>,
    /// Shrunk band so only near-centered sections generate events.
    pub root_margin: RootMargin,
    /// Hard floor between committed updates.
    pub min_update_interval_ms: u64,
    /// Weight of the center distance against visible height in the score.
    pub center_weight: f64,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            thresholds: vec![0.0, 0.25, 0.5],
            // -35% 0px -35% 0px
            root_margin: RootMargin {
                top: MarginLength::Percent(-35.0),
                bottom: MarginLength::Percent(-35.0),
                ..RootMargin::ZERO
            },
            min_update_interval_ms: 150,
            center_weight: 0.5,
        }
    }
}

impl BackgroundOptions {
    pub fn validate(&self) -> ScrollFxResult<()> {
        validate_thresholds(&self.thresholds)?;
        if !(self.center_weight.is_finite() && self.center_weight >= 0.0) {
            return Err(ScrollFxError::validation(
                "center_weight must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Keeps the body's background and theme in sync with the section that
/// dominates the viewport center.
#[derive(Debug)]
pub struct BackgroundController {
    options: BackgroundOptions,
    markers: Markers,
    watcher: IntersectionWatcher,
    sections: Vec<Section>,
    current: Option<ElementId>,
    frames: FrameCoalescer,
    throttle: ThrottleGate,
    presentation: PresentationState,
    connected: bool,
}

impl BackgroundController {
    /// Capture the sections, start watching them, and commit the initial
    /// background.
    ///
    /// The initial pick is the first section spanning the viewport center,
    /// falling back to the first section. It does not arm the throttle.
    #[tracing::instrument(skip_all)]
    pub fn new<D: Document + ?Sized>(
        doc: &mut D,
        presentation: PresentationState,
        options: BackgroundOptions,
        markers: Markers,
    ) -> ScrollFxResult<Self> {
        options.validate()?;
        markers.validate()?;
        let mut watcher = IntersectionWatcher::new(WatchOptions::new(
            options.thresholds.clone(),
            options.root_margin,
        )?);

        let sections = discover_sections(&*doc, &markers);
        for s in &sections {
            watcher.observe(s.id);
        }

        let mut this = Self {
            throttle: ThrottleGate::new(options.min_update_interval_ms),
            options,
            markers,
            watcher,
            sections,
            current: None,
            frames: FrameCoalescer::new(),
            presentation,
            connected: true,
        };

        let initial = score::first_spanning_center(&*doc, &this.sections)
            .or_else(|| this.sections.first().map(|s| s.id));
        if let Some(id) = initial {
            this.current = Some(id);
            this.apply(doc, id);
        }

        tracing::debug!(
            sections = this.sections.len(),
            initial = ?initial.map(|id| id.0),
            "background controller ready"
        );
        Ok(this)
    }

    /// Run the watcher against current geometry and feed the pipeline.
    pub fn deliver<D, S>(&mut self, doc: &D, sched: &mut S)
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        if !self.connected {
            return;
        }
        let entries = self.watcher.take_records(doc, sched.now());
        self.handle_intersections(sched, &entries);
    }

    /// Stage one: any non-empty batch (re)schedules an evaluation frame.
    ///
    /// Entry contents are not inspected; evaluation re-reads all geometry.
    pub fn handle_intersections<S: Scheduler + ?Sized>(
        &mut self,
        sched: &mut S,
        entries: &[IntersectionEntry],
    ) -> Option<FrameHandle> {
        if !self.connected || entries.is_empty() {
            return None;
        }
        Some(self.frames.schedule(sched))
    }

    /// Stage two: run the evaluation if `handle` is the live frame request.
    ///
    /// Returns `false` for frames this controller does not own.
    pub fn on_frame<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        now: Timestamp,
        handle: FrameHandle,
    ) -> bool {
        if !self.connected || !self.frames.fire(handle) {
            return false;
        }
        self.evaluate(doc, now);
        true
    }

    /// Stage three: throttle-gated selection and commit.
    ///
    /// Returns the newly committed section, if any.
    #[tracing::instrument(skip_all, fields(now = now.0))]
    pub fn evaluate<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        now: Timestamp,
    ) -> Option<ElementId> {
        if !self.connected {
            return None;
        }
        if !self.throttle.admits(now) {
            tracing::trace!(
                last_commit = ?self.throttle.last_commit().map(|t| t.0),
                "evaluation throttled"
            );
            return None;
        }

        let scores = score::score_sections(&*doc, &self.sections, self.options.center_weight);
        let best = score::select_dominant(&scores)?;
        if self.current == Some(best) {
            return None;
        }

        self.current = Some(best);
        self.throttle.record(now);
        self.apply(doc, best);
        Some(best)
    }

    fn apply<D: Document + ?Sized>(&mut self, doc: &mut D, id: ElementId) {
        let Some(section) = self.sections.iter().find(|s| s.id == id) else {
            return;
        };
        self.presentation.commit(doc, &section.config, &self.markers);
        tracing::debug!(
            section = id.0,
            color = %section.config.color,
            dark = section.config.is_dark,
            "background committed"
        );
    }

    /// Scores of all center-spanning sections at the current geometry.
    pub fn scores<D: Document + ?Sized>(&self, doc: &D) -> Vec<SectionScore> {
        score::score_sections(doc, &self.sections, self.options.center_weight)
    }

    /// Stop observing; later callbacks become no-ops.
    pub fn disconnect(&mut self) {
        self.watcher.disconnect();
        self.frames.clear();
        self.connected = false;
        tracing::debug!("background controller disconnected");
    }

    /// Tear down and hand the presentation state back to the host.
    pub fn release(mut self) -> PresentationState {
        self.disconnect();
        self.presentation
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn current_section(&self) -> Option<ElementId> {
        self.current
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frames.pending()
    }

    pub fn options(&self) -> &BackgroundOptions {
        &self.options
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/controller.rs"]
mod tests;
