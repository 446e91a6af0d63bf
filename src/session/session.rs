use crate::{
    background::controller::{BackgroundController, BackgroundOptions},
    background::presentation::PresentationState,
    foundation::core::{ElementId, Timestamp, Viewport},
    foundation::error::ScrollFxResult,
    markup::markers::Markers,
    page::model::{ElementSpec, Mutation, Page},
    reveal::controller::{RevealController, RevealOptions},
    schedule::event_loop::{DEFAULT_FRAME_INTERVAL_MS, EventLoop, Scheduler, Wakeup},
};

/// Everything a session needs to build its controllers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub markers: Markers,
    pub reveal: RevealOptions,
    pub background: BackgroundOptions,
    pub frame_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            reveal: RevealOptions::default(),
            background: BackgroundOptions::default(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ScrollFxResult<()> {
        self.markers.validate()?;
        self.reveal.validate()?;
        self.background.validate()?;
        Ok(())
    }

    pub fn from_json_str(s: &str) -> ScrollFxResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// Host signals that (re)initialize the controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The document finished parsing.
    DomContentLoaded,
    /// The framework finished a client-side navigation (also fired on first load).
    PageLoad,
}

/// One document mutation with the time it happened.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TraceRecord {
    pub at_ms: u64,
    /// Key of the mutated element, for class changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub mutation: Mutation,
}

/// A page, its event loop, and the live controllers.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    page: Page,
    clock: EventLoop,
    reveal: Option<RevealController>,
    background: Option<BackgroundController>,
    // Parked here whenever no background controller owns it.
    presentation: Option<PresentationState>,
    generation: u64,
    trace: Vec<TraceRecord>,
}

impl Session {
    /// Controllers are not built until the first [`LifecycleEvent`].
    pub fn new(page: Page, config: SessionConfig) -> ScrollFxResult<Self> {
        config.validate()?;
        Ok(Self {
            clock: EventLoop::new(config.frame_interval_ms),
            config,
            page,
            reveal: None,
            background: None,
            presentation: Some(PresentationState::new()),
            generation: 0,
            trace: Vec::new(),
        })
    }

    /// Tear down any live controllers and build fresh ones for the current page.
    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, event: LifecycleEvent) -> ScrollFxResult<()> {
        self.teardown();
        self.generation += 1;

        let reveal = RevealController::new(
            &self.page,
            &mut self.clock,
            self.config.reveal.clone(),
            self.config.markers.clone(),
        )?;
        let presentation = self.presentation.take().unwrap_or_default();
        let background = BackgroundController::new(
            &mut self.page,
            presentation,
            self.config.background.clone(),
            self.config.markers.clone(),
        )?;

        self.reveal = Some(reveal);
        self.background = Some(background);
        self.collect();
        tracing::debug!(generation = self.generation, "controllers initialized");
        Ok(())
    }

    /// Swap in a new document and re-initialize as on a client-side navigation.
    pub fn navigate(&mut self, page: Page) -> ScrollFxResult<()> {
        self.teardown();
        self.collect();
        self.page = page;
        self.dispatch(LifecycleEvent::PageLoad)
    }

    fn teardown(&mut self) {
        if let Some(mut reveal) = self.reveal.take() {
            reveal.disconnect();
        }
        if let Some(background) = self.background.take() {
            let mut presentation = background.release();
            presentation.reset();
            self.presentation = Some(presentation);
        }
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.page.scroll_to(y);
    }

    pub fn resize(&mut self, viewport: Viewport) -> ScrollFxResult<()> {
        self.page.resize(viewport)
    }

    /// Inject an element and hand it to the reveal controller.
    pub fn insert_animated(&mut self, spec: ElementSpec) -> ScrollFxResult<ElementId> {
        let id = self.page.insert(spec)?;
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.observe(&self.page, id);
        }
        Ok(id)
    }

    /// Process every wakeup due up to and including `until`.
    pub fn run_until(&mut self, until: Timestamp) {
        while let Some(wakeup) = self.clock.advance(until) {
            self.dispatch_wakeup(wakeup);
            self.collect();
        }
    }

    pub fn advance(&mut self, ms: u64) {
        let until = self.clock.now().saturating_add_ms(ms);
        self.run_until(until);
    }

    fn dispatch_wakeup(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::Timer(handle) => {
                if let Some(reveal) = self.reveal.as_mut() {
                    reveal.on_timer(&mut self.page, handle);
                }
            }
            Wakeup::Frame { callbacks } => {
                let now = self.clock.now();
                if let Some(background) = self.background.as_mut() {
                    for handle in callbacks {
                        background.on_frame(&mut self.page, now, handle);
                    }
                }
                if let Some(reveal) = self.reveal.as_mut() {
                    reveal.deliver(&mut self.page, now);
                }
                if let Some(background) = self.background.as_mut() {
                    background.deliver(&self.page, &mut self.clock);
                }
            }
        }
    }

    fn collect(&mut self) {
        let at_ms = self.clock.now().0;
        for mutation in self.page.take_mutations() {
            let element = match &mutation {
                Mutation::ClassAdded { element, .. } | Mutation::ClassRemoved { element, .. } => {
                    self.page.key(*element).map(str::to_string)
                }
                _ => None,
            };
            self.trace.push(TraceRecord {
                at_ms,
                element,
                mutation,
            });
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn reveal(&self) -> Option<&RevealController> {
        self.reveal.as_ref()
    }

    pub fn background(&self) -> Option<&BackgroundController> {
        self.background.as_ref()
    }

    /// The presentation state, wherever it currently lives.
    pub fn presentation(&self) -> Option<&PresentationState> {
        match &self.background {
            Some(b) => Some(b.presentation()),
            None => self.presentation.as_ref(),
        }
    }

    /// Number of lifecycle initializations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn trace(&self) -> &[TraceRecord] {
        &self.trace
    }

    pub fn take_trace(&mut self) -> Vec<TraceRecord> {
        std::mem::take(&mut self.trace)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
