use std::collections::BTreeMap;

use crate::{
    foundation::core::{ElementId, Timestamp},
    foundation::error::{ScrollFxError, ScrollFxResult},
    foundation::math,
    markup::discover::{RevealConfig, discover_animatables, reveal_config},
    markup::markers::Markers,
    observe::margin::{MarginLength, RootMargin},
    observe::watcher::{IntersectionEntry, IntersectionWatcher, WatchOptions},
    page::document::Document,
    schedule::event_loop::{Scheduler, TimerHandle},
};

/// How long an element stays attached to the watcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Non-repeatable elements detach once revealed, and those already on
    /// screen at startup are never attached. Repeatable elements always attach.
    #[default]
    EagerUnobserve,
    /// Every element attaches and stays attached; non-repeatable ones never hide.
    PersistentToggle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Visible fraction that counts as a crossing.
    pub threshold: f64,
    pub root_margin: RootMargin,
    /// Delay before revealing elements already on screen at startup.
    pub initial_delay_ms: u64,
    pub policy: RevealPolicy,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.05,
            // 50px 0px -20px 0px
            root_margin: RootMargin {
                top: MarginLength::Px(50.0),
                bottom: MarginLength::Px(-20.0),
                ..RootMargin::ZERO
            },
            initial_delay_ms: 50,
            policy: RevealPolicy::default(),
        }
    }
}

impl RevealOptions {
    pub fn validate(&self) -> ScrollFxResult<()> {
        if !(self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold)) {
            return Err(ScrollFxError::validation(
                "reveal threshold must be within [0, 1]",
            ));
        }
        Ok(())
    }

    fn watch_options(&self) -> ScrollFxResult<WatchOptions> {
        WatchOptions::new(vec![self.threshold], self.root_margin)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    config: RevealConfig,
    state: RevealState,
}

/// Toggles the visible class on animatable elements as they cross the viewport.
#[derive(Debug)]
pub struct RevealController {
    options: RevealOptions,
    markers: Markers,
    watcher: IntersectionWatcher,
    elements: BTreeMap<ElementId, Tracked>,
    pending: BTreeMap<TimerHandle, ElementId>,
    connected: bool,
}

impl RevealController {
    /// Discover animatable elements and arm the watcher.
    ///
    /// Elements already overlapping the viewport are revealed by a timer
    /// after `initial_delay_ms`, never during construction.
    #[tracing::instrument(skip_all)]
    pub fn new<D, S>(
        doc: &D,
        sched: &mut S,
        options: RevealOptions,
        markers: Markers,
    ) -> ScrollFxResult<Self>
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        options.validate()?;
        markers.validate()?;
        let watcher = IntersectionWatcher::new(options.watch_options()?);

        let mut this = Self {
            options,
            markers,
            watcher,
            elements: BTreeMap::new(),
            pending: BTreeMap::new(),
            connected: true,
        };

        let viewport_height = doc.viewport().height;
        for animatable in discover_animatables(doc, &this.markers) {
            let id = animatable.id;
            let in_viewport = doc
                .bounding_client_rect(id)
                .is_some_and(|r| math::overlaps_viewport(r, viewport_height));

            if in_viewport {
                let handle = sched.set_timeout(this.options.initial_delay_ms);
                this.pending.insert(handle, id);
            }
            this.track(doc, id, animatable.config);
            if this.attach_at_startup(animatable.config, in_viewport) {
                this.watcher.observe(id);
            }
        }

        tracing::debug!(
            elements = this.elements.len(),
            watched = this.watcher.len(),
            deferred = this.pending.len(),
            "reveal controller ready"
        );
        Ok(this)
    }

    fn attach_at_startup(&self, config: RevealConfig, in_viewport: bool) -> bool {
        match self.options.policy {
            RevealPolicy::PersistentToggle => true,
            RevealPolicy::EagerUnobserve => config.repeatable || !in_viewport,
        }
    }

    fn track<D: Document + ?Sized>(&mut self, doc: &D, id: ElementId, config: RevealConfig) {
        let state = if doc.has_class(id, &self.markers.visible_class) {
            RevealState::Visible
        } else {
            RevealState::Hidden
        };
        self.elements.insert(id, Tracked { config, state });
    }

    /// Watch an element added after construction.
    pub fn observe<D: Document + ?Sized>(&mut self, doc: &D, id: ElementId) {
        if !self.connected {
            return;
        }
        if !self.elements.contains_key(&id) {
            let config = reveal_config(doc, id, &self.markers);
            self.track(doc, id, config);
        }
        self.watcher.observe(id);
    }

    /// Stop observing and drop pending reveals. Later callbacks are no-ops.
    pub fn disconnect(&mut self) {
        self.watcher.disconnect();
        self.pending.clear();
        self.connected = false;
        tracing::debug!("reveal controller disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Handle a timer wakeup. Returns `false` for timers this controller
    /// did not schedule.
    pub fn on_timer<D: Document + ?Sized>(&mut self, doc: &mut D, handle: TimerHandle) -> bool {
        if !self.connected {
            return false;
        }
        let Some(id) = self.pending.remove(&handle) else {
            return false;
        };
        self.set_state(doc, id, RevealState::Visible);
        true
    }

    /// Run the watcher against current geometry and apply its entries.
    pub fn deliver<D: Document + ?Sized>(&mut self, doc: &mut D, now: Timestamp) {
        if !self.connected {
            return;
        }
        let entries = self.watcher.take_records(&*doc, now);
        if !entries.is_empty() {
            self.handle_intersections(doc, &entries);
        }
    }

    /// Apply a batch of intersection entries.
    pub fn handle_intersections<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        entries: &[IntersectionEntry],
    ) {
        if !self.connected {
            return;
        }
        for entry in entries {
            let Some(tracked) = self.elements.get(&entry.target) else {
                continue;
            };
            let repeatable = tracked.config.repeatable;

            if entry.is_intersecting {
                self.set_state(doc, entry.target, RevealState::Visible);
                if !repeatable && self.options.policy == RevealPolicy::EagerUnobserve {
                    self.watcher.unobserve(entry.target);
                }
            } else if repeatable {
                self.set_state(doc, entry.target, RevealState::Hidden);
            }
        }
    }

    fn set_state<D: Document + ?Sized>(&mut self, doc: &mut D, id: ElementId, state: RevealState) {
        let Some(tracked) = self.elements.get_mut(&id) else {
            return;
        };
        tracked.state = state;
        if doc.set_class(id, &self.markers.visible_class, state == RevealState::Visible) {
            tracing::trace!(element = id.0, ?state, "reveal state changed");
        }
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.elements.get(&id).map(|t| t.state)
    }

    pub fn is_repeatable(&self, id: ElementId) -> Option<bool> {
        self.elements.get(&id).map(|t| t.config.repeatable)
    }

    pub fn is_watching(&self, id: ElementId) -> bool {
        self.watcher.is_observing(id)
    }

    pub fn watched_count(&self) -> usize {
        self.watcher.len()
    }

    pub fn pending_reveals(&self) -> usize {
        self.pending.len()
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/controller.rs"]
mod tests;
