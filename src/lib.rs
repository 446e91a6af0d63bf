//! scrollfx is a headless model of scroll-driven page effects.
//!
//! Two controllers run against an abstract [`Document`] and a deterministic [`Scheduler`]:
//!
//! - **Reveal**: [`RevealController`] toggles a visible class on marked elements as they cross the
//!   viewport. One-shot elements stay revealed; repeatable ones hide again on exit.
//! - **Background**: [`BackgroundController`] scores the sections spanning the viewport center and
//!   commits the winner's color and theme to the body, at most once per throttle interval.
//!
//! A [`Session`] owns a [`Page`], an [`EventLoop`] and both controllers. It re-initializes them on
//! every [`LifecycleEvent`] and records every document write as a [`TraceRecord`]. A
//! [`ScrollScript`] drives a session from JSON, which is what the `scrollfx` binary does.
//!
//! Everything is single-threaded and deterministic: simulated time only moves when the caller
//! advances it.
#![forbid(unsafe_code)]

mod background;
mod foundation;
mod markup;
mod observe;
mod page;
mod reveal;
mod schedule;
mod session;

pub use crate::foundation::core::{ElementId, Point, Rect, Timestamp, Viewport};
pub use crate::foundation::error::{ScrollFxError, ScrollFxResult};

pub use crate::background::controller::{BackgroundController, BackgroundOptions};
pub use crate::background::pipeline::{FrameCoalescer, ThrottleGate};
pub use crate::background::presentation::{AppliedBackground, PresentationState, Theme};
pub use crate::background::score::{
    SectionScore, first_spanning_center, score_rect, score_sections, select_dominant,
};
pub use crate::markup::discover::{
    Animatable, RevealConfig, Section, SectionConfig, discover_animatables, discover_sections,
    reveal_config, section_config,
};
pub use crate::markup::markers::Markers;
pub use crate::observe::margin::{MarginLength, RootMargin};
pub use crate::observe::watcher::{IntersectionEntry, IntersectionWatcher, WatchOptions};
pub use crate::page::document::Document;
pub use crate::page::model::{Body, ElementSpec, Mutation, Page, PageSpec};
pub use crate::reveal::controller::{RevealController, RevealOptions, RevealPolicy, RevealState};
pub use crate::schedule::event_loop::{
    DEFAULT_FRAME_INTERVAL_MS, EventLoop, FrameHandle, Scheduler, TimerHandle, Wakeup,
};
pub use crate::session::script::{RunReport, ScriptAction, ScriptStep, ScrollScript, run_script};
pub use crate::session::session::{LifecycleEvent, Session, SessionConfig, TraceRecord};
