//! The debounce stages between raw intersection batches and a body commit.
//!
//! 1. raw batch: [`FrameCoalescer::schedule`] keeps one frame request alive,
//!    replacing any older one;
//! 2. coalesced frame: [`FrameCoalescer::fire`] accepts only that request;
//! 3. throttle-gated commit: [`ThrottleGate::admits`] enforces a minimum
//!    interval between committed updates.

use crate::{
    foundation::core::Timestamp,
    schedule::event_loop::{FrameHandle, Scheduler},
};

#[derive(Debug, Default)]
pub struct FrameCoalescer {
    pending: Option<FrameHandle>,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the outstanding request (if any) and ask for a fresh frame.
    pub fn schedule<S: Scheduler + ?Sized>(&mut self, sched: &mut S) -> FrameHandle {
        if let Some(old) = self.pending.take() {
            sched.cancel_frame(old);
        }
        let handle = sched.request_frame();
        self.pending = Some(handle);
        handle
    }

    /// `true` when `handle` is the live request; it is consumed.
    pub fn fire(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forget the outstanding request without touching the scheduler.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ThrottleGate {
    min_interval_ms: u64,
    last_commit: Option<Timestamp>,
}

impl ThrottleGate {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_commit: None,
        }
    }

    /// Refuses when fewer than `min_interval_ms` have passed since the last
    /// recorded commit.
    pub fn admits(&self, now: Timestamp) -> bool {
        self.last_commit
            .is_none_or(|t| now.elapsed_since(t) >= self.min_interval_ms)
    }

    pub fn record(&mut self, now: Timestamp) {
        self.last_commit = Some(now);
    }

    pub fn last_commit(&self) -> Option<Timestamp> {
        self.last_commit
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }
}
