use std::collections::BTreeMap;

use crate::foundation::core::Timestamp;

/// Handle of an animation-frame request.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameHandle(pub u64);

/// Handle of a one-shot timer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimerHandle(pub u64);

/// Host services the controllers schedule work through.
///
/// Handles are unique for the scheduler's lifetime, so a controller can
/// recognise its own callbacks and ignore everyone else's.
pub trait Scheduler {
    fn now(&self) -> Timestamp;

    /// Ask for a callback at the next rendering opportunity.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancelling an unknown or already-fired handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);

    fn set_timeout(&mut self, delay_ms: u64) -> TimerHandle;

    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// What the event loop woke up for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Wakeup {
    Timer(TimerHandle),
    /// A rendering opportunity, with the frame callbacks requested before it.
    Frame { callbacks: Vec<FrameHandle> },
}

pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Deterministic virtual event loop.
///
/// Time only moves inside [`advance`](Self::advance). Rendering opportunities
/// occur every `frame_interval_ms` regardless of pending requests. A timer due
/// at the same instant as a frame runs first; timers due together run in
/// creation order.
#[derive(Debug)]
pub struct EventLoop {
    now: Timestamp,
    frame_interval_ms: u64,
    next_frame_at: Timestamp,
    next_handle: u64,
    timers: BTreeMap<(Timestamp, u64), TimerHandle>,
    frames: Vec<FrameHandle>,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL_MS)
    }
}

impl EventLoop {
    /// A zero interval is bumped to 1 ms so the loop always makes progress.
    pub fn new(frame_interval_ms: u64) -> Self {
        let frame_interval_ms = frame_interval_ms.max(1);
        Self {
            now: Timestamp::ZERO,
            frame_interval_ms,
            next_frame_at: Timestamp(frame_interval_ms),
            next_handle: 1,
            timers: BTreeMap::new(),
            frames: Vec::new(),
        }
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Move time forward to the next wakeup due no later than `until`.
    ///
    /// Returns `None` once nothing else is due; the clock then rests at
    /// `until` (or stays put if `until` is in the past).
    pub fn advance(&mut self, until: Timestamp) -> Option<Wakeup> {
        let next_timer = self.timers.keys().next().copied();
        let timer_first = next_timer.is_some_and(|(due, _)| due <= self.next_frame_at);
        let due = match next_timer {
            Some((t, _)) if timer_first => t,
            _ => self.next_frame_at,
        };

        if due > until {
            self.now = self.now.max(until);
            return None;
        }
        self.now = self.now.max(due);

        if timer_first {
            let (_, handle) = self.timers.pop_first()?;
            return Some(Wakeup::Timer(handle));
        }

        self.next_frame_at = self.next_frame_at.saturating_add_ms(self.frame_interval_ms);
        Some(Wakeup::Frame {
            callbacks: std::mem::take(&mut self.frames),
        })
    }

    fn alloc(&mut self) -> u64 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }
}

impl Scheduler for EventLoop {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.alloc());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|&h| h != handle);
    }

    fn set_timeout(&mut self, delay_ms: u64) -> TimerHandle {
        let seq = self.alloc();
        let handle = TimerHandle(seq);
        self.timers
            .insert((self.now.saturating_add_ms(delay_ms), seq), handle);
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|_, &mut h| h != handle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/event_loop.rs"]
mod tests;
