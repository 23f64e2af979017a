//! Frame scheduling, time sources and debouncing.
//!
//! The host loop owns the display clock. It asks the [`FrameScheduler`]
//! whether a frame is wanted, and feeds timestamps from a [`TickSource`].
//! Tests inject a [`ManualClock`] instead of wall time.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond clock.
pub trait TickSource {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) -> f64 {
        let now = self.now.get() + ms;
        self.now.set(now);
        now
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl TickSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Handle for a scheduled frame. Cancelling invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Holds at most one outstanding frame request.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameToken>,
    requested: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next frame, or return the one already pending.
    pub fn request(&mut self) -> FrameToken {
        if let Some(token) = self.pending {
            return token;
        }
        self.next_id += 1;
        self.requested += 1;
        let token = FrameToken(self.next_id);
        self.pending = Some(token);
        token
    }

    /// Cancel the pending frame, if any.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    /// Consume the pending frame when the display is ready for it.
    pub fn take(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total frames ever scheduled.
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

/// Delays a value until triggers have been quiet for `delay_ms`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: f64,
    deadline: Option<f64>,
    value: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
            value: None,
        }
    }

    /// Record `value` and push the deadline out to `now + delay`.
    pub fn trigger(&mut self, now_ms: f64, value: T) {
        self.deadline = Some(now_ms + self.delay_ms);
        self.value = Some(value);
    }

    /// Return the latest value once the deadline has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                self.value.take()
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.value = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
