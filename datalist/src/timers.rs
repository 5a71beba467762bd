//! Deferred callbacks: debounce, settle and throttle slots.
//!
//! Timers are plain deadlines. Nothing runs on its own; the owner asks for
//! due timers with [`PendingTimers::pop_due`] and handles each one. The clock
//! is injected so tests can step time deterministically.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// The four timer slots. At most one timer per slot is pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Filter after the last keystroke of a burst.
    DebounceFilter,
    /// Hide after a bound input lost focus.
    SettleBlur,
    /// Cancel a pending settle shortly after a pointer-down on a row.
    SuppressBlur,
    /// Re-place every panel after the viewport stopped resizing.
    ThrottleResize,
}

/// Payload of a debounced filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    /// Identifier of the targeted widget(s).
    pub list: String,
    /// Input the keystroke came from.
    pub input: String,
    /// Input value at the time of the keystroke.
    pub query: String,
}

/// A timer whose deadline has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired {
    Filter(FilterRequest),
    SettleBlur { list: String },
    SuppressBlur,
    Resize,
}

impl Fired {
    pub fn slot(&self) -> TimerSlot {
        match self {
            Fired::Filter(_) => TimerSlot::DebounceFilter,
            Fired::SettleBlur { .. } => TimerSlot::SettleBlur,
            Fired::SuppressBlur => TimerSlot::SuppressBlur,
            Fired::Resize => TimerSlot::ThrottleResize,
        }
    }
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    payload: T,
}

/// One slot per timer concern, shared by every widget behind a router.
#[derive(Debug, Default)]
pub struct PendingTimers {
    debounce_filter: Option<Pending<FilterRequest>>,
    settle_blur: Option<Pending<String>>,
    suppress_blur: Option<Instant>,
    throttle_resize: Option<Instant>,
}

impl PendingTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the filter debounce. Any pending filter is dropped.
    pub fn debounce_filter(&mut self, deadline: Instant, request: FilterRequest) {
        self.debounce_filter = Some(Pending {
            deadline,
            payload: request,
        });
    }

    /// (Re)start the blur settle timer for `list`.
    pub fn settle_blur(&mut self, deadline: Instant, list: impl Into<String>) {
        self.settle_blur = Some(Pending {
            deadline,
            payload: list.into(),
        });
    }

    /// (Re)start the pointer-down grace timer.
    pub fn suppress_blur(&mut self, deadline: Instant) {
        self.suppress_blur = Some(deadline);
    }

    /// Start the resize throttle unless it is already running.
    /// Returns false if the trigger was absorbed by a pending window.
    pub fn throttle_resize(&mut self, deadline: Instant) -> bool {
        if self.throttle_resize.is_some() {
            return false;
        }
        self.throttle_resize = Some(deadline);
        true
    }

    /// Cancel a slot. Returns true if a timer was pending.
    pub fn cancel(&mut self, slot: TimerSlot) -> bool {
        match slot {
            TimerSlot::DebounceFilter => self.debounce_filter.take().is_some(),
            TimerSlot::SettleBlur => self.settle_blur.take().is_some(),
            TimerSlot::SuppressBlur => self.suppress_blur.take().is_some(),
            TimerSlot::ThrottleResize => self.throttle_resize.take().is_some(),
        }
    }

    /// Cancel every pending timer that targets `list`.
    /// Returns the cancelled slots.
    pub fn cancel_for_list(&mut self, list: &str) -> Vec<TimerSlot> {
        let mut cancelled = Vec::new();
        if self
            .debounce_filter
            .as_ref()
            .is_some_and(|p| p.payload.list == list)
        {
            self.debounce_filter = None;
            cancelled.push(TimerSlot::DebounceFilter);
        }
        if self.settle_blur.as_ref().is_some_and(|p| p.payload == list) {
            self.settle_blur = None;
            cancelled.push(TimerSlot::SettleBlur);
        }
        cancelled
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.deadline(slot).is_some()
    }

    pub fn deadline(&self, slot: TimerSlot) -> Option<Instant> {
        match slot {
            TimerSlot::DebounceFilter => self.debounce_filter.as_ref().map(|p| p.deadline),
            TimerSlot::SettleBlur => self.settle_blur.as_ref().map(|p| p.deadline),
            TimerSlot::SuppressBlur => self.suppress_blur,
            TimerSlot::ThrottleResize => self.throttle_resize,
        }
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        SLOTS.iter().filter_map(|slot| self.deadline(*slot)).min()
    }

    /// Take the earliest timer that is due at `now`.
    ///
    /// Call repeatedly until it returns `None`; handling one timer may cancel
    /// another that was due at the same time.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired> {
        // Ties resolve in SLOTS order, so a due grace timer runs before the settle it cancels.
        let slot = SLOTS
            .iter()
            .filter_map(|slot| self.deadline(*slot).map(|deadline| (deadline, *slot)))
            .filter(|(deadline, _)| *deadline <= now)
            .min_by_key(|(deadline, slot)| (*deadline, slot_rank(*slot)))
            .map(|(_, slot)| slot)?;

        match slot {
            TimerSlot::DebounceFilter => self
                .debounce_filter
                .take()
                .map(|p| Fired::Filter(p.payload)),
            TimerSlot::SettleBlur => self
                .settle_blur
                .take()
                .map(|p| Fired::SettleBlur { list: p.payload }),
            TimerSlot::SuppressBlur => self.suppress_blur.take().map(|_| Fired::SuppressBlur),
            TimerSlot::ThrottleResize => self.throttle_resize.take().map(|_| Fired::Resize),
        }
    }
}

const SLOTS: [TimerSlot; 4] = [
    TimerSlot::SuppressBlur,
    TimerSlot::SettleBlur,
    TimerSlot::DebounceFilter,
    TimerSlot::ThrottleResize,
];

fn slot_rank(slot: TimerSlot) -> usize {
    SLOTS.iter().position(|s| *s == slot).unwrap_or(SLOTS.len())
}
