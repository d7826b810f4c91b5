//! Debounced input values.
//!
//! A typed value becomes effective only after it has stayed unchanged for
//! the quiet period. Time is passed in explicitly so front ends can drive it
//! from their own tick and tests stay deterministic.

use std::time::{Duration, Instant};

use provisio_config::constants::DEFAULT_SEARCH_DEBOUNCE_MS;

#[derive(Debug, Clone)]
pub struct Debounced<T> {
    delay: Duration,
    effective: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq + Default> Default for Debounced<T> {
    fn default() -> Self {
        Self::new(T::default(), Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS))
    }
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            effective: initial,
            pending: None,
        }
    }

    /// Record a new raw value typed at `now`. Restarts the quiet period.
    pub fn set(&mut self, value: T, now: Instant) {
        if value == self.effective {
            self.pending = None;
        } else {
            self.pending = Some((value, now));
        }
    }

    /// Promote the pending value if its quiet period has passed.
    ///
    /// Returns `true` when the effective value changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if !ready {
            return false;
        }
        match self.pending.take() {
            Some((value, _)) => {
                self.effective = value;
                true
            }
            None => false,
        }
    }

    /// Apply the pending value immediately (e.g. on Enter).
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((value, _)) => {
                self.effective = value;
                true
            }
            None => false,
        }
    }

    pub fn effective(&self) -> &T {
        &self.effective
    }

    /// The latest raw value, pending or effective.
    pub fn raw(&self) -> &T {
        self.pending
            .as_ref()
            .map(|(v, _)| v)
            .unwrap_or(&self.effective)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will become effective.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }
}
