// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic time sources for velocity sampling and momentum.

use alloc::rc::Rc;
use core::cell::Cell;

/// A monotonic clock reporting milliseconds.
///
/// Only differences between readings are meaningful; the origin is up to the
/// implementation.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now_ms(&self) -> f64;
}

/// A clock whose time is set explicitly.
///
/// Clones share the same underlying time, so a host can keep one handle and
/// feed frame timestamps while the model reads through another.
///
/// ```
/// use understory_pan_zoom::{Clock, ManualClock};
///
/// let clock = ManualClock::new(10.0);
/// let handle = clock.clone();
/// handle.advance(6.5);
/// assert_eq!(clock.now_ms(), 16.5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Sets the current time.
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    /// Moves the current time forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Wall-clock independent time backed by [`std::time::Instant`].
///
/// Readings are milliseconds since the clock was created.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock};

    #[test]
    fn manual_clock_handles_share_time() {
        let clock = ManualClock::new(0.0);
        let other = clock.clone();
        other.set(42.0);
        assert_eq!(clock.now_ms(), 42.0);
        clock.advance(8.0);
        assert_eq!(other.now_ms(), 50.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_clock_is_monotonic() {
        let clock = super::StdClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
