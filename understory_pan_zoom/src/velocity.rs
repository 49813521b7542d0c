// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity estimation from a trailing window of timestamped positions.
//!
//! ## Usage
//!
//! 1) Call [`VelocityTracker::reset`] when a gesture starts.
//! 2) Feed every pointer position through [`VelocityTracker::add_tracking_point`].
//! 3) On release, read [`VelocityTracker::velocity`].
//!
//! The estimate is the displacement between the oldest and newest retained
//! samples divided by the time between them. There is no smoothing beyond the
//! windowing, so one noisy pair of samples dominates the result.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_pan_zoom::{ManualClock, VelocityTracker};
//!
//! let clock = ManualClock::new(0.0);
//! let mut tracker = VelocityTracker::new(100.0, clock.clone());
//!
//! tracker.add_tracking_point(Point::new(0.0, 0.0));
//! clock.set(20.0);
//! tracker.add_tracking_point(Point::new(10.0, 0.0));
//!
//! let v = tracker.velocity();
//! assert_eq!(v.x, 0.5);
//! assert_eq!(v.y, 0.0);
//! ```

use alloc::collections::VecDeque;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::clock::Clock;

/// One timestamped position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    /// Time the position was recorded, in milliseconds.
    pub timestamp: f64,
    /// Recorded position.
    pub point: Point,
}

/// Planar velocity in pixels per millisecond.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    /// Speed (magnitude of the velocity vector).
    pub speed: f64,
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Velocity {
    /// No motion.
    pub const ZERO: Self = Self {
        speed: 0.0,
        x: 0.0,
        y: 0.0,
    };

    /// Returns the components as a vector.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns `true` if every component is finite.
    ///
    /// Two samples sharing a timestamp produce an infinite or `NaN` estimate;
    /// such a velocity must be treated as "no reliable velocity".
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.speed.is_finite() && self.x.is_finite() && self.y.is_finite()
    }
}

/// Estimates velocity from the samples recorded within a trailing time window.
///
/// Samples older than the window are discarded on every insertion and every
/// query. If that leaves a single sample, the newest discarded one is kept as
/// the lower anchor of the estimate, so a gesture sampled more sparsely than
/// the window still yields an estimate from its last two positions. With two
/// or more samples inside the window, no stale sample is retained.
#[derive(Clone, Debug)]
pub struct VelocityTracker<C> {
    window_ms: f64,
    samples: VecDeque<VelocitySample>,
    clock: C,
}

impl<C: Clock> VelocityTracker<C> {
    /// Creates an empty tracker with a window of `window_ms` milliseconds.
    pub fn new(window_ms: f64, clock: C) -> Self {
        Self {
            window_ms,
            samples: VecDeque::new(),
            clock,
        }
    }

    /// Returns the window length in milliseconds.
    #[must_use]
    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Returns the clock used to stamp samples.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Discards all samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Records `point` at the clock's current time.
    pub fn add_tracking_point(&mut self, point: Point) {
        let now = self.clock.now_ms();
        self.add_tracking_point_at(point, now);
    }

    /// Records `point` at an explicit `timestamp` in milliseconds.
    ///
    /// Timestamps earlier than the newest retained sample are raised to it so
    /// the sequence stays non-decreasing.
    pub fn add_tracking_point_at(&mut self, point: Point, timestamp: f64) {
        let timestamp = match self.samples.back() {
            Some(last) if last.timestamp > timestamp => last.timestamp,
            _ => timestamp,
        };
        self.samples.push_back(VelocitySample { timestamp, point });
        self.prune(timestamp);
    }

    /// Returns the velocity estimate as of the clock's current time.
    pub fn velocity(&mut self) -> Velocity {
        let now = self.clock.now_ms();
        self.velocity_at(now)
    }

    /// Returns the velocity estimate as of `now` (milliseconds).
    ///
    /// With fewer than two retained samples the result is [`Velocity::ZERO`].
    /// If the oldest and newest samples share a timestamp the result is not
    /// finite; see [`Velocity::is_finite`].
    pub fn velocity_at(&mut self, now: f64) -> Velocity {
        self.prune(now);
        if self.samples.len() < 2 {
            return Velocity::ZERO;
        }
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return Velocity::ZERO;
        };

        let dt = last.timestamp - first.timestamp;
        let d = last.point - first.point;
        Velocity {
            speed: (d.x * d.x + d.y * d.y).sqrt() / dt,
            x: d.x / dt,
            y: d.y / dt,
        }
    }

    /// Returns the retained samples, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &VelocitySample> + '_ {
        self.samples.iter()
    }

    /// Returns the number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn prune(&mut self, now: f64) {
        let mut anchor = None;
        while let Some(front) = self.samples.front() {
            if now - front.timestamp <= self.window_ms {
                break;
            }
            anchor = self.samples.pop_front();
        }
        // Only a lone in-window sample needs a stale anchor; a lone stale
        // sample anchors nothing.
        if self.samples.len() == 1
            && let Some(anchor) = anchor
        {
            self.samples.push_front(anchor);
        }
    }
}
