// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inertial panning after a gesture is released.
//!
//! ## Usage
//!
//! 1) When a drag ends, call [`crate::PanZoomModel::create_momentum_step`]
//!    (or [`crate::PanZoomModel::end_gesture_with_momentum`]).
//! 2) Once per animation frame, call [`MomentumStep::advance`] with the model.
//! 3) Stop once it returns `true`. Dropping the step early cancels the
//!    animation; the last applied pan stays in place.
//!
//! Every elapsed millisecond is one sub-step: the velocity is multiplied by
//! the friction and the resulting displacement is added to the pan. The
//! animation finishes on the first sub-step that finds both velocity
//! components at or below the stop threshold.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_pan_zoom::{ManualClock, PanZoomConfig, PanZoomModel};
//!
//! let clock = ManualClock::new(0.0);
//! let mut model = PanZoomModel::new(PanZoomConfig::default(), clock.clone());
//!
//! model.touch_start(&[Point::new(0.0, 0.0)]);
//! clock.advance(10.0);
//! model.touch_move(&[Point::new(20.0, 0.0)]);
//!
//! let mut step = model.end_gesture_with_momentum().unwrap();
//! let mut frames = 0;
//! loop {
//!     clock.advance(16.0);
//!     frames += 1;
//!     if step.advance(&mut model) {
//!         break;
//!     }
//! }
//! assert!(frames > 1);
//! assert!(model.pan().x > 20.0);
//! ```

use kurbo::Vec2;

use crate::clock::Clock;
use crate::model::PanZoomModel;

/// Progress of one momentum animation.
///
/// The step owns its decaying velocity and the pan position it has reached,
/// so it writes absolute pan values and does not depend on reading back the
/// model's pan between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumStep {
    last_tick_ms: f64,
    velocity: Vec2,
    position: Option<Vec2>,
    friction: f64,
    threshold: f64,
    done: bool,
}

impl MomentumStep {
    /// Creates a step with the given initial `velocity` (pixels per
    /// millisecond) starting at `now_ms`.
    ///
    /// A non-finite velocity yields a step that is already done.
    #[must_use]
    pub fn new(velocity: Vec2, now_ms: f64, friction: f64, threshold: f64) -> Self {
        Self {
            last_tick_ms: now_ms,
            velocity,
            position: None,
            friction,
            threshold,
            done: !velocity.is_finite(),
        }
    }

    /// Returns the current, decayed velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` once the animation has finished.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances the animation to the model clock's current time and applies
    /// the resulting pan.
    ///
    /// Returns `true` once the animation has finished.
    pub fn advance<C: Clock>(&mut self, model: &mut PanZoomModel<C>) -> bool {
        let now = model.clock().now_ms();
        self.advance_at(model, now)
    }

    /// Advances the animation to `now_ms` and applies the resulting pan.
    ///
    /// The first call starts from the model's pan at that moment; later calls
    /// continue from the position this step reached. Returns `true` once the
    /// animation has finished; finished steps leave the model untouched.
    pub fn advance_at<C: Clock>(&mut self, model: &mut PanZoomModel<C>, now_ms: f64) -> bool {
        if self.done {
            return true;
        }

        let mut remaining = now_ms - self.last_tick_ms;
        self.last_tick_ms = now_ms;

        let scale = model.scale();
        let mut position = self.position.unwrap_or_else(|| model.pan());
        while remaining > 0.0 {
            remaining -= 1.0;
            if self.velocity.x.abs() <= self.threshold && self.velocity.y.abs() <= self.threshold
            {
                self.done = true;
                break;
            }
            self.velocity *= self.friction;
            position += self.velocity / scale;
        }

        self.position = Some(position);
        model.pan_to(position);
        self.done
    }
}
