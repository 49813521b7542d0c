// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::clock::Clock;
use crate::config::PanZoomConfig;
use crate::gesture::{GestureSnapshot, centroid, pair_distance};
use crate::momentum::MomentumStep;
use crate::observable::{Observable, SubscriptionId};
use crate::velocity::{Velocity, VelocityTracker};

/// Scale and pan published together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomState {
    /// Uniform zoom factor.
    pub scale: f64,
    /// Translation in world units, applied before scaling.
    pub pan: Vec2,
}

/// Pan/zoom state machine driven by raw pointer, touch and wheel input.
///
/// The model maps world coordinates to host-local screen pixels as
/// `screen = scale * (world + pan)`. It is the only writer of scale and pan;
/// hosts read the current values or subscribe to changes, and feed input
/// through the gesture and zoom operations.
///
/// Gesture lifecycle: **idle** → [`touch_start`](Self::touch_start) →
/// **dragging** → [`touch_end`](Self::touch_end) → **idle**. Moves while idle
/// are ignored. Starting while already dragging replaces the gesture.
#[derive(Debug)]
pub struct PanZoomModel<C> {
    config: PanZoomConfig,
    scale: Observable<f64>,
    pan: Observable<Vec2>,
    state: Observable<PanZoomState>,
    gesture: Option<GestureSnapshot>,
    tracker: VelocityTracker<C>,
}

#[cfg(feature = "std")]
impl PanZoomModel<crate::clock::StdClock> {
    /// Creates a model timed by a [`crate::StdClock`] starting now.
    #[must_use]
    pub fn with_std_clock(config: PanZoomConfig) -> Self {
        Self::new(config, crate::clock::StdClock::new())
    }
}

impl<C: Clock> PanZoomModel<C> {
    /// Creates an idle model at the configured initial scale and pan.
    ///
    /// The initial scale is clamped into the configured limits.
    pub fn new(config: PanZoomConfig, clock: C) -> Self {
        let scale = config.clamp_scale(config.initial_scale);
        let pan = config.initial_pan;
        Self {
            config,
            scale: Observable::new(scale),
            pan: Observable::new(pan),
            state: Observable::new(PanZoomState { scale, pan }),
            gesture: None,
            tracker: VelocityTracker::new(config.velocity_window_ms, clock),
        }
    }

    /// Returns a new idle model with the same configuration and a clone of
    /// the clock.
    ///
    /// Scale and pan start over from the configured initial values; the
    /// active gesture, velocity samples and subscriptions are not carried
    /// over.
    #[must_use]
    pub fn clone_fresh(&self) -> Self
    where
        C: Clone,
    {
        Self::new(self.config, self.tracker.clock().clone())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    /// Returns the clock used for velocity sampling and momentum.
    pub fn clock(&self) -> &C {
        self.tracker.clock()
    }

    /// Returns the current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        *self.scale.get()
    }

    /// Returns the current pan offset in world units.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        *self.pan.get()
    }

    /// Returns scale and pan together.
    #[must_use]
    pub fn state(&self) -> PanZoomState {
        *self.state.get()
    }

    /// Returns the snapshot of the active gesture, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&GestureSnapshot> {
        self.gesture.as_ref()
    }

    /// Returns `true` between [`touch_start`](Self::touch_start) and
    /// [`touch_end`](Self::touch_end).
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Returns the velocity tracker fed by gesture input.
    pub fn velocity_tracker(&self) -> &VelocityTracker<C> {
        &self.tracker
    }

    /// Returns the current velocity estimate of the gesture centroid.
    pub fn velocity(&mut self) -> Velocity {
        self.tracker.velocity()
    }

    /// Sets the minimum and maximum scale.
    ///
    /// The range is normalized so that `min_scale <= max_scale`, and the
    /// current scale is clamped into it.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        self.config = self.config.with_scale_limits(min_scale, max_scale);
        self.set_scale(self.config.clamp_scale(self.scale()));
    }

    /// Sets the fraction of the current scale added per unit of wheel delta.
    pub fn set_wheel_zoom_factor(&mut self, factor: f64) {
        self.config.wheel_zoom_factor = factor;
    }

    /// Sets the scale used by [`clone_fresh`](Self::clone_fresh).
    ///
    /// The live scale is not changed.
    pub fn set_initial_scale(&mut self, scale: f64) {
        self.config.initial_scale = scale;
    }

    /// Sets the pan offset used by [`clone_fresh`](Self::clone_fresh).
    ///
    /// The live pan is not changed.
    pub fn set_initial_pan(&mut self, pan: Vec2) {
        self.config.initial_pan = pan;
    }

    /// Subscribes to scale changes.
    pub fn subscribe_scale(&mut self, listener: impl FnMut(&f64) + 'static) -> SubscriptionId {
        self.scale.subscribe(listener)
    }

    /// Subscribes to pan changes.
    pub fn subscribe_pan(&mut self, listener: impl FnMut(&Vec2) + 'static) -> SubscriptionId {
        self.pan.subscribe(listener)
    }

    /// Subscribes to changes of either scale or pan.
    ///
    /// A zoom around a focal point changes both; the listener then runs once
    /// per component, observing the intermediate state in between.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PanZoomState) + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    /// Removes a subscription made with [`subscribe_scale`](Self::subscribe_scale).
    pub fn unsubscribe_scale(&mut self, id: SubscriptionId) -> bool {
        self.scale.unsubscribe(id)
    }

    /// Removes a subscription made with [`subscribe_pan`](Self::subscribe_pan).
    pub fn unsubscribe_pan(&mut self, id: SubscriptionId) -> bool {
        self.pan.unsubscribe(id)
    }

    /// Removes a subscription made with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Sets the pan offset.
    ///
    /// Panning is unconstrained.
    pub fn pan_to(&mut self, pan: Vec2) {
        self.set_pan(pan);
    }

    /// Starts a gesture with the given contact points.
    ///
    /// Resets the velocity tracker and seeds it with the contacts' centroid.
    /// An empty slice is ignored and leaves any active gesture untouched.
    ///
    /// Returns `true` if a gesture was started.
    pub fn touch_start(&mut self, touches: &[Point]) -> bool {
        let Some(snapshot) = GestureSnapshot::capture(touches, self.pan(), self.scale()) else {
            return false;
        };
        self.tracker.reset();
        self.tracker.add_tracking_point(snapshot.reference_point);
        self.gesture = Some(snapshot);
        true
    }

    /// Updates the active gesture with the current contact points.
    ///
    /// With one contact this drags: the centroid's screen displacement since
    /// the gesture started is divided by the current scale and added to the
    /// starting pan. With two or more contacts this pinches: the scale
    /// follows the ratio of the first two contacts' distance to their
    /// distance at start, and the pan keeps the starting centroid anchored
    /// under the fingers.
    ///
    /// Ignored while idle or when `touches` is empty.
    pub fn touch_move(&mut self, touches: &[Point]) {
        let Some(snapshot) = &self.gesture else {
            return;
        };
        let Some(point) = centroid(touches) else {
            return;
        };
        let start_pan = snapshot.pan;
        let start_scale = snapshot.scale;
        let reference = snapshot.reference_point;
        let start_distance = snapshot.distance;

        self.tracker.add_tracking_point(point);

        let displacement = point - reference;
        if touches.len() > 1 {
            // A gesture that started with a single contact has no reference
            // distance; the scale stays put until the next touch_start.
            if start_distance > 0.0 {
                let multiplier = pair_distance(touches) / start_distance;
                self.zoom(start_scale * multiplier, None);
            }
            let scale = self.scale();
            let reference = reference.to_vec2();
            let anchor_correction = reference / scale - reference / start_scale;
            self.set_pan(start_pan + displacement / scale + anchor_correction);
            return;
        }

        let scale = self.scale();
        self.set_pan(start_pan + displacement / scale);
    }

    /// Ends the active gesture.
    ///
    /// This does not start momentum; see
    /// [`create_momentum_step`](Self::create_momentum_step) and
    /// [`end_gesture_with_momentum`](Self::end_gesture_with_momentum).
    pub fn touch_end(&mut self) {
        self.gesture = None;
    }

    /// Ends the active gesture and returns a momentum animation for the
    /// release velocity.
    ///
    /// Returns `None` if the velocity estimate is not finite or already at or
    /// below the stop threshold on both axes.
    pub fn end_gesture_with_momentum(&mut self) -> Option<MomentumStep> {
        self.touch_end();
        let step = self.create_momentum_step();
        let v = step.velocity();
        let threshold = self.config.stop_momentum_scroll_threshold;
        if step.is_done() || (v.x.abs() <= threshold && v.y.abs() <= threshold) {
            return None;
        }
        Some(step)
    }

    /// Creates a momentum animation seeded from the current velocity
    /// estimate.
    ///
    /// Call [`MomentumStep::advance`] once per frame until it returns `true`.
    /// A non-finite velocity estimate yields a step that is already done.
    pub fn create_momentum_step(&mut self) -> MomentumStep {
        let now = self.tracker.clock().now_ms();
        let velocity = self.tracker.velocity_at(now).to_vec2();
        MomentumStep::new(
            velocity,
            now,
            self.config.friction,
            self.config.stop_momentum_scroll_threshold,
        )
    }

    /// Sets the scale, optionally keeping a focal point fixed.
    ///
    /// `scale` is clamped into the configured limits; a `NaN` request is
    /// ignored. `focal` is expressed in the scaled convention produced by
    /// [`zoom_to_point`](Self::zoom_to_point), i.e. a screen point multiplied
    /// by the new scale.
    pub fn zoom(&mut self, scale: f64, focal: Option<Point>) {
        if scale.is_nan() {
            return;
        }
        let current_scale = self.scale();
        let new_scale = self.config.clamp_scale(scale);
        self.set_scale(new_scale);

        if let Some(focal) = focal {
            let focal = focal.to_vec2();
            let pan = self.pan();
            let new_pan =
                (focal / new_scale - focal / current_scale + pan * new_scale) / new_scale;
            self.set_pan(new_pan);
        }
    }

    /// Sets the scale while keeping the world position under the screen
    /// point `point` fixed.
    pub fn zoom_to_point(&mut self, scale: f64, point: Point) {
        let scale = self.config.clamp_scale(scale);
        let focal = Point::new(point.x * scale, point.y * scale);
        self.zoom(scale, Some(focal));
    }

    /// Zooms in response to a wheel delta, around the screen point `focal`.
    ///
    /// Positive deltas (wheel down) zoom out. The scale changes by
    /// `scale * delta * wheel_zoom_factor`, so each wheel notch feels the same
    /// at every zoom level.
    pub fn wheel_zoom(&mut self, delta: f64, focal: Point) {
        let delta = -delta;
        let scale = self.scale();
        let new_scale = scale + scale * delta * self.config.wheel_zoom_factor;
        self.zoom_to_point(new_scale, focal);
    }

    /// Zooms and pans so that `target` is centered in a viewport of size
    /// `viewport`, as large as fits.
    ///
    /// `target` is in screen space under the current transform, as measured
    /// by the host. Degenerate sizes are ignored.
    pub fn zoom_to_fit(&mut self, viewport: Size, target: Rect) {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        if target.width() <= 0.0 || target.height() <= 0.0 {
            return;
        }

        let scale = self.scale();
        let pan = self.pan();
        let origin = target.origin().to_vec2() / scale - pan;
        let size = target.size() / scale;

        self.zoom(
            (viewport.width / size.width).min(viewport.height / size.height),
            None,
        );

        let scale = self.scale();
        self.set_pan(Vec2::new(
            (viewport.width - size.width * scale) / scale / 2.0 - origin.x,
            (viewport.height - size.height * scale) / scale / 2.0 - origin.y,
        ));
    }

    /// Returns the world-to-screen transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale()) * Affine::translate(self.pan())
    }

    /// Converts a screen point into world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, point: Point) -> Point {
        (point.to_vec2() / self.scale() - self.pan()).to_point()
    }

    /// Converts a world point into screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, point: Point) -> Point {
        ((point.to_vec2() + self.pan()) * self.scale()).to_point()
    }

    /// Snapshot of the current model state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> PanZoomDebugInfo {
        PanZoomDebugInfo {
            scale: self.scale(),
            pan: self.pan(),
            min_scale: self.config.min_scale,
            max_scale: self.config.max_scale,
            gesture_active: self.is_gesture_active(),
            gesture_touches: self.gesture.as_ref().map_or(0, |g| g.touches.len()),
            velocity_samples: self.tracker.len(),
        }
    }

    fn set_scale(&mut self, scale: f64) {
        if self.scale.set(scale) {
            let pan = self.pan();
            self.state.set(PanZoomState { scale, pan });
        }
    }

    fn set_pan(&mut self, pan: Vec2) {
        if self.pan.set(pan) {
            let scale = self.scale();
            self.state.set(PanZoomState { scale, pan });
        }
    }
}

/// Debug snapshot of a [`PanZoomModel`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomDebugInfo {
    /// Current scale.
    pub scale: f64,
    /// Current pan offset.
    pub pan: Vec2,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// Whether a gesture is in progress.
    pub gesture_active: bool,
    /// Number of contacts the active gesture started with.
    pub gesture_touches: usize,
    /// Number of samples retained by the velocity tracker.
    pub velocity_samples: usize,
}
