// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

/// State captured when a touch or drag gesture starts.
///
/// All gesture-relative math in [`crate::PanZoomModel::touch_move`] is
/// computed against this snapshot rather than against the previous move, so
/// dropped or coalesced move events do not accumulate error.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSnapshot {
    /// Pan offset at gesture start.
    pub pan: Vec2,
    /// Contact points at gesture start, in host-local pixels.
    pub touches: Vec<Point>,
    /// Centroid of [`GestureSnapshot::touches`].
    pub reference_point: Point,
    /// Scale at gesture start.
    pub scale: f64,
    /// Distance between the first two contacts, or `0.0` with fewer than two.
    pub distance: f64,
}

impl GestureSnapshot {
    /// Captures a snapshot for `touches` on top of the given `pan` and `scale`.
    ///
    /// Returns `None` if `touches` is empty.
    #[must_use]
    pub fn capture(touches: &[Point], pan: Vec2, scale: f64) -> Option<Self> {
        let reference_point = centroid(touches)?;
        Some(Self {
            pan,
            touches: touches.to_vec(),
            reference_point,
            scale,
            distance: pair_distance(touches),
        })
    }

    /// Returns `true` if the gesture started with two or more contacts.
    #[must_use]
    pub fn is_pinch(&self) -> bool {
        self.touches.len() > 1
    }
}

/// Arithmetic mean of `points`, or `None` for an empty slice.
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let n = points.len() as f64;
    Some((sum / n).to_point())
}

/// Euclidean distance between the first two points, or `0.0` with fewer than
/// two.
#[must_use]
pub fn pair_distance(points: &[Point]) -> f64 {
    match points {
        [a, b, ..] => a.distance(*b),
        _ => 0.0,
    }
}
