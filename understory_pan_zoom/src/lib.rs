// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pan_zoom --heading-base-level=0

//! Understory Pan Zoom: a headless pan/zoom interaction model.
//!
//! This crate turns raw pointer, touch and wheel input into a consistent
//! scale + pan transform. It focuses on:
//! - Drag panning that maps the same screen distance to the same world
//!   distance at every zoom level.
//! - Pinch zooming that keeps the point between the fingers anchored.
//! - Wheel zooming around the cursor, proportional to the current scale.
//! - Momentum after release, estimated from recent pointer positions and
//!   decayed exponentially by a friction coefficient.
//!
//! It does **not** register event listeners, render anything or measure any
//! layout. Callers are expected to:
//! - Forward contact points (host-local pixels) into
//!   [`PanZoomModel::touch_start`] / [`PanZoomModel::touch_move`] /
//!   [`PanZoomModel::touch_end`], and wheel deltas into
//!   [`PanZoomModel::wheel_zoom`].
//! - Apply [`PanZoomModel::transform`] (or scale and pan directly) to their
//!   content, typically from a subscription.
//! - Drive a [`MomentumStep`] once per animation frame after a release.
//!
//! The model maps world coordinates to screen coordinates as
//! `screen = scale * (world + pan)`. Scale is always kept within
//! `[min_scale, max_scale]` by clamping; requests are never rejected.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_pan_zoom::{ManualClock, PanZoomConfig, PanZoomModel};
//!
//! let clock = ManualClock::new(0.0);
//! let config = PanZoomConfig::default().with_scale_limits(0.25, 8.0);
//! let mut model = PanZoomModel::new(config, clock.clone());
//!
//! // Zoom in around the cursor.
//! model.wheel_zoom(-50.0, Point::new(200.0, 100.0));
//! assert_eq!(model.scale(), 1.5);
//!
//! // Drag by (30, 0) screen pixels: (20, 0) in world units at scale 1.5.
//! let before = model.pan();
//! model.touch_start(&[Point::new(10.0, 10.0)]);
//! clock.advance(16.0);
//! model.touch_move(&[Point::new(40.0, 10.0)]);
//! model.touch_end();
//! let delta: Vec2 = model.pan() - before;
//! assert!((delta.x - 20.0).abs() < 1e-9);
//! assert_eq!(delta.y, 0.0);
//! ```
//!
//! ## Observing changes
//!
//! Scale and pan are published through [`Observable`] values that notify
//! synchronously and only on actual change:
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use understory_pan_zoom::{ManualClock, PanZoomConfig, PanZoomModel};
//!
//! let mut model = PanZoomModel::new(PanZoomConfig::default(), ManualClock::default());
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = seen.clone();
//! model.subscribe_scale(move |s| sink.borrow_mut().push(*s));
//!
//! model.zoom(2.0, None);
//! model.zoom(2.0, None);
//! model.zoom(500.0, None);
//! assert_eq!(*seen.borrow(), [2.0, 100.0]);
//! ```
//!
//! ## Time
//!
//! Velocity sampling and momentum read a [`Clock`]. Use [`StdClock`] (with the
//! `std` feature) for real time, or [`ManualClock`] when the host already has
//! frame timestamps.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clock;
mod config;
mod gesture;
mod model;
mod momentum;
mod observable;
mod velocity;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, ManualClock};
pub use config::{ConfigError, PanZoomConfig};
pub use gesture::{GestureSnapshot, centroid, pair_distance};
pub use model::{PanZoomDebugInfo, PanZoomModel, PanZoomState};
pub use momentum::MomentumStep;
pub use observable::{Observable, SubscriptionId};
pub use velocity::{Velocity, VelocitySample, VelocityTracker};
