// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Vec2;

/// Configuration for a [`crate::PanZoomModel`].
///
/// The model never rejects a configuration: out-of-range scale requests are
/// clamped into `[min_scale, max_scale]` and every other value is used as-is.
/// Call [`PanZoomConfig::validate`] when a configuration comes from an
/// untrusted source and you want to surface mistakes early.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomConfig {
    /// Scale applied on construction and after [`crate::PanZoomModel::clone_fresh`].
    pub initial_scale: f64,
    /// Pan offset applied on construction, in world units.
    pub initial_pan: Vec2,
    /// Fraction of the current scale added per unit of wheel delta.
    pub wheel_zoom_factor: f64,
    /// Largest scale the model will store.
    pub max_scale: f64,
    /// Smallest scale the model will store.
    pub min_scale: f64,
    /// Per-millisecond velocity decay during momentum, in `(0, 1)`.
    pub friction: f64,
    /// Momentum stops once both velocity components are at or below this
    /// magnitude (pixels per millisecond).
    pub stop_momentum_scroll_threshold: f64,
    /// Length of the trailing window used by the velocity tracker, in
    /// milliseconds.
    pub velocity_window_ms: f64,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            initial_scale: 1.0,
            initial_pan: Vec2::ZERO,
            wheel_zoom_factor: 0.01,
            max_scale: 100.0,
            min_scale: 0.01,
            friction: 0.995,
            stop_momentum_scroll_threshold: 0.1,
            velocity_window_ms: 100.0,
        }
    }
}

impl PanZoomConfig {
    /// Returns a copy with the given initial scale.
    #[must_use]
    pub fn with_initial_scale(mut self, scale: f64) -> Self {
        self.initial_scale = scale;
        self
    }

    /// Returns a copy with the given initial pan offset.
    #[must_use]
    pub fn with_initial_pan(mut self, pan: Vec2) -> Self {
        self.initial_pan = pan;
        self
    }

    /// Returns a copy with the given wheel zoom factor.
    #[must_use]
    pub fn with_wheel_zoom_factor(mut self, factor: f64) -> Self {
        self.wheel_zoom_factor = factor;
        self
    }

    /// Returns a copy with the given scale limits.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Returns a copy with the given momentum friction.
    #[must_use]
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Returns a copy with the given momentum stop threshold.
    #[must_use]
    pub fn with_stop_momentum_scroll_threshold(mut self, threshold: f64) -> Self {
        self.stop_momentum_scroll_threshold = threshold;
        self
    }

    /// Returns a copy with the given velocity window, in milliseconds.
    #[must_use]
    pub fn with_velocity_window_ms(mut self, window_ms: f64) -> Self {
        self.velocity_window_ms = window_ms;
        self
    }

    /// Saturates `scale` into `[min_scale, max_scale]`.
    ///
    /// Unlike [`f64::clamp`] this never panics, even if the limits were set
    /// inverted through the public fields; the maximum wins in that case.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    /// Checks the configuration for values the model cannot use sensibly.
    ///
    /// This is purely advisory; [`crate::PanZoomModel::new`] accepts any
    /// configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("initial_scale", self.initial_scale),
            ("initial_pan.x", self.initial_pan.x),
            ("initial_pan.y", self.initial_pan.y),
            ("wheel_zoom_factor", self.wheel_zoom_factor),
            ("max_scale", self.max_scale),
            ("min_scale", self.min_scale),
            ("friction", self.friction),
            (
                "stop_momentum_scroll_threshold",
                self.stop_momentum_scroll_threshold,
            ),
            ("velocity_window_ms", self.velocity_window_ms),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFiniteValue(name));
        }
        if self.min_scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale("min_scale"));
        }
        if self.initial_scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale("initial_scale"));
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleLimits {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(ConfigError::FrictionOutOfRange(self.friction));
        }
        if self.stop_momentum_scroll_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold(
                self.stop_momentum_scroll_threshold,
            ));
        }
        if self.velocity_window_ms <= 0.0 {
            return Err(ConfigError::NonPositiveWindow(self.velocity_window_ms));
        }
        Ok(())
    }
}

/// Error returned by [`PanZoomConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The named field is `NaN` or infinite.
    NonFiniteValue(&'static str),
    /// The named scale field is zero or negative.
    NonPositiveScale(&'static str),
    /// `min_scale` is greater than `max_scale`.
    InvertedScaleLimits {
        /// Configured minimum scale.
        min: f64,
        /// Configured maximum scale.
        max: f64,
    },
    /// `friction` is outside the open interval `(0, 1)`.
    FrictionOutOfRange(f64),
    /// `stop_momentum_scroll_threshold` is negative.
    NegativeThreshold(f64),
    /// `velocity_window_ms` is zero or negative.
    NonPositiveWindow(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteValue(name) => write!(f, "`{name}` must be finite"),
            Self::NonPositiveScale(name) => write!(f, "`{name}` must be greater than zero"),
            Self::InvertedScaleLimits { min, max } => {
                write!(f, "min_scale ({min}) is greater than max_scale ({max})")
            }
            Self::FrictionOutOfRange(friction) => {
                write!(f, "friction ({friction}) must lie strictly between 0 and 1")
            }
            Self::NegativeThreshold(threshold) => write!(
                f,
                "stop_momentum_scroll_threshold ({threshold}) must not be negative"
            ),
            Self::NonPositiveWindow(window) => {
                write!(f, "velocity_window_ms ({window}) must be greater than zero")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
