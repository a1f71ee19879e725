//! Timing descriptors.
//!
//! A `TimingDescriptor` is the immutable configuration for one animation call:
//! how long to wait, how long to run, which curve to follow and how often to
//! repeat. One descriptor may be reused across any number of calls.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use motion_animator::curve::CubicBezier;
//! use motion_animator::timing::TimingDescriptor;
//!
//! let timing = TimingDescriptor::new(Duration::from_millis(300))
//!     .with_delay(Duration::from_millis(50))
//!     .with_curve(CubicBezier::EASE_OUT);
//! assert!(!timing.is_instant());
//! ```

use motion_config::{CurveName, DefaultsConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::curve::{CubicBezier, Curve, TimingCurve};

/// How many times an animation plays and whether it runs back on each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Repetition {
    /// Number of cycles; `0.0` plays once, `f64::INFINITY` repeats forever.
    /// Fractional counts stop mid-cycle.
    pub count: f64,
    pub autoreverses: bool,
}

impl Repetition {
    pub const NONE: Self = Self {
        count: 0.0,
        autoreverses: false,
    };

    pub fn new(count: f64, autoreverses: bool) -> Self {
        Self {
            count,
            autoreverses,
        }
    }

    /// Number of cycles actually played. An infinite count repeats forever.
    pub fn cycles(&self) -> f64 {
        if self.is_endless() {
            f64::INFINITY
        } else if self.count > 0.0 && self.count.is_finite() {
            self.count
        } else {
            1.0
        }
    }

    /// Whether the animation never completes on its own.
    pub fn is_endless(&self) -> bool {
        self.count == f64::INFINITY
    }

    /// Total active time for one animation of `duration`, saturating at
    /// `Duration::MAX`.
    pub fn active_duration(&self, duration: Duration) -> Duration {
        if self.is_endless() {
            return Duration::MAX;
        }
        let factor = self.cycles() * if self.autoreverses { 2.0 } else { 1.0 };
        Duration::try_from_secs_f64(duration.as_secs_f64() * factor).unwrap_or(Duration::MAX)
    }
}

/// Timing configuration for one animation call.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingDescriptor {
    pub delay: Duration,
    pub duration: Duration,
    /// `None` is treated exactly like an instant curve.
    pub curve: Option<TimingCurve>,
    pub repetition: Repetition,
}

impl Default for TimingDescriptor {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl TimingDescriptor {
    /// Ease-in-out timing of the given duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            delay: Duration::ZERO,
            duration,
            curve: Some(TimingCurve::Fixed(Curve::Bezier(CubicBezier::EASE_IN_OUT))),
            repetition: Repetition::NONE,
        }
    }

    /// Timing that never produces an animation.
    pub fn instant() -> Self {
        Self {
            curve: Some(TimingCurve::Fixed(Curve::Instant)),
            ..Self::new(Duration::ZERO)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_curve(mut self, curve: impl Into<TimingCurve>) -> Self {
        self.curve = Some(curve.into());
        self
    }

    pub fn without_curve(mut self) -> Self {
        self.curve = None;
        self
    }

    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self
    }

    /// Whether the curve alone rules out scheduling.
    pub fn is_instant(&self) -> bool {
        match &self.curve {
            None => true,
            Some(curve) => curve.is_instant(),
        }
    }
}

impl From<CurveName> for Curve {
    fn from(name: CurveName) -> Self {
        match name {
            CurveName::EaseInOut => Curve::Bezier(CubicBezier::EASE_IN_OUT),
            CurveName::EaseIn => Curve::Bezier(CubicBezier::EASE_IN),
            CurveName::EaseOut => Curve::Bezier(CubicBezier::EASE_OUT),
            CurveName::Linear => Curve::Bezier(CubicBezier::LINEAR),
            CurveName::Instant => Curve::Instant,
        }
    }
}

impl From<&DefaultsConfig> for TimingDescriptor {
    fn from(defaults: &DefaultsConfig) -> Self {
        Self::new(Duration::from_millis(defaults.duration_ms)).with_curve(Curve::from(defaults.curve))
    }
}

static_assertions::assert_impl_all!(TimingDescriptor: Send, Sync, Clone);
static_assertions::assert_impl_all!(Curve: Send, Sync, Copy);
