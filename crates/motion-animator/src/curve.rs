//! Timing curves.
//!
//! - `CubicBezier`: CSS-style cubic timing function over two control points
//! - `SpringCurve`: damped harmonic oscillator (mass, tension, friction, velocity)
//! - `Curve`: the resolved curve carried by a scheduled animation
//! - `TimingCurve`: what callers hand in; either a fixed curve or a generator
//!   that produces a spring per property at resolution time
//!
//! # Usage
//!
//! ```
//! use motion_animator::curve::{CubicBezier, SpringCurve};
//!
//! let ease = CubicBezier::EASE_IN_OUT;
//! let progress = ease.evaluate(0.5);
//! assert!((progress - 0.5).abs() < 1e-3);
//!
//! let spring = SpringCurve::new(1.0, 100.0, 10.0);
//! assert!(spring.settling_duration().is_some());
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::types::Value;
use super::velocity;

/// Distance from rest (in units of total displacement) considered settled.
pub const SETTLING_THRESHOLD: f64 = 0.001;

/// Springs that have not settled after this long are treated as non-settling.
const MAX_SETTLING_SECS: f64 = 60.0;

/// Sampling step for the settling scan.
const SETTLING_STEP_SECS: f64 = 0.001;

/// Cubic bezier timing function with implicit endpoints (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn evaluate(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }

        let t = solve_bezier_x(self.x1, self.x2, progress);
        bezier_component(self.y1, self.y2, t)
    }
}

/// Solve for t in the bezier x equation using Newton-Raphson, falling back to
/// bisection when the slope is too flat to make progress.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, t) - target_x;
        if err.abs() < 1e-7 {
            return t;
        }
        let slope = bezier_derivative(x1, x2, t);
        if slope.abs() < 1e-7 {
            break;
        }
        t = (t - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    t = target_x;
    for _ in 0..30 {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < 1e-7 {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    t
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

/// B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Damped spring timing curve.
///
/// `initial_velocity` is expressed in units of total displacement per second:
/// `1.0` means the value is moving towards its destination at a speed that
/// would cover the whole distance in one second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringCurve {
    pub mass: f64,
    pub tension: f64,
    pub friction: f64,
    pub initial_velocity: f64,
}

impl SpringCurve {
    pub fn new(mass: f64, tension: f64, friction: f64) -> Self {
        Self {
            mass,
            tension,
            friction,
            initial_velocity: 0.0,
        }
    }

    pub fn with_initial_velocity(mut self, initial_velocity: f64) -> Self {
        self.initial_velocity = initial_velocity;
        self
    }

    fn is_physical(&self) -> bool {
        [self.mass, self.tension, self.friction, self.initial_velocity]
            .iter()
            .all(|v| v.is_finite())
            && self.mass > 0.0
            && self.tension > 0.0
            && self.friction >= 0.0
    }

    fn natural_frequency(&self) -> f64 {
        (self.tension / self.mass).sqrt()
    }

    fn damping_ratio(&self) -> f64 {
        self.friction / (2.0 * (self.tension * self.mass).sqrt())
    }

    /// Normalized distance still to travel at `t` seconds: `1.0` at rest at the
    /// origin, `0.0` at rest at the destination.
    fn remaining(&self, t: f64) -> f64 {
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        let v0 = self.initial_velocity;

        if (zeta - 1.0).abs() < 1e-6 {
            let b = w0 - v0;
            (1.0 + b * t) * (-w0 * t).exp()
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let b = (zeta * w0 - v0) / wd;
            (-zeta * w0 * t).exp() * ((wd * t).cos() + b * (wd * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c1 = (-v0 - r2) / (r1 - r2);
            let c2 = 1.0 - c1;
            c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        }
    }

    /// Upper bound on `|remaining(t)|`, used to stop the settling scan early.
    fn envelope(&self, t: f64) -> f64 {
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        let v0 = self.initial_velocity;

        if (zeta - 1.0).abs() < 1e-6 {
            (1.0 + (w0 - v0).abs() * t) * (-w0 * t).exp()
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let b = (zeta * w0 - v0) / wd;
            (1.0 + b * b).sqrt() * (-zeta * w0 * t).exp()
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c1 = (-v0 - r2) / (r1 - r2);
            c1.abs() * (r1 * t).exp() + (1.0 - c1).abs() * (r2 * t).exp()
        }
    }

    /// Fraction of the total displacement covered after `t` seconds.
    ///
    /// May exceed `1.0` while an underdamped spring overshoots.
    pub fn fraction_at(&self, t: f64) -> f64 {
        if !self.is_physical() {
            return 1.0;
        }
        1.0 - self.remaining(t.max(0.0))
    }

    /// Time until the spring stays within `SETTLING_THRESHOLD` of rest.
    ///
    /// Returns `None` for non-physical parameters or springs that take longer
    /// than a minute to settle.
    pub fn settling_duration(&self) -> Option<Duration> {
        if !self.is_physical() {
            return None;
        }

        let mut last_unsettled = 0.0;
        let mut t = 0.0;
        while t <= MAX_SETTLING_SECS {
            if self.remaining(t).abs() >= SETTLING_THRESHOLD {
                last_unsettled = t;
            }
            if self.envelope(t) < SETTLING_THRESHOLD {
                return Some(Duration::from_secs_f64(last_unsettled + SETTLING_STEP_SECS));
            }
            t += SETTLING_STEP_SECS;
        }
        None
    }
}

/// A fully resolved timing curve, as stored on a scheduled animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    /// Jump straight to the destination.
    Instant,
    Bezier(CubicBezier),
    Spring(SpringCurve),
}

impl Curve {
    /// Map linear time progress (`elapsed / duration`) to value progress.
    ///
    /// `window` is the curve time one cycle spans, as returned by
    /// [`Curve::time_window`]; only springs read it.
    pub fn sample(&self, progress: f64, window: Duration) -> f64 {
        match self {
            Self::Instant => 1.0,
            Self::Bezier(bezier) => bezier.evaluate(progress),
            Self::Spring(spring) => {
                spring.fraction_at(progress.clamp(0.0, 1.0) * window.as_secs_f64())
            }
        }
    }

    /// Curve time one cycle of `duration` spans.
    ///
    /// Springs are stretched over their own settling window so time scaling
    /// slows the motion down rather than cutting it short. Computing the
    /// window scans the oscillator, so callers resolve it once per animation.
    pub fn time_window(&self, duration: Duration) -> Duration {
        match self {
            Self::Spring(spring) => spring.settling_duration().unwrap_or(duration),
            _ => duration,
        }
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, Self::Instant)
    }
}

impl From<CubicBezier> for Curve {
    fn from(bezier: CubicBezier) -> Self {
        Self::Bezier(bezier)
    }
}

impl From<SpringCurve> for Curve {
    fn from(spring: SpringCurve) -> Self {
        Self::Spring(spring)
    }
}

/// Produces a concrete curve for one property of one animation call.
pub trait CurveGenerator: fmt::Debug + Send + Sync {
    /// Raw, unprojected velocity shared by every property of the call.
    fn initial_velocity(&self) -> f64 {
        0.0
    }

    /// Build the curve for a single `from -> to` change. `projected_velocity`
    /// is `initial_velocity()` already normalized against this property's
    /// displacement.
    fn generate(&self, from: &Value, to: &Value, projected_velocity: f64) -> Curve;
}

/// Spring generator parameterized by perceptual duration and damping ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringCurveGenerator {
    pub duration: Duration,
    pub damping_ratio: f64,
    pub initial_velocity: f64,
}

impl SpringCurveGenerator {
    pub fn new(duration: Duration, damping_ratio: f64) -> Self {
        Self {
            duration,
            damping_ratio,
            initial_velocity: 0.0,
        }
    }

    pub fn with_initial_velocity(mut self, initial_velocity: f64) -> Self {
        self.initial_velocity = initial_velocity;
        self
    }
}

impl CurveGenerator for SpringCurveGenerator {
    fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    fn generate(&self, _from: &Value, _to: &Value, projected_velocity: f64) -> Curve {
        let response = self.duration.as_secs_f64();
        if response <= 0.0 {
            return Curve::Instant;
        }
        let mass = 1.0;
        let tension = (2.0 * PI / response).powi(2) * mass;
        let friction = 4.0 * PI * self.damping_ratio * mass / response;
        Curve::Spring(SpringCurve {
            mass,
            tension,
            friction,
            initial_velocity: projected_velocity,
        })
    }
}

/// The curve a caller attaches to a timing descriptor.
#[derive(Debug, Clone)]
pub enum TimingCurve {
    Fixed(Curve),
    Generator(Arc<dyn CurveGenerator>),
}

impl TimingCurve {
    pub fn generator(generator: impl CurveGenerator + 'static) -> Self {
        Self::Generator(Arc::new(generator))
    }

    /// The caller-supplied velocity before projection.
    pub fn raw_velocity(&self) -> f64 {
        match self {
            Self::Fixed(Curve::Spring(spring)) => spring.initial_velocity,
            Self::Fixed(_) => 0.0,
            Self::Generator(generator) => generator.initial_velocity(),
        }
    }

    /// Whether this curve can never produce an animation.
    pub fn is_instant(&self) -> bool {
        matches!(self, Self::Fixed(Curve::Instant))
    }

    /// Resolve to a concrete curve for one `from -> to` change, projecting the
    /// raw velocity onto this property's displacement.
    pub fn resolve(&self, from: &Value, to: &Value) -> Curve {
        match self {
            Self::Fixed(Curve::Spring(spring)) => {
                let projected = velocity::project(spring.initial_velocity, from, to);
                Curve::Spring(spring.with_initial_velocity(projected))
            }
            Self::Fixed(curve) => *curve,
            Self::Generator(generator) => {
                let projected = velocity::project(generator.initial_velocity(), from, to);
                generator.generate(from, to, projected)
            }
        }
    }
}

impl PartialEq for TimingCurve {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Generator(a), Self::Generator(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Curve> for TimingCurve {
    fn from(curve: Curve) -> Self {
        Self::Fixed(curve)
    }
}

impl From<CubicBezier> for TimingCurve {
    fn from(bezier: CubicBezier) -> Self {
        Self::Fixed(Curve::Bezier(bezier))
    }
}

impl From<SpringCurve> for TimingCurve {
    fn from(spring: SpringCurve) -> Self {
        Self::Fixed(Curve::Spring(spring))
    }
}

impl From<SpringCurveGenerator> for TimingCurve {
    fn from(generator: SpringCurveGenerator) -> Self {
        Self::generator(generator)
    }
}
