//! Per-kind value arithmetic.
//!
//! Additive composition needs `from - to` deltas and a zero of each kind;
//! velocity projection needs a signed scalar displacement; the reference
//! layer needs interpolation and summation to sample presentation values.
//! All of it lives here so the rest of the engine never matches on kinds.
//!
//! Opaque values support none of these operations. Mixed-kind operands
//! yield `None`; callers validate kinds against the catalog before getting
//! this far.

use super::types::{Point, Rect, Size, Transform, Value, ValueKind};

/// Linear interpolation between two values of the same type.
///
/// When `t = 0.0` the result is `self`, when `t = 1.0` it is `to`. Values of
/// `t` outside that range extrapolate, which spring curves rely on for
/// overshoot.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

/// Component-wise vector arithmetic for a value kind.
pub trait Arithmetic: Sized {
    fn add(&self, other: &Self) -> Self;
    fn sub(&self, other: &Self) -> Self;
    fn scale(&self, factor: f64) -> Self;
    fn zero() -> Self;
    /// Signed component with the largest magnitude.
    fn dominant_component(&self) -> f64;
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Pick whichever of the candidates has the largest absolute value, keeping its sign.
fn dominant(components: &[f64]) -> f64 {
    components
        .iter()
        .copied()
        .fold(0.0_f64, |best, c| if c.abs() > best.abs() { c } else { best })
}

impl Arithmetic for f64 {
    fn add(&self, other: &Self) -> Self {
        self + other
    }
    fn sub(&self, other: &Self) -> Self {
        self - other
    }
    fn scale(&self, factor: f64) -> Self {
        self * factor
    }
    fn zero() -> Self {
        0.0
    }
    fn dominant_component(&self) -> f64 {
        *self
    }
}

impl Arithmetic for Point {
    fn add(&self, other: &Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
    fn sub(&self, other: &Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
    fn scale(&self, factor: f64) -> Self {
        Point::new(self.x * factor, self.y * factor)
    }
    fn zero() -> Self {
        Point::default()
    }
    fn dominant_component(&self) -> f64 {
        dominant(&[self.x, self.y])
    }
}

impl Arithmetic for Size {
    fn add(&self, other: &Self) -> Self {
        Size::new(self.width + other.width, self.height + other.height)
    }
    fn sub(&self, other: &Self) -> Self {
        Size::new(self.width - other.width, self.height - other.height)
    }
    fn scale(&self, factor: f64) -> Self {
        Size::new(self.width * factor, self.height * factor)
    }
    fn zero() -> Self {
        Size::default()
    }
    fn dominant_component(&self) -> f64 {
        dominant(&[self.width, self.height])
    }
}

impl Arithmetic for Rect {
    fn add(&self, other: &Self) -> Self {
        Rect {
            origin: self.origin.add(&other.origin),
            size: self.size.add(&other.size),
        }
    }
    fn sub(&self, other: &Self) -> Self {
        Rect {
            origin: self.origin.sub(&other.origin),
            size: self.size.sub(&other.size),
        }
    }
    fn scale(&self, factor: f64) -> Self {
        Rect {
            origin: self.origin.scale(factor),
            size: self.size.scale(factor),
        }
    }
    fn zero() -> Self {
        Rect::default()
    }
    fn dominant_component(&self) -> f64 {
        dominant(&[
            self.origin.x,
            self.origin.y,
            self.size.width,
            self.size.height,
        ])
    }
}

impl Arithmetic for [f32; 4] {
    fn add(&self, other: &Self) -> Self {
        std::array::from_fn(|i| self[i] + other[i])
    }
    fn sub(&self, other: &Self) -> Self {
        std::array::from_fn(|i| self[i] - other[i])
    }
    fn scale(&self, factor: f64) -> Self {
        std::array::from_fn(|i| (self[i] as f64 * factor) as f32)
    }
    fn zero() -> Self {
        [0.0; 4]
    }
    fn dominant_component(&self) -> f64 {
        dominant(&self.map(f64::from))
    }
}

impl Arithmetic for Transform {
    fn add(&self, other: &Self) -> Self {
        Transform {
            translate_x: self.translate_x + other.translate_x,
            translate_y: self.translate_y + other.translate_y,
            scale_x: self.scale_x + other.scale_x,
            scale_y: self.scale_y + other.scale_y,
            rotate: self.rotate + other.rotate,
        }
    }
    fn sub(&self, other: &Self) -> Self {
        Transform {
            translate_x: self.translate_x - other.translate_x,
            translate_y: self.translate_y - other.translate_y,
            scale_x: self.scale_x - other.scale_x,
            scale_y: self.scale_y - other.scale_y,
            rotate: self.rotate - other.rotate,
        }
    }
    fn scale(&self, factor: f64) -> Self {
        Transform {
            translate_x: self.translate_x * factor,
            translate_y: self.translate_y * factor,
            scale_x: self.scale_x * factor,
            scale_y: self.scale_y * factor,
            rotate: self.rotate * factor,
        }
    }
    /// All-zero components, including scale: the additive identity, not the
    /// identity transform.
    fn zero() -> Self {
        Transform {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 0.0,
            scale_y: 0.0,
            rotate: 0.0,
        }
    }
    fn dominant_component(&self) -> f64 {
        dominant(&[
            self.translate_x,
            self.translate_y,
            self.scale_x,
            self.scale_y,
            self.rotate,
        ])
    }
}

impl<T: Arithmetic> Interpolate for T {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.add(&to.sub(self).scale(t))
    }
}

/// Apply a binary operation to two values of the same arithmetic kind.
macro_rules! zip_kinds {
    ($a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {
        match ($a, $b) {
            (Value::Scalar { value: $x }, Value::Scalar { value: $y }) => {
                Some(Value::from($body))
            }
            (Value::Point { point: $x }, Value::Point { point: $y }) => Some(Value::from($body)),
            (Value::Size { size: $x }, Value::Size { size: $y }) => Some(Value::from($body)),
            (Value::Rect { rect: $x }, Value::Rect { rect: $y }) => Some(Value::from($body)),
            (Value::Color { rgba: $x }, Value::Color { rgba: $y }) => Some(Value::from($body)),
            (Value::Transform { transform: $x }, Value::Transform { transform: $y }) => {
                Some(Value::from($body))
            }
            _ => None,
        }
    };
}

impl Value {
    /// `self + other`, or `None` for opaque or mismatched kinds.
    pub fn checked_add(&self, other: &Value) -> Option<Value> {
        zip_kinds!(self, other, |a, b| a.add(b))
    }

    /// `self - other`, or `None` for opaque or mismatched kinds.
    pub fn checked_sub(&self, other: &Value) -> Option<Value> {
        zip_kinds!(self, other, |a, b| a.sub(b))
    }

    /// Interpolate towards `to`. Opaque values switch to `to` once `t >= 1`.
    pub fn interpolate(&self, to: &Value, t: f64) -> Value {
        if let Some(v) = zip_kinds!(self, to, |a, b| a.interpolate(b, t)) {
            return v;
        }
        if t >= 1.0 { *to } else { *self }
    }

    /// `self * factor`, or `None` for opaque values.
    pub fn scaled(&self, factor: f64) -> Option<Value> {
        match self {
            Value::Scalar { value } => Some(Value::from(value.scale(factor))),
            Value::Point { point } => Some(Value::from(point.scale(factor))),
            Value::Size { size } => Some(Value::from(size.scale(factor))),
            Value::Rect { rect } => Some(Value::from(rect.scale(factor))),
            Value::Color { rgba } => Some(Value::from(rgba.scale(factor))),
            Value::Transform { transform } => Some(Value::from(transform.scale(factor))),
            Value::Opaque { .. } => None,
        }
    }

    /// Signed scalar summary of a displacement value.
    ///
    /// Multi-component kinds report their dominant axis so that a point moving
    /// `(0,0) -> (100,100)` has the same displacement as a scalar moving
    /// `0 -> 100`.
    pub fn signed_magnitude(&self) -> Option<f64> {
        match self {
            Value::Scalar { value } => Some(value.dominant_component()),
            Value::Point { point } => Some(point.dominant_component()),
            Value::Size { size } => Some(size.dominant_component()),
            Value::Rect { rect } => Some(rect.dominant_component()),
            Value::Color { rgba } => Some(rgba.dominant_component()),
            Value::Transform { transform } => Some(transform.dominant_component()),
            Value::Opaque { .. } => None,
        }
    }

    /// The additive identity of `kind`, or `None` for opaque values.
    pub fn zero_of(kind: ValueKind) -> Option<Value> {
        match kind {
            ValueKind::Scalar => Some(Value::from(f64::zero())),
            ValueKind::Point => Some(Value::from(Point::zero())),
            ValueKind::Size => Some(Value::from(Size::zero())),
            ValueKind::Rect => Some(Value::from(Rect::zero())),
            ValueKind::Color => Some(Value::from(<[f32; 4]>::zero())),
            ValueKind::Transform => Some(Value::from(Transform::zero())),
            ValueKind::Opaque => None,
        }
    }
}
