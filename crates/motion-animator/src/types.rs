//! Core value types shared by every stage of the engine.
//!
//! This module defines:
//! - `Value`: tagged union of every animatable value kind
//! - `ValueKind`: the kind tag used by the property catalog
//! - `PropertyId`: the finite set of animatable property identifiers
//! - `AnimationKey`: opaque key under which a node stores an animation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque key identifying one stored animation on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationKey(pub u64);

impl AnimationKey {
    /// Generate a new unique key.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim-{}", self.0)
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }
}

/// Decomposed 2D transform (translate, scale, rotate).
///
/// Arithmetic on transforms is component-wise, so a delta transform is not
/// itself a valid affine transform; it is only meaningful when summed back
/// onto a base transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in radians.
    pub rotate: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotate: 0.0,
    };

    /// Uniform or non-uniform scale around the origin.
    pub fn scale(x: f64, y: f64) -> Self {
        Self {
            scale_x: x,
            scale_y: y,
            ..Self::IDENTITY
        }
    }

    /// Pure translation.
    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::IDENTITY
        }
    }
}

/// Kind tag for an animatable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Point,
    Size,
    Rect,
    Color,
    Transform,
    /// Discrete values that can only be swapped, never interpolated.
    Opaque,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Point => "point",
            Self::Size => "size",
            Self::Rect => "rect",
            Self::Color => "color",
            Self::Transform => "transform",
            Self::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// Enum representing all animatable value types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    /// Numeric value (opacity, corner radius, rotation, ...).
    Scalar { value: f64 },
    Point {
        #[serde(flatten)]
        point: Point,
    },
    Size {
        #[serde(flatten)]
        size: Size,
    },
    Rect {
        #[serde(flatten)]
        rect: Rect,
    },
    /// RGBA color components.
    Color { rgba: [f32; 4] },
    Transform {
        #[serde(flatten)]
        transform: Transform,
    },
    /// Handle to a discrete value owned by the host (image contents, paths, ...).
    Opaque { id: u64 },
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar { .. } => ValueKind::Scalar,
            Self::Point { .. } => ValueKind::Point,
            Self::Size { .. } => ValueKind::Size,
            Self::Rect { .. } => ValueKind::Rect,
            Self::Color { .. } => ValueKind::Color,
            Self::Transform { .. } => ValueKind::Transform,
            Self::Opaque { .. } => ValueKind::Opaque,
        }
    }

    /// Try to extract an f64 value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point { point } => Some(*point),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<Size> {
        match self {
            Self::Size { size } => Some(*size),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            Self::Rect { rect } => Some(*rect),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            Self::Color { rgba } => Some(*rgba),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<Transform> {
        match self {
            Self::Transform { transform } => Some(*transform),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar { value: v }
    }
}

impl From<Point> for Value {
    fn from(point: Point) -> Self {
        Self::Point { point }
    }
}

impl From<Size> for Value {
    fn from(size: Size) -> Self {
        Self::Size { size }
    }
}

impl From<Rect> for Value {
    fn from(rect: Rect) -> Self {
        Self::Rect { rect }
    }
}

impl From<[f32; 4]> for Value {
    fn from(rgba: [f32; 4]) -> Self {
        Self::Color { rgba }
    }
}

impl From<Transform> for Value {
    fn from(transform: Transform) -> Self {
        Self::Transform { transform }
    }
}

/// Identifier of an animatable node property.
///
/// The set is finite; hosts that need more identifiers register them as
/// `Custom` entries in their own `PropertyCatalog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyId {
    // Geometry
    AnchorPoint,
    Bounds,
    Height,
    Position,
    Width,
    X,
    Y,
    Z,

    // Transform
    Rotation,
    Scale,
    Transform,

    // Appearance
    BackgroundColor,
    BorderColor,
    BorderWidth,
    CornerRadius,
    Opacity,
    Contents,

    // Shadow
    ShadowColor,
    ShadowOffset,
    ShadowOpacity,
    ShadowRadius,

    // Shape stroke
    StrokeStart,
    StrokeEnd,

    /// Host-defined identifier with no entry in the standard catalog.
    Custom(u32),
}

impl PropertyId {
    /// Key path spelling of the identifier.
    pub fn key_path(&self) -> &'static str {
        match self {
            Self::AnchorPoint => "anchorPoint",
            Self::Bounds => "bounds",
            Self::Height => "bounds.size.height",
            Self::Position => "position",
            Self::Width => "bounds.size.width",
            Self::X => "position.x",
            Self::Y => "position.y",
            Self::Z => "zPosition",
            Self::Rotation => "transform.rotation.z",
            Self::Scale => "transform.scale",
            Self::Transform => "transform",
            Self::BackgroundColor => "backgroundColor",
            Self::BorderColor => "borderColor",
            Self::BorderWidth => "borderWidth",
            Self::CornerRadius => "cornerRadius",
            Self::Opacity => "opacity",
            Self::Contents => "contents",
            Self::ShadowColor => "shadowColor",
            Self::ShadowOffset => "shadowOffset",
            Self::ShadowOpacity => "shadowOpacity",
            Self::ShadowRadius => "shadowRadius",
            Self::StrokeStart => "strokeStart",
            Self::StrokeEnd => "strokeEnd",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(id) => write!(f, "custom:{id}"),
            other => f.write_str(other.key_path()),
        }
    }
}
