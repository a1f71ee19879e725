//! Property catalog.
//!
//! Maps each `PropertyId` to the kind of value it holds and whether animations
//! on it may be composed additively. The standard table covers every built-in
//! identifier; hosts register `PropertyId::Custom` entries on top.

use std::collections::HashMap;

use super::types::{PropertyId, ValueKind};

/// Catalog entry for one animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatableProperty {
    pub id: PropertyId,
    pub kind: ValueKind,
    pub additive_eligible: bool,
}

impl AnimatableProperty {
    /// Colors and opaque values are never additive, whatever the caller asks.
    pub fn new(id: PropertyId, kind: ValueKind, additive_eligible: bool) -> Self {
        let additive_eligible =
            additive_eligible && !matches!(kind, ValueKind::Color | ValueKind::Opaque);
        Self {
            id,
            kind,
            additive_eligible,
        }
    }
}

/// Lookup table from property identifiers to their catalog entries.
#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    entries: HashMap<PropertyId, AnimatableProperty>,
}

impl PropertyCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in property table.
    pub fn standard() -> Self {
        use PropertyId::*;
        use ValueKind::*;

        let table = [
            (AnchorPoint, Point, false),
            (Bounds, Rect, true),
            (Height, Scalar, true),
            (Position, Point, true),
            (Width, Scalar, true),
            (X, Scalar, true),
            (Y, Scalar, true),
            (Z, Scalar, true),
            (Rotation, Scalar, true),
            (Scale, Scalar, true),
            (PropertyId::Transform, ValueKind::Transform, true),
            (BackgroundColor, Color, false),
            (BorderColor, Color, false),
            (BorderWidth, Scalar, true),
            (CornerRadius, Scalar, true),
            (Opacity, Scalar, false),
            (Contents, Opaque, false),
            (ShadowColor, Color, false),
            (ShadowOffset, ValueKind::Size, true),
            (ShadowOpacity, Scalar, true),
            (ShadowRadius, Scalar, true),
            (StrokeStart, Scalar, true),
            (StrokeEnd, Scalar, true),
        ];

        let mut catalog = Self::new();
        for (id, kind, additive) in table {
            catalog.register(AnimatableProperty::new(id, kind, additive));
        }
        catalog
    }

    /// Add or replace an entry.
    pub fn register(&mut self, property: AnimatableProperty) {
        self.entries.insert(property.id, property);
    }

    pub fn lookup(&self, id: PropertyId) -> Option<&AnimatableProperty> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: PropertyId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
