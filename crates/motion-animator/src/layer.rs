//! Headless reference layer.
//!
//! `Layer` is an in-memory `NodeAdapter` with a manual clock. It stores model
//! values, keeps animations in insertion order and composes them into
//! presentation values the way a compositor would: absolute animations
//! replace the base value, additive animations add their delta on top.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use motion_animator::{Animator, Layer, NodeAdapter, PropertyId, TimingDescriptor};
//!
//! let animator = Animator::new();
//! let mut layer = Layer::new("card");
//! animator
//!     .animate_with(&TimingDescriptor::new(Duration::from_millis(300)), &mut layer, |layer| {
//!         layer.set_opacity(0.0);
//!     }, None)
//!     .unwrap();
//!
//! assert_eq!(layer.opacity(), 0.0);
//! assert!(layer.presentation_value(PropertyId::Opacity).is_some());
//! layer.advance(Duration::from_millis(300));
//! assert!(layer.animation_keys().is_empty());
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;

use super::animation::ScheduledAnimation;
use super::node::NodeAdapter;
use super::types::{AnimationKey, Point, PropertyId, Rect, Transform, Value};

#[derive(Debug)]
struct StoredAnimation {
    key: AnimationKey,
    added_at: Duration,
    animation: ScheduledAnimation,
}

/// In-memory scene node driven by a manual clock.
#[derive(Debug)]
pub struct Layer {
    id: String,
    model: BTreeMap<PropertyId, Value>,
    animations: Vec<StoredAnimation>,
    clock: Duration,
}

impl Layer {
    /// A layer with the common geometry and appearance properties at their
    /// default values.
    pub fn new(id: impl Into<String>) -> Self {
        let defaults = [
            (PropertyId::AnchorPoint, Value::from(Point::new(0.5, 0.5))),
            (PropertyId::Bounds, Value::from(Rect::default())),
            (PropertyId::Position, Value::from(Point::default())),
            (PropertyId::Opacity, Value::from(1.0)),
            (PropertyId::CornerRadius, Value::from(0.0)),
            (PropertyId::BorderWidth, Value::from(0.0)),
            (PropertyId::BackgroundColor, Value::from([0.0, 0.0, 0.0, 0.0])),
            (PropertyId::Transform, Value::from(Transform::IDENTITY)),
        ];
        Self::empty(id).with_values(defaults)
    }

    /// A layer exposing no properties.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: BTreeMap::new(),
            animations: Vec::new(),
            clock: Duration::ZERO,
        }
    }

    pub fn with_values(mut self, values: impl IntoIterator<Item = (PropertyId, Value)>) -> Self {
        self.model.extend(values);
        self
    }

    /// Set a model value, exposing the property if it was not already.
    pub fn set(&mut self, property: PropertyId, value: impl Into<Value>) {
        self.model.insert(property, value.into());
    }

    pub fn get(&self, property: PropertyId) -> Option<Value> {
        self.model.get(&property).copied()
    }

    pub fn opacity(&self) -> f64 {
        self.scalar(PropertyId::Opacity)
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.set(PropertyId::Opacity, opacity);
    }

    pub fn position(&self) -> Point {
        self.get(PropertyId::Position)
            .and_then(|v| v.as_point())
            .unwrap_or_default()
    }

    pub fn set_position(&mut self, position: Point) {
        self.set(PropertyId::Position, position);
    }

    pub fn bounds(&self) -> Rect {
        self.get(PropertyId::Bounds)
            .and_then(|v| v.as_rect())
            .unwrap_or_default()
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.set(PropertyId::Bounds, bounds);
    }

    pub fn set_corner_radius(&mut self, radius: f64) {
        self.set(PropertyId::CornerRadius, radius);
    }

    pub fn set_background_color(&mut self, rgba: [f32; 4]) {
        self.set(PropertyId::BackgroundColor, rgba);
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.set(PropertyId::Transform, transform);
    }

    fn scalar(&self, property: PropertyId) -> f64 {
        self.get(property).and_then(|v| v.as_f64()).unwrap_or_default()
    }

    /// Time elapsed on the layer's clock.
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Move the clock forward, completing every animation whose active time
    /// has elapsed. Endlessly repeating animations stay until removed.
    pub fn advance(&mut self, dt: Duration) {
        self.clock = self.clock.saturating_add(dt);
        let now = self.clock;

        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.animations)
            .into_iter()
            .partition(|stored| stored.animation.is_complete_at(now.saturating_sub(stored.added_at)));
        self.animations = running;

        for stored in finished {
            trace!(layer = %self.id, key = %stored.key, "animation finished");
            stored.animation.finish();
        }
    }

    /// Animations stored for `property`, in insertion order.
    pub fn animations_for(&self, property: PropertyId) -> impl Iterator<Item = &ScheduledAnimation> {
        self.animations
            .iter()
            .map(|stored| &stored.animation)
            .filter(move |animation| animation.property == property)
    }
}

impl NodeAdapter for Layer {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn authoritative_value(&self, property: PropertyId) -> Option<Value> {
        self.get(property)
    }

    fn set_authoritative_value(&mut self, property: PropertyId, value: Value) {
        self.model.insert(property, value);
    }

    fn presentation_value(&self, property: PropertyId) -> Option<Value> {
        let mut stored = self
            .animations
            .iter()
            .filter(|stored| stored.animation.property == property)
            .peekable();
        stored.peek()?;

        let mut value = self.get(property);
        for entry in stored {
            let elapsed = self.clock.saturating_sub(entry.added_at);
            let sample = entry.animation.value_at(elapsed);
            value = if entry.animation.additive {
                value.and_then(|base| base.checked_add(&sample))
            } else {
                Some(sample)
            };
        }
        value
    }

    fn add_animation(&mut self, key: AnimationKey, animation: ScheduledAnimation) {
        let stored = StoredAnimation {
            key,
            added_at: self.clock,
            animation,
        };
        match self.animations.iter_mut().find(|existing| existing.key == key) {
            Some(existing) => *existing = stored,
            None => self.animations.push(stored),
        }
    }

    fn remove_animation(&mut self, key: AnimationKey) -> Option<ScheduledAnimation> {
        let index = self.animations.iter().position(|stored| stored.key == key)?;
        Some(self.animations.remove(index).animation)
    }

    fn animation_keys(&self) -> Vec<AnimationKey> {
        self.animations.iter().map(|stored| stored.key).collect()
    }

    fn animation(&self, key: AnimationKey) -> Option<&ScheduledAnimation> {
        self.animations
            .iter()
            .find(|stored| stored.key == key)
            .map(|stored| &stored.animation)
    }

    fn exposed_properties(&self) -> Vec<PropertyId> {
        self.model.keys().copied().collect()
    }
}
