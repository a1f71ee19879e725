//! Node adapter interface.
//!
//! The animator never owns scene nodes. It reads and writes them through
//! `NodeAdapter`, which a scene graph implements for its node type (see
//! [`crate::layer::Layer`] for the in-memory implementation).

use super::animation::ScheduledAnimation;
use super::types::{AnimationKey, PropertyId, Value};

/// Access to one node's property values and animation storage.
pub trait NodeAdapter {
    /// Identifier used in log output.
    fn node_id(&self) -> &str;

    /// The committed value of `property`, or `None` if the node does not have
    /// that property.
    fn authoritative_value(&self, property: PropertyId) -> Option<Value>;

    fn set_authoritative_value(&mut self, property: PropertyId, value: Value);

    /// The currently rendered value of `property`; `None` when no animation
    /// for it is stored.
    fn presentation_value(&self, property: PropertyId) -> Option<Value>;

    /// Store `animation` under `key`, replacing any animation with that key.
    fn add_animation(&mut self, key: AnimationKey, animation: ScheduledAnimation);

    /// Remove and return the animation stored under `key`. Missing keys are
    /// ignored.
    fn remove_animation(&mut self, key: AnimationKey) -> Option<ScheduledAnimation>;

    /// Keys of every stored animation, in insertion order.
    fn animation_keys(&self) -> Vec<AnimationKey>;

    fn animation(&self, key: AnimationKey) -> Option<&ScheduledAnimation>;

    /// Properties whose values are observed during implicit capture.
    fn exposed_properties(&self) -> Vec<PropertyId>;

    /// Whether any stored animation targets `property`.
    fn has_animation_for(&self, property: PropertyId) -> bool {
        self.animation_keys()
            .into_iter()
            .filter_map(|key| self.animation(key))
            .any(|animation| animation.property == property)
    }

    /// Keys of stored animations that target `property`, in insertion order.
    fn animation_keys_for(&self, property: PropertyId) -> Vec<AnimationKey> {
        self.animation_keys()
            .into_iter()
            .filter(|key| {
                self.animation(*key)
                    .is_some_and(|animation| animation.property == property)
            })
            .collect()
    }
}
