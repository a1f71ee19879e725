//! Interruption resolution.
//!
//! Decides where a new animation starts. Values are sampled before a call
//! mutates anything, so the resolver sees what was on screen when the call
//! began rather than the already-updated model values.

use tracing::trace;

use super::node::NodeAdapter;
use super::types::{PropertyId, Value};

/// One property's values sampled before a call mutates the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterruptionSnapshot {
    pub property: PropertyId,
    /// Authoritative value at sampling time.
    pub model: Option<Value>,
    /// Presentation value at sampling time; `None` unless an animation for
    /// the property was in flight.
    pub presentation: Option<Value>,
}

impl InterruptionSnapshot {
    pub fn capture(node: &dyn NodeAdapter, property: PropertyId) -> Self {
        let presentation = if node.has_animation_for(property) {
            node.presentation_value(property)
        } else {
            None
        };
        Self {
            property,
            model: node.authoritative_value(property),
            presentation,
        }
    }

    /// Whether an animation for this property was running when sampled.
    pub fn in_flight(&self) -> bool {
        self.presentation.is_some()
    }

    /// Starting value for a new animation.
    ///
    /// With `begin_from_current_state` the node's current state wins over an
    /// explicitly requested start: the presentation value while an animation
    /// is in flight, the model value otherwise. Without it the requested start
    /// is used, falling back to the model value.
    pub fn resolve_from(
        &self,
        requested: Option<Value>,
        begin_from_current_state: bool,
    ) -> Option<Value> {
        let from = if begin_from_current_state {
            self.presentation.or(self.model).or(requested)
        } else {
            requested.or(self.model)
        };
        trace!(
            property = %self.property,
            in_flight = self.in_flight(),
            begin_from_current_state,
            ?from,
            "resolved start value"
        );
        from
    }
}

/// Values of every exposed property of a node, used to diff the effects of a
/// mutation block.
#[derive(Debug, Clone, Default)]
pub struct PropertySnapshot {
    entries: Vec<InterruptionSnapshot>,
}

impl PropertySnapshot {
    pub fn capture(node: &dyn NodeAdapter) -> Self {
        let entries = node
            .exposed_properties()
            .into_iter()
            .map(|property| InterruptionSnapshot::capture(node, property))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, property: PropertyId) -> Option<&InterruptionSnapshot> {
        self.entries.iter().find(|entry| entry.property == property)
    }

    /// Properties whose authoritative value differs from the snapshot, paired
    /// with their new value, in capture order.
    ///
    /// Properties the node only started exposing after the snapshot are
    /// reported too, with no model value recorded.
    pub fn changes(&self, node: &dyn NodeAdapter) -> Vec<(InterruptionSnapshot, Value)> {
        let mut changes: Vec<_> = self
            .entries
            .iter()
            .filter_map(|before| {
                let after = node.authoritative_value(before.property)?;
                (before.model != Some(after)).then_some((*before, after))
            })
            .collect();

        for property in node.exposed_properties() {
            if self.get(property).is_none() {
                if let Some(after) = node.authoritative_value(property) {
                    let before = InterruptionSnapshot {
                        property,
                        model: None,
                        presentation: None,
                    };
                    changes.push((before, after));
                }
            }
        }
        changes
    }
}
