//! Animation builder.
//!
//! Turns one resolved `from -> to` change into a `ScheduledAnimation` and
//! hands it to the node. Additive-eligible properties get a relative animation
//! that coexists with earlier ones; everything else gets an absolute animation
//! that replaces the property's previous absolute animation. Either way the
//! node's authoritative value is set to the target before returning.

use std::time::Duration;

use tracing::debug;

use super::animation::ScheduledAnimation;
use super::catalog::AnimatableProperty;
use super::completion::CompletionGroup;
use super::curve::{Curve, TimingCurve};
use super::node::NodeAdapter;
use super::timing::Repetition;
use super::types::{AnimationKey, Value};

/// Observer invoked once for every animation the animator creates.
pub type Tracer = Box<dyn Fn(&dyn NodeAdapter, &ScheduledAnimation)>;

/// Timing of one call after time scaling.
#[derive(Debug, Clone)]
pub struct SchedulePlan {
    pub delay: Duration,
    /// Declared duration multiplied by the effective time scale.
    pub duration: Duration,
    pub time_scale: f64,
    pub curve: TimingCurve,
    pub repetition: Repetition,
}

/// Composition settings shared by every change of one call.
pub struct AnimationBuilder<'a> {
    pub additive: bool,
    /// Let spring curves run for their settling duration instead of the
    /// declared one.
    pub spring_settling_duration: bool,
    pub tracers: &'a [Tracer],
}

impl AnimationBuilder<'_> {
    /// Schedule `from -> to` on `node`, returning the new animation's key.
    ///
    /// Returns `None` when the resolved curve is instant; the target is then
    /// applied directly.
    pub fn schedule(
        &self,
        node: &mut dyn NodeAdapter,
        property: &AnimatableProperty,
        from: Value,
        to: Value,
        plan: &SchedulePlan,
        group: &CompletionGroup,
    ) -> Option<AnimationKey> {
        // Resolved against the real endpoints, before any delta conversion.
        let curve = plan.curve.resolve(&from, &to);
        if curve.is_instant() {
            debug!(node = node.node_id(), property = %property.id, "instant curve, applying directly");
            node.set_authoritative_value(property.id, to);
            return None;
        }

        let duration = self.duration_for(&curve, plan);
        let relative = if self.additive && property.additive_eligible {
            from.checked_sub(&to)
                .zip(Value::zero_of(property.kind))
        } else {
            None
        };

        let additive = relative.is_some();
        let (anim_from, anim_to) = match relative {
            Some((delta, zero)) => (delta, zero),
            None => {
                self.remove_absolute_animations(node, property);
                (from, to)
            }
        };

        node.set_authoritative_value(property.id, to);

        let animation = ScheduledAnimation::new(
            property.id,
            anim_from,
            anim_to,
            duration,
            plan.delay,
            curve,
            plan.repetition,
            additive,
            group.track(),
        );
        let key = animation.key;

        debug!(
            node = node.node_id(),
            property = %property.id,
            %key,
            additive,
            duration_ms = duration.as_secs_f64() * 1000.0,
            "scheduled animation"
        );

        for tracer in self.tracers {
            tracer(&*node, &animation);
        }
        node.add_animation(key, animation);
        Some(key)
    }

    fn duration_for(&self, curve: &Curve, plan: &SchedulePlan) -> Duration {
        match curve {
            Curve::Spring(spring) if self.spring_settling_duration => spring
                .settling_duration()
                .map(|settling| {
                    Duration::try_from_secs_f64(settling.as_secs_f64() * plan.time_scale)
                        .unwrap_or(Duration::MAX)
                })
                .unwrap_or(plan.duration),
            _ => plan.duration,
        }
    }

    /// At most one absolute animation per property may be stored.
    fn remove_absolute_animations(&self, node: &mut dyn NodeAdapter, property: &AnimatableProperty) {
        for key in node.animation_keys_for(property.id) {
            let absolute = node.animation(key).is_some_and(|animation| !animation.additive);
            if absolute {
                debug!(node = node.node_id(), property = %property.id, %key, "replacing animation");
                node.remove_animation(key);
            }
        }
    }
}
