//! The animator facade.
//!
//! `Animator` is the entry point for scheduling. It resolves the effective
//! time scale, turns property changes (explicit lists or changes captured from
//! a mutation block) into scheduled animations, and groups every animation of
//! a call under one completion callback.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use motion_animator::{Animator, Layer, PropertyId, TimingDescriptor};
//!
//! let animator = Animator::new();
//! let mut layer = Layer::new("button");
//! let timing = TimingDescriptor::new(Duration::from_millis(200));
//!
//! // Explicit form
//! animator
//!     .animate_property(&timing, &mut layer, PropertyId::CornerRadius, 8.0, None)
//!     .unwrap();
//!
//! // Implicit form
//! animator
//!     .animate_with(&timing, &mut layer, |layer| layer.set_opacity(0.5), None)
//!     .unwrap();
//! ```

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use motion_config::{AnimatorConfig, MotionConfig};
use tracing::debug;

use super::animation::ScheduledAnimation;
use super::builder::{AnimationBuilder, SchedulePlan, Tracer};
use super::catalog::PropertyCatalog;
use super::completion::{Completion, CompletionGroup};
use super::error::{AnimatorError, Result};
use super::node::NodeAdapter;
use super::resolver::{InterruptionSnapshot, PropertySnapshot};
use super::timing::TimingDescriptor;
use super::transaction::{TransactionScope, TransactionStack};
use super::types::{PropertyId, Value};

/// One requested change of an explicit animator call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyChange {
    pub property: PropertyId,
    /// Starting value; resolved from the node when absent.
    pub from: Option<Value>,
    pub to: Value,
}

impl PropertyChange {
    pub fn new(property: PropertyId, to: impl Into<Value>) -> Self {
        Self {
            property,
            from: None,
            to: to.into(),
        }
    }

    pub fn with_from(mut self, from: impl Into<Value>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// A change with its node values sampled, ready for composition.
#[derive(Debug, Clone, Copy)]
struct PendingChange {
    snapshot: InterruptionSnapshot,
    requested_from: Option<Value>,
    to: Value,
}

fn check_time_scale(scale: f64) -> Result<f64> {
    if scale.is_finite() && scale >= 0.0 {
        Ok(scale)
    } else {
        Err(AnimatorError::InvalidTimeScale(scale))
    }
}

fn scale_duration(duration: Duration, scale: f64) -> Duration {
    Duration::try_from_secs_f64(duration.as_secs_f64() * scale).unwrap_or(Duration::MAX)
}

/// Schedules property animations on nodes.
pub struct Animator {
    time_scale_factor: Option<f64>,
    additive: bool,
    begin_from_current_state: bool,
    reverse_values: bool,
    spring_settling_duration: bool,
    default_timing: TimingDescriptor,
    catalog: PropertyCatalog,
    transactions: Rc<TransactionStack>,
    tracers: Vec<Tracer>,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            time_scale_factor: None,
            additive: true,
            begin_from_current_state: false,
            reverse_values: false,
            spring_settling_duration: true,
            default_timing: TimingDescriptor::default(),
            catalog: PropertyCatalog::standard(),
            transactions: Rc::new(TransactionStack::new()),
            tracers: Vec::new(),
        }
    }
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("time_scale_factor", &self.time_scale_factor)
            .field("additive", &self.additive)
            .field("begin_from_current_state", &self.begin_from_current_state)
            .field("reverse_values", &self.reverse_values)
            .field("spring_settling_duration", &self.spring_settling_duration)
            .field("default_timing", &self.default_timing)
            .field("catalog_len", &self.catalog.len())
            .field("tracers", &self.tracers.len())
            .finish()
    }
}

impl Animator {
    /// An animator with the standard property catalog and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the animator section of a configuration.
    pub fn from_config(config: &AnimatorConfig) -> Result<Self> {
        let mut animator = Self::new();
        animator.set_time_scale_factor(Some(config.time_scale_factor))?;
        animator.additive = config.additive;
        animator.begin_from_current_state = config.begin_from_current_state;
        animator.reverse_values = config.reverse_values;
        animator.spring_settling_duration = config.spring_settling_duration;
        Ok(animator)
    }

    /// Apply a full configuration, including default timing.
    pub fn from_motion_config(config: &MotionConfig) -> Result<Self> {
        let mut animator = Self::from_config(&config.animator)?;
        animator.default_timing = TimingDescriptor::from(&config.defaults);
        Ok(animator)
    }

    pub fn with_catalog(mut self, catalog: PropertyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Share a transaction stack with other animators.
    pub fn with_transactions(mut self, transactions: Rc<TransactionStack>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn catalog(&self) -> &PropertyCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut PropertyCatalog {
        &mut self.catalog
    }

    pub fn transactions(&self) -> &TransactionStack {
        &self.transactions
    }

    pub fn time_scale_factor(&self) -> Option<f64> {
        self.time_scale_factor
    }

    /// Set the animator's own time scale. `None` falls back to `1.0`.
    pub fn set_time_scale_factor(&mut self, factor: Option<f64>) -> Result<()> {
        self.time_scale_factor = factor.map(check_time_scale).transpose()?;
        Ok(())
    }

    pub fn additive(&self) -> bool {
        self.additive
    }

    pub fn set_additive(&mut self, additive: bool) {
        self.additive = additive;
    }

    pub fn begin_from_current_state(&self) -> bool {
        self.begin_from_current_state
    }

    pub fn set_begin_from_current_state(&mut self, enabled: bool) {
        self.begin_from_current_state = enabled;
    }

    pub fn reverse_values(&self) -> bool {
        self.reverse_values
    }

    pub fn set_reverse_values(&mut self, reverse: bool) {
        self.reverse_values = reverse;
    }

    pub fn spring_settling_duration(&self) -> bool {
        self.spring_settling_duration
    }

    pub fn set_spring_settling_duration(&mut self, enabled: bool) {
        self.spring_settling_duration = enabled;
    }

    pub fn default_timing(&self) -> &TimingDescriptor {
        &self.default_timing
    }

    pub fn set_default_timing(&mut self, timing: TimingDescriptor) {
        self.default_timing = timing;
    }

    /// Observe every animation this animator creates.
    pub fn add_tracer<F>(&mut self, tracer: F)
    where
        F: Fn(&dyn NodeAdapter, &ScheduledAnimation) + 'static,
    {
        self.tracers.push(Box::new(tracer));
    }

    /// Transaction override, else the animator's factor, else `1.0`.
    pub fn effective_time_scale(&self) -> f64 {
        self.transactions
            .current_time_scale_override()
            .or(self.time_scale_factor)
            .unwrap_or(1.0)
    }

    /// Animate explicit property changes on one node.
    ///
    /// Fails without touching the node if any value's kind disagrees with the
    /// catalog; the completion callback is then dropped uninvoked.
    pub fn animate(
        &self,
        timing: &TimingDescriptor,
        node: &mut dyn NodeAdapter,
        changes: &[PropertyChange],
        completion: Option<Completion>,
    ) -> Result<()> {
        let group = CompletionGroup::new(completion);
        let pending: Vec<_> = changes
            .iter()
            .map(|change| PendingChange {
                snapshot: InterruptionSnapshot::capture(&*node, change.property),
                requested_from: change.from,
                to: change.to,
            })
            .collect();

        if let Err(err) = self.validate(&pending) {
            group.discard();
            return Err(err);
        }

        let plan = self.plan(timing);
        self.apply(node, pending, plan.as_ref(), &group);
        group.seal();
        Ok(())
    }

    /// Animate a single property to `to`.
    pub fn animate_property(
        &self,
        timing: &TimingDescriptor,
        node: &mut dyn NodeAdapter,
        property: PropertyId,
        to: impl Into<Value>,
        completion: Option<Completion>,
    ) -> Result<()> {
        self.animate(timing, node, &[PropertyChange::new(property, to)], completion)
    }

    /// Run `block` against `node` and animate every property it changed.
    ///
    /// While the current transaction disables actions the block runs and
    /// nothing is animated.
    pub fn animate_with<N, F>(
        &self,
        timing: &TimingDescriptor,
        node: &mut N,
        block: F,
        completion: Option<Completion>,
    ) -> Result<()>
    where
        N: NodeAdapter,
        F: FnOnce(&mut N),
    {
        self.animate_all(
            timing,
            std::slice::from_mut(node),
            |nodes| {
                if let Some(node) = nodes.first_mut() {
                    block(node);
                }
            },
            completion,
        )
    }

    /// Run `block` against several nodes and animate every property it
    /// changed on any of them, under one completion callback.
    pub fn animate_all<N, F>(
        &self,
        timing: &TimingDescriptor,
        nodes: &mut [N],
        block: F,
        completion: Option<Completion>,
    ) -> Result<()>
    where
        N: NodeAdapter,
        F: FnOnce(&mut [N]),
    {
        let group = CompletionGroup::new(completion);

        if self.transactions.is_actions_disabled() {
            block(nodes);
            debug!(nodes = nodes.len(), "actions disabled, changes applied without animation");
            group.seal();
            return Ok(());
        }

        let before: Vec<_> = nodes
            .iter()
            .map(|node| PropertySnapshot::capture(node))
            .collect();
        block(nodes);

        let pending: Vec<Vec<PendingChange>> = nodes
            .iter()
            .zip(&before)
            .map(|(node, snapshot)| {
                snapshot
                    .changes(node)
                    .into_iter()
                    .map(|(snapshot, to)| PendingChange {
                        snapshot,
                        requested_from: None,
                        to,
                    })
                    .collect()
            })
            .collect();

        if let Err(err) = pending.iter().try_for_each(|changes| self.validate(changes)) {
            group.discard();
            return Err(err);
        }

        let plan = self.plan(timing);
        for (node, changes) in nodes.iter_mut().zip(pending) {
            self.apply(node, changes, plan.as_ref(), &group);
        }
        group.seal();
        Ok(())
    }

    /// Drop every stored animation on `node`. Authoritative values are left
    /// alone; they already hold each animation's target.
    pub fn remove_all_animations(&self, node: &mut dyn NodeAdapter) {
        let keys = node.animation_keys();
        debug!(node = node.node_id(), count = keys.len(), "removing all animations");
        for key in keys {
            node.remove_animation(key);
        }
    }

    /// Write every animated property's presentation value into its
    /// authoritative value, then drop every stored animation.
    pub fn commit_and_remove_all_animations(&self, node: &mut dyn NodeAdapter) {
        let keys = node.animation_keys();

        let mut properties: Vec<PropertyId> = Vec::new();
        for animation in keys.iter().filter_map(|key| node.animation(*key)) {
            if !properties.contains(&animation.property) {
                properties.push(animation.property);
            }
        }

        // Sample everything first: removing one additive animation changes
        // the presentation of every other one on the same property.
        let presented: Vec<(PropertyId, Value)> = properties
            .into_iter()
            .filter_map(|property| node.presentation_value(property).map(|v| (property, v)))
            .collect();

        debug!(
            node = node.node_id(),
            count = keys.len(),
            committed = presented.len(),
            "committing and removing all animations"
        );
        for (property, value) in presented {
            node.set_authoritative_value(property, value);
        }
        for key in keys {
            node.remove_animation(key);
        }
    }

    /// Scaled timing for a call, or `None` when nothing should be scheduled.
    fn plan(&self, timing: &TimingDescriptor) -> Option<SchedulePlan> {
        let time_scale = self.effective_time_scale();
        let duration = scale_duration(timing.duration, time_scale);
        let curve = timing.curve.as_ref()?;
        if duration.is_zero() || curve.is_instant() {
            debug!(
                declared_ms = timing.duration.as_secs_f64() * 1000.0,
                time_scale, "zero effective duration or instant curve, changes applied directly"
            );
            return None;
        }

        Some(SchedulePlan {
            delay: scale_duration(timing.delay, time_scale),
            duration,
            time_scale,
            curve: curve.clone(),
            repetition: timing.repetition,
        })
    }

    fn validate(&self, changes: &[PendingChange]) -> Result<()> {
        for change in changes {
            let property = change.snapshot.property;
            let Some(entry) = self.catalog.lookup(property) else {
                continue;
            };
            for value in std::iter::once(&change.to).chain(change.requested_from.as_ref()) {
                if value.kind() != entry.kind {
                    return Err(AnimatorError::ValueKindMismatch {
                        property,
                        expected: entry.kind,
                        found: value.kind(),
                    });
                }
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        node: &mut dyn NodeAdapter,
        changes: Vec<PendingChange>,
        plan: Option<&SchedulePlan>,
        group: &CompletionGroup,
    ) {
        let builder = AnimationBuilder {
            additive: self.additive,
            spring_settling_duration: self.spring_settling_duration,
            tracers: &self.tracers,
        };

        for change in changes {
            let property = change.snapshot.property;
            let Some(entry) = self.catalog.lookup(property) else {
                debug!(node = node.node_id(), %property, "property not in catalog, applying directly");
                node.set_authoritative_value(property, change.to);
                continue;
            };

            let from = change
                .snapshot
                .resolve_from(change.requested_from, self.begin_from_current_state);
            let (from, to) = match from {
                Some(from) if self.reverse_values => (Some(change.to), from),
                other => (other, change.to),
            };

            match (plan, from) {
                (Some(plan), Some(from)) => {
                    builder.schedule(node, entry, from, to, plan, group);
                }
                _ => {
                    debug!(node = node.node_id(), %property, "no animation, applying directly");
                    node.set_authoritative_value(property, to);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;

    #[test]
    fn test_time_scale_defaults_to_one() {
        let animator = Animator::new();
        assert_eq!(animator.time_scale_factor(), None);
        assert_eq!(animator.effective_time_scale(), 1.0);
    }

    #[test]
    fn test_invalid_time_scale_factor() {
        let mut animator = Animator::new();
        assert!(animator.set_time_scale_factor(Some(f64::NAN)).is_err());
        assert_eq!(
            animator.set_time_scale_factor(Some(-2.0)),
            Err(AnimatorError::InvalidTimeScale(-2.0))
        );
        assert_eq!(animator.time_scale_factor(), None);
    }

    #[test]
    fn test_from_config() {
        let config = AnimatorConfig {
            time_scale_factor: 2.0,
            additive: false,
            begin_from_current_state: true,
            reverse_values: true,
            spring_settling_duration: false,
        };
        let animator = Animator::from_config(&config).unwrap();
        assert_eq!(animator.time_scale_factor(), Some(2.0));
        assert!(!animator.additive());
        assert!(animator.begin_from_current_state());
        assert!(animator.reverse_values());
        assert!(!animator.spring_settling_duration());
    }

    #[test]
    fn test_from_motion_config_sets_default_timing() {
        let mut config = MotionConfig::default();
        config.defaults.duration_ms = 600;
        let animator = Animator::from_motion_config(&config).unwrap();
        assert_eq!(animator.default_timing().duration, Duration::from_millis(600));
        assert_eq!(animator.time_scale_factor(), Some(1.0));
    }

    #[test]
    fn test_plan_scales_delay_and_duration() {
        let mut animator = Animator::new();
        animator.set_time_scale_factor(Some(2.0)).unwrap();
        let timing = TimingDescriptor::new(Duration::from_millis(100))
            .with_delay(Duration::from_millis(50));
        let plan = animator.plan(&timing).unwrap();
        assert_eq!(plan.duration, Duration::from_millis(200));
        assert_eq!(plan.delay, Duration::from_millis(100));
    }

    #[test]
    fn test_plan_skips_missing_curve() {
        let animator = Animator::new();
        assert!(animator.plan(&TimingDescriptor::default().without_curve()).is_none());
    }

    #[test]
    fn test_unknown_property_applies_directly() {
        let animator = Animator::new();
        let mut layer = Layer::new("a");
        animator
            .animate_property(
                &TimingDescriptor::default(),
                &mut layer,
                PropertyId::Custom(7),
                3.0,
                None,
            )
            .unwrap();
        assert_eq!(layer.get(PropertyId::Custom(7)), Some(Value::from(3.0)));
        assert!(layer.animation_keys().is_empty());
    }

    #[test]
    fn test_explicit_change_without_any_start_applies_directly() {
        let animator = Animator::new();
        let mut layer = Layer::empty("a");
        animator
            .animate_property(&TimingDescriptor::default(), &mut layer, PropertyId::Opacity, 0.5, None)
            .unwrap();
        assert_eq!(layer.opacity(), 0.5);
        assert!(layer.animation_keys().is_empty());
    }
}
