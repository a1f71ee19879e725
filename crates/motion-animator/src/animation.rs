//! Scheduled animations.

use std::time::Duration;

use super::completion::CompletionToken;
use super::curve::Curve;
use super::timing::Repetition;
use super::types::{AnimationKey, PropertyId, Value};

/// A concrete per-property animation handed to a node.
///
/// Additive animations carry `from = start - target` and `to = zero`, so the
/// node renders `model + interpolate(from, to)`. Absolute animations replace
/// the model value with `interpolate(from, to)`.
///
/// The node owns the animation until it is removed or completes. Dropping it
/// without calling [`ScheduledAnimation::finish`] reports the animation as
/// interrupted to its completion group.
#[derive(Debug)]
pub struct ScheduledAnimation {
    pub key: AnimationKey,
    pub property: PropertyId,
    pub from: Value,
    pub to: Value,
    pub duration: Duration,
    pub delay: Duration,
    pub curve: Curve,
    pub repetition: Repetition,
    pub additive: bool,
    /// Curve time span one cycle maps onto, resolved once at construction.
    window: Duration,
    completion: CompletionToken,
}

impl ScheduledAnimation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        property: PropertyId,
        from: Value,
        to: Value,
        duration: Duration,
        delay: Duration,
        curve: Curve,
        repetition: Repetition,
        additive: bool,
        completion: CompletionToken,
    ) -> Self {
        let window = curve.time_window(duration);
        Self {
            key: AnimationKey::new(),
            property,
            from,
            to,
            duration,
            delay,
            curve,
            repetition,
            additive,
            window,
            completion,
        }
    }

    /// Delay plus every repeated cycle, saturating at `Duration::MAX`.
    ///
    /// Endlessly repeating animations report `Duration::MAX`.
    pub fn total_duration(&self) -> Duration {
        if self.repetition.is_endless() {
            return Duration::MAX;
        }
        self.delay
            .saturating_add(self.repetition.active_duration(self.duration))
    }

    /// Whether the animation has run its course `elapsed` after being added.
    pub fn is_complete_at(&self, elapsed: Duration) -> bool {
        !self.repetition.is_endless() && self.total_duration() <= elapsed
    }

    /// Interpolated value at `elapsed` since the animation was added.
    ///
    /// Before the delay has passed this is the starting value; after the last
    /// cycle it is the final value of that cycle.
    pub fn value_at(&self, elapsed: Duration) -> Value {
        let progress = self.cycle_progress(elapsed);
        let eased = self.curve.sample(progress, self.window);
        self.from.interpolate(&self.to, eased)
    }

    /// Linear progress within the current cycle, folded for autoreverse.
    fn cycle_progress(&self, elapsed: Duration) -> f64 {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        let duration = self.duration.as_secs_f64();
        if duration <= 0.0 {
            return 1.0;
        }

        let total = self.repetition.cycles() * if self.repetition.autoreverses { 2.0 } else { 1.0 };
        let position = active.as_secs_f64() / duration;
        if self.repetition.autoreverses {
            fold(position.min(total) % 2.0)
        } else if position >= total {
            let end = total % 1.0;
            if end == 0.0 { 1.0 } else { end }
        } else {
            position % 1.0
        }
    }

    /// Report natural completion to the completion group.
    pub fn finish(self) {
        self.completion.complete(true);
    }
}

/// Map a position in a `[0, 2)` forward-then-back cycle to progress.
fn fold(position: f64) -> f64 {
    if position <= 1.0 {
        position
    } else {
        2.0 - position
    }
}
