//! Legacy call shapes.
//!
//! Older hosts animate with a bare duration, with spring parameters, or with
//! whatever the enclosing transaction asks for. Each shape only builds a
//! `TimingDescriptor` and delegates to [`Animator::animate_with`].

use std::time::Duration;

use super::animator::Animator;
use super::completion::Completion;
use super::curve::{CubicBezier, SpringCurveGenerator};
use super::error::Result;
use super::node::NodeAdapter;
use super::timing::TimingDescriptor;
use super::transaction::TransactionScope;

impl Animator {
    /// Ease-in-out animation of every change made by `block`.
    pub fn animate_with_duration<N, F>(
        &self,
        duration: Duration,
        node: &mut N,
        block: F,
        completion: Option<Completion>,
    ) -> Result<()>
    where
        N: NodeAdapter,
        F: FnOnce(&mut N),
    {
        let timing = TimingDescriptor::new(duration).with_curve(CubicBezier::EASE_IN_OUT);
        self.animate_with(&timing, node, block, completion)
    }

    /// Spring animation of every change made by `block`.
    ///
    /// `initial_velocity` is in the animated properties' own units per second
    /// and is projected onto each property separately.
    #[allow(clippy::too_many_arguments)]
    pub fn animate_with_spring<N, F>(
        &self,
        duration: Duration,
        delay: Duration,
        damping_ratio: f64,
        initial_velocity: f64,
        node: &mut N,
        block: F,
        completion: Option<Completion>,
    ) -> Result<()>
    where
        N: NodeAdapter,
        F: FnOnce(&mut N),
    {
        let generator =
            SpringCurveGenerator::new(duration, damping_ratio).with_initial_velocity(initial_velocity);
        let timing = TimingDescriptor::new(duration)
            .with_delay(delay)
            .with_curve(generator);
        self.animate_with(&timing, node, block, completion)
    }

    /// Animate with the enclosing transaction's duration, falling back to the
    /// animator's default timing.
    pub fn animate_in_transaction<N, F>(
        &self,
        node: &mut N,
        block: F,
        completion: Option<Completion>,
    ) -> Result<()>
    where
        N: NodeAdapter,
        F: FnOnce(&mut N),
    {
        let mut timing = self.default_timing().clone();
        if let Some(duration) = self.transactions().current_animation_duration() {
            timing.duration = duration;
        }
        self.animate_with(&timing, node, block, completion)
    }
}
