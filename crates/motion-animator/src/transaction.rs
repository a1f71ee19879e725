//! Scoped transaction state.
//!
//! A `TransactionStack` holds nested `TransactionContext` frames. `begin()`
//! pushes a copy of the innermost frame and returns a guard; setters on the
//! guard only touch that frame, and dropping the guard restores the previous
//! frame exactly.
//!
//! # Example
//!
//! ```
//! use motion_animator::transaction::{TransactionScope, TransactionStack};
//!
//! let stack = TransactionStack::new();
//! {
//!     let tx = stack.begin();
//!     tx.set_actions_disabled(true);
//!     assert!(stack.is_actions_disabled());
//! }
//! assert!(!stack.is_actions_disabled());
//! ```

use std::cell::RefCell;
use std::time::Duration;

use super::error::{AnimatorError, Result};

/// Ambient transaction state the animator consults on every call.
pub trait TransactionScope {
    /// Whether property changes should apply without animating.
    fn is_actions_disabled(&self) -> bool;

    /// Duration requested for implicit animations, if any.
    fn current_animation_duration(&self) -> Option<Duration>;

    /// Time scale that overrides the animator's own factor, if any.
    fn current_time_scale_override(&self) -> Option<f64>;
}

/// Values of one transaction frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionContext {
    pub actions_disabled: bool,
    pub animation_duration: Option<Duration>,
    pub time_scale_override: Option<f64>,
}

impl TransactionScope for TransactionContext {
    fn is_actions_disabled(&self) -> bool {
        self.actions_disabled
    }

    fn current_animation_duration(&self) -> Option<Duration> {
        self.animation_duration
    }

    fn current_time_scale_override(&self) -> Option<f64> {
        self.time_scale_override
    }
}

/// Stack of nested transaction frames.
///
/// Single-threaded by construction; share it through `Rc` when several
/// animators must observe the same transactions.
#[derive(Debug, Default)]
pub struct TransactionStack {
    frames: RefCell<Vec<TransactionContext>>,
}

impl TransactionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a nested transaction inheriting the current values.
    pub fn begin(&self) -> TransactionGuard<'_> {
        let mut frames = self.frames.borrow_mut();
        let inherited = frames.last().copied().unwrap_or_default();
        let depth = frames.len();
        frames.push(inherited);
        TransactionGuard { stack: self, depth }
    }

    /// Values of the innermost open transaction, or defaults when none is open.
    pub fn current(&self) -> TransactionContext {
        self.frames.borrow().last().copied().unwrap_or_default()
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    fn update(&self, depth: usize, f: impl FnOnce(&mut TransactionContext)) {
        if let Some(frame) = self.frames.borrow_mut().get_mut(depth) {
            f(frame);
        }
    }
}

impl TransactionScope for TransactionStack {
    fn is_actions_disabled(&self) -> bool {
        self.current().actions_disabled
    }

    fn current_animation_duration(&self) -> Option<Duration> {
        self.current().animation_duration
    }

    fn current_time_scale_override(&self) -> Option<f64> {
        self.current().time_scale_override
    }
}

/// RAII handle for one open transaction.
#[derive(Debug)]
pub struct TransactionGuard<'a> {
    stack: &'a TransactionStack,
    depth: usize,
}

impl TransactionGuard<'_> {
    pub fn set_actions_disabled(&self, disabled: bool) {
        self.stack.update(self.depth, |frame| frame.actions_disabled = disabled);
    }

    pub fn set_animation_duration(&self, duration: Option<Duration>) {
        self.stack.update(self.depth, |frame| frame.animation_duration = duration);
    }

    /// Set or clear the time scale override. `None` makes the override absent
    /// for this frame, so the animator's own factor applies again.
    pub fn set_time_scale_override(&self, scale: Option<f64>) -> Result<()> {
        if let Some(value) = scale {
            if !value.is_finite() || value < 0.0 {
                return Err(AnimatorError::InvalidTimeScale(value));
            }
        }
        self.stack.update(self.depth, |frame| frame.time_scale_override = scale);
        Ok(())
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        // Truncating (rather than popping) also discards frames of inner
        // guards that outlive this one.
        self.stack.frames.borrow_mut().truncate(self.depth);
    }
}
