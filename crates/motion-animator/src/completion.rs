//! Completion tracking.
//!
//! Every animator call owns one `CompletionGroup`. Each scheduled animation
//! carries a `CompletionToken` tied to the group; the token resolves with
//! `finished = true` when the animation completes naturally and with `false`
//! when it is dropped any other way (removal, replacement, node teardown).
//!
//! The group itself holds one pending slot for the duration of the call, so
//! a call that schedules nothing fires its callback before returning, while a
//! call that schedules animations fires only after the last token resolves.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Callback invoked once per animator call.
pub type Completion = Box<dyn FnOnce(bool)>;

struct GroupState {
    pending: usize,
    all_finished: bool,
    callback: Option<Completion>,
}

impl GroupState {
    /// Record one resolution; returns the callback when the group is done.
    fn resolve(&mut self, finished: bool) -> Option<(Completion, bool)> {
        self.all_finished &= finished;
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            self.callback.take().map(|cb| (cb, self.all_finished))
        } else {
            None
        }
    }
}

fn resolve(state: &Rc<RefCell<GroupState>>, finished: bool) {
    // The borrow ends before the callback runs so callbacks may schedule
    // further animations.
    let ready = state.borrow_mut().resolve(finished);
    if let Some((callback, all_finished)) = ready {
        callback(all_finished);
    }
}

/// Aggregates the animations of one call into a single notification.
pub struct CompletionGroup {
    state: Rc<RefCell<GroupState>>,
}

impl CompletionGroup {
    /// Open a group; the caller's pending slot is held until `seal`.
    pub fn new(callback: Option<Completion>) -> Self {
        Self {
            state: Rc::new(RefCell::new(GroupState {
                pending: 1,
                all_finished: true,
                callback,
            })),
        }
    }

    /// Register one scheduled animation.
    pub fn track(&self) -> CompletionToken {
        self.state.borrow_mut().pending += 1;
        CompletionToken {
            state: Some(Rc::clone(&self.state)),
        }
    }

    /// Number of outstanding animations, excluding the call's own slot.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.saturating_sub(1)
    }

    /// Release the call's slot. Fires the callback now if nothing is pending.
    pub fn seal(self) {
        resolve(&self.state, true);
    }

    /// Drop the callback without invoking it.
    pub fn discard(self) {
        self.state.borrow_mut().callback = None;
    }
}

impl fmt::Debug for CompletionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CompletionGroup")
            .field("pending", &state.pending)
            .field("all_finished", &state.all_finished)
            .field("has_callback", &state.callback.is_some())
            .finish()
    }
}

/// Link between one scheduled animation and its group.
///
/// Dropping an unresolved token counts as an interrupted animation.
pub struct CompletionToken {
    state: Option<Rc<RefCell<GroupState>>>,
}

impl CompletionToken {
    /// A token that belongs to no group.
    pub fn detached() -> Self {
        Self { state: None }
    }

    pub fn complete(mut self, finished: bool) {
        if let Some(state) = self.state.take() {
            resolve(&state, finished);
        }
    }
}

impl Drop for CompletionToken {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            resolve(&state, false);
        }
    }
}

impl fmt::Debug for CompletionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionToken")
            .field("attached", &self.state.is_some())
            .finish()
    }
}
