//! Playback guard
//!
//! One playback at a time, process-wide. While active, the sort controls are
//! disabled; the guard clears itself when the playback's total duration has
//! elapsed, or immediately on reset.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::scheduler::{Scheduler, TimerHandle};

type Listener = Box<dyn Fn(bool)>;

#[derive(Default)]
struct GuardState {
    active: Cell<bool>,
    /// Called with the new "controls enabled" flag on every transition
    listener: RefCell<Option<Listener>>,
}

impl GuardState {
    fn set_active(&self, active: bool) {
        if self.active.replace(active) == active {
            return;
        }
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(!active);
        }
    }
}

/// Gate that rejects a new sort while one is animating
#[derive(Clone, Default)]
pub struct PlaybackGuard {
    state: Rc<GuardState>,
}

impl std::fmt::Debug for PlaybackGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackGuard")
            .field("active", &self.state.active.get())
            .finish()
    }
}

impl PlaybackGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe transitions; `listener` receives `true` when controls become
    /// enabled and `false` when they are disabled
    pub fn set_listener(&self, listener: impl Fn(bool) + 'static) {
        *self.state.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Claim the guard. Returns false if a playback is already active.
    pub fn try_start(&self) -> bool {
        if self.state.active.get() {
            return false;
        }
        self.state.set_active(true);
        true
    }

    /// Clear the guard once `duration_ms` has elapsed
    pub fn finish_after<S: Scheduler>(&self, scheduler: &mut S, duration_ms: u64) -> TimerHandle {
        let state = Rc::clone(&self.state);
        scheduler.schedule(
            duration_ms,
            Box::new(move || {
                log::debug!("Playback finished, controls enabled");
                state.set_active(false);
            }),
        )
    }

    /// Clear the guard immediately
    pub fn reset(&self) {
        self.state.set_active(false);
    }

    pub fn is_active(&self) -> bool {
        self.state.active.get()
    }

    pub fn controls_enabled(&self) -> bool {
        !self.is_active()
    }
}
