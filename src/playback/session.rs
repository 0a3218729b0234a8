//! Playback session
//!
//! The single owner of playback state: the tick interval, the player's
//! pending operations and the guard. `start` and `reset` are the only ways
//! to change it.

use std::cell::RefCell;
use std::rc::Rc;

use super::guard::PlaybackGuard;
use super::player::TracePlayer;
use super::scheduler::Scheduler;
use crate::trace::Trace;
use crate::view::BarView;

pub struct PlaybackSession<S: Scheduler> {
    interval_ms: u32,
    player: TracePlayer<S>,
    guard: PlaybackGuard,
}

impl<S: Scheduler> PlaybackSession<S> {
    pub fn new(scheduler: S, view: Rc<RefCell<dyn BarView>>, interval_ms: u32) -> Self {
        Self {
            interval_ms,
            player: TracePlayer::new(scheduler, view),
            guard: PlaybackGuard::new(),
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// Start playing `trace` unless a playback is already active.
    ///
    /// Returns the total duration, or `None` if the request was ignored.
    pub fn start(&mut self, trace: &Trace) -> Option<u64> {
        if !self.guard.try_start() {
            log::debug!(
                "{} ignored: playback in progress",
                trace.algorithm().as_str()
            );
            return None;
        }
        // Leftovers from a finished playback (nothing should remain)
        self.player.cancel_all();

        let total_ms = self.player.play(trace, self.interval_ms);
        if total_ms == 0 {
            self.guard.reset();
        } else {
            let handle = self.guard.finish_after(self.player.scheduler_mut(), total_ms);
            self.player.track(handle);
        }
        log::info!(
            "{} playing for {} ms ({} steps)",
            trace.algorithm().as_str(),
            total_ms,
            trace.step_count()
        );
        Some(total_ms)
    }

    /// Cancel any playback in flight, idle every bar and clear the guard
    pub fn reset(&mut self) {
        self.player.cancel_all();
        self.guard.reset();
    }

    pub fn is_active(&self) -> bool {
        self.guard.is_active()
    }

    pub fn guard(&self) -> &PlaybackGuard {
        &self.guard
    }}
