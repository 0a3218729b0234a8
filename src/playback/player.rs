//! Trace player
//!
//! Turns a trace into a [`Timeline`] and schedules every sub-event as its own
//! delayed callback against the shared clock. Nothing is chained: ordering
//! comes from the delays alone.

use std::cell::RefCell;
use std::rc::Rc;

use super::scheduler::{Scheduler, TimerHandle};
use super::timeline::Timeline;
use crate::trace::Trace;
use crate::view::BarView;

/// Schedules visual changes into a bar view and can cancel them all
pub struct TracePlayer<S: Scheduler> {
    scheduler: S,
    view: Rc<RefCell<dyn BarView>>,
    /// Every handle scheduled since the last cancel (fired ones included)
    pending: Vec<TimerHandle>,
}

impl<S: Scheduler> TracePlayer<S> {
    pub fn new(scheduler: S, view: Rc<RefCell<dyn BarView>>) -> Self {
        Self {
            scheduler,
            view,
            pending: Vec::new(),
        }
    }

    /// Schedule the whole trace; returns the total playback duration in ms
    pub fn play(&mut self, trace: &Trace, interval_ms: u32) -> u64 {
        let timeline = Timeline::from_trace(trace, interval_ms);
        self.play_timeline(timeline)
    }

    pub fn play_timeline(&mut self, timeline: Timeline) -> u64 {
        self.pending.reserve(timeline.ops.len());
        for op in timeline.ops {
            let view = Rc::clone(&self.view);
            let changes = op.changes;
            let handle = self.scheduler.schedule(
                op.delay_ms,
                Box::new(move || {
                    let mut view = view.borrow_mut();
                    for change in &changes {
                        view.apply(change);
                    }
                }),
            );
            self.pending.push(handle);
        }
        timeline.total_ms
    }

    /// Cancel everything scheduled and force every bar back to idle
    pub fn cancel_all(&mut self) {
        let count = self.pending.len();
        for handle in self.pending.drain(..) {
            self.scheduler.cancel(handle);
        }
        self.view.borrow_mut().set_all_idle();
        if count > 0 {
            log::debug!("Cancelled {} scheduled operations", count);
        }
    }

    /// Include an externally scheduled callback in [`TracePlayer::cancel_all`]
    pub fn track(&mut self, handle: TimerHandle) {
        self.pending.push(handle);
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::VirtualScheduler;
    use crate::settings::SortAlgorithm;
    use crate::trace;
    use crate::view::{BarColor, BarList};

    fn setup(
        values: &[u8],
    ) -> (
        VirtualScheduler,
        Rc<RefCell<BarList>>,
        TracePlayer<VirtualScheduler>,
    ) {
        let sched = VirtualScheduler::new();
        let bars = Rc::new(RefCell::new(BarList::new(values)));
        let player = TracePlayer::new(sched.clone(), bars.clone());
        (sched, bars, player)
    }

    #[test]
    fn test_play_to_completion_sorts_bars() {
        let input = [42, 7, 99, 63, 5, 18];
        let (sched, bars, mut player) = setup(&input);
        let t = trace::trace(SortAlgorithm::Merge, &input);
        let total = player.play(&t, 3);

        let _ = sched.advance_to(total);
        assert_eq!(sched.pending(), 0);
        assert_eq!(bars.borrow().heights(), vec![5, 7, 18, 42, 63, 99]);
        assert!(bars.borrow().all_idle());
    }

    #[test]
    fn test_insertion_schedule() {
        let (sched, bars, mut player) = setup(&[80, 20]);
        let t = trace::trace(SortAlgorithm::Insertion, &[80, 20]);
        assert_eq!(player.play(&t, 10), 280);

        let _ = sched.advance_to(0);
        assert_eq!(bars.borrow().heights(), vec![20, 80]);
        let _ = sched.advance_to(10);
        assert_eq!(bars.borrow().colors()[0], BarColor::Confirmed);
        let _ = sched.advance_to(269);
        assert_eq!(bars.borrow().colors()[0], BarColor::Confirmed);
        let _ = sched.advance_to(270);
        assert!(bars.borrow().all_idle());
    }

    #[test]
    fn test_cancel_all_mid_playback() {
        let input = [90, 10, 50, 30];
        let (sched, bars, mut player) = setup(&input);
        let t = trace::trace(SortAlgorithm::Selection, &input);
        let _ = player.play(&t, 10);

        // Mid-scan: some bar is highlighted
        let _ = sched.advance_to(5);
        assert!(!bars.borrow().all_idle());

        player.cancel_all();
        assert_eq!(sched.pending(), 0);
        assert!(bars.borrow().all_idle());

        let heights = bars.borrow().heights();
        let _ = sched.run_until_idle();
        assert_eq!(bars.borrow().heights(), heights);
    }
}
