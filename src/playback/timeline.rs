//! Trace to timeline translation
//!
//! Each logical step of a trace expands into a few sub-events (highlight,
//! un-highlight, height change). A single tick counter runs across the whole
//! trace, so every sub-event is scheduled at `ticks * interval` and later
//! steps can never fire before earlier ones. Reverting a confirmed bar to idle
//! additionally waits [`CONFIRMED_HOLD_MS`].

use serde::{Deserialize, Serialize};

use crate::consts::CONFIRMED_HOLD_MS;
use crate::trace::{BubbleTrace, InsertionTrace, MergeTrace, SelectionTrace, Swap, Trace};
use crate::view::{BarChange, BarColor};

/// Ticks consumed by each merge sub-event
const MERGE_SPAN: u64 = 2;

/// Visual changes applied together at one absolute delay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOp {
    pub delay_ms: u64,
    pub changes: Vec<BarChange>,
}

/// A fully timed playback of one trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub interval_ms: u32,
    /// Sub-events in schedule order
    pub ops: Vec<ScheduledOp>,
    /// When the last sub-event has finished, including any confirmed hold
    pub total_ms: u64,
}

impl Timeline {
    /// Expand `trace` into absolutely timed operations
    pub fn from_trace(trace: &Trace, interval_ms: u32) -> Self {
        let mut builder = Builder::new(interval_ms);
        match trace {
            Trace::Merge(t) => builder.merge(t),
            Trace::Selection(t) => builder.selection(t),
            Trace::Insertion(t) => builder.insertion(t),
            Trace::Bubble(t) => builder.bubble(t),
        }
        let timeline = builder.finish();
        log::debug!(
            "{} timeline: {} ops over {} ms at {} ms/tick",
            trace.algorithm().as_str(),
            timeline.ops.len(),
            timeline.total_ms,
            interval_ms
        );
        timeline
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

struct Builder {
    interval_ms: u64,
    ticks: u64,
    ops: Vec<ScheduledOp>,
    total_ms: u64,
}

impl Builder {
    fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            ticks: 0,
            ops: Vec::new(),
            total_ms: 0,
        }
    }

    /// Schedule `changes` at the current tick (plus `hold_ms`), then advance
    /// the counter by `span` ticks
    fn push(&mut self, span: u64, hold_ms: u64, changes: Vec<BarChange>) {
        let delay_ms = self.ticks * self.interval_ms + hold_ms;
        self.ticks += span;
        self.total_ms = self.total_ms.max(delay_ms + span * self.interval_ms);
        self.ops.push(ScheduledOp { delay_ms, changes });
    }

    fn finish(self) -> Timeline {
        Timeline {
            interval_ms: self.interval_ms as u32,
            ops: self.ops,
            total_ms: self.total_ms,
        }
    }

    fn merge(&mut self, t: &MergeTrace) {
        for (pair, write) in t.highlights.iter().zip(&t.mutations) {
            self.push(MERGE_SPAN, 0, pair_colors(*pair, BarColor::Active));
            self.push(MERGE_SPAN, 0, pair_colors(*pair, BarColor::Idle));
            self.push(
                MERGE_SPAN,
                0,
                vec![BarChange::height(write.index, write.height)],
            );
        }
    }

    fn selection(&mut self, t: &SelectionTrace) {
        for (scanned, swap) in t.highlights.iter().zip(&t.mutations) {
            for &index in scanned {
                self.push(1, 0, vec![BarChange::color(index, BarColor::Active)]);
                self.push(1, 0, vec![BarChange::color(index, BarColor::Idle)]);
            }
            let placed = swap.a;
            let mut changes = swap_heights(swap);
            changes.push(BarChange::color(placed, BarColor::Confirmed));
            self.push(1, 0, changes);
            self.push(
                1,
                CONFIRMED_HOLD_MS,
                vec![BarChange::color(placed, BarColor::Idle)],
            );
        }
    }

    fn insertion(&mut self, t: &InsertionTrace) {
        for (moved, shifts) in t.highlights.iter().zip(&t.mutations) {
            let last = shifts.len().saturating_sub(1);
            for (j, (&index, swap)) in moved.iter().zip(shifts).enumerate() {
                let (color, hold_ms) = if j == last {
                    (BarColor::Confirmed, CONFIRMED_HOLD_MS)
                } else {
                    (BarColor::Active, 0)
                };
                self.push(1, 0, swap_heights(swap));
                self.push(1, 0, vec![BarChange::color(index, color)]);
                self.push(1, hold_ms, vec![BarChange::color(index, BarColor::Idle)]);
            }
        }
    }

    fn bubble(&mut self, t: &BubbleTrace) {
        for (pair, swap) in t.highlights.iter().zip(&t.mutations) {
            self.push(1, 0, pair_colors(*pair, BarColor::Active));
            if let Some(swap) = swap {
                self.push(1, 0, swap_heights(swap));
            }
            self.push(1, 0, pair_colors(*pair, BarColor::Idle));
        }
    }
}

fn pair_colors([a, b]: [usize; 2], color: BarColor) -> Vec<BarChange> {
    if a == b {
        vec![BarChange::color(a, color)]
    } else {
        vec![BarChange::color(a, color), BarChange::color(b, color)]
    }
}

fn swap_heights(swap: &Swap) -> Vec<BarChange> {
    vec![
        BarChange::height(swap.a, swap.height_a),
        BarChange::height(swap.b, swap.height_b),
    ]
}
