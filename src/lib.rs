//! Sort Visualiser - animated sorting algorithms driven by replayable traces
//!
//! Core modules:
//! - `trace`: Instrumented sorters (pure, deterministic, no timing)
//! - `playback`: Trace-to-timeline translation, scheduling, playback guard
//! - `view`: Bar view model the player writes into
//! - `settings`: Input sanitisation and visualiser preferences
//! - `visualiser`: App model tying values, settings and playback together

pub mod playback;
pub mod settings;
pub mod trace;
pub mod view;
pub mod visualiser;

pub use playback::{
    PlaybackGuard, PlaybackSession, Scheduler, Timeline, TracePlayer, VirtualScheduler,
};
pub use settings::{Settings, SortAlgorithm};
pub use trace::{Trace, Value, ValueSequence};
pub use view::{BarChange, BarColor, BarList, BarProperty, BarView};
pub use visualiser::Visualiser;

/// Visualiser configuration constants
pub mod consts {
    /// Smallest bar height (percent of the chart)
    pub const VALUE_MIN: u8 = 5;
    /// Tallest bar height (percent of the chart)
    pub const VALUE_MAX: u8 = 100;

    /// Bar count bounds
    pub const BAR_COUNT_MIN: usize = 1;
    pub const BAR_COUNT_MAX: usize = 100;
    pub const BAR_COUNT_DEFAULT: usize = 100;

    /// Speed selector bounds (1 = slowest, 10 = fastest)
    pub const SPEED_MIN: u8 = 1;
    pub const SPEED_MAX: u8 = 10;
    pub const SPEED_DEFAULT: u8 = 9;

    /// Tick interval in milliseconds for each speed, slowest first
    pub const INTERVAL_OPTIONS: [u32; 10] = [500, 375, 250, 100, 50, 25, 10, 5, 2, 1];

    /// Extra time a placed bar keeps its confirmed colour (ms, not scaled by speed)
    pub const CONFIRMED_HOLD_MS: u64 = 250;

    /// Widest a single bar may be (percent of chart width)
    pub const BAR_WIDTH_MAX: f32 = 20.0;
    /// Width shared between all bars (percent of chart width)
    pub const BAR_AREA_WIDTH: f32 = 80.0;
}

/// Width of one bar as a percentage of the chart, for `count` bars
#[inline]
pub fn bar_width_percent(count: usize) -> f32 {
    if count == 0 {
        return consts::BAR_WIDTH_MAX;
    }
    consts::BAR_WIDTH_MAX.min(consts::BAR_AREA_WIDTH / count as f32)
}
