//! Trace playback
//!
//! - `timeline`: expands a trace into absolutely timed sub-events
//! - `scheduler`: delayed callbacks (virtual clock or browser timers)
//! - `player`: schedules a timeline into a bar view, cancels it
//! - `guard`: one playback at a time
//! - `session`: interval + player + guard, the only playback state

pub mod guard;
pub mod player;
pub mod scheduler;
pub mod session;
pub mod timeline;

pub use guard::PlaybackGuard;
pub use player::TracePlayer;
#[cfg(target_arch = "wasm32")]
pub use scheduler::TimeoutScheduler;
pub use scheduler::{Scheduler, Task, TimerHandle, VirtualScheduler};
pub use session::PlaybackSession;
pub use timeline::{ScheduledOp, Timeline};
