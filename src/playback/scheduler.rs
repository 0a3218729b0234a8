//! Delayed callback scheduling
//!
//! Playback is single-threaded: every sub-event is an independent delayed
//! callback, ordered only by its delay. [`VirtualScheduler`] runs callbacks
//! against a virtual millisecond clock (tests, native driver);
//! `TimeoutScheduler` uses the browser's `setTimeout` on wasm32.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// A delayed callback
pub type Task = Box<dyn FnOnce()>;

/// Identifies a scheduled callback so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Registers delayed callbacks
pub trait Scheduler {
    /// Run `task` once, `delay_ms` from now
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerHandle;
    /// Cancel a callback; unknown or already fired handles are ignored
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Default)]
struct VirtualInner {
    now_ms: u64,
    next_seq: u64,
    /// Keyed by (due time, schedule order) so ties fire in schedule order
    queue: BTreeMap<(u64, u64), Task>,
    due_by_seq: HashMap<u64, u64>,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Clones share the same clock and queue, so a test can keep one handle to
/// advance time while the player owns another.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    inner: Rc<RefCell<VirtualInner>>,
}

impl std::fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("VirtualScheduler")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.queue.len())
            .finish()
    }
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Callbacks not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Due time of the next callback, if any
    pub fn next_due(&self) -> Option<u64> {
        self.inner.borrow().queue.keys().next().map(|&(due, _)| due)
    }

    /// Fire every callback due at or before `time_ms`, in order, then move
    /// the clock to `time_ms`. Returns the number fired.
    pub fn advance_to(&self, time_ms: u64) -> usize {
        let mut fired = 0;
        loop {
            // Borrow is released before the task runs
            let task = {
                let mut inner = self.inner.borrow_mut();
                let Some(&(due, seq)) = inner.queue.keys().next() else {
                    break;
                };
                if due > time_ms {
                    break;
                }
                inner.now_ms = inner.now_ms.max(due);
                let _ = inner.due_by_seq.remove(&seq);
                inner.queue.remove(&(due, seq))
            };
            if let Some(task) = task {
                task();
                fired += 1;
            }
        }
        let mut inner = self.inner.borrow_mut();
        inner.now_ms = inner.now_ms.max(time_ms);
        fired
    }

    pub fn advance_by(&self, delta_ms: u64) -> usize {
        let target = self.now() + delta_ms;
        self.advance_to(target)
    }

    /// Fire everything that is queued, however far in the future
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_due() {
            fired += self.advance_to(due);
        }
        fired
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let due = inner.now_ms + delay_ms;
        let _ = inner.queue.insert((due, seq), task);
        let _ = inner.due_by_seq.insert(seq, due);
        TimerHandle(seq)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut inner = self.inner.borrow_mut();
        if let Some(due) = inner.due_by_seq.remove(&handle.0) {
            let _ = inner.queue.remove(&(due, handle.0));
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;

    use super::{Scheduler, Task, TimerHandle};

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = "setTimeout")]
        fn set_timeout(callback: &JsValue, delay_ms: f64) -> i32;

        #[wasm_bindgen(js_name = "clearTimeout")]
        fn clear_timeout(id: i32);
    }

    struct Timer {
        js_id: i32,
        /// Kept alive until the timer fires or is cancelled
        _closure: Closure<dyn FnMut()>,
    }

    #[derive(Default)]
    struct TimeoutInner {
        next_key: u64,
        timers: HashMap<u64, Timer>,
        /// Timers that fired; their closures are dropped on the next call
        /// since a closure cannot drop itself while running
        fired: Vec<u64>,
    }

    /// Browser `setTimeout` scheduler
    #[derive(Clone, Default)]
    pub struct TimeoutScheduler {
        inner: Rc<RefCell<TimeoutInner>>,
    }

    impl TimeoutScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        fn purge_fired(inner: &mut TimeoutInner) {
            for key in std::mem::take(&mut inner.fired) {
                let _ = inner.timers.remove(&key);
            }
        }
    }

    impl Scheduler for TimeoutScheduler {
        fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerHandle {
            let mut inner = self.inner.borrow_mut();
            Self::purge_fired(&mut inner);

            let key = inner.next_key;
            inner.next_key += 1;

            let shared = Rc::downgrade(&self.inner);
            let mut task = Some(task);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(task) = task.take() {
                    task();
                }
                if let Some(shared) = shared.upgrade() {
                    shared.borrow_mut().fired.push(key);
                }
            }) as Box<dyn FnMut()>);

            let js_id = set_timeout(closure.as_ref(), delay_ms as f64);
            let _ = inner.timers.insert(
                key,
                Timer {
                    js_id,
                    _closure: closure,
                },
            );
            TimerHandle(key)
        }

        fn cancel(&mut self, handle: TimerHandle) {
            let mut inner = self.inner.borrow_mut();
            Self::purge_fired(&mut inner);
            if let Some(timer) = inner.timers.remove(&handle.0) {
                clear_timeout(timer.js_id);
            }
        }
    }
}
