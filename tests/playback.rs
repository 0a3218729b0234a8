//! End-to-end playback scenarios on the virtual clock.

use std::cell::RefCell;
use std::rc::Rc;

use sort_visualiser::consts::CONFIRMED_HOLD_MS;
use sort_visualiser::playback::{PlaybackSession, VirtualScheduler};
use sort_visualiser::view::{BarColor, BarList, BarView};
use sort_visualiser::{Settings, SortAlgorithm, Trace, Visualiser, trace};

fn session(
    values: &[u8],
    interval_ms: u32,
) -> (
    VirtualScheduler,
    Rc<RefCell<BarList>>,
    PlaybackSession<VirtualScheduler>,
) {
    let sched = VirtualScheduler::new();
    let bars = Rc::new(RefCell::new(BarList::new(values)));
    let session = PlaybackSession::new(sched.clone(), bars.clone(), interval_ms);
    (sched, bars, session)
}

#[test]
fn single_bar_merge_is_instant() {
    let t = trace::trace(SortAlgorithm::Merge, &[50]);
    match &t {
        Trace::Merge(m) => {
            assert!(m.highlights.is_empty());
            assert!(m.mutations.is_empty());
        }
        other => panic!("unexpected trace {:?}", other),
    }

    let (sched, _bars, mut session) = session(&[50], 10);
    assert_eq!(session.start(&t), Some(0));
    assert!(!session.is_active());
    assert_eq!(sched.pending(), 0);
}

#[test]
fn two_bar_insertion_timing() {
    let (sched, bars, mut session) = session(&[80, 20], 10);
    let t = trace::trace(SortAlgorithm::Insertion, &[80, 20]);
    assert_eq!(t.step_count(), 1);

    let total = session.start(&t).unwrap();
    assert_eq!(total, 20 + CONFIRMED_HOLD_MS + 10);

    assert_eq!(sched.advance_to(0), 1);
    assert_eq!(bars.borrow().heights(), vec![20, 80]);

    let _ = sched.advance_to(10);
    assert_eq!(
        bars.borrow().colors(),
        vec![BarColor::Confirmed, BarColor::Idle]
    );

    let _ = sched.advance_to(20 + CONFIRMED_HOLD_MS);
    assert!(bars.borrow().all_idle());
    assert!(session.is_active());

    let _ = sched.advance_to(total);
    assert!(!session.is_active());
}

#[test]
fn all_equal_selection_scans_every_pass() {
    let input = [30, 30, 30];
    let t = trace::trace(SortAlgorithm::Selection, &input);
    let Trace::Selection(sel) = &t else {
        panic!("expected a selection trace");
    };
    let lengths: Vec<usize> = sel.highlights.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![3, 2]);
    assert_eq!(sel.mutations.len(), sel.highlights.len());

    let (sched, bars, mut session) = session(&input, 5);
    let _ = session.start(&t);
    let _ = sched.run_until_idle();
    assert_eq!(bars.borrow().heights(), input.to_vec());
}

#[test]
fn generate_mid_playback_cancels() {
    let sched = VirtualScheduler::new();
    let bars = Rc::new(RefCell::new(BarList::default()));
    let settings = Settings::from_inputs("50", "4");
    let mut vis = Visualiser::new(sched.clone(), bars.clone(), settings, 2024);
    let first = vis.values().clone();

    let total = vis.request_sort(SortAlgorithm::Merge).unwrap();
    let _ = sched.advance_to(total / 2);
    assert!(vis.is_sorting());
    assert!(vis.request_sort(SortAlgorithm::Selection).is_none());

    let _ = vis.generate_values();
    assert!(!vis.is_sorting());
    assert!(vis.controls_enabled());
    assert_eq!(sched.pending(), 0);
    assert!(bars.borrow().all_idle());
    assert_ne!(vis.values(), &first);
    assert_eq!(bars.borrow().heights(), vis.values().as_slice());

    // Nothing from the abandoned playback fires later
    let shown = bars.borrow().heights();
    let _ = sched.advance_by(total * 2);
    assert_eq!(bars.borrow().heights(), shown);
}

#[test]
fn guard_clears_exactly_at_total() {
    let sched = VirtualScheduler::new();
    let bars = Rc::new(RefCell::new(BarList::default()));
    let settings = Settings::from_inputs("10", "7");
    let mut vis = Visualiser::new(sched.clone(), bars.clone(), settings, 9);

    let total = vis.request_sort(SortAlgorithm::Selection).unwrap();
    let _ = sched.advance_to(total - 1);
    assert!(!vis.controls_enabled());
    let _ = sched.advance_to(total);
    assert!(vis.controls_enabled());
}

#[test]
fn sorts_chain_from_displayed_bars() {
    let sched = VirtualScheduler::new();
    let bars = Rc::new(RefCell::new(BarList::default()));
    let settings = Settings::from_inputs("16", "10");
    let mut vis = Visualiser::new(sched.clone(), bars.clone(), settings, 77);

    let _ = vis.request_sort(SortAlgorithm::Bubble);
    let _ = sched.run_until_idle();
    let sorted = bars.borrow().heights();

    // Sorting again starts from the already sorted bars
    let _ = vis.request_sort(SortAlgorithm::Insertion);
    let _ = sched.run_until_idle();
    assert_eq!(bars.borrow().heights(), sorted);
    assert_eq!(bars.borrow().len(), 16);
}
