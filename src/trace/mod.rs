//! Instrumented sorters
//!
//! Each sorter runs on a private copy of the input and records what the
//! animation needs to show: which bars are highlighted at each step and which
//! bars change height. This module must stay pure and deterministic:
//! - No timing or scheduling
//! - No rendering dependencies
//! - Same input, same trace

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod selection;
pub mod values;

use serde::{Deserialize, Serialize};

use crate::settings::SortAlgorithm;
pub use values::{Value, ValueSequence, clamp_value};

/// A single bar takes a new height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overwrite {
    pub index: usize,
    pub height: Value,
}

/// Two bars exchange heights; the new heights are recorded explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub a: usize,
    pub b: usize,
    /// Height of bar `a` after the swap
    pub height_a: Value,
    /// Height of bar `b` after the swap
    pub height_b: Value,
}

impl Swap {
    /// Swap `a` and `b` in `values`, recording the heights that result
    pub(crate) fn perform(values: &mut [Value], a: usize, b: usize) -> Self {
        values.swap(a, b);
        Self {
            a,
            b,
            height_a: values[a],
            height_b: values[b],
        }
    }

    fn apply(&self, values: &mut [Value]) {
        values[self.a] = self.height_a;
        values[self.b] = self.height_b;
    }
}

/// Merge sort: one compared pair and one overwrite per physical write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTrace {
    pub highlights: Vec<[usize; 2]>,
    pub mutations: Vec<Overwrite>,
}

/// Selection sort: per pass, every index scanned and the single placing swap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTrace {
    pub highlights: Vec<Vec<usize>>,
    pub mutations: Vec<Swap>,
}

/// Insertion sort: per pass, one highlighted index and one swap per shift.
///
/// The last shift of a pass is the element's final placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionTrace {
    pub highlights: Vec<Vec<usize>>,
    pub mutations: Vec<Vec<Swap>>,
}

/// Bubble sort: one compared pair per comparison, with the exchange if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleTrace {
    pub highlights: Vec<[usize; 2]>,
    pub mutations: Vec<Option<Swap>>,
}

/// The recorded, timing-independent events of one sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Trace {
    Merge(MergeTrace),
    Selection(SelectionTrace),
    Insertion(InsertionTrace),
    Bubble(BubbleTrace),
}

impl From<MergeTrace> for Trace {
    fn from(trace: MergeTrace) -> Self {
        Trace::Merge(trace)
    }
}

impl From<SelectionTrace> for Trace {
    fn from(trace: SelectionTrace) -> Self {
        Trace::Selection(trace)
    }
}

impl From<InsertionTrace> for Trace {
    fn from(trace: InsertionTrace) -> Self {
        Trace::Insertion(trace)
    }
}

impl From<BubbleTrace> for Trace {
    fn from(trace: BubbleTrace) -> Self {
        Trace::Bubble(trace)
    }
}

/// Run `algorithm` over `values` and record its trace
pub fn trace(algorithm: SortAlgorithm, values: &[Value]) -> Trace {
    let trace: Trace = match algorithm {
        SortAlgorithm::Merge => merge::trace(values).into(),
        SortAlgorithm::Selection => selection::trace(values).into(),
        SortAlgorithm::Insertion => insertion::trace(values).into(),
        SortAlgorithm::Bubble => bubble::trace(values).into(),
    };
    log::debug!(
        "{} traced {} values in {} steps",
        algorithm.as_str(),
        values.len(),
        trace.step_count()
    );
    trace
}

impl Trace {
    pub fn algorithm(&self) -> SortAlgorithm {
        match self {
            Trace::Merge(_) => SortAlgorithm::Merge,
            Trace::Selection(_) => SortAlgorithm::Selection,
            Trace::Insertion(_) => SortAlgorithm::Insertion,
            Trace::Bubble(_) => SortAlgorithm::Bubble,
        }
    }

    /// Number of logical steps (writes, passes, shifts or comparisons)
    pub fn step_count(&self) -> usize {
        match self {
            Trace::Merge(t) => t.highlights.len(),
            Trace::Selection(t) => t.highlights.len(),
            Trace::Insertion(t) => t.highlights.iter().map(Vec::len).sum(),
            Trace::Bubble(t) => t.highlights.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.step_count() == 0
    }

    /// Apply every mutation in order to a copy of `values`
    pub fn replay(&self, values: &[Value]) -> Vec<Value> {
        let mut out = values.to_vec();
        match self {
            Trace::Merge(t) => {
                for write in &t.mutations {
                    out[write.index] = write.height;
                }
            }
            Trace::Selection(t) => {
                for swap in &t.mutations {
                    swap.apply(&mut out);
                }
            }
            Trace::Insertion(t) => {
                for swap in t.mutations.iter().flatten() {
                    swap.apply(&mut out);
                }
            }
            Trace::Bubble(t) => {
                for swap in t.mutations.iter().flatten() {
                    swap.apply(&mut out);
                }
            }
        }
        out
    }

    /// Highest bar index touched by any highlight or mutation
    pub fn max_index(&self) -> Option<usize> {
        let swaps = |s: &Swap| [s.a, s.b];
        match self {
            Trace::Merge(t) => t
                .highlights
                .iter()
                .flatten()
                .copied()
                .chain(t.mutations.iter().map(|w| w.index))
                .max(),
            Trace::Selection(t) => t
                .highlights
                .iter()
                .flatten()
                .copied()
                .chain(t.mutations.iter().flat_map(swaps))
                .max(),
            Trace::Insertion(t) => t
                .highlights
                .iter()
                .flatten()
                .copied()
                .chain(t.mutations.iter().flatten().flat_map(swaps))
                .max(),
            Trace::Bubble(t) => t
                .highlights
                .iter()
                .flatten()
                .copied()
                .chain(t.mutations.iter().flatten().flat_map(swaps))
                .max(),
        }
    }

    /// Check alignment of highlight and mutation sequences and that every
    /// index lies in `[0, len)`
    pub fn is_well_formed(&self, len: usize) -> bool {
        let in_range = |i: &usize| *i < len;
        let swap_in_range = |s: &Swap| s.a < len && s.b < len;
        match self {
            Trace::Merge(t) => {
                t.highlights.len() == t.mutations.len()
                    && t.highlights.iter().flatten().all(in_range)
                    && t.mutations.iter().all(|w| w.index < len)
            }
            Trace::Selection(t) => {
                t.highlights.len() == t.mutations.len()
                    && t.highlights.iter().all(|pass| !pass.is_empty())
                    && t.highlights.iter().flatten().all(in_range)
                    && t.mutations.iter().all(swap_in_range)
            }
            Trace::Insertion(t) => {
                t.highlights.len() == t.mutations.len()
                    && t
                        .highlights
                        .iter()
                        .zip(&t.mutations)
                        .all(|(h, m)| h.len() == m.len())
                    && t.highlights.iter().flatten().all(in_range)
                    && t.mutations.iter().flatten().all(swap_in_range)
            }
            Trace::Bubble(t) => {
                t.highlights.len() == t.mutations.len()
                    && t.highlights.iter().flatten().all(in_range)
                    && t.mutations.iter().flatten().all(swap_in_range)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_traces_are_empty() {
        for algorithm in SortAlgorithm::ALL {
            let t = trace(algorithm, &[50]);
            assert!(
                t.is_empty(),
                "{} should not record steps for one bar",
                algorithm.as_str()
            );
            assert_eq!(t.max_index(), None);
            assert_eq!(t.replay(&[50]), vec![50]);
            assert!(t.is_well_formed(1));
        }
    }

    #[test]
    fn test_every_algorithm_sorts() {
        let input = [64, 25, 12, 22, 11, 90, 5, 100, 64];
        let mut expected = input.to_vec();
        expected.sort_unstable();
        for algorithm in SortAlgorithm::ALL {
            let t = trace(algorithm, &input);
            assert_eq!(t.algorithm(), algorithm);
            assert_eq!(t.replay(&input), expected, "{} replay", algorithm.as_str());
            assert!(t.is_well_formed(input.len()));
        }
    }

    #[test]
    fn test_max_index_reaches_last_bar() {
        let input = [90, 70, 50, 30, 10];
        for algorithm in SortAlgorithm::ALL {
            let t = trace(algorithm, &input);
            assert_eq!(
                t.max_index(),
                Some(input.len() - 1),
                "{}",
                algorithm.as_str()
            );
        }
        let t = trace(SortAlgorithm::Bubble, &[10, 20, 30]);
        assert_eq!(t.max_index(), Some(2));
    }

    #[test]
    fn test_trace_does_not_touch_input() {
        let input = vec![70, 30, 50];
        let copy = input.clone();
        let _ = trace(SortAlgorithm::Merge, &input);
        assert_eq!(input, copy);
    }

    #[test]
    fn test_trace_json_tagged_by_algorithm() {
        let t = trace(SortAlgorithm::Selection, &[20, 10]);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains(r#""algorithm":"selection""#));
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
