//! Insertion sort
//!
//! Pass `i` walks element `i` left one adjacent swap at a time. Each shift
//! highlights the element's new position; passes with nothing to shift are
//! kept as empty entries so there are always `n - 1` passes.

use super::{InsertionTrace, Swap, Value};

pub fn trace(values: &[Value]) -> InsertionTrace {
    let mut work = values.to_vec();
    let mut out = InsertionTrace::default();

    for i in 1..work.len() {
        let mut highlights = Vec::new();
        let mut shifts = Vec::new();
        let mut j = i;
        while j > 0 && work[j - 1] > work[j] {
            shifts.push(Swap::perform(&mut work, j - 1, j));
            highlights.push(j - 1);
            j -= 1;
        }
        out.highlights.push(highlights);
        out.mutations.push(shifts);
    }

    out
}
