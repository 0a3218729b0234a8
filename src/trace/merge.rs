//! Top-down merge sort
//!
//! Every write into the working array during a merge produces one highlight
//! (the two positions being compared) and one overwrite. Once a run is
//! exhausted, the remaining element is paired with itself.

use super::{MergeTrace, Overwrite, Value};

pub fn trace(values: &[Value]) -> MergeTrace {
    let mut work = values.to_vec();
    let mut out = MergeTrace::default();
    sort_range(&mut work, 0, values.len(), &mut out);
    out
}

fn sort_range(work: &mut [Value], lo: usize, hi: usize, out: &mut MergeTrace) {
    if hi - lo < 2 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    sort_range(work, lo, mid, out);
    sort_range(work, mid, hi, out);
    merge(work, lo, mid, hi, out);
}

fn merge(work: &mut [Value], lo: usize, mid: usize, hi: usize, out: &mut MergeTrace) {
    let left = work[lo..mid].to_vec();
    let right = work[mid..hi].to_vec();
    let (mut i, mut j) = (0, 0);

    for k in lo..hi {
        let pair = match (i < left.len(), j < right.len()) {
            (true, true) => [lo + i, mid + j],
            (true, false) => [lo + i; 2],
            _ => [mid + j; 2],
        };
        // `<=` keeps equal elements in their original order
        let height = if j == right.len() || (i < left.len() && left[i] <= right[j]) {
            let h = left[i];
            i += 1;
            h
        } else {
            let h = right[j];
            j += 1;
            h
        };
        out.highlights.push(pair);
        out.mutations.push(Overwrite { index: k, height });
        work[k] = height;
    }
}
