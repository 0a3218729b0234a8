//! Bubble sort
//!
//! Adjacent pairs are compared left to right; after pass `p` the last `p + 1`
//! bars are settled. A pass without an exchange ends the sort.

use super::{BubbleTrace, Swap, Value};

pub fn trace(values: &[Value]) -> BubbleTrace {
    let mut work = values.to_vec();
    let n = work.len();
    let mut out = BubbleTrace::default();

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            out.highlights.push([j, j + 1]);
            if work[j] > work[j + 1] {
                out.mutations.push(Some(Swap::perform(&mut work, j, j + 1)));
                swapped = true;
            } else {
                out.mutations.push(None);
            }
        }
        if !swapped {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let t = trace(&[50]);
        assert!(t.highlights.is_empty());
    }

    #[test]
    fn test_sorted_input_stops_after_one_pass() {
        let t = trace(&[10, 20, 30, 40]);
        assert_eq!(t.highlights, vec![[0, 1], [1, 2], [2, 3]]);
        assert!(t.mutations.iter().all(Option::is_none));
    }

    #[test]
    fn test_reverse_input_full_passes() {
        let t = trace(&[40, 30, 20, 10]);
        // 3 + 2 + 1 comparisons, every one an exchange
        assert_eq!(t.highlights.len(), 6);
        assert!(t.mutations.iter().all(Option::is_some));
    }
}
