//! Selection sort
//!
//! Pass `i` scans `i..n` for the minimum, then swaps it into `i`. The swap is
//! recorded on every pass, even when the minimum is already in place.

use super::{SelectionTrace, Swap, Value};

pub fn trace(values: &[Value]) -> SelectionTrace {
    let mut work = values.to_vec();
    let n = work.len();
    let mut out = SelectionTrace::default();

    for i in 0..n.saturating_sub(1) {
        let mut scanned = Vec::with_capacity(n - i);
        let mut min = i;
        for j in i..n {
            scanned.push(j);
            if work[j] < work[min] {
                min = j;
            }
        }
        out.highlights.push(scanned);
        out.mutations.push(Swap::perform(&mut work, i, min));
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
        assert!(t.mutations.is_empty());
    }

    #[test]
    fn test_all_equal_scans_every_pass() {
        let t = trace(&[30, 30, 30]);
        assert_eq!(t.highlights, vec![vec![0, 1, 2], vec![1, 2]]);
        assert_eq!(t.mutations.len(), 2);
        for swap in &t.mutations {
            assert_eq!(swap.a, swap.b);
            assert_eq!((swap.height_a, swap.height_b), (30, 30));
        }
    }

    #[test]
    fn test_swap_records_new_heights() {
        let t = trace(&[50, 10, 30]);
        assert_eq!(
            t.mutations[0],
            Swap {
                a: 0,
                b: 1,
                height_a: 10,
                height_b: 50,
            }
        );
        assert_eq!(
            t.mutations[1],
            Swap {
                a: 1,
                b: 2,
                height_a: 30,
                height_b: 50,
            }
        );
    }
}
