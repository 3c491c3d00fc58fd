//! Range partitioning and reduction over the worker thread pool.
//!
//! The topology builder only needs one capability from the tasking layer:
//! partition an index range into tasks, run a closure on each sub-range,
//! and fold the partial results with an associative combiner. This module
//! provides that shape on top of rayon.
//!
//! Partial results are folded in ascending range order, so the reduction
//! is deterministic whenever the per-range closure is.

use std::ops::Range;

/// Upper bound on the number of tasks a single reduction spawns.
const MAX_TASKS: usize = 512;

/// Partition `[first, last)` into tasks no smaller than `min_step`, run
/// `per_range` on each sub-range (possibly concurrently), and fold the
/// partial results with `combine`, starting from `identity`.
///
/// The fold visits partial results in ascending range order. `combine`
/// must be associative over the values `per_range` actually produces;
/// it does not need to be commutative.
///
/// # Example
///
/// ```
/// let total = tessera::parallel::reduce(0, 1000, 64, 0u64, |r| r.map(|i| i as u64).sum(), |a, b| a + b);
/// assert_eq!(total, 499_500);
/// ```
pub fn reduce<V, F, C>(
    first: usize,
    last: usize,
    min_step: usize,
    identity: V,
    per_range: F,
    combine: C,
) -> V
where
    V: Send,
    F: Fn(Range<usize>) -> V + Sync,
    C: Fn(V, V) -> V,
{
    let len = last.saturating_sub(first);
    if len == 0 {
        return identity;
    }

    let min_step = min_step.max(1);
    let task_count = len
        .div_ceil(min_step)
        .min(rayon::current_num_threads())
        .min(MAX_TASKS);

    // Fast path for a single task.
    if task_count <= 1 {
        return combine(identity, per_range(first..last));
    }

    use rayon::prelude::*;
    let partials: Vec<V> = (0..task_count)
        .into_par_iter()
        .map(|t| {
            let k0 = first + t * len / task_count;
            let k1 = first + (t + 1) * len / task_count;
            per_range(k0..k1)
        })
        .collect();

    partials.into_iter().fold(identity, combine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range_returns_identity() {
        let v = reduce(5, 5, 1, 42u64, |_| panic!("must not run"), |a, b| a + b);
        assert_eq!(v, 42);
    }

    #[test]
    fn test_sum_matches_sequential() {
        let n = 10_000usize;
        let expected: u64 = (0..n as u64).sum();
        for min_step in [1, 7, 100, 20_000] {
            let total = reduce(
                0,
                n,
                min_step,
                0u64,
                |r| r.map(|i| i as u64).sum::<u64>(),
                |a, b| a + b,
            );
            assert_eq!(total, expected, "min_step = {}", min_step);
        }
    }

    #[test]
    fn test_fold_order_is_ascending() {
        // String concatenation is associative but not commutative, so the
        // result is only correct if partials are folded in range order.
        let s = reduce(
            0,
            100,
            1,
            String::new(),
            |r| r.map(|i| format!("{},", i)).collect::<String>(),
            |a, b| a + &b,
        );
        let expected: String = (0..100).map(|i| format!("{},", i)).collect();
        assert_eq!(s, expected);
    }

    #[test]
    fn test_error_propagation_picks_first() {
        // Result<(), usize> with and() keeps the lowest-range error.
        let r = reduce(
            0,
            1000,
            1,
            Ok(()),
            |range| {
                for i in range {
                    if i % 17 == 3 {
                        return Err(i);
                    }
                }
                Ok(())
            },
            |a: Result<(), usize>, b| a.and(b),
        );
        assert_eq!(r, Err(3));
    }
}
