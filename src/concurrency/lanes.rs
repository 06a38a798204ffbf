//! Data-parallel execution lanes.
//!
//! Every extraction phase is "run one independent work item per index, then join".
//! `Lanes` is the only place that decides whether those items run on the rayon pool
//! or sequentially on the calling thread, so the phases themselves stay plain
//! functions of their index.
//!
//! Results never depend on the choice: the same closures run in both modes and
//! every combinator returns its outputs in index order.

#[cfg(feature = "parallel")]
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scheduling policy for independent work items.
#[derive(Clone, Debug)]
pub struct Lanes {
    min_parallel_len: usize,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for Lanes {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_PARALLEL_LEN, None)
    }
}

impl Lanes {
    /// Below this many items a phase runs on the calling thread.
    pub const DEFAULT_MIN_PARALLEL_LEN: usize = 1024;

    /// Creates lanes that go parallel at `min_parallel_len` items.
    ///
    /// `num_threads` requests a dedicated pool; `None` uses the global rayon pool.
    /// Without the `parallel` feature `num_threads` is ignored.
    pub fn new(min_parallel_len: usize, num_threads: Option<usize>) -> Self {
        #[cfg(feature = "parallel")]
        {
            let pool = num_threads.and_then(|n| {
                match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                    Ok(pool) => Some(Arc::new(pool)),
                    Err(err) => {
                        tracing::warn!(
                            target: "induced::lanes",
                            threads = n,
                            error = %err,
                            "dedicated pool unavailable, using the global pool"
                        );
                        None
                    }
                }
            });
            Self {
                min_parallel_len,
                pool,
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = num_threads;
            Self { min_parallel_len }
        }
    }

    /// Lanes that never leave the calling thread.
    pub fn sequential() -> Self {
        Self::new(usize::MAX, None)
    }

    #[cfg(feature = "parallel")]
    #[inline]
    fn go_parallel(&self, len: usize) -> bool {
        len >= self.min_parallel_len
    }

    /// Runs `f` inside the dedicated pool, if one was configured.
    pub fn install<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            return pool.install(f);
        }
        f()
    }

    /// Evaluates `f(i)` for every `i < len` and collects the results in index order.
    pub fn map<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        if self.go_parallel(len) {
            return (0..len).into_par_iter().map(f).collect();
        }
        (0..len).map(f).collect()
    }

    /// Hands each item to `f` together with its position.
    pub fn for_each<I, F>(&self, items: Vec<I>, f: F)
    where
        I: Send,
        F: Fn(usize, I) + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        if self.go_parallel(items.len()) {
            items
                .into_par_iter()
                .enumerate()
                .for_each(|(i, item)| f(i, item));
            return;
        }
        for (i, item) in items.into_iter().enumerate() {
            f(i, item);
        }
    }

    /// Returns the lowest `i < len` for which `pred(i)` holds.
    pub fn find_first<F>(&self, len: usize, pred: F) -> Option<usize>
    where
        F: Fn(usize) -> bool + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        if self.go_parallel(len) {
            return (0..len).into_par_iter().position_first(pred);
        }
        (0..len).position(pred)
    }
}

#[cfg(test)]
mod tests {
    use super::Lanes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn modes() -> [Lanes; 3] {
        [Lanes::sequential(), Lanes::new(0, None), Lanes::new(0, Some(2))]
    }

    #[test]
    fn test_map_preserves_index_order() {
        for lanes in modes() {
            let squares = lanes.map(2000, |i| i * i);
            assert_eq!(squares.len(), 2000);
            assert!(squares.iter().enumerate().all(|(i, &s)| s == i * i));
        }
    }

    #[test]
    fn test_for_each_visits_every_item_once() {
        for lanes in modes() {
            let sum = AtomicUsize::new(0);
            let items: Vec<usize> = (0..500).collect();
            lanes.for_each(items, |i, item| {
                assert_eq!(i, item);
                sum.fetch_add(item, Ordering::Relaxed);
            });
            assert_eq!(sum.load(Ordering::Relaxed), 499 * 500 / 2);
        }
    }

    #[test]
    fn test_find_first_returns_lowest_match() {
        for lanes in modes() {
            assert_eq!(lanes.find_first(10_000, |i| i % 977 == 976), Some(976));
            assert_eq!(lanes.find_first(10, |_| false), None);
            assert_eq!(lanes.find_first(0, |_| true), None);
        }
    }

    #[test]
    fn test_install_runs_closure() {
        for lanes in modes() {
            assert_eq!(lanes.install(|| 7), 7);
        }
    }
}
