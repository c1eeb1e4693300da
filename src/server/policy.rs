use rayon::prelude::*;

/// How a server operation spreads its work
///
/// `Sequential` runs on the calling thread.
/// `Parallel` dispatches onto the rayon global thread pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionPolicy {
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, ExecutionPolicy::Parallel)
    }

    /// Run `f` on every item. No ordering guarantee in parallel mode.
    pub fn for_each<T, F>(self, items: &[T], f: F)
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().for_each(f),
            ExecutionPolicy::Parallel => items.par_iter().for_each(f),
        }
    }

    /// True if `pred` holds for any item
    pub fn any<T, F>(self, items: &[T], pred: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().any(pred),
            ExecutionPolicy::Parallel => items.par_iter().any(pred),
        }
    }

    /// Keep the mapped items for which `f` returns `Some`, in input order
    pub fn filter_map<T, R, F>(self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Option<R> + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().filter_map(f).collect(),
            ExecutionPolicy::Parallel => items.par_iter().filter_map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const POLICIES: [ExecutionPolicy; 2] = [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel];

    #[test]
    fn for_each_visits_every_item_once() {
        let items: Vec<usize> = (1..=1000).collect();
        for policy in POLICIES {
            let sum = AtomicUsize::new(0);
            policy.for_each(&items, |i| {
                sum.fetch_add(*i, Ordering::Relaxed);
            });
            assert_eq!(sum.into_inner(), 500_500, "{policy:?}");
        }
    }

    #[test]
    fn filter_map_keeps_input_order() {
        let items: Vec<i32> = (0..100).collect();
        for policy in POLICIES {
            let evens = policy.filter_map(&items, |i| (i % 2 == 0).then_some(*i * 10));
            assert_eq!(evens, (0..50).map(|i| i * 20).collect::<Vec<_>>());
            assert!(policy.any(&items, |i| *i == 99));
            assert!(!policy.any(&items, |i| *i > 99));
        }
    }
}
