use std::collections::BTreeMap;

use num::PrimInt;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// Shard count used when the caller does not pick one
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Exclusive handle to one value of a [`ConcurrentMap`]
/// Holds the shard lock until dropped.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

/// Integer-keyed map split into independently locked shards
///
/// A key lives in shard `key mod shard_count`. Writers to keys in
/// different shards never wait on each other; writers to the same shard
/// are serialized by that shard's mutex.
///
/// # Examples
/// ```
/// use search_server::utils::datastruct::map::ConcurrentMap;
/// let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(4);
/// *map.access(7) += 0.5;
/// *map.access(7) += 0.25;
/// assert_eq!(map.merge().get(&7), Some(&0.75));
/// ```
#[derive(Debug)]
pub struct ConcurrentMap<K, V>
where
    K: PrimInt,
{
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: PrimInt,
{
    /// `shard_count` of 0 is treated as 1
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    #[inline]
    fn shard_index(&self, key: K) -> usize {
        // negative keys keep their two's-complement bit pattern
        let raw = key
            .to_u64()
            .or_else(|| key.to_i64().map(|v| v as u64))
            .unwrap_or(0);
        (raw % self.shards.len() as u64) as usize
    }

    #[inline]
    fn lock_shard(&self, key: K) -> MutexGuard<'_, BTreeMap<K, V>> {
        self.shards[self.shard_index(key)].lock()
    }

    /// Lock the owning shard and hand out the value for `key`,
    /// inserting `V::default()` first if it is missing
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.lock_shard(key), |map| map.entry(key).or_default())
    }

    /// Remove `key`, returning its value if it was present
    pub fn erase(&self, key: K) -> Option<V> {
        self.lock_shard(key).remove(&key)
    }

    /// Number of entries across all shards
    /// Only exact when no writer is active.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Copy every shard into one ordered map, locking shards one at a time
    /// Call after all writers are done; this is not a consistent snapshot.
    pub fn merge(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock();
            result.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        result
    }

    /// Consume the map and merge the shards without copying values
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards {
            result.append(&mut shard.into_inner());
        }
        result
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: PrimInt,
{
    fn default() -> Self {
        Self::new(DEFAULT_SHARD_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rayon::prelude::*;

    use super::*;

    #[test]
    fn zero_shards_is_clamped() {
        let map: ConcurrentMap<u32, i32> = ConcurrentMap::new(0);
        assert_eq!(map.shard_count(), 1);
        *map.access(3) += 1;
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn access_creates_default_and_erase_removes() {
        let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(3);
        assert!(map.is_empty());
        {
            let mut value = map.access(-5);
            assert_eq!(*value, 0.0);
            *value = 2.5;
        }
        assert_eq!(map.erase(-5), Some(2.5));
        assert_eq!(map.erase(-5), None);
        assert!(map.is_empty());
    }

    #[test]
    fn negative_and_positive_keys_merge_in_order() {
        let map: ConcurrentMap<i64, u32> = ConcurrentMap::new(5);
        for key in [-3_i64, 10, 0, 4, -100, 7] {
            *map.access(key) += 1;
        }
        let keys: Vec<i64> = map.merge().into_keys().collect();
        assert_eq!(keys, [-100, -3, 0, 4, 7, 10]);
    }

    #[test]
    fn parallel_updates_are_not_lost() {
        let map: ConcurrentMap<i32, u64> = ConcurrentMap::new(DEFAULT_SHARD_COUNT);
        (0..10_000).into_par_iter().for_each(|i| {
            *map.access(i % 100) += 1;
        });
        let merged = map.into_ordinary_map();
        assert_eq!(merged.len(), 100);
        assert!(merged.values().all(|&count| count == 100));
    }

    #[test]
    fn guard_is_released_on_early_exit() {
        let map: ConcurrentMap<u8, i32> = ConcurrentMap::new(1);
        let bump = |key: u8| -> Result<(), ()> {
            let mut value = map.access(key);
            *value += 1;
            if *value > 1 {
                return Err(());
            }
            Ok(())
        };
        assert!(bump(1).is_ok());
        assert!(bump(1).is_err());
        // single shard: a leaked guard would deadlock here
        thread::scope(|s| {
            s.spawn(|| *map.access(2) += 1);
        });
        assert_eq!(map.merge().get(&2), Some(&1));
    }
}
