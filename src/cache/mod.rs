//! Time-bounded in-memory caches.
//!
//! Every remote lookup is memoized in its own [`ExpiringCache`] instance with
//! a fixed TTL. Expiry is enforced twice:
//!
//! - `put` schedules a background removal of the key after `ttl`
//!   (only when a tokio runtime is available)
//! - `get` treats an entry whose age reached `ttl` as absent and evicts it
//!
//! There is no size bound and no LRU; time is the only eviction pressure.

mod entry;

pub use entry::CacheEntry;

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crate::error::Result;

type Table<K, V> = Mutex<HashMap<K, CacheEntry<V>>>;

/// Keyed store whose entries disappear `ttl` after they were written.
pub struct ExpiringCache<K, V> {
    name: &'static str,
    ttl: Duration,
    table: Arc<Table<K, V>>,
    generation: AtomicU64,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Create an empty cache. `name` only appears in log output.
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            table: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Look up a live value. A stale entry is evicted and reported as a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut table = lock(&self.table);
        let expired = match table.get(key) {
            Some(entry) => entry.is_expired(self.ttl),
            None => {
                log::debug!("[{}] miss: {:?}", self.name, key);
                return None;
            }
        };
        if expired {
            log::debug!("[{}] expired on read: {:?}", self.name, key);
            table.remove(key);
            return None;
        }
        log::debug!("[{}] hit: {:?}", self.name, key);
        table.get(key).map(|entry| entry.value.clone())
    }

    /// Store a value, replacing any previous one, and schedule its removal.
    pub fn put(&self, key: K, value: V) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        lock(&self.table).insert(key.clone(), CacheEntry::new(value, generation));
        self.schedule_removal(key, generation);
    }

    /// Remove a key immediately, returning its value if it was still live.
    pub fn remove(&self, key: &K) -> Option<V> {
        lock(&self.table)
            .remove(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.value)
    }

    /// Drop every entry. The next `get` of any key is a miss.
    pub fn clear(&self) {
        let mut table = lock(&self.table);
        let count = table.len();
        table.clear();
        log::debug!("[{}] cleared {} entries", self.name, count);
    }

    /// Number of stored entries, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        lock(&self.table).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// A failed fetch is returned to the caller and nothing is stored, so the
    /// next call fetches again.
    pub async fn get_or_try_insert_with<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = fetch().await?;
        self.put(key, value.clone());
        Ok(value)
    }

    fn schedule_removal(&self, key: K, generation: u64) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // No timer available; `get` still enforces the TTL.
            return;
        };
        let table: Weak<Table<K, V>> = Arc::downgrade(&self.table);
        let ttl = self.ttl;
        let name = self.name;
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            let Some(table) = table.upgrade() else {
                return;
            };
            let mut table = lock(&table);
            // A later put owns the slot now and has its own timer.
            if table.get(&key).is_some_and(|e| e.generation == generation) {
                table.remove(&key);
                log::debug!("[{}] expired: {:?}", name, key);
            }
        });
    }
}

impl<K, V> Debug for ExpiringCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// The table only holds memoized data, so a poisoned lock is still usable.
fn lock<K, V>(table: &Table<K, V>) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const TTL: Duration = Duration::from_secs(300);

    fn cache() -> ExpiringCache<String, u32> {
        ExpiringCache::new("test", TTL)
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_within_ttl_hits() {
        let cache = cache();
        cache.put("k".into(), 7);
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"k".to_string()), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_after_ttl_misses() {
        let cache = cache();
        cache.put("k".into(), 7);
        tokio::time::advance(TTL).await;
        assert_eq!(cache.get(&"k".to_string()), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_removal_without_reads() {
        let cache = cache();
        cache.put("k".into(), 7);
        assert_eq!(cache.len(), 1);

        // Paused clock auto-advances; the removal timer fires first.
        tokio::time::sleep(TTL + Duration::from_millis(1)).await;
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_is_not_removed_by_older_timer() {
        let cache = cache();
        cache.put("k".into(), 1);
        tokio::time::sleep(Duration::from_secs(200)).await;
        cache.put("k".into(), 2);

        // The first timer fires at 300s; the second write lives until 500s.
        tokio::time::sleep(Duration::from_secs(150)).await;
        assert_eq!(cache.get(&"k".to_string()), Some(2));

        tokio::time::sleep(Duration::from_secs(200)).await;
        assert_eq!(cache.get(&"k".to_string()), None);
    }

    #[test]
    fn test_lazy_expiry_without_runtime() {
        let cache: ExpiringCache<String, u32> = ExpiringCache::new("lazy", Duration::ZERO);
        cache.put("k".into(), 7);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"k".to_string()), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_clear_makes_cache_cold() {
        let cache = cache();
        cache.put("a".into(), 1);
        cache.put("b".into(), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a".to_string()), None);
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = cache();
        cache.put("a".into(), 1);
        assert_eq!(cache.remove(&"a".to_string()), Some(1));
        assert_eq!(cache.remove(&"a".to_string()), None);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = cache();
        let result = cache
            .get_or_try_insert_with("k".into(), || async { Err(AppError::config("down")) })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty());

        let value = cache
            .get_or_try_insert_with("k".into(), || async { Ok(5) })
            .await
            .unwrap();
        assert_eq!(value, 5);

        // Served from cache now; the fetch closure is not consulted.
        let value = cache
            .get_or_try_insert_with("k".into(), || async { Ok(99) })
            .await
            .unwrap();
        assert_eq!(value, 5);
    }

    #[tokio::test]
    async fn test_concurrent_access() {
        let cache = Arc::new(ExpiringCache::<u32, u32>::new("shared", TTL));
        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move {
                    cache.put(i, i * 10);
                    cache.get(&i)
                })
            })
            .collect();
        for (i, task) in tasks.into_iter().enumerate() {
            assert_eq!(task.await.unwrap(), Some(i as u32 * 10));
        }
        assert_eq!(cache.len(), 16);
    }
}
