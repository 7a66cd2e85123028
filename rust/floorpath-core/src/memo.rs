//! LRU memo of reconstructed routes, keyed by table generation and label pair.
//! Thread-safe; entries from an older generation are simply never hit again.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::errors::FloorPathError;
use crate::models::Route;
use crate::route_table::RouteTable;

pub const DEFAULT_MEMO_CAPACITY: usize = 1024;

type MemoKey = (u64, String, String);

pub struct RouteMemo {
    capacity: usize,
    inner: Mutex<LruCache<MemoKey, Arc<Route>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RouteMemo {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMO_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            capacity: cap.get(),
            inner: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached route for `(src, dst)` on `table`, reconstructing on a miss.
    /// Errors are not cached.
    pub fn route(&self, table: &RouteTable, src: &str, dst: &str) -> Result<Arc<Route>, FloorPathError> {
        let key: MemoKey = (table.generation(), src.to_string(), dst.to_string());
        if let Some(hit) = self.inner.lock().expect("route memo mutex poisoned").get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit);
        }
        // Reconstruct outside the lock.
        let route = Arc::new(table.route(src, dst)?);
        let mut guard = self.inner.lock().expect("route memo mutex poisoned");
        if let Some(hit) = guard.get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit);
        }
        guard.put(key, Arc::clone(&route));
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(route)
    }

    pub fn clear(&self) {
        self.inner.lock().expect("route memo mutex poisoned").clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn cached(&self) -> usize {
        self.inner.lock().map(|c| c.len()).unwrap_or(0)
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RouteMemo {
    fn default() -> Self {
        Self::new()
    }
}
