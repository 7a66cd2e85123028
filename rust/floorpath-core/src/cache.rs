//! Build-once holder of the current [`RouteTable`].
//!
//! Readers load the table through `arc-swap` without locking. Builders
//! serialize on a mutex so concurrent first callers block instead of building
//! twice; a rebuild constructs a complete new table and swaps it in.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::FloorPathError;
use crate::models::{PointRecord, Route};
use crate::options::BuildOptions;
use crate::route_table::RouteTable;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePhase {
    Uninitialized,
    Building,
    Ready,
}

pub struct RouteCache {
    options: BuildOptions,
    current: ArcSwapOption<RouteTable>,
    build_lock: Mutex<()>,
    building: AtomicBool,
    builds: AtomicU64,
}

impl RouteCache {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            current: ArcSwapOption::empty(),
            build_lock: Mutex::new(()),
            building: AtomicBool::new(false),
            builds: AtomicU64::new(0),
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds on first call and returns the shared table; later calls return
    /// the same table without rebuilding, whatever records they pass.
    pub fn ensure_built(&self, records: &[PointRecord]) -> Result<Arc<RouteTable>, FloorPathError> {
        if let Some(t) = self.current.load_full() {
            return Ok(t);
        }
        let _guard = self.build_lock.lock().expect("route cache build mutex poisoned");
        // Another caller may have finished while we waited.
        if let Some(t) = self.current.load_full() {
            return Ok(t);
        }
        self.install(records)
    }

    /// Replaces the live table with one built from `records`. On failure the
    /// previous table keeps serving.
    pub fn rebuild(&self, records: &[PointRecord]) -> Result<Arc<RouteTable>, FloorPathError> {
        let _guard = self.build_lock.lock().expect("route cache build mutex poisoned");
        self.install(records)
    }

    fn install(&self, records: &[PointRecord]) -> Result<Arc<RouteTable>, FloorPathError> {
        self.building.store(true, Ordering::SeqCst);
        let built = RouteTable::build(records, &self.options);
        self.building.store(false, Ordering::SeqCst);

        let mut table = match built {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, points = records.len(), "route table build failed");
                return Err(e);
            }
        };
        table.generation = self.builds.fetch_add(1, Ordering::SeqCst) + 1;
        let table = Arc::new(table);
        self.current.store(Some(Arc::clone(&table)));
        info!(generation = table.generation, "route table installed");
        Ok(table)
    }

    pub fn phase(&self) -> CachePhase {
        if self.current.load().is_some() {
            CachePhase::Ready
        } else if self.building.load(Ordering::SeqCst) {
            CachePhase::Building
        } else {
            CachePhase::Uninitialized
        }
    }

    /// Number of successful builds so far.
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn table(&self) -> Option<Arc<RouteTable>> {
        self.current.load_full()
    }

    pub fn route(&self, src: &str, dst: &str) -> Result<Route, FloorPathError> {
        let table = self.table().ok_or(FloorPathError::NotReady)?;
        table.route(src, dst)
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Vec<PointRecord> {
        vec![
            PointRecord::room("a", 0.0, 0.0),
            PointRecord::waypoint(50.0, 0.0),
            PointRecord::room("b", 100.0, 0.0),
        ]
    }

    #[test]
    fn starts_uninitialized_and_route_is_not_ready() {
        let cache = RouteCache::default();
        assert_eq!(cache.phase(), CachePhase::Uninitialized);
        assert_eq!(cache.route("a", "b"), Err(FloorPathError::NotReady));
    }

    #[test]
    fn failed_build_leaves_cache_uninitialized() {
        let cache = RouteCache::default();
        let bad = vec![PointRecord::room("a", 10_000.0, 0.0)];
        assert!(cache.ensure_built(&bad).is_err());
        assert_eq!(cache.phase(), CachePhase::Uninitialized);
        assert_eq!(cache.builds(), 0);
        cache.ensure_built(&corridor()).unwrap();
        assert_eq!(cache.phase(), CachePhase::Ready);
    }

    #[test]
    fn failed_rebuild_keeps_previous_table() {
        let cache = RouteCache::default();
        let first = cache.ensure_built(&corridor()).unwrap();
        let dup = vec![PointRecord::room("a", 0.0, 0.0), PointRecord::room("a", 1.0, 0.0)];
        assert!(cache.rebuild(&dup).is_err());
        let live = cache.table().unwrap();
        assert!(Arc::ptr_eq(&first, &live));
        assert_eq!(live.generation(), 1);
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_bound<T: Send + Sync>() {}
        assert_bound::<RouteCache>();
    }
}
