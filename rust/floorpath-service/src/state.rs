use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use floorpath_core::{FloorPlan, PointRecord, RouteCache, RouteMemo, Viewport};
use tracing::info;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RouteCache>,
    pub memo: Arc<RouteMemo>,
    pub plan_path: Option<PathBuf>,
    pub viewport: Viewport,
}

impl AppState {
    pub fn new(cache: RouteCache, memo: RouteMemo, plan_path: Option<PathBuf>, viewport: Viewport) -> Self {
        Self { cache: Arc::new(cache), memo: Arc::new(memo), plan_path, viewport }
    }

    /// Builds the route table from the configured plan, if any. A bad plan is
    /// fatal at startup.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let state = Self::new(
            RouteCache::new(cfg.build.clone()),
            RouteMemo::with_capacity(cfg.memo_capacity),
            cfg.plan_path.clone(),
            cfg.viewport,
        );
        if let Some(path) = &state.plan_path {
            let records = load_records(path)?;
            let table = state
                .cache
                .ensure_built(&records)
                .with_context(|| format!("building route table from {}", path.display()))?;
            info!(plan = %path.display(), stats = ?table.stats(), "floor plan loaded");
        }
        Ok(state)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("plan_path", &self.plan_path.as_ref().map(|p| p.display().to_string()))
            .field("phase", &self.cache.phase())
            .field("builds", &self.cache.builds())
            .field("viewport", &self.viewport)
            .finish()
    }
}

pub fn read_plan(path: &Path) -> anyhow::Result<FloorPlan> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    FloorPlan::from_json_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_records(path: &Path) -> anyhow::Result<Vec<PointRecord>> {
    Ok(read_plan(path)?.records()?)
}
