use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use floorpath_core::memo::DEFAULT_MEMO_CAPACITY;
use floorpath_core::view::{DEFAULT_VIEW_ORIGIN, DEFAULT_VIEW_SCALE};
use floorpath_core::{BuildOptions, Coord, Viewport};

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub plan_path: Option<PathBuf>,
    pub build: BuildOptions,
    pub memo_capacity: usize,
    pub viewport: Viewport,
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse::<T>().ok())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("FLOORPATH_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed("FLOORPATH_PORT").unwrap_or(8080);
        let plan_path = env::var("FLOORPATH_PLAN").ok().map(PathBuf::from);

        let mut build = BuildOptions::default();
        if let Some(v) = parsed("FLOORPATH_MAX_POINTS") {
            build.max_points = v;
        }
        if let Some(v) = parsed("FLOORPATH_NEIGHBOR_WINDOW") {
            build.neighbor_window = v;
        }
        if let Some(v) = parsed("FLOORPATH_NEIGHBOR_COUNT") {
            build.neighbor_count = v;
        }
        if let Some(v) = parsed("FLOORPATH_PICK_WINDOW") {
            build.pick_half_extent = v;
        }
        let memo_capacity = parsed("FLOORPATH_ROUTE_MEMO").unwrap_or(DEFAULT_MEMO_CAPACITY);

        let scale = parsed("FLOORPATH_VIEW_SCALE").unwrap_or(DEFAULT_VIEW_SCALE);
        let origin = Coord::new(
            parsed("FLOORPATH_VIEW_ORIGIN_X").unwrap_or(DEFAULT_VIEW_ORIGIN.x),
            parsed("FLOORPATH_VIEW_ORIGIN_Y").unwrap_or(DEFAULT_VIEW_ORIGIN.y),
        );
        let viewport = Viewport::new(scale, origin)
            .ok_or_else(|| anyhow!("FLOORPATH_VIEW_SCALE must be positive, got {scale}"))?;

        Ok(Self { host, port, plan_path, build, memo_capacity, viewport })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
