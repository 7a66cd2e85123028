use floorpath_service::{build_router, AppState, Config};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cfg = Config::from_env()?;
    let addr = cfg.addr()?;
    let state = AppState::from_config(&cfg)?;
    if cfg.plan_path.is_none() {
        tracing::warn!("FLOORPATH_PLAN not set; route queries will answer 503");
    }
    let app = build_router(state);
    tracing::info!(core_version=%floorpath_core::version(), addr=%addr, "starting floorpath-service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
