use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use floorpath_core::{CachePhase, Coord, PointIndex, RouteTable, TableStats};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, info_span, warn};

use crate::errors::AppError;
use crate::state::{read_plan, AppState};

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub src: String,
    pub dst: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub found: bool,
    pub path: Vec<Coord>,
    pub nodes: Vec<PointIndex>,
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub x: f64,
    pub y: f64,
    /// Treat `x`/`y` as screen coordinates and map them through the viewport.
    #[serde(default)]
    pub screen: bool,
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub at: Coord,
    pub room: Option<String>,
    pub point: Option<PointIndex>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub reloaded: bool,
    pub stats: TableStats,
}

#[derive(Debug, Serialize)]
pub struct Healthz {
    pub status: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/version", get(version))
        .route("/rooms", get(rooms))
        .route("/route", post(route))
        .route("/nearest", get(nearest))
        .route("/admin/reload", post(reload))
        .with_state(state)
}

fn ready_table(state: &AppState) -> Result<Arc<RouteTable>, AppError> {
    state.cache.table().ok_or_else(|| AppError::Unavailable("floor plan not loaded".into()))
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(Healthz { status: "ok" }))
}

async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let phase = state.cache.phase();
    let status = if phase == CachePhase::Ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status, Json(json!({"ready": phase == CachePhase::Ready, "phase": phase, "builds": state.cache.builds()})))
}

async fn version() -> impl IntoResponse {
    let svc_version = env!("CARGO_PKG_VERSION");
    let core_version = floorpath_core::version();
    (StatusCode::OK, Json(json!({"service_version": svc_version, "core_version": core_version})))
}

async fn rooms(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let table = ready_table(&state)?;
    let rooms: Vec<&str> = table.rooms().collect();
    Ok(Json(json!({ "rooms": rooms })))
}

async fn route(State(state): State<AppState>, Json(req): Json<RouteRequest>) -> Result<Json<RouteResponse>, AppError> {
    let span = info_span!("route", src = %req.src, dst = %req.dst);
    let _enter = span.enter();

    let table = ready_table(&state)?;
    let r = state.memo.route(&table, &req.src, &req.dst)?;
    info!(hops = r.nodes.len(), length = ?r.length, memo_hits = state.memo.hits(), "route done");
    Ok(Json(RouteResponse {
        found: !r.is_empty(),
        path: r.path.clone(),
        nodes: r.nodes.clone(),
        length: r.length,
        reason: r.is_empty().then_some("unreachable"),
    }))
}

async fn nearest(State(state): State<AppState>, Query(q): Query<NearestQuery>) -> Result<Json<NearestResponse>, AppError> {
    let at = Coord::new(q.x, q.y);
    if !at.is_finite() {
        return Err(AppError::BadRequest("x and y must be finite".into()));
    }
    let at = if q.screen { state.viewport.to_map(at) } else { at };
    let table = ready_table(&state)?;
    Ok(Json(NearestResponse {
        at,
        room: table.nearest_room(at).map(str::to_string),
        point: table.nearest_point(at),
    }))
}

async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let path = state
        .plan_path
        .clone()
        .ok_or_else(|| AppError::BadRequest("no floor plan configured".into()))?;
    let cache = Arc::clone(&state.cache);
    let rebuilt = tokio::task::spawn_blocking(move || -> Result<Arc<RouteTable>, AppError> {
        // Unreadable files are internal errors; a plan that parses but breaks
        // the input contract is a bad request.
        let records = read_plan(&path)?.records()?;
        Ok(cache.rebuild(&records)?)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("reload task failed: {e}")))?;

    let table = match rebuilt {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "reload failed, keeping previous table");
            return Err(e);
        }
    };
    state.memo.clear();
    let stats = table.stats();
    info!(?stats, "floor plan reloaded");
    Ok(Json(ReloadResponse { reloaded: true, stats }))
}
