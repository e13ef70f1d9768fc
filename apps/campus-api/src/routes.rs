//! # HTTP Routes
//!
//! ```text
//! GET    /api/pos               list (creation order)
//! GET    /api/pos/filter?name=  get by name
//! GET    /api/pos/{id}          get by id
//! POST   /api/pos               create            → 201
//! PUT    /api/pos/{id}          update
//! DELETE /api/admin/pos         clear             (admin.enabled only)
//! GET    /health                database reachable? 200 / 503
//! ```
//!
//! Handlers only translate: extraction failures and service errors both
//! become an [`ApiError`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use campus_core::{PointOfSale, PosInput};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// Builds the application router.
///
/// The admin routes exist only when `admin_enabled` is true.
pub fn build_router(state: AppState, admin_enabled: bool) -> Router {
    let mut router = Router::new()
        .route("/api/pos", get(list_pos).post(create_pos))
        .route("/api/pos/filter", get(get_pos_by_name))
        .route("/api/pos/{id}", get(get_pos).put(update_pos))
        .route("/health", get(health));

    if admin_enabled {
        router = router.route("/api/admin/pos", delete(clear_pos));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

// =============================================================================
// POS
// =============================================================================

async fn list_pos(State(state): State<AppState>) -> ApiResult<Json<Vec<PointOfSale>>> {
    Ok(Json(state.pos.list().await?))
}

#[derive(Debug, Deserialize)]
pub struct NameFilter {
    pub name: String,
}

async fn get_pos_by_name(
    State(state): State<AppState>,
    query: Result<Query<NameFilter>, QueryRejection>,
) -> ApiResult<Json<PointOfSale>> {
    let Query(filter) = query?;
    Ok(Json(state.pos.get_by_name(&filter.name).await?))
}

async fn get_pos(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PointOfSale>> {
    let Path(id) = path?;
    Ok(Json(state.pos.get_by_id(id).await?))
}

async fn create_pos(
    State(state): State<AppState>,
    body: Result<Json<PosInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PointOfSale>)> {
    let Json(input) = body?;
    let pos = state.pos.create(&input).await?;
    Ok((StatusCode::CREATED, Json(pos)))
}

async fn update_pos(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<PosInput>, JsonRejection>,
) -> ApiResult<Json<PointOfSale>> {
    let Path(id) = path?;
    let Json(input) = body?;
    Ok(Json(state.pos.update(id, &input).await?))
}

// =============================================================================
// Admin
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub removed: u64,
}

async fn clear_pos(State(state): State<AppState>) -> ApiResult<Json<ClearResponse>> {
    let removed = state.admin.clear().await?;
    Ok(Json(ClearResponse { removed }))
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable".to_string(),
            }),
        )
    }
}
