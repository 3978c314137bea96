use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_deal::{Deal, DealDto, DealListQuery, DealPatch, DealStageChange};
use serde_json::json;

use crate::shared::app_state::AppState;

/// GET /api/deals?stage=&q=&source=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DealListQuery>,
) -> Result<Json<Vec<Deal>>, StatusCode> {
    let Some(filter) = query.to_filter() else {
        tracing::warn!("Invalid deal list filter: {:?}", query);
        return Err(StatusCode::BAD_REQUEST);
    };
    Ok(Json(state.deals.list(&filter).await))
}

/// GET /api/deals/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deal>, StatusCode> {
    match state.deals.get_by_id(id).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// POST /api/deals
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<DealDto>,
) -> (StatusCode, Json<Deal>) {
    let deal = state.deals.create(dto).await;
    (StatusCode::CREATED, Json(deal))
}

/// PATCH /api/deals/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DealPatch>,
) -> Result<Json<Deal>, StatusCode> {
    match state.deals.update(id, patch).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// DELETE /api/deals/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deal>, StatusCode> {
    match state.deals.delete(id).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// PATCH /api/deals/:id/stage
pub async fn update_stage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<DealStageChange>,
) -> Result<Json<Deal>, StatusCode> {
    match state.deals.update_stage(id, body.stage).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// POST /api/deals/testdata
pub async fn insert_test_data(State(state): State<AppState>) -> Json<serde_json::Value> {
    let inserted = state.deals.insert_test_data().await;
    Json(json!({ "inserted": inserted }))
}
