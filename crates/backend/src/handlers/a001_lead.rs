use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_lead::{Lead, LeadDto, LeadListQuery, LeadPatch, LeadStatusChange};
use serde_json::json;

use crate::shared::app_state::AppState;

/// GET /api/leads?q=&status=&source=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LeadListQuery>,
) -> Result<Json<Vec<Lead>>, StatusCode> {
    let Some(filter) = query.to_filter() else {
        tracing::warn!("Invalid lead list filter: {:?}", query);
        return Err(StatusCode::BAD_REQUEST);
    };
    Ok(Json(state.leads.list(&filter).await))
}

/// GET /api/leads/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, StatusCode> {
    match state.leads.get_by_id(id).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// POST /api/leads
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<LeadDto>,
) -> (StatusCode, Json<Lead>) {
    let lead = state.leads.create(dto).await;
    (StatusCode::CREATED, Json(lead))
}

/// PATCH /api/leads/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<LeadPatch>,
) -> Result<Json<Lead>, StatusCode> {
    match state.leads.update(id, patch).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// DELETE /api/leads/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, StatusCode> {
    match state.leads.delete(id).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// PATCH /api/leads/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<LeadStatusChange>,
) -> Result<Json<Lead>, StatusCode> {
    match state.leads.update_status(id, body.status).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(e.status_code()),
    }
}

/// POST /api/leads/testdata
pub async fn insert_test_data(State(state): State<AppState>) -> Json<serde_json::Value> {
    let inserted = state.leads.insert_test_data().await;
    Json(json!({ "inserted": inserted }))
}
