use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers;
use crate::shared::app_state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/meta/options", get(handlers::meta::filter_options))
        // ========================================
        // A001 LEADS
        // ========================================
        .route(
            "/api/leads",
            get(handlers::a001_lead::list).post(handlers::a001_lead::create),
        )
        .route(
            "/api/leads/testdata",
            post(handlers::a001_lead::insert_test_data),
        )
        .route(
            "/api/leads/:id",
            get(handlers::a001_lead::get_by_id)
                .patch(handlers::a001_lead::update)
                .delete(handlers::a001_lead::delete),
        )
        .route(
            "/api/leads/:id/status",
            patch(handlers::a001_lead::update_status),
        )
        // ========================================
        // A002 DEALS
        // ========================================
        .route(
            "/api/deals",
            get(handlers::a002_deal::list).post(handlers::a002_deal::create),
        )
        .route(
            "/api/deals/testdata",
            post(handlers::a002_deal::insert_test_data),
        )
        .route(
            "/api/deals/:id",
            get(handlers::a002_deal::get_by_id)
                .patch(handlers::a002_deal::update)
                .delete(handlers::a002_deal::delete),
        )
        .route(
            "/api/deals/:id/stage",
            patch(handlers::a002_deal::update_stage),
        )
        .with_state(state)
}
