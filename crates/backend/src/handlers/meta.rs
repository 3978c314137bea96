use axum::Json;
use contracts::shared::options::FilterOptions;

/// GET /api/meta/options
pub async fn filter_options() -> Json<FilterOptions> {
    Json(FilterOptions::build())
}
