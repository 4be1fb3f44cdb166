use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/data/detail.html", get(handlers::detail_page))
        .route("/legacy.html", get(handlers::legacy_page))
        .route("/api/materials", get(handlers::get_materials))
        .route("/api/materials/:id", get(handlers::get_material_detail))
        .route("/api/legacy", get(handlers::get_legacy))
        .with_state(state)
}
