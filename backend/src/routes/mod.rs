//! Route definitions for the crop variety service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/varieties", variety_routes())
}

/// Variety routes
fn variety_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_varieties).post(handlers::create_variety),
        )
        .route("/query", get(handlers::query_varieties))
        .route(
            "/:id",
            get(handlers::get_variety)
                .put(handlers::update_variety)
                .patch(handlers::update_variety)
                .delete(handlers::delete_variety),
        )
}
