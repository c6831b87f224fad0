//! Crop Variety Tracker - Backend
//!
//! REST service over an in-memory store of crop variety records.

use std::{any::Any, sync::Arc};

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use services::VarietyStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: VarietyStore,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state around a store, with default configuration
    pub fn new(store: VarietyStore) -> Self {
        Self {
            store,
            config: Arc::new(Config::default()),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Variety Tracker API v1.0"
}

/// Turn a handler panic into a 500 instead of dropping the connection
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    error::AppError::Internal("An internal server error occurred".to_string()).into_response()
}
