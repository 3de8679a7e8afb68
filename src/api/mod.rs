pub mod error;
pub mod report;

pub use error::*;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ReportConfig;

/// Build the application router.
///
/// CORS is wide open: the report surface is meant to be called straight
/// from browser form pages on other origins.
pub fn router(config: ReportConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(report::health))
        .route("/api/report", post(report::create_report))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(config)
}
