use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use kodex::portfolio::repository::{PortfolioRepository, SettingsRepository};
use kodex::portfolio::{portfolio_router, PortfolioService};
use kodex::scanner::scanner_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) const API_VERSION: &str = "1.0.0";

pub(crate) fn app_router<P, S>(service: Arc<PortfolioService<P, S>>) -> Router
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    portfolio_router(service)
        .merge(scanner_router())
        .route("/api/", get(api_root))
        .route("/api/health", get(api_health))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn api_root() -> Json<serde_json::Value> {
    Json(json!({ "message": "KODEX API", "version": API_VERSION }))
}

pub(crate) async fn api_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
