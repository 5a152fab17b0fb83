//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format (404 when metrics are disabled)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::obs::metrics::TEXT_CONTENT_TYPE;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let metrics = state.metrics();
    if !metrics.is_enabled() {
        return (StatusCode::NOT_FOUND, "metrics disabled").into_response();
    }

    match metrics.render() {
        Ok(body) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], body).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code().as_str(), "metrics render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
