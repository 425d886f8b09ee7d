//! HTTP routes for the gate service

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};
use crate::metrics;
use crate::state::SharedState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub cached_verifications: usize,
    pub tracked_sessions: usize,
}

#[derive(Deserialize, Default)]
struct LogsQuery {
    token: Option<String>,
}

/// Form-encoded payloads carry the text in a `log` field.
#[derive(Deserialize)]
struct LogsForm {
    #[serde(default)]
    log: String,
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
        cached_verifications: state.verifications.len().await,
        tracked_sessions: state.sessions.len().await,
    })
}

/// Webhook endpoint for the game server's log shipper.
///
/// Accepts the payload as a plain-text body or a form `log` field, on
/// GET or POST. Once past the token check the response is always 200:
/// the shipper has no meaningful retry behavior and must not be blocked
/// by partial failures inside the pipelines.
async fn logs(
    State(state): State<SharedState>,
    Query(query): Query<LogsQuery>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, &'static str)> {
    if let Some(expected) = &state.config.shared_token {
        if query.token.as_deref() != Some(expected.as_str()) {
            return Err(ServerError::Forbidden);
        }
    }

    let payload = if is_form(&headers) {
        serde_urlencoded::from_str::<LogsForm>(&body)
            .map(|form| form.log)
            .unwrap_or_default()
    } else {
        body
    };

    if payload.is_empty() {
        return Ok((StatusCode::OK, "ignored"));
    }

    let start = std::time::Instant::now();
    state.ingest(&payload).await;
    metrics::record_webhook(start.elapsed());

    Ok((StatusCode::OK, "ok"))
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/logs", get(logs).post(logs))
        .with_state(state)
}

/// Expose the Prometheus scrape endpoint on an existing router
pub fn with_metrics(router: Router, handle: PrometheusHandle) -> Router {
    router.route("/metrics", get(move || async move { handle.render() }))
}
