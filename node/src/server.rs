// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    extract::{Query, Request as AxumRequest, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axiom_kernel::config::{collections, PROTOCOL_ID};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::*;
use crate::errors::AuditError;
use crate::orchestrator::{AuditOrchestrator, TickReport};
use crate::store::StoreError;

pub type SharedOrchestrator = Arc<AuditOrchestrator>;

async fn auth_guard(
    State(token): State<Arc<String>>,
    req: AxumRequest,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.strip_prefix("Bearer "));

    match provided {
        Some(p) if p == token.as_str() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

pub fn build_router(state: SharedOrchestrator, auth_token: Option<String>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/v1/status", get(protocol_status))
        .route("/v1/audits", get(recent_audits))
        .route("/v1/audit/run", post(run_audit))
        // Observability
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    if let Some(token) = auth_token {
        tracing::info!("Auth Enabled: Bearer token required");
        app = app.layer(from_fn_with_state(Arc::new(token), auth_guard));
    } else {
        tracing::warn!("Auth Disabled: No token configured");
    }

    app.layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

async fn protocol_status(State(state): State<SharedOrchestrator>) -> Result<Json<serde_json::Value>, AuditError> {
    match state.store().read_protocol_status(PROTOCOL_ID).await? {
        Some(doc) => Ok(Json(doc)),
        None => Err(AuditError::Persistence(StoreError::NotFound {
            collection: collections::GOVERNANCE_PROTOCOLS.to_string(),
            key: PROTOCOL_ID.to_string(),
        })),
    }
}

async fn recent_audits(
    State(state): State<SharedOrchestrator>,
    Query(query): Query<AuditsQuery>,
) -> Result<Json<AuditsResponse>, AuditError> {
    let audits = state.store().recent_audits(query.effective_limit()).await?;
    Ok(Json(AuditsResponse { audits }))
}

/// Manual re-trigger. Runs a full tick, including error recording on failure.
async fn run_audit(State(state): State<SharedOrchestrator>) -> Result<Json<TickReport>, AuditError> {
    tracing::info!("Manual audit requested");
    state.run_tick().await.map(Json)
}

async fn metrics_handler() -> impl IntoResponse {
    let body = crate::telemetry::get_metrics();
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
