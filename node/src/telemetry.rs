// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    // 1. Initialize Tracing (Logs)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "axiom_node=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Initialize Metrics (Prometheus)
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => tracing::error!("Failed to install Prometheus recorder: {}", e),
    }

    metrics::describe_counter!("axiom_audits_total", "Audit ticks that completed");
    metrics::describe_counter!("axiom_drift_detected_total", "Audits whose local fingerprint diverged from the anchor");
    metrics::describe_counter!("axiom_alerts_emitted_total", "CORE_DRIFT alerts written");
    metrics::describe_counter!("axiom_alerts_suppressed_total", "Drift alerts suppressed by the cooldown window");
    metrics::describe_counter!("axiom_audit_failures_total", "Audit ticks that failed");
    metrics::describe_counter!("axiom_anchor_attempt_failures_total", "Individual ledger read attempts that failed");
    metrics::describe_histogram!("axiom_audit_duration_seconds", "Wall time of one audit tick");
    metrics::describe_gauge!("axiom_divergence_score", "Divergence score of the last completed audit");

    metrics::gauge!("axiom_node_up", 1.0);
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
