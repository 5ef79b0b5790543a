use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// Register descriptions for the metrics this service records.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "ticket_actions_total",
        "Ticket actions handled, by action and outcome"
    );
    metrics::describe_counter!(
        "end_rejections_total",
        "Attempts to end a ticket rejected by the eligibility check, by reason"
    );
    metrics::describe_histogram!(
        "backend_request_seconds",
        "Latency of calls to the work ticket backend, by endpoint"
    );
}

/// GET /metrics — Prometheus text exposition.
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    handle.render()
}
