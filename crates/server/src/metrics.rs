//! Prometheus metrics for the gate service
//!
//! Only event kinds and outcome labels, never raw log text or player
//! identities.

use metrics::{counter, histogram};
use std::time::Duration;

pub fn record_line(kind: &str) {
    counter!("gate_lines_total", "kind" => kind.to_string()).increment(1);
}

pub fn record_access_decision(outcome: &str, reason: &str) {
    counter!("gate_access_decisions_total", "outcome" => outcome.to_string(), "reason" => reason.to_string())
        .increment(1);
}

pub fn record_xp_award(status: &str) {
    counter!("gate_xp_awards_total", "status" => status.to_string()).increment(1);
}

pub fn record_webhook(duration: Duration) {
    counter!("gate_webhooks_total").increment(1);
    histogram!("gate_webhook_duration_seconds").record(duration.as_secs_f64());
}

pub fn init_prometheus_recorder() -> metrics_exporter_prometheus::PrometheusHandle {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}
