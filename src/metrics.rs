// Prometheus metrics definitions for the Grid Tactics backend.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Gauges ───────────────────────────────────────────────────────

    /// Live WebSocket sessions.
    pub static ref CONNECTED_SESSIONS: IntGauge =
        IntGauge::new("gridtactics_connected_sessions", "Live WebSocket sessions").unwrap();

    // ── Counters ─────────────────────────────────────────────────────

    /// Total WebSocket frames received from clients.
    pub static ref WS_MESSAGES_RECEIVED_TOTAL: IntCounter = IntCounter::new(
        "gridtactics_ws_messages_received_total",
        "WebSocket frames received from clients",
    )
    .unwrap();

    /// Total decision dispatches, by outcome (ok, failed).
    pub static ref DISPATCHES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gridtactics_dispatches_total", "Decision dispatches"),
        &["outcome"],
    )
    .unwrap();

    /// Total sessions torn down because of a malformed client envelope.
    pub static ref MALFORMED_ENVELOPES_TOTAL: IntCounter = IntCounter::new(
        "gridtactics_malformed_envelopes_total",
        "Sessions closed on a malformed envelope",
    )
    .unwrap();

    /// Total leaderboard score submissions.
    pub static ref SCORE_SUBMISSIONS_TOTAL: IntCounter = IntCounter::new(
        "gridtactics_score_submissions_total",
        "Leaderboard score submissions",
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Wall-clock latency of one decision service call, in seconds.
    pub static ref DECISION_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "gridtactics_decision_latency_seconds",
            "Decision service call latency in seconds",
        )
        .buckets(vec![0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 30.0]),
    )
    .unwrap();
}

/// Register all metrics with the custom registry. Call once at startup.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CONNECTED_SESSIONS.clone()),
        Box::new(WS_MESSAGES_RECEIVED_TOTAL.clone()),
        Box::new(DISPATCHES_TOTAL.clone()),
        Box::new(MALFORMED_ENVELOPES_TOTAL.clone()),
        Box::new(SCORE_SUBMISSIONS_TOTAL.clone()),
        Box::new(DECISION_LATENCY_SECONDS.clone()),
    ];

    for c in collectors {
        REGISTRY.register(c).expect("failed to register metric");
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_metrics_returns_string() {
        // Register and gather -- should not panic
        register_metrics();
        let output = gather_metrics();
        // Output should be empty or contain metric lines (no panic)
        assert!(output.is_empty() || output.contains("gridtactics_"));
    }

    #[test]
    fn test_metric_increments() {
        // Just verify that incrementing metrics works without panicking
        CONNECTED_SESSIONS.inc();
        CONNECTED_SESSIONS.dec();
        assert_eq!(CONNECTED_SESSIONS.get(), 0);

        WS_MESSAGES_RECEIVED_TOTAL.inc();
        MALFORMED_ENVELOPES_TOTAL.inc();
        SCORE_SUBMISSIONS_TOTAL.inc();

        DISPATCHES_TOTAL.with_label_values(&["ok"]).inc();
        DISPATCHES_TOTAL.with_label_values(&["failed"]).inc();

        DECISION_LATENCY_SECONDS.observe(1.5);
    }
}
