use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use axum_prometheus::{PrometheusMetricLayer, PrometheusMetricLayerBuilder};

/// HTTP metrics prefixed `loanhub_`; the scrape route itself is not recorded.
pub fn setup_metrics() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    PrometheusMetricLayerBuilder::new()
        .with_prefix("loanhub")
        .with_ignore_patterns(&["/metrics", "/swagger-ui", "/api-docs/openapi.json"])
        .with_default_metrics()
        .build_pair()
}
