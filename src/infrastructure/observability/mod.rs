//! Observability - Prometheus metrics

mod prometheus;

pub use prometheus::{
    PrometheusMetrics, create_metrics_router, init_metrics, record_http_request,
    record_validation,
};
