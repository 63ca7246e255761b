//! API middleware components

pub mod http_metrics;
pub mod logging;
pub mod security;

pub use http_metrics::metrics_middleware;
pub use logging::{logging_middleware, redact_uri};
pub use security::security_headers_middleware;
