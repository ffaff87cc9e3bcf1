//! Prometheus metrics endpoint and HTTP middleware

pub mod handlers;
pub mod middleware;

pub use handlers::MetricsState;
pub use middleware::http_metrics_middleware;
