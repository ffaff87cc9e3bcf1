//! Health endpoint

pub mod handlers;

pub use handlers::HealthState;
