//! # Product Rating Service
//!
//! Backend API for publishing products and rating them: one rating/comment
//! per product per user, aggregate rating derived on every read.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and the error
//!   taxonomy
//! - **application**: Business logic and use cases (identity, catalog,
//!   reviews)
//! - **infrastructure**: External concerns (database, crypto, blob store)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
