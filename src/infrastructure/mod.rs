//! Infrastructure layer - external concerns

pub mod blob;
pub mod crypto;
pub mod database;

pub use blob::{BlobStore, InMemoryBlobStore, LocalDiskStore};
pub use database::{init_database, DatabaseConfig};
