//! Blob store port
//!
//! Product images are persisted through this narrow interface. The core
//! never assumes a particular file layout, so the local-disk backend can be
//! swapped for any object store without touching the services.

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Blob storage interface
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist the bytes and return an opaque reference to them.
    async fn store(&self, bytes: &[u8], original_name: &str) -> DomainResult<String>;

    /// Public URL under which a stored reference is served.
    fn url_for(&self, blob_ref: &str) -> String;
}

pub use local::LocalDiskStore;
pub use memory::InMemoryBlobStore;
