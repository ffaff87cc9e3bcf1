//! In-memory blob store for development and testing

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::BlobStore;
use crate::domain::DomainResult;

/// Keeps blobs in a map; references are plain UUIDs.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored blob (test helper).
    pub fn get(&self, blob_ref: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(blob_ref).cloned()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn store(&self, bytes: &[u8], _original_name: &str) -> DomainResult<String> {
        let blob_ref = uuid::Uuid::new_v4().to_string();
        self.blobs
            .lock()
            .unwrap()
            .insert(blob_ref.clone(), bytes.to_vec());
        Ok(blob_ref)
    }

    fn url_for(&self, blob_ref: &str) -> String {
        format!("/uploads/{}", blob_ref)
    }
}
