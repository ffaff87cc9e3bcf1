//! Local-disk blob store

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::BlobStore;
use crate::domain::DomainResult;

/// Stores blobs as files under a configured directory.
///
/// References are freshly generated names that keep the original file
/// extension; the original name is never used as a path component.
pub struct LocalDiskStore {
    root: PathBuf,
    public_base: String,
}

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }
}

fn reference_for(original_name: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string();
    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext),
        _ => id,
    }
}

#[async_trait]
impl BlobStore for LocalDiskStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> DomainResult<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let blob_ref = reference_for(original_name);
        tokio::fs::write(self.root.join(&blob_ref), bytes).await?;

        Ok(blob_ref)
    }

    fn url_for(&self, blob_ref: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), blob_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_bytes_and_keeps_extension() {
        let dir = std::env::temp_dir().join(format!("blob-test-{}", uuid::Uuid::new_v4()));
        let store = LocalDiskStore::new(&dir, "/uploads");

        let blob_ref = store.store(b"png-bytes", "photo.png").await.unwrap();
        assert!(blob_ref.ends_with(".png"));

        let written = tokio::fs::read(dir.join(&blob_ref)).await.unwrap();
        assert_eq!(written, b"png-bytes");

        assert_eq!(store.url_for(&blob_ref), format!("/uploads/{}", blob_ref));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn reference_without_extension() {
        let blob_ref = reference_for("noext");
        assert!(!blob_ref.contains('.'));
    }
}
