//! Storage module for uploaded files
//!
//! Provides a single `FileStorage` interface with two interchangeable
//! implementations selected by configuration: local disk and an
//! S3-compatible bucket (Cloudflare R2, MinIO).

mod bucket_storage;
mod local_storage;
pub mod naming;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

pub use bucket_storage::BucketStorage;
pub use local_storage::LocalStorage;

/// A blob that was written successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Object key / file name inside the storage root
    pub key: String,
    /// URL persisted with the record
    pub url: String,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write `data` under a fresh collision-resistant name derived from
    /// `original_filename` and return where it can be found.
    async fn store(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> Result<StoredFile, AppError>;

    /// Turn a persisted URL into one a client can open right now.
    async fn resolve_url(&self, file_url: &str) -> Result<String, AppError>;

    /// Delete the blob a persisted URL points at.
    async fn remove(&self, file_url: &str) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}

/// Build the storage backend named by the configuration
pub async fn from_config(config: &StorageConfig) -> Result<Arc<dyn FileStorage>, AppError> {
    match config {
        StorageConfig::Local(local) => {
            let storage = LocalStorage::new(local.clone());
            storage.ensure_directory_exists().await?;
            Ok(Arc::new(storage))
        }
        StorageConfig::Bucket(bucket) => {
            let storage = BucketStorage::new(bucket.clone())?;
            info!("Uploads go to bucket '{}'", storage.bucket_name());
            Ok(Arc::new(storage))
        }
    }
}
