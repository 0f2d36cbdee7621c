//! S3-compatible bucket storage client
//!
//! Uploads objects to a bucket (Cloudflare R2 by default, or anything
//! speaking the S3 API such as MinIO) and generates presigned GET URLs
//! for reading them back.
//!
//! Uses rust-s3 crate for lightweight S3 operations.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info};

use super::naming::{key_from_url, unique_filename};
use super::{FileStorage, StoredFile};
use crate::core::config::BucketConfig;
use crate::core::error::AppError;

/// S3-compatible storage client
pub struct BucketStorage {
    bucket: Box<Bucket>,
    public_url: String,
    presigned_url_expiry_secs: u32,
}

impl BucketStorage {
    /// Create a new bucket client from configuration
    pub fn new(config: BucketConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Storage(format!("Failed to create bucket credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::Storage(format!("Failed to create bucket handle: {}", e)))?;

        // Path-style URLs (http://endpoint/bucket/key) work for both R2 and MinIO
        bucket.set_path_style();

        info!(
            "Bucket storage initialized for endpoint: {}, bucket: {}, account: {}",
            config.endpoint, config.bucket, config.account_id
        );

        Ok(Self {
            bucket,
            public_url: config.public_url,
            presigned_url_expiry_secs: config.presigned_url_expiry_secs,
        })
    }

    /// Upload an object, failing on any non-2xx answer from the store
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), AppError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file '{}': {}", key, e)))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(AppError::Storage(format!(
                "Upload of '{}' rejected with status {}",
                key, status
            )));
        }

        debug!("Uploaded file '{}' to bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    /// Generate a presigned URL for downloading an object
    pub async fn get_presigned_url(&self, key: &str) -> Result<String, AppError> {
        self.bucket
            .presign_get(key, self.presigned_url_expiry_secs, None)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to generate presigned URL for '{}': {}",
                    key, e
                ))
            })
    }

    /// The permanent URL recorded for an object
    pub fn get_public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[async_trait]
impl FileStorage for BucketStorage {
    async fn store(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> Result<StoredFile, AppError> {
        let key = unique_filename(original_filename);
        self.upload(&key, &data, content_type).await?;

        Ok(StoredFile {
            url: self.get_public_url(&key),
            key,
        })
    }

    async fn resolve_url(&self, file_url: &str) -> Result<String, AppError> {
        let key = key_from_url(file_url)
            .ok_or_else(|| AppError::Storage(format!("No object key in URL '{}'", file_url)))?;
        self.get_presigned_url(key).await
    }

    async fn remove(&self, file_url: &str) -> Result<(), AppError> {
        let key = key_from_url(file_url)
            .ok_or_else(|| AppError::Storage(format!("No object key in URL '{}'", file_url)))?;

        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete file '{}': {}", key, e)))?;

        debug!("Deleted file '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "bucket"
    }
}
