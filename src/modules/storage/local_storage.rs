//! Local disk storage
//!
//! Writes uploads into a directory that the HTTP server also serves
//! statically, and hands out root-relative URLs (e.g. `/uploads/{name}`).

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::naming::{key_from_url, unique_filename};
use super::{FileStorage, StoredFile};
use crate::core::config::LocalStorageConfig;
use crate::core::error::AppError;

pub struct LocalStorage {
    upload_dir: PathBuf,
    public_path: String,
}

impl LocalStorage {
    pub fn new(config: LocalStorageConfig) -> Self {
        Self {
            upload_dir: config.upload_dir,
            public_path: config.public_path.trim_end_matches('/').to_string(),
        }
    }

    /// Create the upload directory if it is missing
    pub async fn ensure_directory_exists(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to create upload directory '{}': {}",
                    self.upload_dir.display(),
                    e
                ))
            })?;

        info!(
            "Local storage ready: dir={}, public_path={}",
            self.upload_dir.display(),
            self.public_path()
        );
        Ok(())
    }

    /// URL path the upload directory should be mounted under ("/" when empty)
    pub fn public_path(&self) -> &str {
        if self.public_path.is_empty() {
            "/"
        } else {
            &self.public_path
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_path, key)
    }
}

#[async_trait]
impl FileStorage for LocalStorage {
    async fn store(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        _content_type: &str,
    ) -> Result<StoredFile, AppError> {
        let key = unique_filename(original_filename);
        let path = self.upload_dir.join(&key);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create upload directory: {}", e)))?;

        tokio::fs::write(&path, &data).await.map_err(|e| {
            AppError::Storage(format!("Failed to write file '{}': {}", path.display(), e))
        })?;

        debug!("Wrote {} bytes to '{}'", data.len(), path.display());

        Ok(StoredFile {
            url: self.url_for(&key),
            key,
        })
    }

    async fn resolve_url(&self, file_url: &str) -> Result<String, AppError> {
        Ok(file_url.to_string())
    }

    async fn remove(&self, file_url: &str) -> Result<(), AppError> {
        let key = key_from_url(file_url)
            .ok_or_else(|| AppError::Storage(format!("No file name in URL '{}'", file_url)))?;
        let path = self.upload_dir.join(key);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed '{}'", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("File '{}' was already gone", path.display());
                Ok(())
            }
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::temp_upload_dir;

    fn storage(dir: PathBuf) -> LocalStorage {
        LocalStorage::new(LocalStorageConfig {
            upload_dir: dir,
            public_path: "/uploads".to_string(),
        })
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_public_path() {
        let dir = temp_upload_dir();
        let storage = storage(dir.clone());

        let stored = storage
            .store(b"hello".to_vec(), "id.pdf", "application/pdf")
            .await
            .unwrap();

        assert!(stored.key.ends_with("-id.pdf"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.key));

        let content = tokio::fs::read(dir.join(&stored.key)).await.unwrap();
        assert_eq!(content, b"hello");

        // Local URLs are already public
        assert_eq!(storage.resolve_url(&stored.url).await.unwrap(), stored.url);
    }

    #[tokio::test]
    async fn test_store_never_escapes_upload_dir() {
        let dir = temp_upload_dir();
        let storage = storage(dir.clone());

        let stored = storage
            .store(b"x".to_vec(), "../../outside.txt", "text/plain")
            .await
            .unwrap();

        assert!(dir.join(&stored.key).exists());
        assert!(stored.key.ends_with("-outside.txt"));
    }

    #[tokio::test]
    async fn test_remove_deletes_and_tolerates_missing() {
        let dir = temp_upload_dir();
        let storage = storage(dir.clone());

        let stored = storage
            .store(b"bye".to_vec(), "a.txt", "text/plain")
            .await
            .unwrap();
        storage.remove(&stored.url).await.unwrap();
        assert!(!dir.join(&stored.key).exists());

        storage.remove(&stored.url).await.unwrap();
    }

    #[test]
    fn test_public_path_root() {
        let storage = LocalStorage::new(LocalStorageConfig {
            upload_dir: PathBuf::from("x"),
            public_path: "/".to_string(),
        });
        assert_eq!(storage.public_path(), "/");
        assert_eq!(storage.url_for("k"), "/k");
    }
}
