use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::config::LocalStorageConfig;
use crate::core::error::{AppError, Result};
use crate::features::records::models::Record;
use crate::features::records::{RecordRepository, RecordService};
use crate::features::{pages, records};
use crate::modules::storage::{FileStorage, LocalStorage, StoredFile};

pub const TEST_UPLOAD_LIMIT: usize = 1024 * 1024;

/// Fresh, not yet existing directory under the system temp dir
pub fn temp_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("records-core-test-{}", Uuid::new_v4()))
}

pub fn local_storage(dir: PathBuf) -> Arc<LocalStorage> {
    Arc::new(LocalStorage::new(LocalStorageConfig {
        upload_dir: dir,
        public_path: "/uploads".to_string(),
    }))
}

/// Records kept in memory, ordered like the SQL repository
#[derive(Default)]
pub struct InMemoryRecordRepository {
    records: Mutex<Vec<Record>>,
    next_id: AtomicUsize,
    fail_inserts: AtomicBool,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `create` fail like a lost database connection
    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn create(&self, name: &str, age: i32, file_url: &str) -> Result<Record> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
        let record = Record {
            id,
            name: name.to_string(),
            age,
            file_url: file_url.to_string(),
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<Record>> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(records)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Record>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn update(&self, id: i32, name: &str, age: i32) -> Result<Option<Record>> {
        let mut records = self.records.lock().unwrap();
        Ok(records.iter_mut().find(|r| r.id == id).map(|r| {
            r.name = name.to_string();
            r.age = age;
            r.clone()
        }))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

/// Stores nothing on disk and hands out a differently "signed" URL on every read
#[derive(Default)]
pub struct SigningStorage {
    signatures: AtomicUsize,
}

#[async_trait]
impl FileStorage for SigningStorage {
    async fn store(
        &self,
        _data: Vec<u8>,
        original_filename: &str,
        _content_type: &str,
    ) -> std::result::Result<StoredFile, AppError> {
        let key = crate::modules::storage::naming::unique_filename(original_filename);
        Ok(StoredFile {
            url: format!("https://bucket.example.com/{}", key),
            key,
        })
    }

    async fn resolve_url(&self, file_url: &str) -> std::result::Result<String, AppError> {
        let n = self.signatures.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}?signature={}", file_url, n))
    }

    async fn remove(&self, _file_url: &str) -> std::result::Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "signing"
    }
}

/// API and page routers over the given repository and storage
pub fn test_app(repository: Arc<dyn RecordRepository>, storage: Arc<dyn FileStorage>) -> Router {
    let service = Arc::new(RecordService::new(repository, storage));
    Router::new()
        .merge(records::routes(Arc::clone(&service), TEST_UPLOAD_LIMIT))
        .merge(pages::routes(service))
}

pub fn test_server(
    repository: Arc<dyn RecordRepository>,
    storage: Arc<dyn FileStorage>,
) -> TestServer {
    TestServer::new(test_app(repository, storage)).unwrap()
}
