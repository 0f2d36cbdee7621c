use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::records::dtos::{NewRecordUpload, RecordResponseDto, UpdateRecordDto};
use crate::features::records::models::Record;
use crate::features::records::repositories::RecordRepository;
use crate::modules::storage::FileStorage;

/// Service for record operations
///
/// Ties the persistence layer to whichever storage backend was configured.
/// Reads hand out URLs a browser can open right now; writes return the URL
/// exactly as it was persisted.
pub struct RecordService {
    repository: Arc<dyn RecordRepository>,
    storage: Arc<dyn FileStorage>,
}

impl RecordService {
    pub fn new(repository: Arc<dyn RecordRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Store the uploaded file, then insert the row referencing it.
    ///
    /// If the insert fails the freshly written blob is removed again so no
    /// orphan is left behind.
    pub async fn create(&self, upload: NewRecordUpload) -> Result<RecordResponseDto> {
        let size = upload.data.len();
        let stored = self
            .storage
            .store(upload.data, &upload.file_name, &upload.content_type)
            .await?;

        debug!(
            "File stored: backend={}, key={}, size={}",
            self.storage.backend_name(),
            stored.key,
            size
        );

        let record = match self
            .repository
            .create(upload.name.trim(), upload.age, &stored.url)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&stored.url).await {
                    warn!(
                        "Record insert failed and blob '{}' could not be removed: {}",
                        stored.key, cleanup
                    );
                } else {
                    debug!("Rolled back blob '{}' after failed insert", stored.key);
                }
                return Err(e);
            }
        };

        info!(
            "Record created: id={}, key={}, backend={}",
            record.id,
            stored.key,
            self.storage.backend_name()
        );

        Ok(record.into())
    }

    /// All records, newest first, with readable file URLs
    pub async fn list(&self) -> Result<Vec<RecordResponseDto>> {
        let records = self.repository.find_all().await?;
        try_join_all(records.into_iter().map(|record| self.with_resolved_url(record))).await
    }

    /// A single record with a readable file URL
    pub async fn get(&self, id: i32) -> Result<RecordResponseDto> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| record_not_found(id))?;

        self.with_resolved_url(record).await
    }

    /// Change name and age; id and file URL stay as they are
    pub async fn update(&self, id: i32, dto: UpdateRecordDto) -> Result<RecordResponseDto> {
        let record = self
            .repository
            .update(id, dto.name.trim(), dto.age)
            .await?
            .ok_or_else(|| record_not_found(id))?;

        info!("Record updated: id={}", record.id);

        Ok(record.into())
    }

    /// Remove the row. The stored blob is left in place.
    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(record_not_found(id));
        }

        info!("Record deleted: id={}", id);
        Ok(())
    }

    async fn with_resolved_url(&self, record: Record) -> Result<RecordResponseDto> {
        let file_url = self.storage.resolve_url(&record.file_url).await?;
        let mut dto = RecordResponseDto::from(record);
        dto.file_url = file_url;
        Ok(dto)
    }
}

fn record_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Record {} not found", id))
}
