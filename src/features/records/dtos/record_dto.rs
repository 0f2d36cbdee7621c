use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::records::models::Record;
use crate::shared::constants::MAX_AGE;

/// Create record request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateRecordDto {
    /// Person's name
    #[schema(example = "Ana")]
    pub name: String,
    /// Person's age
    #[schema(example = 30)]
    pub age: i32,
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Fields collected from the multipart form, already checked
#[derive(Debug)]
pub struct NewRecordUpload {
    pub name: String,
    pub age: i32,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Text fields of the create form, checked with the same rules as an update
#[derive(Debug, Clone, Validate)]
pub struct RecordFormDto {
    #[validate(custom(function = "validate_not_blank"))]
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: String,
    #[validate(range(min = 0, max = MAX_AGE, message = "age must be between 0 and 150"))]
    pub age: i32,
}

/// Request DTO for updating a record. The file and id never change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRecordDto {
    #[validate(custom(function = "validate_not_blank"))]
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    #[schema(example = "Ana B.")]
    pub name: String,
    #[validate(range(min = 0, max = MAX_AGE, message = "age must be between 0 and 150"))]
    #[schema(example = 31)]
    pub age: i32,
}

/// Response DTO for a record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponseDto {
    pub id: i32,
    pub name: String,
    pub age: i32,
    /// Root-relative path or object-storage URL (presigned on read for bucket storage)
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Record> for RecordResponseDto {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            name: record.name,
            age: record.age,
            file_url: record.file_url,
            created_at: record.created_at,
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("name is required".into());
        return Err(err);
    }
    Ok(())
}

/// Parse the `age` form field. The range is checked by `RecordFormDto`.
pub fn parse_age(raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| format!("age must be a whole number, got '{}'", raw.trim()))
}
