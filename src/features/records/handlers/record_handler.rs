use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::records::dtos::{
    parse_age, CreateRecordDto, NewRecordUpload, RecordFormDto, RecordResponseDto,
    UpdateRecordDto,
};
use crate::features::records::services::RecordService;
use crate::shared::constants::DEFAULT_CONTENT_TYPE;
use crate::shared::types::ErrorResponse;

/// List all records
///
/// Newest first. For bucket storage every `fileUrl` is a freshly presigned URL.
#[utoipa::path(
    get,
    path = "/api/records",
    tag = "records",
    responses(
        (status = 200, description = "All records, newest first", body = Vec<RecordResponseDto>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn list_records(
    State(service): State<Arc<RecordService>>,
) -> Result<Json<Vec<RecordResponseDto>>> {
    let records = service.list().await?;
    Ok(Json(records))
}

/// Create a record
///
/// Accepts multipart/form-data with:
/// - `name`: Person's name (required, non-empty)
/// - `age`: Whole number (required)
/// - `file`: The file to upload (required)
#[utoipa::path(
    post,
    path = "/api/records",
    tag = "records",
    request_body(
        content = CreateRecordDto,
        content_type = "multipart/form-data",
        description = "Name, age and the file to store",
    ),
    responses(
        (status = 200, description = "Record created", body = RecordResponseDto),
        (status = 400, description = "Missing or invalid form field", body = ErrorResponse),
        (status = 413, description = "Upload larger than the configured limit", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn create_record(
    State(service): State<Arc<RecordService>>,
    mut multipart: Multipart,
) -> Result<Json<RecordResponseDto>> {
    let mut name: Option<String> = None;
    let mut age: Option<String> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        multipart_error("Failed to read multipart data", e)
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read name field", e))?;
                name = Some(text);
            }
            "age" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read age field", e))?;
                age = Some(text);
            }
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
                let file_name = field.file_name().unwrap_or("").to_string();

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    multipart_error("Failed to read file data", e)
                })?;

                // Browsers send an empty, nameless part when no file was picked
                if !file_name.is_empty() {
                    file = Some((file_name, content_type, data.to_vec()));
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let name = name.ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
    let age = age.ok_or_else(|| AppError::BadRequest("age is required".to_string()))?;
    let age = parse_age(&age).map_err(AppError::BadRequest)?;

    let form = RecordFormDto { name, age };
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("file is required".to_string()))?;

    let record = service
        .create(NewRecordUpload {
            name: form.name,
            age: form.age,
            file_name,
            content_type,
            data,
        })
        .await?;

    Ok(Json(record))
}

/// Oversized bodies keep their 413, everything else is a malformed form
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    let message = format!("{}: {}", context, e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

/// Get a record by id
#[utoipa::path(
    get,
    path = "/api/records/{id}",
    tag = "records",
    params(
        ("id" = i32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record found", body = RecordResponseDto),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn get_record(
    State(service): State<Arc<RecordService>>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<RecordResponseDto>> {
    let record = service.get(id).await?;
    Ok(Json(record))
}

/// Update a record's name and age
#[utoipa::path(
    put,
    path = "/api/records/{id}",
    tag = "records",
    params(
        ("id" = i32, Path, description = "Record id")
    ),
    request_body = UpdateRecordDto,
    responses(
        (status = 200, description = "Record updated", body = RecordResponseDto),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn update_record(
    State(service): State<Arc<RecordService>>,
    AppPath(id): AppPath<i32>,
    AppJson(dto): AppJson<UpdateRecordDto>,
) -> Result<Json<RecordResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = service.update(id, dto).await?;
    Ok(Json(record))
}

/// Delete a record
///
/// Removes the database row only; the stored file is kept.
#[utoipa::path(
    delete,
    path = "/api/records/{id}",
    tag = "records",
    params(
        ("id" = i32, Path, description = "Record id")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn delete_record(
    State(service): State<Arc<RecordService>>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
