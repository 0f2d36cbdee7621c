use utoipa::{Modify, OpenApi};

use crate::features::records::{dtos as records_dtos, handlers as records_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        records_handlers::list_records,
        records_handlers::create_record,
        records_handlers::get_record,
        records_handlers::update_record,
        records_handlers::delete_record,
    ),
    components(
        schemas(
            ErrorResponse,
            records_dtos::RecordResponseDto,
            records_dtos::CreateRecordDto,
            records_dtos::UpdateRecordDto,
        )
    ),
    tags(
        (name = "records", description = "Record upload and management"),
    ),
    info(
        title = "Records API",
        version = "0.1.0",
        description = "API documentation for record management",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_record_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/records"));
        assert!(doc.paths.paths.contains_key("/api/records/{id}"));
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Desc".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
