use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppPath;
use crate::features::records::RecordService;
use crate::shared::templates::render_template;

/// Home page: upload wizard followed by the record grid
pub async fn home(State(service): State<Arc<RecordService>>) -> Result<Html<String>> {
    let records = service.list().await?;
    let html = render_template("home.jinja", context! { records => records })?;
    Ok(Html(html))
}

/// Detail page with view/edit toggle and delete
pub async fn record_detail(
    State(service): State<Arc<RecordService>>,
    AppPath(id): AppPath<i32>,
) -> Result<Response> {
    match service.get(id).await {
        Ok(record) => {
            let html = render_template("record_detail.jinja", context! { record => record })?;
            Ok(Html(html).into_response())
        }
        Err(AppError::NotFound(_)) => {
            let html = render_template("not_found.jinja", context! { id => id })?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use std::sync::Arc;

    use crate::features::records::RecordRepository;
    use crate::shared::test_helpers::{
        local_storage, temp_upload_dir, test_server, InMemoryRecordRepository,
    };

    fn server() -> TestServer {
        let repository: Arc<dyn RecordRepository> = Arc::new(InMemoryRecordRepository::new());
        test_server(repository, local_storage(temp_upload_dir()))
    }

    async fn create(server: &TestServer, name: &str) {
        let form = MultipartForm::new()
            .add_text("name", name)
            .add_text("age", "30")
            .add_part("file", Part::bytes(b"data".as_slice()).file_name("id.pdf"));
        server.post("/api/records").multipart(form).await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_home_shows_wizard_and_empty_state() {
        let server = server();

        let response = server.get("/").await;
        response.assert_status_ok();
        let html = response.text();

        assert!(html.contains("id=\"upload-wizard\""));
        assert!(html.contains("data-step=\"3\""));
        assert!(html.contains("id=\"empty-state\""));
    }

    #[tokio::test]
    async fn test_home_lists_records_newest_first() {
        let server = server();
        create(&server, "Ana").await;
        create(&server, "Ben").await;

        let html = server.get("/").await.text();

        assert!(!html.contains("id=\"empty-state\""));
        let ben = html.find("<strong>Ben</strong>").unwrap();
        let ana = html.find("<strong>Ana</strong>").unwrap();
        assert!(ben < ana);
        assert!(html.contains("href=\"/records/1\""));
        assert!(html.contains("href=\"/records/2\""));
    }

    #[tokio::test]
    async fn test_names_are_escaped() {
        let server = server();
        create(&server, "<script>alert(1)</script>").await;

        let html = server.get("/records/1").await.text();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_detail_page() {
        let server = server();
        create(&server, "Ana").await;

        let response = server.get("/records/1").await;
        response.assert_status_ok();
        let html = response.text();

        assert!(html.contains("data-record-id=\"1\""));
        assert!(html.contains("id=\"record-edit\""));
        assert!(html.contains("<strong id=\"record-name\">Ana</strong>"));
    }

    #[tokio::test]
    async fn test_detail_page_for_unknown_id() {
        let server = server();

        let response = server.get("/records/7").await;
        response.assert_status_not_found();
        assert!(response.text().contains("Record not found"));
    }

    #[tokio::test]
    async fn test_detail_page_for_non_numeric_id() {
        let server = server();

        let response = server.get("/records/abc").await;
        response.assert_status_bad_request();
        let body = response.json::<crate::shared::types::ErrorResponse>();
        assert!(!body.success);
    }
}
