//! HTTP surface for the document summarizer.
//!
//! - `GET /` – Upload page that renders PDFs to an image in the browser before submitting.
//! - `POST /api/process` – Multipart upload with a `file` field. Returns `{ summary,
//!   key_points, original_extract }`.
//! - `GET /metrics` – Pipeline counters.
//!
//! Every failure on `/api/process` is reported as a JSON body with an `error` field.

use crate::assets;
use crate::metrics::MetricsSnapshot;
use crate::processing::{ProcessingApi, ProcessingError, SummaryResult, UploadedDocument};
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;

const FILE_FIELD: &str = "file";

/// Build the HTTP router. Multipart bodies larger than `max_upload_bytes` are rejected.
pub fn create_router<S>(service: Arc<S>, max_upload_bytes: usize) -> Router
where
    S: ProcessingApi + 'static,
{
    Router::new()
        .route("/", get(index_page))
        .route(
            "/api/process",
            post(process_upload::<S>).fallback(method_not_allowed),
        )
        .route("/metrics", get(get_metrics::<S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(service)
}

async fn index_page() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

/// Summarize an uploaded document.
///
/// The body is handed straight to the multipart decoder. A request that is not multipart, or
/// has no `file` field, is answered with 400.
async fn process_upload<S>(
    State(service): State<Arc<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResult>, AppError>
where
    S: ProcessingApi,
{
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Request body is not multipart");
        AppError::MissingFile
    })?;
    let upload = read_file_field(&mut multipart)
        .await?
        .ok_or(AppError::MissingFile)?;
    let result = service.process_document(upload).await?;
    Ok(Json(result))
}

async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<UploadedDocument>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();
        tracing::debug!(
            filename = filename.as_deref().unwrap_or(""),
            bytes = bytes.len(),
            "Received upload"
        );
        return Ok(Some(UploadedDocument {
            bytes,
            filename,
            content_type,
        }));
    }
    Ok(None)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: ProcessingApi,
{
    Json(service.metrics_snapshot())
}

enum AppError {
    MethodNotAllowed,
    MissingFile,
    Upload(MultipartError),
    Processing(ProcessingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            Self::MissingFile => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No file uploaded" }),
            ),
            Self::Upload(error) => processing_failed(error.body_text()),
            Self::Processing(error) => processing_failed(error.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

fn processing_failed(details: String) -> (StatusCode, serde_json::Value) {
    tracing::error!(details = %details, "Processing failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Processing failed", "details": details }),
    )
}

impl From<MultipartError> for AppError {
    fn from(inner: MultipartError) -> Self {
        Self::Upload(inner)
    }
}

impl From<ProcessingError> for AppError {
    fn from(inner: ProcessingError) -> Self {
        Self::Processing(inner)
    }
}
