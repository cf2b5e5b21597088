//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::error::{SheetError, SheetResult};
use crate::excel::ExcelExporter;
use crate::replace::ReplaceRule;
use crate::report::ReportExporter;
use crate::types::CellValue;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const XLSX_FILENAME: &str = "updated.xlsx";
pub const PDF_FILENAME: &str = "updated.pdf";
/// Multipart field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

/// Standard API response wrapper; the payload's fields sit at the top level
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Status code for a failed operation
pub fn status_for(err: &SheetError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn failure(err: SheetError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("{}", err);
    } else {
        warn!("{}", err);
    }
    (status, Json(ApiResponse::<()>::err(err.to_string()))).into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    let message = message.into();
    warn!("Rejected request: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::err(message)),
    )
        .into_response()
}

fn respond<T: Serialize>(result: SheetResult<T>) -> Response {
    match result {
        Ok(data) => Json(ApiResponse::ok(data)).into_response(),
        Err(e) => failure(e),
    }
}

fn attachment(result: SheetResult<Vec<u8>>, content_type: &'static str, filename: &str) -> Response {
    match result {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => failure(e),
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "Sheetfix API Server".to_string(),
        version: state.version.clone(),
        description: "Spreadsheet find/replace with Excel and PDF export".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("POST", "/upload", "Upload a spreadsheet (multipart field 'file')"),
            EndpointInfo::new("POST", "/replace", "Find/replace across the loaded table"),
            EndpointInfo::new("GET", "/download/excel", "Download the table as updated.xlsx"),
            EndpointInfo::new("GET", "/download/pdf", "Download the table as updated.pdf"),
        ],
    }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub table_loaded: bool,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        table_loaded: state.session.current().is_ok(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: ["upload", "replace", "download-excel", "download-pdf"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
    }))
}

/// Upload response
#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub columns: Vec<String>,
    pub rows: usize,
}

/// POST /upload - Load a spreadsheet as the current table
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let bytes = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(UPLOAD_FIELD) => match field.bytes().await {
                Ok(bytes) => break bytes,
                Err(e) => return bad_request(format!("Failed to read upload: {}", e)),
            },
            Ok(Some(_)) => continue,
            Ok(None) => return bad_request("No file"),
            Err(e) => return bad_request(format!("Malformed multipart body: {}", e)),
        }
    };

    respond(state.session.ingest(&bytes).map(|table| {
        info!(bytes = bytes.len(), "Upload ingested");
        UploadResponse {
            columns: table.columns().to_vec(),
            rows: table.row_count(),
        }
    }))
}

/// Replace request
#[derive(Deserialize, Debug)]
pub struct ReplaceRequest {
    pub mode: String,
    pub find: String,
    pub replace: CellValue,
    #[serde(default)]
    pub column: Option<String>,
}

/// Replace response
#[derive(Serialize, Debug)]
pub struct ReplaceResponse {
    pub status: String,
    pub replaced: usize,
}

/// POST /replace - Find/replace across the current table
pub async fn replace(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReplaceRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    respond(apply_replace(&state, req))
}

fn apply_replace(state: &AppState, req: ReplaceRequest) -> SheetResult<ReplaceResponse> {
    // Missing table is reported ahead of rule problems
    state.session.current()?;
    let rule = ReplaceRule::new(&req.mode, &req.find, req.replace, req.column)?;
    let replaced = state.session.apply(&rule)?;
    Ok(ReplaceResponse {
        status: "ok".to_string(),
        replaced,
    })
}

/// GET /download/excel - Current table as .xlsx
pub async fn download_excel(State(state): State<Arc<AppState>>) -> Response {
    let result = state
        .session
        .current()
        .and_then(|table| ExcelExporter::new(&table).to_bytes());
    attachment(result, XLSX_CONTENT_TYPE, XLSX_FILENAME)
}

/// GET /download/pdf - Current table as a PDF report
pub async fn download_pdf(State(state): State<Arc<AppState>>) -> Response {
    let result = state
        .session
        .current()
        .and_then(|table| ReportExporter::new(&table).to_bytes());
    attachment(result, PDF_CONTENT_TYPE, PDF_FILENAME)
}
