//! Request handlers
//!
//! Each handler reads the request, calls one [`SentimentService`] action and
//! renders the result. Nothing here mutates shared state.
//!
//! [`SentimentService`]: crate::service::SentimentService

use super::assets::load_photo;
use super::pages::{self, AnalyzerView, DashboardView, Notice};
use super::SharedState;
use crate::dashboard::{BatchReport, DashboardReport};
use crate::data::{parse_text_lines, parse_timestamp, CsvTable, UploadKind};
use crate::error::DashboardError;
use crate::models::{ScoreResult, TextRecord};
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

/// JSON error body for the API routes
#[derive(Debug)]
pub struct ApiError(pub DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = error_status(&self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn error_status(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
        e if e.is_user_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status for an error shown on an HTML page; empty input is only a warning
fn page_status(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::EmptyInput => StatusCode::OK,
        other => error_status(other),
    }
}

const EMPTY_TEXT: &str = "Please enter a tweet before analyzing.";
const EMPTY_UPLOAD: &str = "The uploaded file has no rows to analyze.";
const PICK_COLUMN: &str = "Select the column containing the text to analyze.";

/// Warning text for a failed action; `empty` covers [`DashboardError::EmptyInput`]
fn warning_message(err: &DashboardError, empty: &str) -> String {
    match err {
        DashboardError::EmptyInput => empty.to_string(),
        other => other.to_string(),
    }
}

/// Fields of an upload form
#[derive(Debug, Default)]
struct Upload {
    /// (file name, bytes) of the chosen file
    file: Option<(String, Vec<u8>)>,
    column: Option<String>,
    /// Timestamp column picked on the dashboard; empty means none
    timestamp_column: Option<String>,
    /// CSV text carried over from the column picker
    content: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, MultipartError> {
    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file is chosen
                if !file_name.is_empty() || !bytes.is_empty() {
                    upload.file = Some((file_name, bytes.to_vec()));
                }
            }
            Some("column") => {
                let column = field.text().await?;
                if !column.trim().is_empty() {
                    upload.column = Some(column.trim().to_string());
                }
            }
            Some("timestamp_column") => upload.timestamp_column = Some(field.text().await?.trim().to_string()),
            Some("content") => upload.content = Some(field.text().await?),
            other => debug!(field = ?other, "ignoring form field"),
        }
    }
    Ok(upload)
}

impl Upload {
    /// Carried CSV text wins over a freshly chosen file
    fn into_source(self) -> Option<(String, Vec<u8>)> {
        match (self.content, self.file) {
            (Some(content), _) => Some(("upload.csv".to_string(), content.into_bytes())),
            (None, file) => file,
        }
    }
}

pub async fn home(State(state): State<SharedState>) -> Html<String> {
    Html(pages::home(state.chrome()))
}

pub async fn analyzer_page(State(state): State<SharedState>) -> Html<String> {
    Html(pages::analyzer(state.chrome(), None, &AnalyzerView::Empty))
}

#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

pub async fn analyze_text(State(state): State<SharedState>, Form(form): Form<TextForm>) -> Response {
    match state.service.analyze_text(&form.text) {
        Ok(result) => Html(pages::analyzer(state.chrome(), None, &AnalyzerView::Single(result))).into_response(),
        Err(err) => analyzer_error(&state, &err, EMPTY_TEXT),
    }
}

fn analyzer_error(state: &SharedState, err: &DashboardError, empty: &str) -> Response {
    let notice = Notice::Warning(warning_message(err, empty));
    let html = pages::analyzer(state.chrome(), Some(&notice), &AnalyzerView::Empty);
    (page_status(err), Html(html)).into_response()
}

pub async fn analyze_file(State(state): State<SharedState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            let notice = Notice::Warning(e.body_text());
            let html = pages::analyzer(state.chrome(), Some(&notice), &AnalyzerView::Empty);
            return (e.status(), Html(html)).into_response();
        }
    };

    let column = upload.column.clone();
    let Some((file_name, bytes)) = upload.into_source() else {
        let notice = Notice::Warning("Please upload a CSV or TXT file.".to_string());
        return Html(pages::analyzer(state.chrome(), Some(&notice), &AnalyzerView::Empty)).into_response();
    };

    match analyze_upload(&state, &file_name, &bytes, column.as_deref()) {
        Ok(view @ AnalyzerView::ColumnPicker { .. }) => {
            let notice = Notice::Warning(PICK_COLUMN.to_string());
            Html(pages::analyzer(state.chrome(), Some(&notice), &view)).into_response()
        }
        Ok(view) => Html(pages::analyzer(state.chrome(), None, &view)).into_response(),
        Err(err) => {
            warn!(file = %file_name, error = %err, "upload rejected");
            analyzer_error(&state, &err, EMPTY_UPLOAD)
        }
    }
}

fn analyze_upload(
    state: &SharedState,
    file_name: &str,
    bytes: &[u8],
    column: Option<&str>,
) -> crate::Result<AnalyzerView> {
    let records = match UploadKind::from_filename(file_name)? {
        UploadKind::Text => parse_text_lines(bytes)?,
        UploadKind::Csv => {
            let table = CsvTable::parse(bytes)?;
            let column = column.unwrap_or(&state.config.aggregation.text_column);
            if !table.has_column(column) {
                return Ok(AnalyzerView::ColumnPicker {
                    headers: table.headers().to_vec(),
                    content: String::from_utf8_lossy(bytes).into_owned(),
                });
            }
            table.records(column, None)?
        }
    };
    info!(file = %file_name, records = records.len(), "analyzing upload");
    Ok(AnalyzerView::Batch(state.service.analyze_records(&records)?))
}

pub async fn dashboard_page(State(state): State<SharedState>) -> Html<String> {
    Html(pages::dashboard(state.chrome(), None, &DashboardView::Empty))
}

pub async fn dashboard_upload(State(state): State<SharedState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            let notice = Notice::Warning(e.body_text());
            let html = pages::dashboard(state.chrome(), Some(&notice), &DashboardView::Empty);
            return (e.status(), Html(html)).into_response();
        }
    };

    let column = upload.column.clone();
    let timestamp_column = upload.timestamp_column.clone();
    let Some((file_name, bytes)) = upload.into_source() else {
        let notice = Notice::Warning("Please upload a CSV file with tweets.".to_string());
        return Html(pages::dashboard(state.chrome(), Some(&notice), &DashboardView::Empty)).into_response();
    };

    let view = dashboard_view(&state, &file_name, &bytes, column.as_deref(), timestamp_column.as_deref());
    match view {
        Ok(view @ DashboardView::ColumnPicker { .. }) => {
            let notice = Notice::Warning(PICK_COLUMN.to_string());
            Html(pages::dashboard(state.chrome(), Some(&notice), &view)).into_response()
        }
        Ok(view) => Html(pages::dashboard(state.chrome(), None, &view)).into_response(),
        Err(err) => {
            warn!(file = %file_name, error = %err, "dashboard upload rejected");
            let notice = Notice::Warning(warning_message(&err, EMPTY_UPLOAD));
            let html = pages::dashboard(state.chrome(), Some(&notice), &DashboardView::Empty);
            (page_status(&err), Html(html)).into_response()
        }
    }
}

/// Dashboard for an upload, or a column picker when the CSV lacks the text
/// column
fn dashboard_view(
    state: &SharedState,
    file_name: &str,
    bytes: &[u8],
    column: Option<&str>,
    timestamp_column: Option<&str>,
) -> crate::Result<DashboardView> {
    let settings = &state.config.aggregation;
    let records = match UploadKind::from_filename(file_name)? {
        UploadKind::Text => parse_text_lines(bytes)?,
        UploadKind::Csv => {
            let table = CsvTable::parse(bytes)?;
            let column = column.unwrap_or(&settings.text_column);
            if !table.has_column(column) {
                return Ok(DashboardView::ColumnPicker {
                    headers: table.headers().to_vec(),
                    content: String::from_utf8_lossy(bytes).into_owned(),
                });
            }

            let timestamp_column = match timestamp_column {
                Some("") => None,
                Some(picked) => Some(picked),
                None => Some(settings.timestamp_column.as_str()),
            };
            let timestamp_column = match timestamp_column {
                Some(ts) if !table.has_column(ts) => {
                    warn!(column = %ts, "timestamp column missing, time series disabled");
                    None
                }
                other => other,
            };
            table.records(column, timestamp_column)?
        }
    };
    info!(file = %file_name, records = records.len(), "building dashboard");
    Ok(DashboardView::Report(state.service.build_dashboard(&records)?))
}

pub async fn team_page(State(state): State<SharedState>) -> Html<String> {
    Html(pages::team(state.chrome(), &state.config.team))
}

pub async fn team_photo(State(state): State<SharedState>, Path(index): Path<usize>) -> Response {
    let Some(member) = state.config.team.get(index) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match load_photo(member).await {
        Some(photo) => ([(header::CONTENT_TYPE, photo.content_type)], photo.bytes).into_response(),
        None => {
            warn!(member = %member.name, "team photo missing, using placeholder");
            Redirect::temporary(&state.config.server.placeholder_photo_url).into_response()
        }
    }
}

pub async fn info_page(State(state): State<SharedState>) -> Html<String> {
    Html(pages::info(state.chrome()))
}

pub async fn feedback_page(State(state): State<SharedState>) -> Html<String> {
    Html(pages::feedback(state.chrome(), None))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub feedback: String,
}

pub async fn submit_feedback(
    State(state): State<SharedState>,
    Form(form): Form<FeedbackForm>,
) -> Html<String> {
    let notice = if form.feedback.trim().is_empty() {
        Notice::Warning("Please enter your feedback before submitting.".to_string())
    } else {
        info!(chars = form.feedback.chars().count(), "feedback received");
        Notice::Success("Thank you for your feedback!".to_string())
    };
    Html(pages::feedback(state.chrome(), Some(&notice)))
}

#[derive(Debug, Deserialize)]
pub struct RatingForm {
    pub rating: u8,
}

pub async fn submit_rating(State(state): State<SharedState>, Form(form): Form<RatingForm>) -> Response {
    if !(1..=5).contains(&form.rating) {
        let notice = Notice::Warning("Please select a rating between 1 and 5.".to_string());
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::feedback(state.chrome(), Some(&notice))),
        )
            .into_response();
    }
    info!(rating = form.rating, "rating received");
    let notice = Notice::Success(format!("Thank you for rating us {} star(s)!", form.rating));
    Html(pages::feedback(state.chrome(), Some(&notice))).into_response()
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

pub async fn api_analyze(
    State(state): State<SharedState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ScoreResult>, ApiError> {
    Ok(Json(state.service.analyze_text(&request.text)?))
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
}

pub async fn api_batch(
    State(state): State<SharedState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchReport>, ApiError> {
    let records: Vec<TextRecord> = request.texts.into_iter().map(TextRecord::new).collect();
    Ok(Json(state.service.analyze_records(&records)?))
}

/// Record as accepted by the JSON API; timestamps are parsed leniently
#[derive(Debug, Deserialize)]
pub struct RecordInput {
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub records: Vec<RecordInput>,
}

pub async fn api_dashboard(
    State(state): State<SharedState>,
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardReport>, ApiError> {
    let records: Vec<TextRecord> = request
        .records
        .into_iter()
        .map(|r| TextRecord {
            timestamp: r.timestamp.as_deref().and_then(parse_timestamp),
            text: r.text,
        })
        .collect();
    Ok(Json(state.service.build_dashboard(&records)?))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::defaults::VERSION }))
}
