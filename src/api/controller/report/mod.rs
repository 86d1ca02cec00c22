use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::dto::report_dto::ReportRequest;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::report::dto::ReportSummary;
use crate::errors::AppError;

pub struct ReportController;

impl ReportController {
    pub async fn create_report(
        State(state): State<AppState>,
        Json(req): Json<ReportRequest>,
    ) -> Result<Json<ApiResponse<ReportSummary>>, AppError> {
        to_json(state.report_service.generate(&req).await)
    }

    pub async fn download_report(
        State(state): State<AppState>,
        Path(file): Path<String>,
    ) -> Result<Response, AppError> {
        // The id is a bare file name; anything path-like is rejected.
        if file.contains('/') || file.contains('\\') || file.contains("..") {
            return Err(AppError::InvalidInput(format!(
                "invalid report file name '{file}'"
            )));
        }

        let path = state.settings.report_dir.join(&file);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(format!("report '{file}' not found")))?;

        let headers = [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file}\""),
            ),
        ];
        Ok((headers, bytes).into_response())
    }
}
