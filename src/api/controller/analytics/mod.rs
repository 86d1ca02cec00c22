use axum::extract::{Query, State};
use axum::Json;

use crate::api::dto::analytics_dto::AnalyticsQuery;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::analytics::dto::MetricResult;
use crate::errors::AppError;

pub struct AnalyticsController;

impl AnalyticsController {
    pub async fn get_requests(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.requests(&q).await)
    }

    pub async fn get_bandwidth(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.bandwidth(&q).await)
    }

    pub async fn get_visits(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.visits(&q).await)
    }

    pub async fn get_page_views(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.page_views(&q).await)
    }

    pub async fn get_requests_by_location(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.requests_by_location(&q).await)
    }

    pub async fn get_bandwidth_by_location(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.bandwidth_by_location(&q).await)
    }

    pub async fn get_http_versions(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.http_versions(&q).await)
    }

    pub async fn get_ssl_versions(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.ssl_versions(&q).await)
    }

    pub async fn get_content_types(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.content_types(&q).await)
    }

    pub async fn get_cached_requests(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.cached_requests(&q).await)
    }

    pub async fn get_cached_bandwidth(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.cached_bandwidth(&q).await)
    }

    pub async fn get_encrypted_requests(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.encrypted_requests(&q).await)
    }

    pub async fn get_encrypted_bandwidth(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.encrypted_bandwidth(&q).await)
    }

    pub async fn get_client_errors(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.client_errors(&q).await)
    }

    pub async fn get_server_errors(
        State(state): State<AppState>,
        Query(q): Query<AnalyticsQuery>,
    ) -> Result<Json<ApiResponse<MetricResult>>, AppError> {
        to_json(state.analytics_service.server_errors(&q).await)
    }
}
