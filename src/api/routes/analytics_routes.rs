//! Analytics routes (e.g., /api/v1/analytics/*)

use axum::{routing::get, Router};

use crate::api::controller::analytics::AnalyticsController;
use crate::app_state::AppState;

/// Build the router for analytics endpoints under /api/v1/analytics
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        // Stats
        .route("/requests", get(AnalyticsController::get_requests))
        .route("/bandwidth", get(AnalyticsController::get_bandwidth))
        .route("/visits", get(AnalyticsController::get_visits))
        .route("/page-views", get(AnalyticsController::get_page_views))
        .route("/requests-by-location", get(AnalyticsController::get_requests_by_location))
        .route("/bandwidth-by-location", get(AnalyticsController::get_bandwidth_by_location))

        // Network
        .route("/http-versions", get(AnalyticsController::get_http_versions))
        .route("/ssl-versions", get(AnalyticsController::get_ssl_versions))
        .route("/content-types", get(AnalyticsController::get_content_types))

        // Cache
        .route("/cached-requests", get(AnalyticsController::get_cached_requests))
        .route("/cached-bandwidth", get(AnalyticsController::get_cached_bandwidth))

        // Security
        .route("/encrypted-requests", get(AnalyticsController::get_encrypted_requests))
        .route("/encrypted-bandwidth", get(AnalyticsController::get_encrypted_bandwidth))

        // Errors
        .route("/client-errors", get(AnalyticsController::get_client_errors))
        .route("/server-errors", get(AnalyticsController::get_server_errors))
}
