//! Report routes (generation and download)

use axum::routing::{get, post};
use axum::Router;

use crate::api::controller::report::ReportController;
use crate::app_state::AppState;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(ReportController::create_report))
        .route("/{file}", get(ReportController::download_report))
}
