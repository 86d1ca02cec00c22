use axum::Json;

use crate::api::dto::ApiResponse;
use crate::errors::AppError;

pub fn to_json<T: serde::Serialize>(
    result: Result<T, AppError>,
) -> Result<Json<ApiResponse<T>>, AppError> {
    // Typed errors pass through untouched so the response status reflects
    // the original failure (bad input vs provider outage vs missing data).
    result.map(|value| Json(ApiResponse::ok(value)))
}
