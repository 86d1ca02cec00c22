use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct AccountController;

impl AccountController {
    pub async fn get_accounts(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<BTreeMap<String, String>>>, AppError> {
        to_json(state.account_service.accounts().await)
    }

    pub async fn get_zones(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<BTreeMap<String, String>>>, AppError> {
        to_json(state.account_service.zones().await)
    }
}
