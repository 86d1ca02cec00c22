//! Directory routes (accounts and zones visible to the configured token)

use axum::{routing::get, Router};

use crate::api::controller::account::AccountController;
use crate::app_state::AppState;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(AccountController::get_accounts))
        .route("/zones", get(AccountController::get_zones))
}
