use std::sync::Arc;

use crate::core::client::graphql_client::GraphqlClient;
use crate::core::client::query_executor_trait::QueryExecutor;
use crate::core::config::Settings;
use crate::domain::account::service::AccountService;
use crate::domain::analytics::service::AnalyticsService;
use crate::domain::report::service::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub analytics_service: Arc<AnalyticsService>,
    pub account_service: Arc<AccountService>,
    pub report_service: Arc<ReportService>,
}

/// Wires the services once at startup. A single reqwest client is shared by
/// the GraphQL executor and the REST directory calls.
pub fn build_app_state(settings: Settings) -> AppState {
    let settings = Arc::new(settings);
    let http = reqwest::Client::new();

    let executor: Arc<dyn QueryExecutor> =
        Arc::new(GraphqlClient::new(http.clone(), settings.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(
        executor,
        settings.account_tag.clone(),
    ));
    let account_service = Arc::new(AccountService::new(http, settings.clone()));
    let report_service = Arc::new(ReportService::new(
        analytics_service.clone(),
        settings.clone(),
    ));

    AppState {
        settings,
        analytics_service,
        account_service,
        report_service,
    }
}
