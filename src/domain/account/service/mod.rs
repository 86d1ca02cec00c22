use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::client::directory;
use crate::core::config::Settings;
use crate::errors::AppError;

/// Name→id lookups for the accounts and zones visible to the configured
/// token. Useful for finding the tag to point the analytics queries at.
pub struct AccountService {
    http: reqwest::Client,
    settings: Arc<Settings>,
}

impl AccountService {
    pub fn new(http: reqwest::Client, settings: Arc<Settings>) -> Self {
        Self { http, settings }
    }

    pub async fn accounts(&self) -> Result<BTreeMap<String, String>, AppError> {
        directory::fetch_accounts(&self.http, &self.settings).await
    }

    pub async fn zones(&self) -> Result<BTreeMap<String, String>, AppError> {
        directory::fetch_zones(&self.http, &self.settings).await
    }
}
