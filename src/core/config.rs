use std::env;
use std::path::PathBuf;

use crate::errors::AppError;

const DEFAULT_GRAPHQL_URL: &str = "https://api.cloudflare.com/client/v4/graphql";
const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REPORT_DIR: &str = "./reports";
const DEFAULT_FONT_DIR: &str = "./assets/fonts";
const DEFAULT_FONT_FAMILY: &str = "LiberationSans";

/// Process-wide configuration, loaded once at startup and passed into the
/// clients at construction time. Credentials are never read from the
/// environment after this point.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_token: String,
    pub account_tag: String,
    pub graphql_url: String,
    pub api_base_url: String,
    pub listen_addr: String,
    pub report_dir: PathBuf,
    pub font_dir: PathBuf,
    pub font_family: String,
}

impl Settings {
    /// Loads settings from the process environment. `CF_API_TOKEN` and
    /// `ACCOUNT_ID` are required; everything else has a default.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = require(&get, "CF_API_TOKEN")?;
        let account_tag = require(&get, "ACCOUNT_ID")?;

        Ok(Self {
            api_token,
            account_tag,
            graphql_url: get("EDGEREPORT_GRAPHQL_URL")
                .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string()),
            api_base_url: get("EDGEREPORT_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            listen_addr: get("EDGEREPORT_LISTEN_ADDR")
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            report_dir: get("EDGEREPORT_REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR)),
            font_dir: get("EDGEREPORT_FONT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_DIR)),
            font_family: get("EDGEREPORT_FONT_FAMILY")
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        })
    }
}

fn require<F>(get: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "missing required environment variable {key}"
        ))),
    }
}
