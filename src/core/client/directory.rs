//! REST discovery calls: which accounts and zones the configured token can
//! see. Used to look up the tag to scope analytics queries with.

use std::collections::BTreeMap;

use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::config::Settings;
use crate::errors::{internal_error, AppError};

#[derive(Debug, Deserialize)]
pub struct NamedResource {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    success: bool,
    #[serde(default)]
    errors: Vec<Value>,
    #[serde(default)]
    result: Vec<NamedResource>,
}

pub async fn fetch_accounts(
    http: &reqwest::Client,
    settings: &Settings,
) -> Result<BTreeMap<String, String>, AppError> {
    fetch_directory(http, settings, "accounts").await
}

pub async fn fetch_zones(
    http: &reqwest::Client,
    settings: &Settings,
) -> Result<BTreeMap<String, String>, AppError> {
    fetch_directory(http, settings, "zones").await
}

async fn fetch_directory(
    http: &reqwest::Client,
    settings: &Settings,
    path: &str,
) -> Result<BTreeMap<String, String>, AppError> {
    let url = format!("{}/{}", settings.api_base_url.trim_end_matches('/'), path);
    debug!(%url, "listing {path}");

    let response = http
        .get(&url)
        .bearer_auth(&settings.api_token)
        .send()
        .await
        .map_err(internal_error)?;

    let status = response.status();
    let body = response.text().await.map_err(internal_error)?;
    let envelope = parse_directory(status, &body)?;
    Ok(to_name_index(envelope.result))
}

fn parse_directory(status: StatusCode, body: &str) -> Result<ListEnvelope, AppError> {
    if status != StatusCode::OK {
        return Err(AppError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let envelope: ListEnvelope = serde_json::from_str(body)
        .map_err(|err| AppError::ResponseShape(format!("directory response body: {err}")))?;

    if !envelope.success {
        return Err(AppError::Api(format!(
            "directory listing failed: {}",
            serde_json::to_string(&envelope.errors).unwrap_or_default()
        )));
    }

    Ok(envelope)
}

fn to_name_index(resources: Vec<NamedResource>) -> BTreeMap<String, String> {
    resources
        .into_iter()
        .map(|resource| (resource.name, resource.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_listing_maps_names_to_ids() {
        let body = r#"{
            "success": true,
            "errors": [],
            "result": [
                {"id": "023e105f4ecef8ad9ca31a8372d0c353", "name": "Example account"},
                {"id": "9a7806061c88ada191ed06f989cc3dac", "name": "Second account"}
            ]
        }"#;

        let envelope = parse_directory(StatusCode::OK, body).unwrap();
        let index = to_name_index(envelope.result);
        assert_eq!(
            index["Example account"],
            "023e105f4ecef8ad9ca31a8372d0c353"
        );
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn unsuccessful_listing_is_an_api_error() {
        let body = r#"{"success": false, "errors": [{"code": 9109, "message": "Invalid access token"}], "result": []}"#;
        let err = parse_directory(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, AppError::Api(ref m) if m.contains("9109")));
    }

    #[test]
    fn non_200_is_an_http_error() {
        let err = parse_directory(StatusCode::SERVICE_UNAVAILABLE, "upstream down").unwrap_err();
        assert!(matches!(err, AppError::Http { status: 503, .. }));
    }
}
