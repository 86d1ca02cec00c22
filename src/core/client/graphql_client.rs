use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::header::ACCEPT;
use serde_json::{json, Value};
use tracing::debug;

use crate::core::client::query_executor_trait::QueryExecutor;
use crate::core::config::Settings;
use crate::domain::analytics::envelope::GraphqlEnvelope;
use crate::errors::{internal_error, AppError};

/// Thin client for the provider's GraphQL endpoint. One request per call,
/// no retries; the bearer token comes from the settings handed in at
/// construction time.
pub struct GraphqlClient {
    http: reqwest::Client,
    settings: Arc<Settings>,
}

impl GraphqlClient {
    pub fn new(http: reqwest::Client, settings: Arc<Settings>) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl QueryExecutor for GraphqlClient {
    async fn execute(&self, query: &str, variables: Value) -> Result<GraphqlEnvelope, AppError> {
        let payload = json!({
            "query": query,
            "variables": variables,
        });

        debug!(url = %self.settings.graphql_url, "sending GraphQL query");
        let response = self
            .http
            .post(&self.settings.graphql_url)
            .bearer_auth(&self.settings.api_token)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(internal_error)?;

        let status = response.status();
        let body = response.text().await.map_err(internal_error)?;
        parse_response(status, &body)
    }
}

/// Splits the status/body handling out of the transport so it can be
/// exercised without a server. Only 200 carries a usable envelope.
fn parse_response(status: StatusCode, body: &str) -> Result<GraphqlEnvelope, AppError> {
    if status != StatusCode::OK {
        return Err(AppError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    serde_json::from_str(body)
        .map_err(|err| AppError::ResponseShape(format!("GraphQL response body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_200_becomes_http_error_with_original_status() {
        let err = parse_response(StatusCode::FORBIDDEN, "authentication error").unwrap_err();
        match err {
            AppError::Http { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "authentication error");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn ok_body_parses_into_envelope() {
        let body = r#"{"data": {"viewer": {"accounts": []}}}"#;
        let envelope = parse_response(StatusCode::OK, body).unwrap();
        assert!(envelope.data.is_some());
        assert!(envelope.errors.is_none());
    }

    #[test]
    fn ok_with_unparseable_body_is_a_shape_error() {
        let err = parse_response(StatusCode::OK, "<html>busy</html>").unwrap_err();
        assert!(matches!(err, AppError::ResponseShape(_)));
    }
}
