use async_trait::async_trait;
use serde_json::Value;

use crate::domain::analytics::envelope::GraphqlEnvelope;
use crate::errors::AppError;

/// Seam between the extractors and the wire. Production uses
/// [`GraphqlClient`](super::graphql_client::GraphqlClient); tests substitute
/// a mock returning canned envelopes.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &str, variables: Value) -> Result<GraphqlEnvelope, AppError>;
}
