//! Typed shape of the provider's GraphQL response.
//!
//! Replaces ad-hoc `response["data"]["viewer"]...` walking: a malformed body
//! fails deserialization with an error naming the missing field instead of
//! panicking deep inside an extractor.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct GraphqlEnvelope {
    pub data: Option<EnvelopeData>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EnvelopeData {
    pub viewer: Viewer,
}

#[derive(Debug, Deserialize)]
pub struct Viewer {
    pub accounts: Vec<AccountGroups>,
}

/// One account entry: a map from group alias (e.g. `requestsTotals`) to its
/// record list. The provider returns `null` for groups it could not compute,
/// hence the inner Option.
pub type AccountGroups = HashMap<String, Option<Vec<MetricGroup>>>;

#[derive(Debug, Deserialize)]
pub struct MetricGroup {
    pub sum: Map<String, Value>,
    pub dimensions: Map<String, Value>,
}

impl GraphqlEnvelope {
    /// Joined provider error messages, if any were reported.
    pub fn error_messages(&self) -> Option<String> {
        self.errors.as_ref().and_then(|errors| {
            if errors.is_empty() {
                None
            } else {
                Some(
                    errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_per_day_response() {
        let envelope: GraphqlEnvelope = serde_json::from_value(json!({
            "data": {
                "viewer": {
                    "accounts": [{
                        "requestsTotals": [
                            {"sum": {"requests": 100}, "dimensions": {"timestamp": "2024-12-10"}},
                            {"sum": {"requests": 150}, "dimensions": {"timestamp": "2024-12-11"}}
                        ]
                    }]
                }
            }
        }))
        .unwrap();

        let account = &envelope.data.unwrap().viewer.accounts[0];
        let groups = account["requestsTotals"].as_ref().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].sum["requests"], json!(100));
    }

    #[test]
    fn null_group_lists_are_preserved_as_none() {
        let envelope: GraphqlEnvelope = serde_json::from_value(json!({
            "data": {"viewer": {"accounts": [{"requestsTotals": null}]}}
        }))
        .unwrap();

        let account = &envelope.data.unwrap().viewer.accounts[0];
        assert!(account["requestsTotals"].is_none());
    }

    #[test]
    fn error_only_responses_parse_without_data() {
        let envelope: GraphqlEnvelope = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "quota exceeded"}, {"message": "zone not found"}]
        }))
        .unwrap();

        assert!(envelope.data.is_none());
        assert_eq!(
            envelope.error_messages().unwrap(),
            "quota exceeded; zone not found"
        );
    }

    #[test]
    fn record_missing_sum_names_the_field() {
        let err = serde_json::from_value::<GraphqlEnvelope>(json!({
            "data": {
                "viewer": {
                    "accounts": [{
                        "requestsTotals": [{"dimensions": {"timestamp": "2024-12-10"}}]
                    }]
                }
            }
        }))
        .unwrap_err();

        assert!(err.to_string().contains("sum"));
    }
}
