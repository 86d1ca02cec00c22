use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::debug;
use validator::Validate;

use crate::api::dto::analytics_dto::AnalyticsQuery;
use crate::core::client::query_executor_trait::QueryExecutor;
use crate::domain::analytics::catalog::{self, MetricSpec};
use crate::domain::analytics::dto::MetricResult;
use crate::domain::analytics::envelope::GraphqlEnvelope;
use crate::domain::analytics::range::ReportRange;
use crate::errors::AppError;

macro_rules! metric_accessors {
    ($(fn $name:ident => $metric:literal;)+) => {
        $(
            pub async fn $name(&self, q: &AnalyticsQuery) -> Result<MetricResult, AppError> {
                self.fetch($metric, q).await
            }
        )+
    };
}

/// Resolves catalog metrics against the provider: one query per call,
/// sequential, no retries. All extraction goes through the same
/// resolve-and-extract path regardless of metric.
pub struct AnalyticsService {
    executor: Arc<dyn QueryExecutor>,
    account_tag: String,
}

impl AnalyticsService {
    pub fn new(executor: Arc<dyn QueryExecutor>, account_tag: String) -> Self {
        Self {
            executor,
            account_tag,
        }
    }

    pub async fn fetch(&self, name: &str, q: &AnalyticsQuery) -> Result<MetricResult, AppError> {
        let spec = catalog::find(name)
            .ok_or_else(|| AppError::NotFound(format!("unknown metric '{name}'")))?;
        self.fetch_spec(spec, q).await
    }

    pub async fn fetch_spec(
        &self,
        spec: &MetricSpec,
        q: &AnalyticsQuery,
    ) -> Result<MetricResult, AppError> {
        q.validate()
            .map_err(|err| AppError::InvalidInput(err.to_string()))?;
        let range = ReportRange::resolve(&q.leq_date, q.periods)?;

        let variables = build_variables(&self.account_tag, &range, spec);
        debug!(metric = spec.name, "executing analytics query");
        let envelope = self.executor.execute(spec.query, variables).await?;

        extract(spec, envelope)
    }

    metric_accessors! {
        fn requests => "requests";
        fn bandwidth => "bandwidth";
        fn visits => "visits";
        fn page_views => "page_views";
        fn requests_by_location => "requests_by_location";
        fn bandwidth_by_location => "bandwidth_by_location";
        fn http_versions => "http_versions";
        fn ssl_versions => "ssl_versions";
        fn content_types => "content_types";
        fn cached_requests => "cached_requests";
        fn cached_bandwidth => "cached_bandwidth";
        fn encrypted_requests => "encrypted_requests";
        fn encrypted_bandwidth => "encrypted_bandwidth";
        fn client_errors => "client_errors";
        fn server_errors => "server_errors";
    }
}

fn build_variables(account_tag: &str, range: &ReportRange, spec: &MetricSpec) -> Value {
    let mut variables = json!({
        "accountTag": account_tag,
        "filter": {
            "datetime_geq": range.datetime_geq(),
            "datetime_leq": range.datetime_leq(),
        },
    });

    if let Some(band) = spec.status_band {
        let mut error_filter = Map::new();
        if let Some(geq) = band.geq {
            error_filter.insert("edgeResponseStatus_geq".into(), json!(geq));
        }
        error_filter.insert("edgeResponseStatus_lt".into(), json!(band.lt));
        variables["errorFilter"] = Value::Object(error_filter);
    }

    variables
}

/// Folds the response group list into a dimension→value mapping. Duplicate
/// dimensions are summed; per-label metrics with `top_n` keep the largest
/// values, ties resolved by first-encounter order.
fn extract(spec: &MetricSpec, envelope: GraphqlEnvelope) -> Result<MetricResult, AppError> {
    let messages = envelope.error_messages();
    let data = envelope.data.ok_or_else(|| {
        AppError::Api(messages.unwrap_or_else(|| "response contained no data".into()))
    })?;

    let mut accounts = data.viewer.accounts;
    if accounts.is_empty() {
        return Err(AppError::DataUnavailable(format!(
            "no account entry in {} response",
            spec.name
        )));
    }
    let groups = accounts
        .swap_remove(0)
        .remove(spec.group)
        .flatten()
        .unwrap_or_default();
    if groups.is_empty() {
        return Err(AppError::DataUnavailable(format!(
            "no {} data for the requested range",
            spec.name
        )));
    }

    let mut order: Vec<String> = Vec::with_capacity(groups.len());
    let mut totals: HashMap<String, u64> = HashMap::with_capacity(groups.len());

    for group in groups {
        let dimension = group
            .dimensions
            .get(spec.dimension)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::ResponseShape(format!(
                    "missing dimensions.{} in {} record",
                    spec.dimension, spec.name
                ))
            })?
            .to_string();

        let value = group
            .sum
            .get(spec.value)
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                AppError::ResponseShape(format!(
                    "missing or non-integer sum.{} in {} record",
                    spec.value, spec.name
                ))
            })?;

        totals
            .entry(dimension.clone())
            .and_modify(|total| *total += value)
            .or_insert_with(|| {
                order.push(dimension.clone());
                value
            });
    }

    let mut entries: Vec<(String, u64)> = order
        .into_iter()
        .map(|dimension| {
            let value = totals[&dimension];
            (dimension, value)
        })
        .collect();

    if let Some(n) = spec.top_n {
        // Stable sort: equal values keep their encounter order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
    }

    Ok(MetricResult {
        metric: spec.name.to_string(),
        unit: spec.unit,
        values: entries.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::dto::Unit;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockExecutor {
        envelope: Value,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl MockExecutor {
        fn returning(envelope: Value) -> Self {
            Self {
                envelope,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QueryExecutor for MockExecutor {
        async fn execute(
            &self,
            query: &str,
            variables: Value,
        ) -> Result<GraphqlEnvelope, AppError> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), variables));
            Ok(serde_json::from_value(self.envelope.clone()).unwrap())
        }
    }

    fn per_day_envelope() -> Value {
        json!({
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
        })
    }

    fn query(leq_date: &str, periods: i64) -> AnalyticsQuery {
        AnalyticsQuery {
            leq_date: leq_date.to_string(),
            periods,
        }
    }

    fn service(executor: MockExecutor) -> (AnalyticsService, Arc<MockExecutor>) {
        let executor = Arc::new(executor);
        (
            AnalyticsService::new(executor.clone(), "abc123".to_string()),
            executor,
        )
    }

    #[tokio::test]
    async fn requests_extractor_returns_per_day_mapping() {
        let (svc, _) = service(MockExecutor::returning(per_day_envelope()));
        let result = svc.requests(&query("2024-12-16", 7)).await.unwrap();

        assert_eq!(result.metric, "requests");
        assert_eq!(result.unit, Unit::Count);
        assert_eq!(result.values.len(), 2);
        assert_eq!(result.values["2024-12-10"], 100);
        assert_eq!(result.values["2024-12-11"], 150);
    }

    #[tokio::test]
    async fn variables_carry_account_tag_and_inclusive_bounds() {
        let (svc, executor) = service(MockExecutor::returning(per_day_envelope()));
        svc.requests(&query("2024-12-16", 7)).await.unwrap();

        let seen = executor.seen.lock().unwrap();
        let (sent_query, variables) = &seen[0];
        assert!(sent_query.contains("requestsTotals"));
        assert_eq!(variables["accountTag"], "abc123");
        assert_eq!(variables["filter"]["datetime_geq"], "2024-12-10T00:00:00Z");
        assert_eq!(variables["filter"]["datetime_leq"], "2024-12-16T23:59:59Z");
        assert!(variables.get("errorFilter").is_none());
    }

    #[tokio::test]
    async fn error_band_metrics_send_the_status_filter() {
        let envelope = json!({
            "data": {
                "viewer": {
                    "accounts": [{
                        "errorStats": [
                            {"sum": {"requests": 4}, "dimensions": {"timestamp": "2024-12-10"}}
                        ]
                    }]
                }
            }
        });
        let (svc, executor) = service(MockExecutor::returning(envelope));
        svc.client_errors(&query("2024-12-16", 7)).await.unwrap();

        let seen = executor.seen.lock().unwrap();
        let variables = &seen[0].1;
        assert_eq!(variables["errorFilter"]["edgeResponseStatus_geq"], 400);
        assert_eq!(variables["errorFilter"]["edgeResponseStatus_lt"], 500);
    }

    #[tokio::test]
    async fn encrypted_metrics_send_only_the_upper_bound() {
        let envelope = json!({
            "data": {
                "viewer": {
                    "accounts": [{
                        "encryptedRequestsOverTime": [
                            {"sum": {"requests": 9}, "dimensions": {"timestamp": "2024-12-10"}}
                        ]
                    }]
                }
            }
        });
        let (svc, executor) = service(MockExecutor::returning(envelope));
        svc.encrypted_requests(&query("2024-12-16", 7)).await.unwrap();

        let seen = executor.seen.lock().unwrap();
        let variables = &seen[0].1;
        assert!(variables["errorFilter"]
            .get("edgeResponseStatus_geq")
            .is_none());
        assert_eq!(variables["errorFilter"]["edgeResponseStatus_lt"], 600);
    }

    #[tokio::test]
    async fn per_label_extractor_sums_repeated_dimensions() {
        let envelope = json!({
            "data": {
                "viewer": {
                    "accounts": [{
                        "locationTotals": [
                            {"sum": {"requests": 10}, "dimensions": {"clientCountryName": "US"}},
                            {"sum": {"requests": 5}, "dimensions": {"clientCountryName": "MX"}},
                            {"sum": {"requests": 7}, "dimensions": {"clientCountryName": "US"}}
                        ]
                    }]
                }
            }
        });
        let (svc, _) = service(MockExecutor::returning(envelope));
        let result = svc
            .requests_by_location(&query("2024-12-16", 7))
            .await
            .unwrap();

        assert_eq!(result.values["US"], 17);
        assert_eq!(result.values["MX"], 5);
        assert_eq!(result.values.len(), 2);
    }

    #[tokio::test]
    async fn top_n_keeps_largest_values_and_encounter_order_on_ties() {
        let groups: Vec<Value> = (0..7)
            .map(|i| {
                // Six labels tied at 10 after one larger entry.
                let requests = if i == 0 { 50 } else { 10 };
                json!({
                    "sum": {"requests": requests},
                    "dimensions": {"metric": format!("label-{i}")}
                })
            })
            .collect();
        let envelope = json!({
            "data": {"viewer": {"accounts": [{"httpProtocols": groups}]}}
        });
        let (svc, _) = service(MockExecutor::returning(envelope));
        let result = svc.http_versions(&query("2024-12-16", 7)).await.unwrap();

        // top_n = 5: the large entry plus the first four tied labels.
        assert_eq!(result.values.len(), 5);
        assert!(result.values.contains_key("label-0"));
        assert!(result.values.contains_key("label-4"));
        assert!(!result.values.contains_key("label-5"));
        assert!(!result.values.contains_key("label-6"));
    }

    #[tokio::test]
    async fn empty_group_list_is_data_unavailable() {
        let envelope = json!({
            "data": {"viewer": {"accounts": [{"requestsTotals": []}]}}
        });
        let (svc, _) = service(MockExecutor::returning(envelope));
        let err = svc.requests(&query("2024-12-16", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn missing_group_is_data_unavailable() {
        let envelope = json!({
            "data": {"viewer": {"accounts": [{}]}}
        });
        let (svc, _) = service(MockExecutor::returning(envelope));
        let err = svc.requests(&query("2024-12-16", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn null_group_is_data_unavailable() {
        let envelope = json!({
            "data": {"viewer": {"accounts": [{"requestsTotals": null}]}}
        });
        let (svc, _) = service(MockExecutor::returning(envelope));
        let err = svc.requests(&query("2024-12-16", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn record_missing_value_field_names_it() {
        let envelope = json!({
            "data": {
                "viewer": {
                    "accounts": [{
                        "requestsTotals": [
                            {"sum": {"bytes": 1}, "dimensions": {"timestamp": "2024-12-10"}}
                        ]
                    }]
                }
            }
        });
        let (svc, _) = service(MockExecutor::returning(envelope));
        let err = svc.requests(&query("2024-12-16", 7)).await.unwrap_err();
        assert!(
            matches!(err, AppError::ResponseShape(ref m) if m.contains("sum.requests")),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn provider_errors_without_data_surface_as_api_error() {
        let envelope = json!({
            "data": null,
            "errors": [{"message": "quota exceeded"}]
        });
        let (svc, _) = service(MockExecutor::returning(envelope));
        let err = svc.requests(&query("2024-12-16", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::Api(ref m) if m.contains("quota exceeded")));
    }

    #[tokio::test]
    async fn invalid_periods_never_reach_the_executor() {
        let (svc, executor) = service(MockExecutor::returning(per_day_envelope()));
        let err = svc.requests(&query("2024-12-16", 0)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(executor.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_date_never_reaches_the_executor() {
        let (svc, executor) = service(MockExecutor::returning(per_day_envelope()));
        let err = svc.requests(&query("2024-13-40", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(executor.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_metric_is_not_found() {
        let (svc, _) = service(MockExecutor::returning(per_day_envelope()));
        let err = svc
            .fetch("no_such_metric", &query("2024-12-16", 7))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
