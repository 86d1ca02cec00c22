//! Declarative catalog of the analytics metrics this service can resolve.
//!
//! Each entry pairs a GraphQL query template with the coordinates needed to
//! unwrap its response: the group alias under `accounts[0]`, the dimension
//! key, and the value key inside `sum`. Adding a metric is a data addition
//! here, not new extraction code.

use super::dto::{Aggregation, Unit};

/// Optional `edgeResponseStatus` band injected as the `$errorFilter`
/// variable. `geq` is omitted when only an upper bound applies.
#[derive(Debug, Clone, Copy)]
pub struct StatusBand {
    pub geq: Option<u16>,
    pub lt: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub name: &'static str,
    pub query: &'static str,
    /// Alias of the group list under `data.viewer.accounts[0]`.
    pub group: &'static str,
    /// Key inside each record's `dimensions` object.
    pub dimension: &'static str,
    /// Key inside each record's `sum` object.
    pub value: &'static str,
    pub aggregation: Aggregation,
    pub unit: Unit,
    /// Keep only the N largest values (per-label metrics).
    pub top_n: Option<usize>,
    pub status_band: Option<StatusBand>,
}

const REQUESTS_QUERY: &str = r#"
    query GetRequests($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                requestsTotals: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 2000
                ) {
                    sum {
                        requests
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const BANDWIDTH_QUERY: &str = r#"
    query GetBandwidth($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                bandwidthTotals: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 2000
                ) {
                    sum {
                        bytes
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const VISITS_QUERY: &str = r#"
    query GetVisits($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                statsOverTime: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 2000
                ) {
                    sum {
                        visits
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const PAGE_VIEWS_QUERY: &str = r#"
    query GetPageViews($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                statsOverTime: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 2000
                ) {
                    sum {
                        pageViews
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const REQUESTS_BY_LOCATION_QUERY: &str = r#"
    query GetRequestsLocations($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                locationTotals: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 10,
                    orderBy: [sum_requests_DESC]
                ) {
                    sum {
                        requests
                    }
                    dimensions {
                        clientCountryName
                    }
                }
            }
        }
    }
"#;

const BANDWIDTH_BY_LOCATION_QUERY: &str = r#"
    query GetBandwidthLocations($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                locationTotals: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 10,
                    orderBy: [sum_bytes_DESC]
                ) {
                    sum {
                        bytes
                    }
                    dimensions {
                        clientCountryName
                    }
                }
            }
        }
    }
"#;

const HTTP_VERSIONS_QUERY: &str = r#"
    query GetHttpProtocols($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                httpProtocols: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 5,
                    orderBy: [sum_requests_DESC]
                ) {
                    sum {
                        requests
                    }
                    dimensions {
                        metric: clientRequestHTTPProtocol
                    }
                }
            }
        }
    }
"#;

const SSL_VERSIONS_QUERY: &str = r#"
    query GetSSLVersions($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                sslVersions: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 5
                ) {
                    sum {
                        requests
                    }
                    dimensions {
                        metric: clientSSLProtocol
                    }
                }
            }
        }
    }
"#;

const CONTENT_TYPES_QUERY: &str = r#"
    query GetTopContentTypes($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                contentTypes: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 5,
                    orderBy: [sum_requests_DESC]
                ) {
                    sum {
                        requests
                    }
                    dimensions {
                        metric: edgeResponseContentTypeName
                    }
                }
            }
        }
    }
"#;

const CACHED_REQUESTS_QUERY: &str = r#"
    query GetCachedRequests($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                cachedRequestsOverTime: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 2000
                ) {
                    sum {
                        cachedRequests
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const CACHED_BANDWIDTH_QUERY: &str = r#"
    query GetCachedBandwidth($accountTag: String, $filter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                cachedBandwidthOverTime: httpRequestsOverviewAdaptiveGroups(
                    filter: $filter,
                    limit: 2000
                ) {
                    sum {
                        cachedBytes
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const ENCRYPTED_REQUESTS_QUERY: &str = r#"
    query GetEncryptedRequests($accountTag: String, $filter: Filter, $errorFilter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                encryptedRequestsOverTime: httpRequestsOverviewAdaptiveGroups(
                    filter: {AND: [$filter, $errorFilter]},
                    limit: 2000
                ) {
                    sum {
                        requests
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const ENCRYPTED_BANDWIDTH_QUERY: &str = r#"
    query GetEncryptedBandwidth($accountTag: String, $filter: Filter, $errorFilter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                encryptedBandwidthOverTime: httpRequestsOverviewAdaptiveGroups(
                    filter: {AND: [$filter, $errorFilter]},
                    limit: 2000
                ) {
                    sum {
                        bytes
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

const ERROR_TOTALS_QUERY: &str = r#"
    query GetErrorTotals($accountTag: String, $filter: Filter, $errorFilter: Filter) {
        viewer {
            accounts(filter: {accountTag: $accountTag}) {
                errorStats: httpRequestsOverviewAdaptiveGroups(
                    filter: {AND: [$filter, $errorFilter]},
                    limit: 2000
                ) {
                    sum {
                        requests
                    }
                    dimensions {
                        timestamp: date
                    }
                }
            }
        }
    }
"#;

pub const CATALOG: &[MetricSpec] = &[
    MetricSpec {
        name: "requests",
        query: REQUESTS_QUERY,
        group: "requestsTotals",
        dimension: "timestamp",
        value: "requests",
        aggregation: Aggregation::PerDay,
        unit: Unit::Count,
        top_n: None,
        status_band: None,
    },
    MetricSpec {
        name: "bandwidth",
        query: BANDWIDTH_QUERY,
        group: "bandwidthTotals",
        dimension: "timestamp",
        value: "bytes",
        aggregation: Aggregation::PerDay,
        unit: Unit::Bytes,
        top_n: None,
        status_band: None,
    },
    MetricSpec {
        name: "visits",
        query: VISITS_QUERY,
        group: "statsOverTime",
        dimension: "timestamp",
        value: "visits",
        aggregation: Aggregation::PerDay,
        unit: Unit::Count,
        top_n: None,
        status_band: None,
    },
    MetricSpec {
        name: "page_views",
        query: PAGE_VIEWS_QUERY,
        group: "statsOverTime",
        dimension: "timestamp",
        value: "pageViews",
        aggregation: Aggregation::PerDay,
        unit: Unit::Count,
        top_n: None,
        status_band: None,
    },
    MetricSpec {
        name: "requests_by_location",
        query: REQUESTS_BY_LOCATION_QUERY,
        group: "locationTotals",
        dimension: "clientCountryName",
        value: "requests",
        aggregation: Aggregation::PerLabel,
        unit: Unit::Count,
        top_n: Some(10),
        status_band: None,
    },
    MetricSpec {
        name: "bandwidth_by_location",
        query: BANDWIDTH_BY_LOCATION_QUERY,
        group: "locationTotals",
        dimension: "clientCountryName",
        value: "bytes",
        aggregation: Aggregation::PerLabel,
        unit: Unit::Bytes,
        top_n: Some(10),
        status_band: None,
    },
    MetricSpec {
        name: "http_versions",
        query: HTTP_VERSIONS_QUERY,
        group: "httpProtocols",
        dimension: "metric",
        value: "requests",
        aggregation: Aggregation::PerLabel,
        unit: Unit::Count,
        top_n: Some(5),
        status_band: None,
    },
    MetricSpec {
        name: "ssl_versions",
        query: SSL_VERSIONS_QUERY,
        group: "sslVersions",
        dimension: "metric",
        value: "requests",
        aggregation: Aggregation::PerLabel,
        unit: Unit::Count,
        top_n: Some(5),
        status_band: None,
    },
    MetricSpec {
        name: "content_types",
        query: CONTENT_TYPES_QUERY,
        group: "contentTypes",
        dimension: "metric",
        value: "requests",
        aggregation: Aggregation::PerLabel,
        unit: Unit::Count,
        top_n: Some(5),
        status_band: None,
    },
    MetricSpec {
        name: "cached_requests",
        query: CACHED_REQUESTS_QUERY,
        group: "cachedRequestsOverTime",
        dimension: "timestamp",
        value: "cachedRequests",
        aggregation: Aggregation::PerDay,
        unit: Unit::Count,
        top_n: None,
        status_band: None,
    },
    MetricSpec {
        name: "cached_bandwidth",
        query: CACHED_BANDWIDTH_QUERY,
        group: "cachedBandwidthOverTime",
        dimension: "timestamp",
        value: "cachedBytes",
        aggregation: Aggregation::PerDay,
        unit: Unit::Bytes,
        top_n: None,
        status_band: None,
    },
    MetricSpec {
        name: "encrypted_requests",
        query: ENCRYPTED_REQUESTS_QUERY,
        group: "encryptedRequestsOverTime",
        dimension: "timestamp",
        value: "requests",
        aggregation: Aggregation::PerDay,
        unit: Unit::Count,
        top_n: None,
        status_band: Some(StatusBand { geq: None, lt: 600 }),
    },
    MetricSpec {
        name: "encrypted_bandwidth",
        query: ENCRYPTED_BANDWIDTH_QUERY,
        group: "encryptedBandwidthOverTime",
        dimension: "timestamp",
        value: "bytes",
        aggregation: Aggregation::PerDay,
        unit: Unit::Bytes,
        top_n: None,
        status_band: Some(StatusBand { geq: None, lt: 600 }),
    },
    MetricSpec {
        name: "client_errors",
        query: ERROR_TOTALS_QUERY,
        group: "errorStats",
        dimension: "timestamp",
        value: "requests",
        aggregation: Aggregation::PerDay,
        unit: Unit::Count,
        top_n: None,
        status_band: Some(StatusBand {
            geq: Some(400),
            lt: 500,
        }),
    },
    MetricSpec {
        name: "server_errors",
        query: ERROR_TOTALS_QUERY,
        group: "errorStats",
        dimension: "timestamp",
        value: "requests",
        aggregation: Aggregation::PerDay,
        unit: Unit::Count,
        top_n: None,
        status_band: Some(StatusBand {
            geq: Some(500),
            lt: 600,
        }),
    },
];

pub fn find(name: &str) -> Option<&'static MetricSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}
