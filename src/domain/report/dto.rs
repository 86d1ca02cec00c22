use serde::Serialize;

/// Returned after a report has been written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// File name under the configured report directory; also the id used by
    /// the download route.
    pub file: String,
}
