use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/reports`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportRequest {
    /// Client display name, used on the title page and in the file name.
    #[validate(length(min = 1))]
    pub client_name: String,

    /// End of the reporting window, inclusive, `YYYY-MM-DD`.
    pub leq_date: String,

    /// Number of days in the window.
    #[validate(range(min = 1))]
    pub periods: i64,
}
