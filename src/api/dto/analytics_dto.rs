use serde::{Deserialize, Serialize};
use validator::Validate;

/// Window parameters accepted by every analytics route: the inclusive end
/// date and how many days the window spans.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyticsQuery {
    /// End of the range, inclusive, `YYYY-MM-DD`.
    pub leq_date: String,

    /// Number of days in the window; 1 means a single-day window.
    #[validate(range(min = 1))]
    pub periods: i64,
}
