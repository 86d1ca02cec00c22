use chrono::{Duration, NaiveDate};

use crate::errors::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive reporting window, resolved from an end date and a day count.
///
/// Both bounds are calendar days; the GraphQL filter bounds derived from them
/// span the first instant of the start day through the last instant of the
/// end day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRange {
    /// Resolves a window ending at `leq_date` (inclusive, `YYYY-MM-DD`) and
    /// spanning `periods` days. `periods == 1` yields a single-day window.
    pub fn resolve(leq_date: &str, periods: i64) -> Result<Self, AppError> {
        if periods < 1 {
            return Err(AppError::InvalidInput(format!(
                "periods must be a positive integer, got {periods}"
            )));
        }

        let end = NaiveDate::parse_from_str(leq_date, DATE_FORMAT).map_err(|_| {
            AppError::InvalidInput(format!(
                "invalid date format: '{leq_date}'; use ISO 8601 format 'YYYY-MM-DD'"
            ))
        })?;

        let back = Duration::try_days(periods - 1).ok_or_else(|| {
            AppError::InvalidInput(format!("periods out of range: {periods}"))
        })?;
        let start = end.checked_sub_signed(back).ok_or_else(|| {
            AppError::InvalidInput(format!("periods out of range: {periods}"))
        })?;

        Ok(Self { start, end })
    }

    /// Lower filter bound: first instant of the start day.
    pub fn datetime_geq(&self) -> String {
        format!("{}T00:00:00Z", self.start.format(DATE_FORMAT))
    }

    /// Upper filter bound: last instant of the end day.
    pub fn datetime_leq(&self) -> String {
        format!("{}T23:59:59Z", self.end.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn window_spans_periods_days_back_from_end() {
        let range = ReportRange::resolve("2024-12-16", 7).unwrap();
        assert_eq!(range.start, date("2024-12-10"));
        assert_eq!(range.end, date("2024-12-16"));
        assert!(range.start <= range.end);
    }

    #[test]
    fn single_period_is_a_single_day_window() {
        let range = ReportRange::resolve("2024-12-16", 1).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn window_crosses_month_and_year_boundaries() {
        let range = ReportRange::resolve("2025-01-03", 7).unwrap();
        assert_eq!(range.start, date("2024-12-28"));
    }

    #[test]
    fn negative_periods_are_rejected() {
        assert!(matches!(
            ReportRange::resolve("2024-12-16", -1),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_periods_are_rejected() {
        // A zero-day window would invert the bounds; treated as caller error.
        assert!(matches!(
            ReportRange::resolve("2024-12-16", 0),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn malformed_dates_never_produce_a_default_range() {
        for bad in ["2024-13-40", "not-a-date", "2024/12/16", ""] {
            assert!(matches!(
                ReportRange::resolve(bad, 7),
                Err(AppError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn filter_bounds_cover_whole_days() {
        let range = ReportRange::resolve("2024-12-16", 7).unwrap();
        assert_eq!(range.datetime_geq(), "2024-12-10T00:00:00Z");
        assert_eq!(range.datetime_leq(), "2024-12-16T23:59:59Z");
    }
}
