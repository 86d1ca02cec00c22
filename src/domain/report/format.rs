//! Display formatting for metric totals, shared by the PDF tables.

use crate::domain::analytics::dto::Unit;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Abbreviated count for headline totals: `1.50k`, `2.10M`, plain below 1000.
pub fn format_count(total: u64) -> String {
    if total >= 1_000_000 {
        format!("{:.2}M", total as f64 / 1_000_000.0)
    } else if total >= 1_000 {
        format!("{:.2}k", total as f64 / 1_000.0)
    } else {
        total.to_string()
    }
}

/// Exact count with thousands separators, for table cells.
pub fn format_count_grouped(total: u64) -> String {
    group_thousands(&total.to_string())
}

/// Byte totals rendered as MB with two decimals: `1,024.00 MB`.
pub fn format_bytes(total: u64) -> String {
    let mb = total as f64 / BYTES_PER_MB;
    let formatted = format!("{mb:.2}");
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));
    format!("{}.{} MB", group_thousands(int_part), frac_part)
}

pub fn format_value(unit: Unit, value: u64) -> String {
    match unit {
        Unit::Count => format_count_grouped(value),
        Unit::Bytes => format_bytes(value),
    }
}

pub fn format_total(unit: Unit, total: u64) -> String {
    match unit {
        Unit::Count => format_count(total),
        Unit::Bytes => format_bytes(total),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_abbreviated() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_500), "1.50k");
        assert_eq!(format_count(2_100_000), "2.10M");
    }

    #[test]
    fn grouped_counts_use_thousands_separators() {
        assert_eq!(format_count_grouped(0), "0");
        assert_eq!(format_count_grouped(999), "999");
        assert_eq!(format_count_grouped(1_000), "1,000");
        assert_eq!(format_count_grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn bytes_render_as_mb_with_two_decimals() {
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(1_572_864), "1.50 MB");
        // 1 GiB = 1,024 MB
        assert_eq!(format_bytes(1_073_741_824), "1,024.00 MB");
    }

    #[test]
    fn format_value_dispatches_on_unit() {
        assert_eq!(format_value(Unit::Count, 1_000), "1,000");
        assert_eq!(format_value(Unit::Bytes, 1_048_576), "1.00 MB");
    }
}
