use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{fonts, Alignment, Document, Element, SimplePageDecorator};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::analytics_dto::AnalyticsQuery;
use crate::api::dto::report_dto::ReportRequest;
use crate::core::config::Settings;
use crate::domain::analytics::dto::MetricResult;
use crate::domain::analytics::range::ReportRange;
use crate::domain::analytics::service::AnalyticsService;
use crate::domain::report::dto::ReportSummary;
use crate::domain::report::format::{format_total, format_value};
use crate::errors::{internal_error, AppError};

const TITLE_FONT_SIZE: u8 = 16;
const SECTION_FONT_SIZE: u8 = 14;
const PAGE_MARGIN_MM: i32 = 10;

/// Assembles the client-facing PDF report: every catalog metric is fetched
/// for the requested window, then laid out as titled sections and tables.
/// A metric that fails aborts the whole report; "no data" is reported to the
/// caller, never rendered as an empty section.
pub struct ReportService {
    analytics: Arc<AnalyticsService>,
    settings: Arc<Settings>,
}

struct ReportData {
    requests: MetricResult,
    bandwidth: MetricResult,
    visits: MetricResult,
    page_views: MetricResult,
    requests_by_location: MetricResult,
    bandwidth_by_location: MetricResult,
    http_versions: MetricResult,
    ssl_versions: MetricResult,
    content_types: MetricResult,
    cached_requests: MetricResult,
    cached_bandwidth: MetricResult,
    encrypted_requests: MetricResult,
    encrypted_bandwidth: MetricResult,
    client_errors: MetricResult,
    server_errors: MetricResult,
}

impl ReportService {
    pub fn new(analytics: Arc<AnalyticsService>, settings: Arc<Settings>) -> Self {
        Self {
            analytics,
            settings,
        }
    }

    pub async fn generate(&self, req: &ReportRequest) -> Result<ReportSummary, AppError> {
        req.validate()
            .map_err(|err| AppError::InvalidInput(err.to_string()))?;
        let range = ReportRange::resolve(&req.leq_date, req.periods)?;

        let q = AnalyticsQuery {
            leq_date: req.leq_date.clone(),
            periods: req.periods,
        };
        let data = self.collect(&q).await?;

        fs::create_dir_all(&self.settings.report_dir).map_err(internal_error)?;
        let file = format!(
            "{}_report_{}.pdf",
            slugify(&req.client_name),
            Uuid::new_v4()
        );
        let path = self.settings.report_dir.join(&file);
        self.render(&req.client_name, &range, &data, &path)?;

        info!(file = %file, "report generated");
        Ok(ReportSummary { file })
    }

    /// One query in flight at a time; order mirrors the report sections.
    async fn collect(&self, q: &AnalyticsQuery) -> Result<ReportData, AppError> {
        Ok(ReportData {
            requests: self.analytics.requests(q).await?,
            bandwidth: self.analytics.bandwidth(q).await?,
            visits: self.analytics.visits(q).await?,
            page_views: self.analytics.page_views(q).await?,
            requests_by_location: self.analytics.requests_by_location(q).await?,
            bandwidth_by_location: self.analytics.bandwidth_by_location(q).await?,
            http_versions: self.analytics.http_versions(q).await?,
            ssl_versions: self.analytics.ssl_versions(q).await?,
            content_types: self.analytics.content_types(q).await?,
            cached_requests: self.analytics.cached_requests(q).await?,
            cached_bandwidth: self.analytics.cached_bandwidth(q).await?,
            encrypted_requests: self.analytics.encrypted_requests(q).await?,
            encrypted_bandwidth: self.analytics.encrypted_bandwidth(q).await?,
            client_errors: self.analytics.client_errors(q).await?,
            server_errors: self.analytics.server_errors(q).await?,
        })
    }

    fn render(
        &self,
        client_name: &str,
        range: &ReportRange,
        data: &ReportData,
        path: &Path,
    ) -> Result<(), AppError> {
        let family = fonts::from_files(
            &self.settings.font_dir,
            &self.settings.font_family,
            None,
        )
        .map_err(|err| {
            AppError::Render(format!(
                "failed to load font family '{}' from {}: {err}",
                self.settings.font_family,
                self.settings.font_dir.display()
            ))
        })?;

        let mut doc = Document::new(family);
        doc.set_title(format!("Network report: {client_name}"));
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(PAGE_MARGIN_MM);
        doc.set_page_decorator(decorator);

        doc.push(
            Paragraph::new(format!("Network report: {client_name}"))
                .aligned(Alignment::Center)
                .styled(Style::new().bold().with_font_size(TITLE_FONT_SIZE)),
        );
        doc.push(
            Paragraph::new(format!("Period: {} to {}", range.start, range.end))
                .aligned(Alignment::Center),
        );
        doc.push(
            Paragraph::new(format!("Generated: {}", Utc::now().date_naive()))
                .aligned(Alignment::Center),
        );
        doc.push(Break::new(1.5));

        section(&mut doc, "General statistics");
        doc.push(Paragraph::new(totals_line(&[
            &data.requests,
            &data.bandwidth,
            &data.visits,
            &data.page_views,
        ])));
        doc.push(Break::new(0.5));
        push_daily_table(
            &mut doc,
            &[
                &data.requests,
                &data.bandwidth,
                &data.visits,
                &data.page_views,
            ],
        )?;
        doc.push(Break::new(1.0));
        push_country_table(
            &mut doc,
            &data.requests_by_location,
            &data.bandwidth_by_location,
        )?;

        section(&mut doc, "Network");
        push_label_table(&mut doc, &data.http_versions)?;
        doc.push(Break::new(0.5));
        push_label_table(&mut doc, &data.ssl_versions)?;
        doc.push(Break::new(0.5));
        push_label_table(&mut doc, &data.content_types)?;

        section(&mut doc, "Security");
        doc.push(Paragraph::new(totals_line(&[
            &data.encrypted_requests,
            &data.encrypted_bandwidth,
        ])));
        doc.push(Break::new(0.5));
        push_daily_table(
            &mut doc,
            &[&data.encrypted_requests, &data.encrypted_bandwidth],
        )?;

        section(&mut doc, "Cache");
        doc.push(Paragraph::new(totals_line(&[
            &data.cached_requests,
            &data.cached_bandwidth,
        ])));
        doc.push(Break::new(0.5));
        push_daily_table(&mut doc, &[&data.cached_requests, &data.cached_bandwidth])?;

        section(&mut doc, "Errors");
        doc.push(Paragraph::new(totals_line(&[
            &data.client_errors,
            &data.server_errors,
        ])));
        doc.push(Break::new(0.5));
        push_daily_table(&mut doc, &[&data.client_errors, &data.server_errors])?;

        doc.render_to_file(path).map_err(|err| {
            AppError::Render(format!("failed to write {}: {err}", path.display()))
        })
    }
}

fn section(doc: &mut Document, title: &str) {
    doc.push(Break::new(1.0));
    doc.push(
        Paragraph::new(title).styled(Style::new().bold().with_font_size(SECTION_FONT_SIZE)),
    );
    doc.push(Break::new(0.5));
}

fn render_err(err: genpdf::error::Error) -> AppError {
    AppError::Render(err.to_string())
}

fn totals_line(metrics: &[&MetricResult]) -> String {
    let parts: Vec<String> = metrics
        .iter()
        .map(|m| format!("{}: {}", humanize(&m.metric), format_total(m.unit, m.total())))
        .collect();
    parts.join(", ")
}

/// "Date | metric1 | metric2 | ..." with one row per day in the union of all
/// columns; a day missing from a column renders as zero.
fn push_daily_table(doc: &mut Document, columns: &[&MetricResult]) -> Result<(), AppError> {
    let mut table = TableLayout::new(vec![1; columns.len() + 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = table
        .row()
        .element(Paragraph::new("Date").styled(Style::new().bold()));
    for column in columns {
        header = header.element(
            Paragraph::new(humanize(&column.metric)).styled(Style::new().bold()),
        );
    }
    header.push().map_err(render_err)?;

    for (date, values) in daily_rows(columns) {
        let mut row = table.row().element(Paragraph::new(date));
        for (column, value) in columns.iter().zip(values) {
            row = row.element(Paragraph::new(format_value(column.unit, value)));
        }
        row.push().map_err(render_err)?;
    }

    doc.push(table);
    Ok(())
}

fn push_label_table(doc: &mut Document, metric: &MetricResult) -> Result<(), AppError> {
    let mut table = TableLayout::new(vec![2, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    table
        .row()
        .element(Paragraph::new(humanize(&metric.metric)).styled(Style::new().bold()))
        .element(Paragraph::new("Requests").styled(Style::new().bold()))
        .push()
        .map_err(render_err)?;

    for (label, value) in label_rows(metric) {
        table
            .row()
            .element(Paragraph::new(label))
            .element(Paragraph::new(format_value(metric.unit, value)))
            .push()
            .map_err(render_err)?;
    }

    doc.push(table);
    Ok(())
}

fn push_country_table(
    doc: &mut Document,
    requests: &MetricResult,
    bandwidth: &MetricResult,
) -> Result<(), AppError> {
    let mut table = TableLayout::new(vec![2, 1, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    table
        .row()
        .element(Paragraph::new("Country").styled(Style::new().bold()))
        .element(Paragraph::new("Requests").styled(Style::new().bold()))
        .element(Paragraph::new("Bandwidth").styled(Style::new().bold()))
        .push()
        .map_err(render_err)?;

    for (country, request_count, bytes) in country_rows(requests, bandwidth) {
        table
            .row()
            .element(Paragraph::new(country))
            .element(Paragraph::new(format_value(requests.unit, request_count)))
            .element(Paragraph::new(format_value(bandwidth.unit, bytes)))
            .push()
            .map_err(render_err)?;
    }

    doc.push(table);
    Ok(())
}

fn daily_rows(columns: &[&MetricResult]) -> Vec<(String, Vec<u64>)> {
    let mut dates: BTreeSet<&String> = BTreeSet::new();
    for column in columns {
        dates.extend(column.values.keys());
    }
    dates
        .into_iter()
        .map(|date| {
            let values = columns
                .iter()
                .map(|column| column.values.get(date).copied().unwrap_or(0))
                .collect();
            (date.clone(), values)
        })
        .collect()
}

/// Labels ordered by descending value; ties keep the map's key order.
fn label_rows(metric: &MetricResult) -> Vec<(String, u64)> {
    let mut rows: Vec<(String, u64)> = metric
        .values
        .iter()
        .map(|(label, value)| (label.clone(), *value))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Joined per-country rows, ordered by request count. A country present in
/// the requests map but absent from the bandwidth map reports zero bytes.
fn country_rows(
    requests: &MetricResult,
    bandwidth: &MetricResult,
) -> Vec<(String, u64, u64)> {
    let mut rows: Vec<(String, u64, u64)> = requests
        .values
        .iter()
        .map(|(country, count)| {
            let bytes = bandwidth.values.get(country).copied().unwrap_or(0);
            (country.clone(), *count, bytes)
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

fn humanize(metric: &str) -> String {
    let mut text = metric.replace('_', " ");
    if let Some(first) = text.get(0..1) {
        let upper = first.to_uppercase();
        text.replace_range(0..1, &upper);
    }
    text
}

fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if slug.is_empty() {
        "client".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::dto::Unit;
    use std::collections::BTreeMap;

    fn metric(name: &str, unit: Unit, pairs: &[(&str, u64)]) -> MetricResult {
        let values: BTreeMap<String, u64> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        MetricResult {
            metric: name.to_string(),
            unit,
            values,
        }
    }

    #[test]
    fn slugify_keeps_alphanumerics_and_joins_words() {
        assert_eq!(slugify("ACME Corporation"), "acme_corporation");
        assert_eq!(slugify("  Café del Mar  "), "caf_del_mar");
        assert_eq!(slugify("///"), "client");
    }

    #[test]
    fn humanize_replaces_underscores_and_capitalizes() {
        assert_eq!(humanize("page_views"), "Page views");
        assert_eq!(humanize("requests"), "Requests");
    }

    #[test]
    fn daily_rows_union_missing_days_as_zero() {
        let requests = metric(
            "requests",
            Unit::Count,
            &[("2024-12-10", 100), ("2024-12-11", 150)],
        );
        let errors = metric("client_errors", Unit::Count, &[("2024-12-11", 3)]);

        let rows = daily_rows(&[&requests, &errors]);
        assert_eq!(
            rows,
            vec![
                ("2024-12-10".to_string(), vec![100, 0]),
                ("2024-12-11".to_string(), vec![150, 3]),
            ]
        );
    }

    #[test]
    fn country_rows_are_ordered_by_requests_and_default_bytes_to_zero() {
        let requests = metric(
            "requests_by_location",
            Unit::Count,
            &[("MX", 5), ("US", 17)],
        );
        let bandwidth = metric("bandwidth_by_location", Unit::Bytes, &[("US", 2048)]);

        let rows = country_rows(&requests, &bandwidth);
        assert_eq!(
            rows,
            vec![
                ("US".to_string(), 17, 2048),
                ("MX".to_string(), 5, 0),
            ]
        );
    }

    #[test]
    fn label_rows_are_ordered_by_value() {
        let protocols = metric(
            "http_versions",
            Unit::Count,
            &[("HTTP/1.1", 20), ("HTTP/2", 70), ("HTTP/3", 10)],
        );
        let rows = label_rows(&protocols);
        assert_eq!(rows[0].0, "HTTP/2");
        assert_eq!(rows[2].0, "HTTP/3");
    }

    #[test]
    fn totals_line_reports_each_metric_once() {
        let requests = metric("requests", Unit::Count, &[("2024-12-10", 1500)]);
        let bandwidth = metric("bandwidth", Unit::Bytes, &[("2024-12-10", 1_048_576)]);
        let line = totals_line(&[&requests, &bandwidth]);
        assert_eq!(line, "Requests: 1.50k, Bandwidth: 1.00 MB");
    }
}
