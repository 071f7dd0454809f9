//! Project-specific utilities live here.

use chrono::NaiveDate;

/// Long-form date used on detail pages, e.g. "September 2, 1973".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// ISO form used to prefill date inputs; empty when the date is absent.
pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
