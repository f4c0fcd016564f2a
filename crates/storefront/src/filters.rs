//! Custom Askama template filters.
//!
//! Askama resolves `|name` in templates against this module; templates that
//! use these filters need `use crate::filters;` next to their struct.

use std::fmt::Display;

use chrono::Datelike;

/// Render an order identifier as `#<id>`.
///
/// A leading `#` already present in the value is not doubled. The result is
/// still HTML-escaped by the template.
///
/// Usage in templates: `{{ order.number|order_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn order_label(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let value = value.to_string();
    let id = value.trim().trim_start_matches('#');
    Ok(format!("#{id}"))
}

/// Year for the footer copyright line, in UTC.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Utc::now().year())
}
