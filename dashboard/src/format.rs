//! Display formatting of amounts, sizes and timestamps, following the `ko-KR` locale.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use fleet_core::VoyageStatus;
use itertools::Itertools;

/// Formats `value` with thousands separators and at most three decimals.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = format!("{:.3}", rounded.abs());
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let grouped = int
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| String::from_utf8_lossy(c))
        .join(",");

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Won amounts have no minor unit and are rounded to whole won, e.g. `₩50,000`.
pub fn format_krw(amount: f64) -> String {
    let formatted = format_number(amount.round());
    match formatted.strip_prefix('-') {
        Some(v) => format!("-₩{v}"),
        None => format!("₩{formatted}"),
    }
}

pub fn format_quantity(quantity: f64) -> String {
    format!("{} kg", format_number(quantity))
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    match bytes {
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{:.1} MB", b as f64 / MB as f64),
    }
}

/// E.g. `2025. 1. 13.`
pub fn format_date(value: &NaiveDate) -> String {
    value.format("%Y. %-m. %-d.").to_string()
}

/// E.g. `2025. 1. 13. 오후 3:05:00`, a twelve hour clock with 오전/오후.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    let (pm, hour) = value.hour12();
    format!(
        "{} {} {hour}:{:02}:{:02}",
        format_date(&value.date()),
        if pm { "오후" } else { "오전" },
        value.minute(),
        value.second(),
    )
}

pub fn format_optional(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}

/// Style of the status badge of a voyage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusBadge {
    StatusComplete,
    StatusActive,
    StatusPending,
}

impl From<VoyageStatus> for StatusBadge {
    fn from(value: VoyageStatus) -> Self {
        match value {
            VoyageStatus::Complete => StatusBadge::StatusComplete,
            VoyageStatus::InProgress => StatusBadge::StatusActive,
            VoyageStatus::Docked => StatusBadge::StatusPending,
        }
    }
}
