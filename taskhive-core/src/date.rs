//! Due-date classification and display labels
//!
//! Maps a nullable calendar date to semantic buckets (overdue / today /
//! upcoming) and human-readable labels. Classification is deliberately
//! ignorant of completion status; the view model applies that separately.

use chrono::{Days, Local, NaiveDate};

/// Semantic buckets for a due date
///
/// At most one flag is set; a missing date sets none of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DueClass {
    pub is_overdue: bool,
    pub is_today: bool,
    pub is_upcoming: bool,
}

impl DueClass {
    /// True when the date fell into none of the buckets (i.e. it was absent)
    pub fn is_none(&self) -> bool {
        !self.is_overdue && !self.is_today && !self.is_upcoming
    }
}

/// Classify a due date against an explicit "today"
///
/// Overdue means the end of the date's calendar day is strictly before
/// now; with date-only granularity that reduces to `date < today`. Today
/// is never overdue regardless of the time of day.
pub fn classify_on(due: Option<NaiveDate>, today: NaiveDate) -> DueClass {
    let Some(date) = due else {
        return DueClass::default();
    };

    let is_today = date == today;
    let is_overdue = date < today;

    DueClass {
        is_overdue,
        is_today,
        is_upcoming: !is_overdue && !is_today,
    }
}

/// Classify a due date against the local calendar day
pub fn classify(due: Option<NaiveDate>) -> DueClass {
    classify_on(due, Local::now().date_naive())
}

/// Short label: "Today", "Tomorrow", else "Jan 5"
pub fn format_short_on(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(date) = due else {
        return String::new();
    };

    match date.signed_duration_since(today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%b %-d").to_string(),
    }
}

/// Short label relative to the local calendar day
pub fn format_short(due: Option<NaiveDate>) -> String {
    format_short_on(due, Local::now().date_naive())
}

/// Long label: "Today", "Tomorrow", "Yesterday", else "Jan 5, 2024"
pub fn format_long_on(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(date) = due else {
        return String::new();
    };

    match date.signed_duration_since(today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

/// Long label relative to the local calendar day
pub fn format_long(due: Option<NaiveDate>) -> String {
    format_long_on(due, Local::now().date_naive())
}

/// Input-form representation: "2024-01-05", or empty for no date
pub fn format_input(due: Option<NaiveDate>) -> String {
    match due {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Parse a YYYY-MM-DD input string
///
/// Malformed input degrades to `None` rather than failing, so a bad date
/// never crashes classification downstream.
pub fn parse_input_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Parse a due-date entry: "today", "tomorrow", or YYYY-MM-DD
///
/// The quick-add shorthand the front-end accepts; anything else is
/// handled exactly like [`parse_input_date`].
pub fn parse_due(input: &str) -> Option<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => parse_input_date(&today_string()),
        "tomorrow" => parse_input_date(&tomorrow_string()),
        other => parse_input_date(other),
    }
}

/// Today's date in input form
pub fn today_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Tomorrow's date in input form
pub fn tomorrow_string() -> String {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
