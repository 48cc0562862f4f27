//! Rendering instants for humans and for datetime-input widgets.
//!
//! Both functions feed UI render paths directly, so they never panic and
//! never return a rich error: display falls back to `"-"`, the widget value
//! to `""` (the widget's natural empty state).

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;

use crate::convert::to_zone;
use crate::parse::parse_utc;
use crate::stamp::BackendUtc;
use crate::timezone::TimezoneSpec;

/// Exact textual convention for timestamps sent to the backend.
pub const BACKEND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value shape required by native `datetime-local` input widgets.
pub const INPUT_WIDGET_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Sentinel shown in list columns when a timestamp cannot be rendered.
pub const DISPLAY_FALLBACK: &str = "-";

/// Render a backend timestamp in the user's zone under a caller pattern
/// built from the tokens `YYYY MM DD HH mm ss` (e.g. `"DD/MM/YYYY HH:mm"`).
/// An absent/empty `tz` falls back to [`crate::timezone::DEFAULT_ZONE`].
pub fn format_display(raw: BackendUtc<'_>, tz: Option<&str>, pattern: &str) -> String {
    let Some(instant) = parse_utc(raw) else {
        return DISPLAY_FALLBACK.to_string();
    };
    let spec = TimezoneSpec::resolve_or_default(tz);
    match to_zone(instant, &spec) {
        Some(local) => render_pattern(local, pattern),
        None => DISPLAY_FALLBACK.to_string(),
    }
}

/// Render a backend timestamp as a `datetime-local` widget value.
///
/// A date-only backend value is never run through zone conversion: it was
/// never timezone-qualified, and shifting it by an offset could move it to
/// an adjacent calendar day. The date is kept as-is and `default_time`
/// (`HH:MM` or `HH:MM:SS`, midnight when unparseable) is appended.
pub fn format_input_value(raw: BackendUtc<'_>, tz: Option<&str>, default_time: &str) -> String {
    let trimmed = raw.as_str().trim();

    if is_date_only(trimmed) {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            let time = parse_default_time(default_time);
            return date.and_time(time).format(INPUT_WIDGET_FORMAT).to_string();
        }
        return String::new();
    }

    let Some(instant) = parse_utc(raw) else {
        return String::new();
    };
    let spec = TimezoneSpec::resolve_or_default(tz);
    match to_zone(instant, &spec) {
        Some(local) => local.format(INPUT_WIDGET_FORMAT).to_string(),
        None => String::new(),
    }
}

fn is_date_only(s: &str) -> bool {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$")
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}

fn parse_default_time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default())
}

/// Substitute display tokens with zero-padded field values. Replacements
/// only ever insert digits, so no token can be formed by a replacement.
pub(crate) fn render_pattern(local: NaiveDateTime, pattern: &str) -> String {
    pattern
        .replace("YYYY", &format!("{:04}", local.year()))
        .replace("MM", &format!("{:02}", local.month()))
        .replace("DD", &format!("{:02}", local.day()))
        .replace("HH", &format!("{:02}", local.hour()))
        .replace("mm", &format!("{:02}", local.minute()))
        .replace("ss", &format!("{:02}", local.second()))
}
