//! Backend timestamp parsing.
//!
//! The backend persists timestamps as naive UTC strings, usually
//! `"YYYY-MM-DD HH:mm:ss"`, sometimes with microseconds, sometimes with
//! minutes only or as a bare date. Third-party feeds occasionally hand us
//! proper ISO-8601 with a `Z` or a numeric offset. Everything lands on the
//! same canonical `DateTime<Utc>`; a naive string is always anchored as UTC
//! here, never as local time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::stamp::BackendUtc;

/// Accepted naive shapes, in priority order. Each attempt is strict; the
/// first format that parses wins.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Offset-carrying shapes tried after RFC3339, covering space-separated and
/// minutes-only variants. `%z` accepts both `+07:00` and `+0700`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Parse a backend timestamp into a UTC instant. Returns `None` for empty
/// or unparseable input; never panics.
pub fn parse_utc(raw: BackendUtc<'_>) -> Option<DateTime<Utc>> {
    let raw = raw.as_str().trim();
    if raw.is_empty() {
        return None;
    }

    if has_explicit_marker(raw) {
        return parse_offset_aware(raw);
    }

    let stripped = strip_fraction(raw);
    parse_naive(&stripped).map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// True when the string declares its own anchoring: a `Z` suffix or a
/// trailing `±HH:MM` / `±HHMM` offset. A trailing date segment like `-06-15`
/// does not match because of the interior `-`.
fn has_explicit_marker(s: &str) -> bool {
    if s.ends_with('Z') || s.ends_with('z') {
        return true;
    }
    Regex::new(r"[+-]\d{2}:?\d{2}$")
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}

fn parse_offset_aware(raw: &str) -> Option<DateTime<Utc>> {
    // `Z`-suffixed input is UTC already; drop the marker and reuse the
    // naive path so space-separated variants like "2025-01-01 07:00Z" work.
    if let Some(body) = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        let stripped = strip_fraction(body.trim_end());
        return parse_naive(&stripped).map(|ndt| Utc.from_utc_datetime(&ndt));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    None
}

/// Drop a fractional-seconds suffix (`.123456`). The backend convention has
/// whole-second precision; sub-second digits are truncated, not rounded.
pub(crate) fn strip_fraction(s: &str) -> String {
    match Regex::new(r"\.\d+$") {
        Ok(re) => re.replace(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Parse a naive calendar/time string. Shared by the UTC parser and the
/// widget-input normalizer; anchoring is the caller's business.
///
/// The input's apparent shape (`T` vs space separator, seconds present or
/// not) picks the format tried first, then the generic priority list runs,
/// then date-only, then one lenient fallback.
pub(crate) fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, preferred_format(s)) {
        return Some(ndt);
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_ONLY_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }

    parse_lenient(s)
}

fn preferred_format(s: &str) -> &'static str {
    let t_separated = s.contains('T');
    let with_seconds = s.matches(':').count() >= 2;
    match (t_separated, with_seconds) {
        (true, true) => "%Y-%m-%dT%H:%M:%S",
        (true, false) => "%Y-%m-%dT%H:%M",
        (false, true) => "%Y-%m-%d %H:%M:%S",
        (false, false) => "%Y-%m-%d %H:%M",
    }
}

/// Last-resort parse: tolerate alternate single-character date separators
/// and unpadded fields (`"2025/6/5 7:03"`). Impossible dates still fail;
/// this is lenient about punctuation, not about the calendar.
fn parse_lenient(s: &str) -> Option<NaiveDateTime> {
    let re = Regex::new(
        r"^(\d{4})\D(\d{1,2})\D(\d{1,2})(?:[ T]+(\d{1,2}):(\d{1,2})(?::(\d{1,2}))?)?$",
    )
    .ok()?;
    let caps = re.captures(s)?;

    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, num(2)?, num(3)?)?;
    date.and_hms_opt(
        num(4).unwrap_or(0),
        num(5).unwrap_or(0),
        num(6).unwrap_or(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_full_datetime_with_microseconds() {
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30 07:46:12.123456")),
            Some(utc(2025, 12, 30, 7, 46, 12))
        );
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30 07:46")),
            Some(utc(2025, 12, 30, 7, 46, 0))
        );
    }

    #[test]
    fn test_t_separated_variants() {
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30T07:46:12")),
            Some(utc(2025, 12, 30, 7, 46, 12))
        );
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30T07:46")),
            Some(utc(2025, 12, 30, 7, 46, 0))
        );
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(
            parse_utc(BackendUtc("2025-06-15")),
            Some(utc(2025, 6, 15, 0, 0, 0))
        );
    }

    #[test]
    fn test_zulu_suffix() {
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30T07:46:12Z")),
            Some(utc(2025, 12, 30, 7, 46, 12))
        );
    }

    #[test]
    fn test_explicit_offset_normalized_to_utc() {
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30T14:46:12+07:00")),
            Some(utc(2025, 12, 30, 7, 46, 12))
        );
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30T02:46:12-05:00")),
            Some(utc(2025, 12, 30, 7, 46, 12))
        );
    }

    #[test]
    fn test_offset_without_colon() {
        assert_eq!(
            parse_utc(BackendUtc("2025-12-30T14:46+0700")),
            Some(utc(2025, 12, 30, 7, 46, 0))
        );
    }

    #[test]
    fn test_date_only_not_mistaken_for_offset() {
        // "-06-15" must not be read as a trailing offset marker.
        assert_eq!(
            parse_utc(BackendUtc("2025-06-15")),
            Some(utc(2025, 6, 15, 0, 0, 0))
        );
    }

    #[test]
    fn test_strict_rejects_impossible_date() {
        assert_eq!(parse_utc(BackendUtc("2025-02-30 10:00:00")), None);
    }

    #[test]
    fn test_lenient_fallback_accepts_slashes() {
        assert_eq!(
            parse_utc(BackendUtc("2025/06/15 07:03")),
            Some(utc(2025, 6, 15, 7, 3, 0))
        );
    }

    #[test]
    fn test_lenient_fallback_rejects_impossible_date() {
        assert_eq!(parse_utc(BackendUtc("2025/13/45 07:03")), None);
    }

    #[test]
    fn test_empty_and_garbage_return_none() {
        assert_eq!(parse_utc(BackendUtc("")), None);
        assert_eq!(parse_utc(BackendUtc("   ")), None);
        assert_eq!(parse_utc(BackendUtc("not-a-date")), None);
    }

    #[test]
    fn test_whitespace_padding_is_trimmed() {
        assert_eq!(
            parse_utc(BackendUtc("  2025-12-30 07:46:12  ")),
            Some(utc(2025, 12, 30, 7, 46, 12))
        );
    }
}
