//! UTC ↔ zone-local conversion.
//!
//! Named zones go through the IANA database (`chrono-tz`) so the offset in
//! effect at the instant itself is applied, DST included. Fixed offsets are
//! plain arithmetic with no database involvement.
//!
//! DST policy for the local→UTC direction, applied the same way on every
//! call: a wall-clock time inside a spring-forward gap rolls forward to the
//! first representable wall-clock time; an ambiguous fall-back time resolves
//! to the earlier of the two instants.

use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::timezone::TimezoneSpec;

/// Wall-clock calendar/time for `instant` in `spec`. `None` when a named
/// zone is unknown or a fixed offset is out of range.
pub fn to_zone(instant: DateTime<Utc>, spec: &TimezoneSpec) -> Option<NaiveDateTime> {
    match spec {
        TimezoneSpec::Named(name) => {
            let tz: Tz = name.parse().ok()?;
            Some(instant.with_timezone(&tz).naive_local())
        }
        TimezoneSpec::FixedOffset(minutes) => {
            let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
            Some(instant.with_timezone(&offset).naive_local())
        }
    }
}

/// UTC instant for a naive calendar/time declared to be wall-clock time in
/// `spec`. Same fail-soft rules as [`to_zone`]; DST gap/ambiguity handling
/// per the module policy above.
pub fn to_utc(local: NaiveDateTime, spec: &TimezoneSpec) -> Option<DateTime<Utc>> {
    match spec {
        TimezoneSpec::Named(name) => {
            let tz: Tz = name.parse().ok()?;
            match tz.from_local_datetime(&local) {
                LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
                LocalResult::Ambiguous(earlier, _) => Some(earlier.with_timezone(&Utc)),
                LocalResult::None => roll_forward_through_gap(local, &tz),
            }
        }
        TimezoneSpec::FixedOffset(minutes) => {
            let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
            offset
                .from_local_datetime(&local)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

/// Real-world gaps are at most a few hours (usually one, 30 minutes in a
/// handful of zones), so probe in 15-minute steps until a representable
/// wall-clock time appears.
fn roll_forward_through_gap(local: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    let mut probe = local;
    for _ in 0..16 {
        probe = probe.checked_add_signed(Duration::minutes(15))?;
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return Some(dt.with_timezone(&Utc));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_to_zone_jakarta_crosses_midnight() {
        let spec = TimezoneSpec::Named("Asia/Jakarta".to_string());
        let local = to_zone(utc(2025, 1, 1, 17, 0, 0), &spec).unwrap();
        assert_eq!(local, naive(2025, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_to_utc_jakarta() {
        let spec = TimezoneSpec::Named("Asia/Jakarta".to_string());
        let instant = to_utc(naive(2025, 6, 15, 8, 0, 0), &spec).unwrap();
        assert_eq!(instant, utc(2025, 6, 15, 1, 0, 0));
    }

    #[test]
    fn test_fixed_offset_symmetry() {
        for minutes in [-720, -330, 0, 420, 840] {
            let spec = TimezoneSpec::FixedOffset(minutes);
            let instant = utc(2025, 3, 9, 2, 30, 0);
            let local = to_zone(instant, &spec).unwrap();
            assert_eq!(to_utc(local, &spec), Some(instant), "offset {minutes}");
        }
    }

    #[test]
    fn test_named_roundtrip_outside_dst_transition() {
        let spec = TimezoneSpec::Named("America/New_York".to_string());
        let instant = utc(2025, 1, 15, 12, 0, 0);
        let local = to_zone(instant, &spec).unwrap();
        assert_eq!(local, naive(2025, 1, 15, 7, 0, 0)); // EST, UTC-5
        assert_eq!(to_utc(local, &spec), Some(instant));
    }

    #[test]
    fn test_dst_aware_offset_in_summer() {
        let spec = TimezoneSpec::Named("America/New_York".to_string());
        let local = to_zone(utc(2025, 7, 15, 12, 0, 0), &spec).unwrap();
        assert_eq!(local, naive(2025, 7, 15, 8, 0, 0)); // EDT, UTC-4
    }

    #[test]
    fn test_spring_forward_gap_rolls_forward() {
        // 2025-03-09 02:30 does not exist in New York; 02:00 jumps to 03:00.
        let spec = TimezoneSpec::Named("America/New_York".to_string());
        let instant = to_utc(naive(2025, 3, 9, 2, 30, 0), &spec).unwrap();
        // First valid wall-clock time is 03:00 EDT = 07:00 UTC.
        assert_eq!(instant, utc(2025, 3, 9, 7, 0, 0));
    }

    #[test]
    fn test_fall_back_ambiguity_takes_earlier_instant() {
        // 2025-11-02 01:30 occurs twice in New York; the earlier pass is EDT.
        let spec = TimezoneSpec::Named("America/New_York".to_string());
        let instant = to_utc(naive(2025, 11, 2, 1, 30, 0), &spec).unwrap();
        assert_eq!(instant, utc(2025, 11, 2, 5, 30, 0));
    }

    #[test]
    fn test_unknown_zone_fails_soft() {
        let spec = TimezoneSpec::Named("Not/A_Zone".to_string());
        assert_eq!(to_zone(utc(2025, 1, 1, 0, 0, 0), &spec), None);
        assert_eq!(to_utc(naive(2025, 1, 1, 0, 0, 0), &spec), None);
    }

    #[test]
    fn test_out_of_range_offset_fails_soft() {
        let spec = TimezoneSpec::FixedOffset(99 * 60);
        assert_eq!(to_zone(utc(2025, 1, 1, 0, 0, 0), &spec), None);
        assert_eq!(to_utc(naive(2025, 1, 1, 0, 0, 0), &spec), None);
    }
}
