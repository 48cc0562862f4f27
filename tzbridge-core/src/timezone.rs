//! Timezone descriptor resolution.
//!
//! User profiles carry a timezone as a raw string: usually an IANA name like
//! `"Asia/Jakarta"`, occasionally a fixed numeric offset like `"+07:00"`.
//! `TimezoneSpec` is the resolved form the converter works with.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Zone applied when a caller has no descriptor at all (missing profile
/// field). The default lives here, not inside [`TimezoneSpec::resolve`], so
/// an empty descriptor is distinguishable from one explicitly set to Jakarta.
pub const DEFAULT_ZONE: &str = "Asia/Jakarta";

/// A resolved timezone descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimezoneSpec {
    /// IANA zone name, kept as-is. Not checked against the zone database
    /// here; an unknown name fails soft at first conversion.
    Named(String),
    /// Signed minutes east of UTC. Out-of-range offsets (beyond what the
    /// runtime can represent) also fail soft at first conversion.
    FixedOffset(i32),
}

impl TimezoneSpec {
    /// Resolve a raw descriptor. Fails closed: empty or whitespace-only
    /// input yields `None`, leaving the default decision to the caller.
    pub fn resolve(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let offset_re = Regex::new(r"^([+-])(\d{2}):?(\d{2})$").ok()?;
        if let Some(caps) = offset_re.captures(raw) {
            let sign: i32 = if &caps[1] == "-" { -1 } else { 1 };
            let hours: i32 = caps[2].parse().ok()?;
            let mins: i32 = caps[3].parse().ok()?;
            return Some(TimezoneSpec::FixedOffset(sign * (hours * 60 + mins)));
        }

        Some(TimezoneSpec::Named(raw.to_string()))
    }

    /// Resolve a descriptor that may be absent, falling back to
    /// [`DEFAULT_ZONE`]. This is the entry point the formatters and the
    /// normalizer use, since the portal serves a single-locale user base.
    pub fn resolve_or_default(raw: Option<&str>) -> Self {
        raw.and_then(Self::resolve)
            .unwrap_or_else(|| TimezoneSpec::Named(DEFAULT_ZONE.to_string()))
    }
}

impl fmt::Display for TimezoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimezoneSpec::Named(name) => f.write_str(name),
            TimezoneSpec::FixedOffset(minutes) => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}
