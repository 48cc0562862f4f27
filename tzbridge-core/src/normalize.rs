//! Widget-local input back to the backend convention.
//!
//! The semantic inverse of the input-widget formatter: a naive string from a
//! datetime widget is wall-clock time in the user's zone, and the backend
//! wants it as naive UTC `"YYYY-MM-DD HH:mm:ss"`.

use crate::convert::to_utc;
use crate::format::BACKEND_FORMAT;
use crate::parse::{parse_naive, strip_fraction};
use crate::stamp::WidgetLocal;
use crate::timezone::TimezoneSpec;

/// Convert a widget-local timestamp to the backend convention. `None` means
/// "nothing to send": empty or unparseable input, or a zone that cannot be
/// applied. Validation feedback is a caller concern.
pub fn normalize_to_utc(raw: WidgetLocal<'_>, tz: Option<&str>) -> Option<String> {
    let trimmed = raw.as_str().trim();
    if trimmed.is_empty() {
        return None;
    }

    let local = parse_naive(&strip_fraction(trimmed))?;
    let spec = TimezoneSpec::resolve_or_default(tz);
    let instant = to_utc(local, &spec)?;
    Some(instant.format(BACKEND_FORMAT).to_string())
}
