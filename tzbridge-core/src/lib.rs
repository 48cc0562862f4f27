//! tzbridge-core: timestamp/timezone normalization for the ops portal.
//!
//! The backend persists naive UTC strings (`"2025-12-30 07:46:12"`); the
//! browser displays and edits times in the user's zone. This crate is the
//! bridge: parse the backend convention, convert through an IANA zone or a
//! fixed offset, render for display or for a `datetime-local` widget, and
//! normalize widget input back to the exact backend convention.
//!
//! Everything is pure and synchronous. Failures never panic and never
//! propagate rich errors; each entry point has a documented "no value"
//! result (`None`, `""`, or `"-"`) suited to the render paths that call it.

pub mod convert;
pub mod format;
pub mod normalize;
pub mod parse;
pub mod stamp;
pub mod timezone;

pub use convert::{to_utc, to_zone};
pub use format::{
    format_display, format_input_value, BACKEND_FORMAT, DISPLAY_FALLBACK, INPUT_WIDGET_FORMAT,
};
pub use normalize::normalize_to_utc;
pub use parse::parse_utc;
pub use stamp::{BackendUtc, WidgetLocal};
pub use timezone::{TimezoneSpec, DEFAULT_ZONE};
