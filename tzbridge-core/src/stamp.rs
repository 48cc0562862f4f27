//! Marker types for the two kinds of naive timestamp strings.
//!
//! The same textual shape (`"2025-06-15 08:00:00"`) means UTC when it comes
//! from the backend and wall-clock local time when it comes from a browser
//! datetime widget. Wrapping each side in its own type makes that anchoring
//! visible at the call site instead of relying on which function a bare
//! string happens to be passed to.

/// A naive timestamp string received from the backend. Anchored to UTC by
/// convention; no offset marker is present in the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendUtc<'a>(pub &'a str);

/// A naive timestamp string typed or selected in a datetime-input widget.
/// Anchored to the user's zone, whatever that resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLocal<'a>(pub &'a str);

impl<'a> BackendUtc<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl<'a> WidgetLocal<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}
