//! Corresponding-author email extraction from abstract text.

use regex::Regex;
use std::sync::LazyLock;

/// Placeholder used when no email address is found.
pub const EMAIL_NOT_AVAILABLE: &str = "N/A";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

/// Find the first email-shaped substring in `text`.
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}

/// Extract the first email in `text`, or [`EMAIL_NOT_AVAILABLE`].
///
/// No semantic validation is done: addresses embedded in prose are matched
/// as-is.
pub fn extract_email(text: &str) -> String {
    find_email(text)
        .unwrap_or(EMAIL_NOT_AVAILABLE)
        .to_string()
}

/// Returns `true` if `candidate` is exactly one email address.
pub fn is_valid_email(candidate: &str) -> bool {
    find_email(candidate) == Some(candidate)
}
