use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` shape: non-whitespace segments around one `@`,
/// at least one `.` somewhere after it.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn validate_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
