//! Reusable constraint checks for field values.
//!
//! Higher-level constructors and `validate` implementations compose these
//! primitives instead of re-implementing the checks per component. Every
//! function returns `Ok(())` on success and a typed
//! [`Error::Validation`](crate::Error::Validation) naming the field, the
//! expected constraint and the offending value on failure.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

/// Phone numbers accepted by the `phone` interaction: an optional leading
/// `+`, then digits with optional separators.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9\- ]{2,19}$").expect("valid phone pattern"));

/// Checks that a string is non-empty.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Checks that a value is one of an enumerated set.
pub fn check_one_of<T: PartialEq + Display>(field: &str, value: &T, allowed: &[T]) -> Result<()> {
    if allowed.iter().any(|a| a == value) {
        return Ok(());
    }
    let allowed = allowed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::validation(
        field,
        format!("`{value}` is not one of [{allowed}]"),
    ))
}

/// Checks that a string's character length does not exceed `max`.
pub fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::validation(
            field,
            format!("length {len} exceeds the maximum of {max}"),
        ));
    }
    Ok(())
}

/// Checks that an integer lies within an inclusive range.
pub fn check_range(field: &str, value: i64, range: RangeInclusive<i64>) -> Result<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(Error::validation(
        field,
        format!(
            "{value} is outside the allowed range {}..={}",
            range.start(),
            range.end()
        ),
    ))
}

/// Checks that a string is an absolute http(s) URL.
pub fn check_url(field: &str, value: &str) -> Result<()> {
    let parsed = Url::parse(value)
        .map_err(|e| Error::validation(field, format!("`{value}` is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::validation(
            field,
            format!("unsupported URL scheme `{other}`"),
        )),
    }
}

/// Checks a string against a compiled pattern.
pub fn check_pattern(field: &str, value: &str, pattern: &Regex) -> Result<()> {
    if pattern.is_match(value) {
        return Ok(());
    }
    Err(Error::validation(
        field,
        format!("`{value}` does not match the expected format"),
    ))
}

/// Checks that a string is a dialable phone number.
pub fn check_phone_number(field: &str, value: &str) -> Result<()> {
    check_pattern(field, value, &PHONE_PATTERN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("text", "hello").is_ok());
        let err = require_non_empty("text", "").unwrap_err();
        assert!(matches!(err, Error::Validation { field, .. } if field == "text"));
    }

    #[test]
    fn test_check_one_of() {
        assert!(check_one_of("currency", &"won", &["won"]).is_ok());
        assert!(check_one_of("currency", &"usd", &["won"]).is_err());
    }

    #[test]
    fn test_check_length() {
        assert!(check_length("label", "short", 8).is_ok());
        assert!(check_length("label", "much too long", 8).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("lifespan", 0, 0..=i64::MAX).is_ok());
        assert!(check_range("lifespan", -1, 0..=i64::MAX).is_err());
    }

    #[test]
    fn test_check_url() {
        assert!(check_url("imageUrl", "https://example.com/a.jpg").is_ok());
        assert!(check_url("imageUrl", "ftp://example.com/a.jpg").is_err());
        assert!(check_url("imageUrl", "not a url").is_err());
    }

    #[test]
    fn test_check_phone_number() {
        assert!(check_phone_number("phoneNumber", "+82-10-1234-5678").is_ok());
        assert!(check_phone_number("phoneNumber", "call me").is_err());
    }
}
