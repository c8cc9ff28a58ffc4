//! Form validation helpers.
//!
//! These are hints for the user while typing. The server re-validates every
//! submission and is the only authority.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;

use crate::env::{Dom, PageEnv};
use crate::error::FetchError;
use crate::net::{self, FieldVerdict};

/// Minimum password length, shared by the strength meter and the rule check.
pub const MIN_PASSWORD_LEN: usize = 8;

const LENGTH_WEIGHT: u32 = 25;
const UPPERCASE_WEIGHT: u32 = 25;
const LOWERCASE_WEIGHT: u32 = 25;
const DIGIT_WEIGHT: u32 = 15;
const SYMBOL_WEIGHT: u32 = 10;
const MAX_STRENGTH: u32 = 100;

/// One `@`, then a dot somewhere after it, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Unicode decimal digits (`Nd`). Every one of these is also a digit to the
/// server, which additionally accepts forms like superscripts.
static DECIMAL_DIGIT: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"\p{Nd}"));

/// Loose email shape check.
///
/// Accepts `local@domain.tld` where no part is empty and nothing contains
/// whitespace or a second `@`. It is not RFC 5322: quoted local parts, IP
/// literals and similar are rejected, while `a@b.c` passes.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_ok_and(|re| re.is_match(email))
}

/// Password strength score in `0..=100`.
///
/// Independent criteria add fixed weights: length of at least 8 (+25), an
/// ASCII uppercase letter (+25), an ASCII lowercase letter (+25), an ASCII
/// digit (+15), anything else (+10). Length is counted in UTF-16 code units,
/// which is what the browser reports for input values.
#[must_use]
pub fn check_password_strength(password: &str) -> u8 {
    let mut strength = 0;
    if password.encode_utf16().count() >= MIN_PASSWORD_LEN {
        strength += LENGTH_WEIGHT;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        strength += UPPERCASE_WEIGHT;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        strength += LOWERCASE_WEIGHT;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += DIGIT_WEIGHT;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += SYMBOL_WEIGHT;
    }
    u8::try_from(strength.min(MAX_STRENGTH)).unwrap_or(u8::MAX)
}

/// First registration rule a password breaks. `Display` gives the message
/// the server would return for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordIssue {
    #[error("كلمة المرور يجب أن تكون 8 أحرف على الأقل")]
    TooShort,
    #[error("كلمة المرور يجب أن تحتوي على حرف كبير على الأقل")]
    MissingUppercase,
    #[error("كلمة المرور يجب أن تحتوي على حرف صغير على الأقل")]
    MissingLowercase,
    #[error("كلمة المرور يجب أن تحتوي على رقم على الأقل")]
    MissingDigit,
}

/// Check a password against the registration rules, in the server's order.
///
/// Length counts chars. Upper and lower case use the Unicode `Uppercase` and
/// `Lowercase` properties, as the server does. The digit rule is narrower
/// than the server's: only decimal digits count, so a password passing here
/// is never rejected there for a missing digit, while `½` or `²` alone do not
/// satisfy it.
///
/// # Errors
///
/// Returns the first [`PasswordIssue`] found.
pub fn password_feedback(password: &str) -> Result<(), PasswordIssue> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordIssue::TooShort);
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(PasswordIssue::MissingLowercase);
    }
    if !DECIMAL_DIGIT.as_ref().is_ok_and(|re| re.is_match(password)) {
        return Err(PasswordIssue::MissingDigit);
    }
    Ok(())
}

/// Ask the server whether `email` is well-formed and still available.
///
/// # Errors
///
/// Returns a [`FetchError`] if the endpoint cannot be reached or answers
/// with something other than a verdict.
pub async fn check_email_with_server<D: Dom>(env: &PageEnv<D>, email: &str) -> Result<FieldVerdict, FetchError> {
    net::validate_email_remote(env.http.as_ref(), &env.config.validate_email_endpoint, email).await
}

/// Ask the server whether `password` satisfies its rules.
///
/// # Errors
///
/// Returns a [`FetchError`] if the endpoint cannot be reached or answers
/// with something other than a verdict.
pub async fn check_password_with_server<D: Dom>(
    env: &PageEnv<D>,
    password: &str,
) -> Result<FieldVerdict, FetchError> {
    net::validate_password_remote(env.http.as_ref(), &env.config.validate_password_endpoint, password).await
}
