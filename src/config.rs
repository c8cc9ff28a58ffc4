//! Page configuration read from `data-*` attributes on `<body>`.
//!
//! Templates may override endpoints or flash timings per page, e.g.
//! `<body data-logout-endpoint="/auth/logout" data-flash-delay-ms="8000">`.
//! Anything missing or unparsable keeps its default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::consts::{FLASH_DELAY, FLASH_FADE, FLASH_STAGGER};

pub const DEFAULT_AUTH_ENDPOINT: &str = "/api/check-auth";
pub const DEFAULT_LOGOUT_ENDPOINT: &str = "/logout";
pub const DEFAULT_LOGOUT_REDIRECT: &str = "/";
pub const DEFAULT_VALIDATE_EMAIL_ENDPOINT: &str = "/api/validate-email";
pub const DEFAULT_VALIDATE_PASSWORD_ENDPOINT: &str = "/api/validate-password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTimings {
    /// Visible time before a message starts fading.
    pub delay: Duration,
    /// Added per index for messages present at page load.
    pub stagger: Duration,
    /// Fade length before removal.
    pub fade: Duration,
}

impl Default for FlashTimings {
    fn default() -> Self {
        Self { delay: FLASH_DELAY, stagger: FLASH_STAGGER, fade: FLASH_FADE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub auth_endpoint: String,
    pub logout_endpoint: String,
    pub logout_redirect: String,
    pub validate_email_endpoint: String,
    pub validate_password_endpoint: String,
    pub flash: FlashTimings,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_owned(),
            logout_endpoint: DEFAULT_LOGOUT_ENDPOINT.to_owned(),
            logout_redirect: DEFAULT_LOGOUT_REDIRECT.to_owned(),
            validate_email_endpoint: DEFAULT_VALIDATE_EMAIL_ENDPOINT.to_owned(),
            validate_password_endpoint: DEFAULT_VALIDATE_PASSWORD_ENDPOINT.to_owned(),
            flash: FlashTimings::default(),
        }
    }
}

impl PageConfig {
    /// Build config from a `data-*` lookup (key without the `data-` prefix).
    ///
    /// Recognised keys:
    /// - `auth-endpoint`, `logout-endpoint`, `logout-redirect`
    /// - `validate-email-endpoint`, `validate-password-endpoint`
    /// - `flash-delay-ms`, `flash-stagger-ms`, `flash-fade-ms`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let flash = FlashTimings {
            delay: lookup_ms(&lookup, "flash-delay-ms", defaults.flash.delay),
            stagger: lookup_ms(&lookup, "flash-stagger-ms", defaults.flash.stagger),
            fade: lookup_ms(&lookup, "flash-fade-ms", defaults.flash.fade),
        };

        Self {
            auth_endpoint: text("auth-endpoint", defaults.auth_endpoint),
            logout_endpoint: text("logout-endpoint", defaults.logout_endpoint),
            logout_redirect: text("logout-redirect", defaults.logout_redirect),
            validate_email_endpoint: text("validate-email-endpoint", defaults.validate_email_endpoint),
            validate_password_endpoint: text("validate-password-endpoint", defaults.validate_password_endpoint),
            flash,
        }
    }
}

fn lookup_ms<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) => Duration::from_millis(ms),
        Err(_) => {
            log::warn!("ignoring data-{key}={raw:?}: expected milliseconds");
            default
        }
    }
}
