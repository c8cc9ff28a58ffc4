//! Flash-message lifecycle.
//!
//! A flash message stays visible for a delay, then fades (opacity 0 while
//! sliding out to the side) and is removed once the fade has run. Messages
//! rendered by the server are staggered so they leave one after another;
//! alerts raised from script each use the plain delay.

#[cfg(test)]
#[path = "flash_test.rs"]
mod flash_test;

use std::rc::Rc;
use std::time::Duration;

use crate::config::FlashTimings;
use crate::consts::{
    FADE_OUT_TRANSFORM, FLASH_CONTAINER_CLASS, FLASH_CONTAINER_SELECTOR, FLASH_MESSAGE_CLASS, FLASH_MESSAGE_SELECTOR,
};
use crate::env::{Dom, PageEnv};

/// Visual severity of a flash message, rendered as an extra class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    /// Any other tag, passed through as-is so templates can add styles.
    Custom(String),
}

impl Severity {
    /// Map a tag to a severity. Blank input falls back to `Info`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            other => Self::Custom(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_class(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Custom(tag) => tag,
        }
    }
}

impl From<&str> for Severity {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Class attribute for a message of the given severity.
#[must_use]
pub fn message_class(severity: &Severity) -> String {
    format!("{FLASH_MESSAGE_CLASS} {}", severity.as_class())
}

/// Fade start for the `index`-th server-rendered message (0-based).
#[must_use]
pub fn staggered_delay(timings: &FlashTimings, index: usize) -> Duration {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    timings.delay.saturating_add(timings.stagger.saturating_mul(index))
}

/// Fade `element` out after `delay`, then remove it once the fade has run.
pub fn dismiss_after<D: Dom>(env: &PageEnv<D>, element: D::Element, delay: Duration) {
    let dom = Rc::clone(&env.dom);
    let scheduler = Rc::clone(&env.scheduler);
    let fade = env.config.flash.fade;
    env.scheduler.after(
        delay,
        Box::new(move || {
            dom.set_style(&element, "opacity", "0");
            dom.set_style(&element, "transform", FADE_OUT_TRANSFORM);
            scheduler.after(fade, Box::new(move || dom.remove(&element)));
        }),
    );
}

/// Schedule staggered dismissal for every message present on the page.
/// Returns how many were scheduled.
pub fn dismiss_existing<D: Dom>(env: &PageEnv<D>) -> usize {
    let messages = env.dom.query_all(FLASH_MESSAGE_SELECTOR);
    let count = messages.len();
    for (index, message) in messages.into_iter().enumerate() {
        dismiss_after(env, message, staggered_delay(&env.config.flash, index));
    }
    count
}

/// Show `message` as a flash notification and schedule its dismissal.
pub fn show_alert<D: Dom>(env: &PageEnv<D>, message: &str, severity: &Severity) {
    let Some(alert) = env.dom.create_element("div", &message_class(severity), message) else {
        log::debug!("could not create flash element for {message:?}");
        return;
    };
    let Some(container) = flash_container(env) else {
        return;
    };
    env.dom.append_child(&container, &alert);
    dismiss_after(env, alert, env.config.flash.delay);
}

/// Existing `.flash-messages` container, or a new one at the top of `<body>`.
fn flash_container<D: Dom>(env: &PageEnv<D>) -> Option<D::Element> {
    if let Some(existing) = env.dom.query(FLASH_CONTAINER_SELECTOR) {
        return Some(existing);
    }
    let created = env.dom.create_element("div", FLASH_CONTAINER_CLASS, "");
    match &created {
        Some(container) => env.dom.prepend_to_body(container),
        None => log::debug!("could not create flash container"),
    }
    created
}
