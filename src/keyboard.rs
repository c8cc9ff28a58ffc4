//! Enter-key suppression on non-text controls.
//!
//! A focused checkbox, select or button would otherwise submit its form when
//! Enter is pressed. Text areas keep newlines and text-typed inputs keep
//! their normal Enter behavior.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use crate::env::{Dom, KeyOutcome, KeyPress, PageEnv};

/// Whether the default action of `press` should be cancelled.
///
/// The check is on the `type` property containing `"text"`, so `email` and
/// `password` inputs count as non-text. Targets with no `type` at all
/// (plain elements, the page body) are left alone.
#[must_use]
pub fn should_suppress_enter(press: &KeyPress) -> bool {
    if press.key != "Enter" || press.target.tag_name.eq_ignore_ascii_case("TEXTAREA") {
        return false;
    }
    press
        .target
        .input_type
        .as_deref()
        .is_some_and(|kind| !kind.contains("text"))
}

/// Install the global keydown listener.
pub fn wire<D: Dom>(env: &PageEnv<D>) {
    env.dom.on_keydown(Box::new(|press: &KeyPress| {
        if should_suppress_enter(press) {
            KeyOutcome::PreventDefault
        } else {
            KeyOutcome::Default
        }
    }));
}
