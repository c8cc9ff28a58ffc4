//! Page initialization: wires every behavior group exactly once.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host calls [`init`] once the document is parsed. Groups are
//! independent; the auth probe is spawned, so nothing here waits on the
//! network.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use crate::consts::TOUCH_DEVICE_CLASS;
use crate::env::{Dom, PageEnv};
use crate::{auth, connectivity, feedback, flash, keyboard};

/// Tag `<body>` for touch styling when the device supports touch.
pub fn tag_touch_device<D: Dom>(env: &PageEnv<D>) -> bool {
    let touch = env.dom.supports_touch();
    if touch {
        env.dom.add_body_class(TOUCH_DEVICE_CLASS);
    }
    touch
}

/// Wire all page behaviors.
pub fn init<D: Dom>(env: &PageEnv<D>) {
    let touch = tag_touch_device(env);
    auth::spawn_auth_check(env);
    let flashes = flash::dismiss_existing(env);
    let buttons = feedback::wire_buttons(env);
    let cards = feedback::wire_cards(env);
    keyboard::wire(env);
    connectivity::wire(env);
    log::debug!("page ready: touch={touch} flashes={flashes} buttons={buttons} cards={cards}");
}
