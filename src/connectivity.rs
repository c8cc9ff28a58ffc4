//! Online/offline banners.

#[cfg(test)]
#[path = "connectivity_test.rs"]
mod connectivity_test;

use crate::consts::{CONNECTION_LOST, CONNECTION_RESTORED};
use crate::env::{Connectivity, Dom, PageEnv};
use crate::flash::{self, Severity};

/// Message and severity shown for a connectivity change.
#[must_use]
pub fn banner(event: Connectivity) -> (&'static str, Severity) {
    match event {
        Connectivity::Online => (CONNECTION_RESTORED, Severity::Success),
        Connectivity::Offline => (CONNECTION_LOST, Severity::Error),
    }
}

/// Show a banner on every online/offline transition. Flapping is not debounced.
pub fn wire<D: Dom>(env: &PageEnv<D>) {
    for event in [Connectivity::Online, Connectivity::Offline] {
        let (message, severity) = banner(event);
        let env_for_event = env.clone();
        env.dom.on_connectivity(
            event,
            Box::new(move || flash::show_alert(&env_for_event, message, &severity)),
        );
    }
}
