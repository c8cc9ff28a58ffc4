//! Page-load auth probe and the logout action.
//!
//! The server owns the session; this module only reads its status and asks
//! it to end the session. Both are best-effort: failures are logged and the
//! page carries on.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use crate::env::{Dom, PageEnv};
use crate::net::{self, AuthStatus};

/// Result of a logout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The server confirmed and the page is navigating away.
    Redirected,
    /// The request failed; the user stays on the current page.
    Stayed,
}

/// Start the auth-status probe without waiting for it.
pub fn spawn_auth_check<D: Dom>(env: &PageEnv<D>) {
    let http = Rc::clone(&env.http);
    let endpoint = env.config.auth_endpoint.clone();
    let hook = env.hooks.on_authenticated.clone();
    env.scheduler.spawn(Box::pin(async move {
        match net::fetch_auth_status(http.as_ref(), &endpoint).await {
            Ok(status) => {
                if report_auth_status(&status) {
                    if let Some(hook) = hook {
                        hook(&status);
                    }
                }
            }
            Err(e) => log::error!("auth status check failed: {e}"),
        }
    }));
}

/// Log the probe result. Returns whether a user is signed in.
pub fn report_auth_status(status: &AuthStatus) -> bool {
    if !status.authenticated {
        log::debug!("no active session");
        return false;
    }
    match status.session_user() {
        Some(user) => log::info!("signed in as {}", user.label()),
        None => log::info!("signed in"),
    }
    true
}

/// End the session and go back to the site root on success.
pub async fn logout<D: Dom>(env: &PageEnv<D>) -> LogoutOutcome {
    match net::request_logout(env.http.as_ref(), &env.config.logout_endpoint).await {
        Ok(()) => {
            env.dom.navigate(&env.config.logout_redirect);
            LogoutOutcome::Redirected
        }
        Err(e) => {
            log::error!("logout failed: {e}");
            LogoutOutcome::Stayed
        }
    }
}
