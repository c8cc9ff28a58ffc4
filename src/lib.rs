//! # portal-ui
//!
//! Client-side behavior for the server-rendered authentication portal,
//! compiled to WebAssembly. The server owns sessions and renders every page;
//! this crate only layers affordances over that markup: an auth-status probe,
//! auto-dismissing flash messages, press/hover feedback, form validation
//! helpers, logout, and connectivity banners.
//!
//! Every behavior talks to the page through [`env::PageEnv`], so the same code
//! runs against the real browser (the `hydrate` feature) and against the
//! in-memory page used by the unit tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`env`] | Page capabilities: DOM, timers, HTTP |
//! | [`config`] | Endpoints and timings, overridable from `<body data-*>` |
//! | [`consts`] | Class names, transforms, delays, and UI strings |
//! | [`error`] | Network error type |
//! | [`net`] | Typed calls to the portal's JSON endpoints |
//! | [`auth`] | Page-load auth check and logout |
//! | [`flash`] | Flash-message lifecycle and [`flash::show_alert`] |
//! | [`feedback`] | Button press and card hover transforms |
//! | [`keyboard`] | Enter-key suppression on non-text controls |
//! | [`validate`] | Email and password checks |
//! | [`numerals`] | Arabic-Indic digit rendering |
//! | [`connectivity`] | Online/offline banners |
//! | [`page`] | [`page::init`], the single wiring entry point |
//! | `web` | web-sys bindings and JS exports (`hydrate` only) |

pub mod auth;
pub mod config;
pub mod connectivity;
pub mod consts;
pub mod env;
pub mod error;
pub mod feedback;
pub mod flash;
pub mod keyboard;
pub mod net;
pub mod numerals;
pub mod page;
pub mod validate;
#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use page::init;
