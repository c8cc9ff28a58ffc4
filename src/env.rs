//! Page environment: the capabilities every behavior needs from its host.
//!
//! ARCHITECTURE
//! ============
//! Behaviors never touch `window`/`document` directly. They receive a
//! [`PageEnv`] bundling three capabilities:
//!
//! - [`Dom`]: query, create, style and remove elements; register listeners.
//! - [`Scheduler`]: delayed callbacks and local async tasks.
//! - [`HttpClient`]: GET / JSON POST returning status and body.
//!
//! The `hydrate` build binds these to web-sys, gloo-timers and gloo-net.
//! Tests bind them to an in-memory page with a virtual clock so timer-driven
//! behavior is fast-forwarded instead of waited on.
//!
//! CONCURRENCY
//! ===========
//! Everything runs on the page's single thread, so handles are `Rc` and
//! futures are `LocalBoxFuture` (no `Send`).

#[cfg(test)]
#[path = "env_test.rs"]
mod env_test;

use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use crate::config::PageConfig;
use crate::error::FetchError;
use crate::net::AuthStatus;

/// Listener body for events that carry no data we use.
pub type Callback = Box<dyn FnMut()>;

/// Listener body for `keydown`.
pub type KeyHandler = Box<dyn FnMut(&KeyPress) -> KeyOutcome>;

/// Pointer transitions that drive press/hover feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// `mousedown`
    Down,
    /// `mouseup`
    Up,
    /// `mouseenter`
    Enter,
    /// `mouseleave`
    Leave,
}

impl PointerEvent {
    /// DOM event name.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Down => "mousedown",
            Self::Up => "mouseup",
            Self::Enter => "mouseenter",
            Self::Leave => "mouseleave",
        }
    }
}

/// Browser connectivity transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    /// DOM event name fired on `window`.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// The element a key event was dispatched to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTarget {
    /// Upper-case tag name as the DOM reports it (`INPUT`, `TEXTAREA`, ...).
    pub tag_name: String,
    /// The element's `type` property; `None` when the element has none.
    pub input_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key`, e.g. `"Enter"`.
    pub key: String,
    pub target: FocusTarget,
}

/// What a key handler wants done with the browser's default action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyOutcome {
    #[default]
    Default,
    PreventDefault,
}

/// DOM access for one page.
///
/// Mutations are treated as infallible: implementations log and swallow
/// binding-level failures.
pub trait Dom: 'static {
    type Element: Clone + 'static;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// Create a detached element with the given class attribute and text.
    fn create_element(&self, tag: &str, class_name: &str, text: &str) -> Option<Self::Element>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element);
    /// Insert `element` as the first child of `<body>`.
    fn prepend_to_body(&self, element: &Self::Element);
    /// Set an inline style property; an empty value clears it.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    /// Detach `element` from the page.
    fn remove(&self, element: &Self::Element);
    fn add_body_class(&self, class_name: &str);
    /// `data-{key}` attribute on `<body>`.
    fn body_data(&self, key: &str) -> Option<String>;
    /// Whether the environment exposes touch events.
    fn supports_touch(&self) -> bool;
    /// Navigate the page to `url`.
    fn navigate(&self, url: &str);

    fn on_pointer(&self, element: &Self::Element, event: PointerEvent, handler: Callback);
    fn on_connectivity(&self, event: Connectivity, handler: Callback);
    fn on_keydown(&self, handler: KeyHandler);
}

/// Delayed-callback and task primitive.
pub trait Scheduler {
    /// Run `callback` once after `delay`.
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>);
    /// Drive `task` to completion without blocking the caller.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub trait HttpClient {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>>;
    fn post_json(&self, url: &str, body: serde_json::Value) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>>;
}

/// Optional extension points for page scripts built on this crate.
#[derive(Clone, Default)]
pub struct PageHooks {
    /// Called after the load-time probe reports a signed-in user.
    pub on_authenticated: Option<Rc<dyn Fn(&AuthStatus)>>,
}

/// Capabilities and configuration handed to every behavior.
pub struct PageEnv<D: Dom> {
    pub dom: Rc<D>,
    pub scheduler: Rc<dyn Scheduler>,
    pub http: Rc<dyn HttpClient>,
    pub config: Rc<PageConfig>,
    pub hooks: PageHooks,
}

impl<D: Dom> Clone for PageEnv<D> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
            scheduler: Rc::clone(&self.scheduler),
            http: Rc::clone(&self.http),
            config: Rc::clone(&self.config),
            hooks: self.hooks.clone(),
        }
    }
}

impl<D: Dom> PageEnv<D> {
    /// Bundle capabilities, reading [`PageConfig`] from `<body data-*>`.
    pub fn new(dom: Rc<D>, scheduler: Rc<dyn Scheduler>, http: Rc<dyn HttpClient>) -> Self {
        let config = PageConfig::from_lookup(|key| dom.body_data(key));
        Self { dom, scheduler, http, config: Rc::new(config), hooks: PageHooks::default() }
    }

    #[must_use]
    pub fn with_config(mut self, config: PageConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    #[must_use]
    pub fn with_auth_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&AuthStatus) + 'static,
    {
        self.hooks.on_authenticated = Some(Rc::new(hook));
        self
    }
}
