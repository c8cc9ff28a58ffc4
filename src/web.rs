//! Browser bindings for the page environment, plus the functions exported to
//! page scripts under their JavaScript names.
//!
//! TRADE-OFFS
//! ==========
//! Listeners and timers are leaked into the JS heap (`forget`) because they
//! live as long as the page. DOM mutation failures are logged at debug level
//! and otherwise ignored.

use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, KeyboardEvent, Window};

use crate::env::{
    Callback, Connectivity, Dom, FocusTarget, HttpClient, HttpResponse, KeyHandler, KeyOutcome, KeyPress, PageEnv,
    PointerEvent, Scheduler,
};
use crate::error::FetchError;
use crate::flash::{self, Severity};
use crate::net::FieldVerdict;
use crate::{auth, numerals, page, validate};

// =============================================================
// DOM
// =============================================================

pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Bind to the current window. `None` outside a browser.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

fn listen(target: &EventTarget, event: &str, handler: Callback) {
    let closure = Closure::wrap(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::debug!("addEventListener({event}) failed: {err:?}");
    }
    closure.forget();
}

fn focus_target(event: &KeyboardEvent) -> FocusTarget {
    let Some(target) = event.target() else {
        return FocusTarget::default();
    };
    let tag_name = target.dyn_ref::<Element>().map(Element::tag_name).unwrap_or_default();
    let input_type = match js_sys::Reflect::get(&target, &JsValue::from_str("type")) {
        Ok(value) => value.as_string(),
        Err(_) => None,
    };
    FocusTarget { tag_name, input_type }
}

impl Dom for WebDom {
    type Element = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log::debug!("querySelectorAll({selector}) failed: {err:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|node| node.unchecked_into::<Element>())
            .collect()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("querySelector({selector}) failed: {err:?}");
                None
            }
        }
    }

    fn create_element(&self, tag: &str, class_name: &str, text: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => {
                element.set_class_name(class_name);
                if !text.is_empty() {
                    element.set_text_content(Some(text));
                }
                Some(element)
            }
            Err(err) => {
                log::debug!("createElement({tag}) failed: {err:?}");
                None
            }
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log::debug!("appendChild failed: {err:?}");
        }
    }

    fn prepend_to_body(&self, element: &Element) {
        let Some(body) = self.document.body() else {
            log::debug!("document has no body");
            return;
        };
        if let Err(err) = body.prepend_with_node_1(element) {
            log::debug!("prepend to body failed: {err:?}");
        }
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            log::debug!("style {property}={value} failed: {err:?}");
        }
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn add_body_class(&self, class_name: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(err) = body.class_list().add_1(class_name) {
            log::debug!("classList.add({class_name}) failed: {err:?}");
        }
    }

    fn body_data(&self, key: &str) -> Option<String> {
        self.document.body()?.get_attribute(&format!("data-{key}"))
    }

    fn supports_touch(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
    }

    fn navigate(&self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            log::error!("navigation to {url} failed: {err:?}");
        }
    }

    fn on_pointer(&self, element: &Element, event: PointerEvent, handler: Callback) {
        listen(element, event.event_name(), handler);
    }

    fn on_connectivity(&self, event: Connectivity, handler: Callback) {
        listen(&self.window, event.event_name(), handler);
    }

    fn on_keydown(&self, mut handler: KeyHandler) {
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let press = KeyPress { key: event.key(), target: focus_target(&event) };
            if handler(&press) == KeyOutcome::PreventDefault {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        if let Err(err) = self
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            log::debug!("keydown listener failed: {err:?}");
        }
        closure.forget();
    }
}

// =============================================================
// Timers and HTTP
// =============================================================

/// `setTimeout` via gloo-timers; tasks via `spawn_local`.
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback).forget();
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// `fetch` via gloo-net.
pub struct FetchClient;

fn network_error(err: gloo_net::Error) -> FetchError {
    FetchError::Network(err.to_string())
}

async fn read_response(
    response: Result<gloo_net::http::Response, gloo_net::Error>,
) -> Result<HttpResponse, FetchError> {
    let response = response.map_err(network_error)?;
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    Ok(HttpResponse { status, body })
}

impl HttpClient for FetchClient {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>> {
        let request = gloo_net::http::Request::get(url);
        Box::pin(async move { read_response(request.send().await).await })
    }

    fn post_json(&self, url: &str, body: serde_json::Value) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>> {
        let request = gloo_net::http::Request::post(url).json(&body);
        Box::pin(async move {
            let request = request.map_err(|e| FetchError::Decode(e.to_string()))?;
            read_response(request.send().await).await
        })
    }
}

/// Page environment bound to the real browser.
pub fn browser_env() -> Option<PageEnv<WebDom>> {
    let dom = WebDom::new()?;
    Some(PageEnv::new(Rc::new(dom), Rc::new(BrowserScheduler), Rc::new(FetchClient)))
}

// =============================================================
// Entry point
// =============================================================

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger init failed: {err}").into());
    }

    let Some(env) = browser_env() else {
        return;
    };
    let document = env.dom.document.clone();
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || page::init(&env));
        if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
            log::error!("could not wait for DOMContentLoaded: {err:?}");
        }
    } else {
        page::init(&env);
    }
}

// =============================================================
// JS exports
// =============================================================

#[wasm_bindgen(js_name = showAlert)]
pub fn show_alert(message: &str, severity: Option<String>) {
    let Some(env) = browser_env() else {
        return;
    };
    let severity = severity.as_deref().map_or_else(Severity::default, Severity::parse);
    flash::show_alert(&env, message, &severity);
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    validate::validate_email(email)
}

#[wasm_bindgen(js_name = checkPasswordStrength)]
pub fn check_password_strength(password: &str) -> u8 {
    validate::check_password_strength(password)
}

/// Message for the first broken password rule, or `undefined` if none.
#[wasm_bindgen(js_name = passwordFeedback)]
pub fn password_feedback(password: &str) -> Option<String> {
    validate::password_feedback(password).err().map(|issue| issue.to_string())
}

#[wasm_bindgen(js_name = logout)]
pub async fn logout() {
    let Some(env) = browser_env() else {
        return;
    };
    auth::logout(&env).await;
}

#[wasm_bindgen]
extern "C" {
    /// The global `String(value)` conversion.
    #[wasm_bindgen(js_name = String, catch)]
    fn js_string(value: &JsValue) -> Result<JsValue, JsValue>;
}

/// Accepts any value and converts it to text the way JS does before swapping
/// digits, so `true` stays `"true"` and `[1, 2]` becomes `"١,٢"`.
#[wasm_bindgen(js_name = toArabicNumbers)]
pub fn to_arabic_numbers(value: &JsValue) -> String {
    match js_string(value) {
        Ok(text) => numerals::to_arabic_numbers(text.as_string().unwrap_or_default()),
        Err(err) => {
            log::debug!("String() conversion failed: {err:?}");
            String::new()
        }
    }
}

fn verdict_to_js(verdict: &FieldVerdict) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(verdict).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

#[wasm_bindgen(js_name = validateEmailRemote)]
pub async fn validate_email_remote(email: String) -> Result<JsValue, JsValue> {
    let env = browser_env().ok_or_else(|| JsValue::from_str("no browser window"))?;
    let verdict = validate::check_email_with_server(&env, &email)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    verdict_to_js(&verdict)
}

#[wasm_bindgen(js_name = validatePasswordRemote)]
pub async fn validate_password_remote(password: String) -> Result<JsValue, JsValue> {
    let env = browser_env().ok_or_else(|| JsValue::from_str("no browser window"))?;
    let verdict = validate::check_password_with_server(&env, &password)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    verdict_to_js(&verdict)
}
