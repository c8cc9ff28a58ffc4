//! In-memory page environment for unit tests.
//!
//! `FakeDom` keeps a small element tree rooted at `<body>`, `FakeScheduler`
//! runs timers against a virtual clock, and `FakeHttp` answers from a table
//! of canned responses while recording every request.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::env::{
    Callback, Connectivity, Dom, HttpClient, HttpResponse, KeyHandler, KeyOutcome, KeyPress, PageEnv, PointerEvent,
    Scheduler,
};
use crate::error::FetchError;

// =============================================================
// DOM
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
pub struct FakeNode {
    pub tag: String,
    pub classes: Vec<String>,
    pub text: String,
    pub styles: HashMap<String, String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Default)]
struct Listeners {
    pointer: Vec<(NodeId, PointerEvent, Callback)>,
    connectivity: Vec<(Connectivity, Callback)>,
    keydown: Vec<KeyHandler>,
}

pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    body_data: HashMap<String, String>,
    touch: bool,
    navigations: RefCell<Vec<String>>,
    listeners: RefCell<Listeners>,
}

const BODY: NodeId = NodeId(0);

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    pub fn new() -> Self {
        let body = FakeNode { tag: "BODY".to_owned(), ..FakeNode::default() };
        Self {
            nodes: RefCell::new(vec![body]),
            body_data: HashMap::new(),
            touch: false,
            navigations: RefCell::new(Vec::new()),
            listeners: RefCell::new(Listeners::default()),
        }
    }

    pub fn with_touch(mut self) -> Self {
        self.touch = true;
        self
    }

    pub fn with_body_data(mut self, key: &str, value: &str) -> Self {
        self.body_data.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Append an attached element under `parent`.
    pub fn add(&self, parent: NodeId, tag: &str, class_name: &str, text: &str) -> NodeId {
        let id = self.alloc(tag, class_name, text);
        self.attach(parent, id, None);
        id
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[id.0].styles.get(property).cloned()
    }

    pub fn text(&self, id: NodeId) -> String {
        self.nodes.borrow()[id.0].text.clone()
    }

    pub fn classes(&self, id: NodeId) -> Vec<String> {
        self.nodes.borrow()[id.0].classes.clone()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[id.0].children.clone()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == BODY {
                return true;
            }
            cursor = nodes[current.0].parent;
        }
        false
    }

    pub fn body_classes(&self) -> Vec<String> {
        self.classes(BODY)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn pointer_listener_count(&self, id: NodeId) -> usize {
        self.listeners
            .borrow()
            .pointer
            .iter()
            .filter(|(node, _, _)| *node == id)
            .count()
    }

    pub fn fire_pointer(&self, id: NodeId, event: PointerEvent) {
        let mut pointer = std::mem::take(&mut self.listeners.borrow_mut().pointer);
        for (node, kind, handler) in &mut pointer {
            if *node == id && *kind == event {
                handler();
            }
        }
        let mut listeners = self.listeners.borrow_mut();
        pointer.append(&mut listeners.pointer);
        listeners.pointer = pointer;
    }

    pub fn fire_connectivity(&self, event: Connectivity) {
        let mut connectivity = std::mem::take(&mut self.listeners.borrow_mut().connectivity);
        for (kind, handler) in &mut connectivity {
            if *kind == event {
                handler();
            }
        }
        let mut listeners = self.listeners.borrow_mut();
        connectivity.append(&mut listeners.connectivity);
        listeners.connectivity = connectivity;
    }

    /// Dispatch a keydown; `PreventDefault` if any listener asked for it.
    pub fn press_key(&self, press: &KeyPress) -> KeyOutcome {
        let mut keydown = std::mem::take(&mut self.listeners.borrow_mut().keydown);
        let mut outcome = KeyOutcome::Default;
        for handler in &mut keydown {
            if handler(press) == KeyOutcome::PreventDefault {
                outcome = KeyOutcome::PreventDefault;
            }
        }
        let mut listeners = self.listeners.borrow_mut();
        keydown.append(&mut listeners.keydown);
        listeners.keydown = keydown;
        outcome
    }

    fn alloc(&self, tag: &str, class_name: &str, text: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(FakeNode {
            tag: tag.to_ascii_uppercase(),
            classes: class_name.split_whitespace().map(str::to_owned).collect(),
            text: text.to_owned(),
            ..FakeNode::default()
        });
        NodeId(nodes.len() - 1)
    }

    fn detach(&self, id: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[id.0].parent.take() {
            nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    fn attach(&self, parent: NodeId, child: NodeId, index: Option<usize>) {
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        match index {
            Some(i) => nodes[parent.0].children.insert(i, child),
            None => nodes[parent.0].children.push(child),
        }
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        let nodes = self.nodes.borrow();
        let node = &nodes[id.0];
        selector.split(',').map(str::trim).any(|part| match part.strip_prefix('.') {
            Some(class) => node.classes.iter().any(|c| c == class),
            None => node.tag.eq_ignore_ascii_case(part),
        })
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(root) {
            out.push(child);
            self.descendants(child, out);
        }
    }
}

impl Dom for FakeDom {
    type Element = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.descendants(BODY, &mut all);
        all.into_iter().filter(|id| self.matches(*id, selector)).collect()
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn create_element(&self, tag: &str, class_name: &str, text: &str) -> Option<NodeId> {
        Some(self.alloc(tag, class_name, text))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.attach(*parent, *child, None);
    }

    fn prepend_to_body(&self, element: &NodeId) {
        self.attach(BODY, *element, Some(0));
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let styles = &mut nodes[element.0].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, element: &NodeId) {
        self.detach(*element);
    }

    fn add_body_class(&self, class_name: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[BODY.0].classes;
        if !classes.iter().any(|c| c == class_name) {
            classes.push(class_name.to_owned());
        }
    }

    fn body_data(&self, key: &str) -> Option<String> {
        self.body_data.get(key).cloned()
    }

    fn supports_touch(&self) -> bool {
        self.touch
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_owned());
    }

    fn on_pointer(&self, element: &NodeId, event: PointerEvent, handler: Callback) {
        self.listeners.borrow_mut().pointer.push((*element, event, handler));
    }

    fn on_connectivity(&self, event: Connectivity, handler: Callback) {
        self.listeners.borrow_mut().connectivity.push((event, handler));
    }

    fn on_keydown(&self, handler: KeyHandler) {
        self.listeners.borrow_mut().keydown.push(handler);
    }
}

// =============================================================
// Scheduler
// =============================================================

struct Timer {
    due: Duration,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

/// Virtual clock: timers fire only when a test advances time.
#[derive(Default)]
pub struct FakeScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl FakeScheduler {
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Move the clock forward, firing due timers in (due, insertion) order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let timers = self.timers.borrow();
                timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i)
            };
            let Some(index) = next else {
                break;
            };
            let timer = self.timers.borrow_mut().swap_remove(index);
            self.now.set(timer.due);
            (timer.callback)();
        }
        self.now.set(target);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Advance to an absolute virtual time.
    pub fn advance_to_ms(&self, ms: u64) {
        let target = Duration::from_millis(ms);
        self.advance(target.saturating_sub(self.now.get()));
    }

    /// Run spawned tasks (and any they spawn) to completion.
    pub fn run_tasks(&self) {
        loop {
            let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                futures::executor::block_on(task);
            }
        }
    }
}

impl Scheduler for FakeScheduler {
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer { due: self.now.get() + delay, seq, callback });
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}

// =============================================================
// HTTP
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

/// Canned responses keyed by URL; unknown URLs answer 404.
#[derive(Default)]
pub struct FakeHttp {
    routes: RefCell<HashMap<String, Result<HttpResponse, FetchError>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeHttp {
    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.routes
            .borrow_mut()
            .insert(url.to_owned(), Ok(HttpResponse { status, body: body.to_owned() }));
    }

    pub fn fail(&self, url: &str, err: FetchError) {
        self.routes.borrow_mut().insert(url.to_owned(), Err(err));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn answer(&self, method: &'static str, url: &str, body: Option<serde_json::Value>) -> Result<HttpResponse, FetchError> {
        self.requests.borrow_mut().push(RecordedRequest { method, url: url.to_owned(), body });
        self.routes
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse { status: 404, body: String::new() }))
    }
}

impl HttpClient for FakeHttp {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>> {
        let result = self.answer("GET", url, None);
        Box::pin(futures::future::ready(result))
    }

    fn post_json(&self, url: &str, body: serde_json::Value) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>> {
        let result = self.answer("POST", url, Some(body));
        Box::pin(futures::future::ready(result))
    }
}

// =============================================================
// Harness
// =============================================================

pub struct Harness {
    pub env: PageEnv<FakeDom>,
    pub dom: Rc<FakeDom>,
    pub scheduler: Rc<FakeScheduler>,
    pub http: Rc<FakeHttp>,
}

impl Harness {
    pub fn new(dom: FakeDom) -> Self {
        let dom = Rc::new(dom);
        let scheduler = Rc::new(FakeScheduler::default());
        let http = Rc::new(FakeHttp::default());
        let env = PageEnv::new(Rc::clone(&dom), scheduler.clone(), http.clone());
        Self { env, dom, scheduler, http }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(FakeDom::new())
    }
}
