// Shared in-memory mock of the driver boundary.
//
// Nodes live in an arena; locators bind to node ids at the document root
// or under a parent node, so tests can swap what a locator resolves to
// between calls and watch the library re-resolve. Every boundary call is
// recorded for dispatch assertions.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use webgrip::{
    CoreError, Driver, DriverElement, DynDriver, DynElement, ElementRect, Locator, Result,
};

pub type NodeId = usize;

/// Route library logs into test output; safe to call from every test
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// One mock DOM node
#[derive(Debug, Clone)]
pub struct Node {
    pub tag: String,
    pub text: String,
    pub value: String,
    pub attrs: HashMap<String, String>,
    pub displayed: bool,
    pub enabled: bool,
    pub selected: bool,
    /// Clicks (native or scripted) flip `selected`, checkbox-style
    pub toggle_on_click: bool,
    /// Swallow keystrokes without updating `value`
    pub drop_keys: bool,
    /// Node left the document; any operation on it reads as not present
    pub removed: bool,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            text: String::new(),
            value: String::new(),
            attrs: HashMap::new(),
            displayed: true,
            enabled: true,
            selected: false,
            toggle_on_click: false,
            drop_keys: false,
            removed: false,
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn toggles(mut self) -> Self {
        self.toggle_on_click = true;
        self
    }

    pub fn lossy(mut self) -> Self {
        self.drop_keys = true;
        self
    }
}

/// One recorded boundary call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Goto(String),
    FindAll(String),
    NativeClick(NodeId),
    SendKeys { node: NodeId, keys: String },
    Clear(NodeId),
    Script { script: String, node: Option<NodeId> },
    Op(String),
}

#[derive(Default)]
struct State {
    nodes: Vec<Node>,
    roots: HashMap<String, Vec<NodeId>>,
    children: HashMap<(NodeId, String), Vec<NodeId>>,
    calls: Vec<Call>,
    url: String,
    title: String,
}

/// Clonable handle over one shared mock document
#[derive(Clone)]
pub struct MockDriver {
    state: Arc<Mutex<State>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// This mock as a driver-boundary handle sharing the same document
    pub fn as_driver(&self) -> DynDriver {
        Arc::new(self.clone())
    }

    /// Register a node without binding it to any locator
    pub fn add_node(&self, node: Node) -> NodeId {
        let mut state = self.state.lock().unwrap();
        state.nodes.push(node);
        state.nodes.len() - 1
    }

    /// Register a node and bind it as the sole root match for `locator`
    pub fn element(&self, locator: &Locator, node: Node) -> NodeId {
        let id = self.add_node(node);
        self.bind(locator, &[id]);
        id
    }

    /// Replace the root bindings for `locator`
    pub fn bind(&self, locator: &Locator, ids: &[NodeId]) {
        let mut state = self.state.lock().unwrap();
        state.roots.insert(locator.to_string(), ids.to_vec());
    }

    /// Replace the bindings for `locator` scoped under `parent`
    pub fn bind_children(&self, parent: NodeId, locator: &Locator, ids: &[NodeId]) {
        let mut state = self.state.lock().unwrap();
        state
            .children
            .insert((parent, locator.to_string()), ids.to_vec());
    }

    /// Mark a node as gone from the document
    pub fn remove(&self, id: NodeId) {
        self.update(id, |node| node.removed = true);
    }

    pub fn node_state(&self, id: NodeId) -> Node {
        self.state.lock().unwrap().nodes[id].clone()
    }

    pub fn update(&self, id: NodeId, f: impl FnOnce(&mut Node)) {
        let mut state = self.state.lock().unwrap();
        f(&mut state.nodes[id]);
    }

    pub fn set_title(&self, title: &str) {
        self.state.lock().unwrap().title = title.to_string();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Count of resolutions performed for a locator
    pub fn resolutions(&self, locator: &Locator) -> usize {
        let wanted = locator.to_string();
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::FindAll(l) if *l == wanted))
            .count()
    }

    pub fn native_clicks(&self, id: NodeId) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::NativeClick(n) if *n == id))
            .count()
    }

    /// Scripts run against `id` whose body contains `fragment`
    pub fn scripts_on(&self, id: NodeId, fragment: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(call, Call::Script { script, node: Some(n) }
                    if *n == id && script.contains(fragment))
            })
            .count()
    }

    pub fn send_keys_calls(&self, id: NodeId) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::SendKeys { node, keys } if *node == id => Some(keys.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self, id: NodeId) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Clear(n) if *n == id))
            .count()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn wrap(&self, id: NodeId, locator: &Locator) -> DynElement {
        Arc::new(MockElement {
            state: self.state.clone(),
            id,
            locator: locator.to_string(),
        })
    }

    fn live_matches(&self, key: &str) -> Vec<NodeId> {
        let state = self.state.lock().unwrap();
        state
            .roots
            .get(key)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| !state.nodes[*id].removed)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(Call::Goto(url.to_string()));
        self.state.lock().unwrap().url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().title.clone())
    }

    async fn find(&self, locator: &Locator) -> Result<DynElement> {
        let mut all = Driver::find_all(self, locator).await?;
        if all.is_empty() {
            return Err(CoreError::NotPresent {
                locator: locator.to_string(),
            });
        }
        Ok(all.swap_remove(0))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<DynElement>> {
        self.record(Call::FindAll(locator.to_string()));
        Ok(self
            .live_matches(&locator.to_string())
            .into_iter()
            .map(|id| self.wrap(id, locator))
            .collect())
    }

    async fn execute(&self, script: &str, _args: Vec<Value>) -> Result<Value> {
        self.record(Call::Script {
            script: script.to_string(),
            node: None,
        });
        if script.contains("document.readyState") {
            return Ok(json!(true));
        }
        if script.contains("document.title") {
            return Ok(json!(self.state.lock().unwrap().title.clone()));
        }
        if script.contains("pageYOffset") {
            return Ok(json!(0));
        }
        Ok(Value::Null)
    }

    async fn refresh(&self) -> Result<()> {
        self.record(Call::Op("refresh".into()));
        Ok(())
    }

    async fn back(&self) -> Result<()> {
        self.record(Call::Op("back".into()));
        Ok(())
    }

    async fn forward(&self) -> Result<()> {
        self.record(Call::Op("forward".into()));
        Ok(())
    }

    async fn switch_to_frame(&self, index: u16) -> Result<()> {
        self.record(Call::Op(format!("frame:{index}")));
        Ok(())
    }

    async fn switch_to_default(&self) -> Result<()> {
        self.record(Call::Op("default-content".into()));
        Ok(())
    }

    async fn window_handles(&self) -> Result<Vec<String>> {
        Ok(vec!["w-0".to_string(), "w-1".to_string()])
    }

    async fn switch_to_window(&self, handle: &str) -> Result<()> {
        self.record(Call::Op(format!("window:{handle}")));
        Ok(())
    }

    async fn set_implicit_timeout(&self, timeout: Duration) -> Result<()> {
        self.record(Call::Op(format!("implicit:{}ms", timeout.as_millis())));
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

struct MockElement {
    state: Arc<Mutex<State>>,
    id: NodeId,
    locator: String,
}

impl MockElement {
    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn ensure_live(&self) -> Result<()> {
        let state = self.state.lock().unwrap();
        if state.nodes[self.id].removed {
            Err(CoreError::NotPresent {
                locator: self.locator.clone(),
            })
        } else {
            Ok(())
        }
    }

    fn node(&self) -> Node {
        self.state.lock().unwrap().nodes[self.id].clone()
    }
}

#[async_trait]
impl DriverElement for MockElement {
    async fn click(&self) -> Result<()> {
        self.ensure_live()?;
        self.record(Call::NativeClick(self.id));
        let mut state = self.state.lock().unwrap();
        let node = &mut state.nodes[self.id];
        if node.toggle_on_click {
            node.selected = !node.selected;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.ensure_live()?;
        self.record(Call::Clear(self.id));
        self.state.lock().unwrap().nodes[self.id].value.clear();
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.ensure_live()?;
        self.record(Call::SendKeys {
            node: self.id,
            keys: text.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        let node = &mut state.nodes[self.id];
        if !node.drop_keys {
            node.value.push_str(text);
        }
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.node().text)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        self.ensure_live()?;
        let node = self.node();
        match name {
            "value" => Ok(Some(node.value)),
            "textContent" => Ok(Some(node.text)),
            _ => Ok(node.attrs.get(name).cloned()),
        }
    }

    async fn prop(&self, name: &str) -> Result<Option<String>> {
        self.attr(name).await
    }

    async fn css_value(&self, _name: &str) -> Result<String> {
        self.ensure_live()?;
        Ok(String::new())
    }

    async fn tag_name(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.node().tag)
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.ensure_live()?;
        Ok(self.node().displayed)
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.ensure_live()?;
        Ok(self.node().enabled)
    }

    async fn is_selected(&self) -> Result<bool> {
        self.ensure_live()?;
        Ok(self.node().selected)
    }

    async fn rect(&self) -> Result<ElementRect> {
        self.ensure_live()?;
        Ok(ElementRect {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 20.0,
        })
    }

    async fn find(&self, locator: &Locator) -> Result<DynElement> {
        let mut all = DriverElement::find_all(self, locator).await?;
        if all.is_empty() {
            return Err(CoreError::NotPresent {
                locator: locator.to_string(),
            });
        }
        Ok(all.swap_remove(0))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<DynElement>> {
        self.ensure_live()?;
        let key = (self.id, locator.to_string());
        let wrapped: Vec<DynElement> = {
            let state = self.state.lock().unwrap();
            state
                .children
                .get(&key)
                .map(|ids| {
                    ids.iter()
                        .copied()
                        .filter(|id| !state.nodes[*id].removed)
                        .map(|id| {
                            Arc::new(MockElement {
                                state: self.state.clone(),
                                id,
                                locator: locator.to_string(),
                            }) as DynElement
                        })
                        .collect()
                })
                .unwrap_or_default()
        };
        Ok(wrapped)
    }

    async fn execute(&self, script: &str) -> Result<Value> {
        self.ensure_live()?;
        self.record(Call::Script {
            script: script.to_string(),
            node: Some(self.id),
        });
        if script.contains(".click()") {
            let mut state = self.state.lock().unwrap();
            let node = &mut state.nodes[self.id];
            if node.toggle_on_click {
                node.selected = !node.selected;
            }
        }
        if script.contains("innerHTML") {
            return Ok(json!(self.node().text));
        }
        Ok(Value::Null)
    }
}
