//! Scriptable in-memory host.
//!
//! Serves a JSON state tree through named operations, records every call and probe, and can
//! fail, delay or hang selected operations. Used by tests across the workspace and by the demo
//! shell.

use crate::capability::{Capability, HostNotifier};
use crate::error::BridgeError;
use crate::handle::BridgeHandle;
use async_trait::async_trait;
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Custom operation body. Receives the call arguments and the mutable state tree.
pub type Handler = Arc<dyn Fn(&[Value], &mut Value) -> Result<Value, String> + Send + Sync>;

#[derive(Clone)]
enum Behaviour {
    Value(Value),
    /// Returns the tree value at a JSON pointer (`null` when absent).
    Read(String),
    /// Stores the first argument at a JSON pointer and returns `true`.
    Write(String),
    Handler(Handler),
}

impl fmt::Debug for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Read(p) => f.debug_tuple("Read").field(p).finish(),
            Self::Write(p) => f.debug_tuple("Write").field(p).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

#[derive(Default)]
struct HostState {
    tree: Value,
    ops: FxHashMap<String, Behaviour>,
    failing: FxHashMap<String, String>,
    hanging: FxHashSet<String>,
    delays: FxHashMap<String, Duration>,
    calls: Vec<(String, Vec<Value>)>,
    probes: FxHashMap<String, usize>,
    notifier: Option<Arc<dyn HostNotifier>>,
}

/// In-memory [`Capability`] implementation.
pub struct MemoryHost {
    state: Mutex<HostState>,
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        let mut ops: Vec<&String> = state.ops.keys().collect();
        ops.sort();
        f.debug_struct("MemoryHost").field("ops", &ops).field("calls", &state.calls.len()).finish_non_exhaustive()
    }
}

impl MemoryHost {
    pub fn new(tree: Value) -> Self {
        Self { state: Mutex::new(HostState { tree, ..HostState::default() }) }
    }

    #[must_use]
    pub fn with_value(self, name: &str, value: Value) -> Self {
        self.set_value(name, value);
        self
    }

    #[must_use]
    pub fn with_read(self, name: &str, pointer: &str) -> Self {
        self.define(name, Behaviour::Read(pointer.to_owned()));
        self
    }

    #[must_use]
    pub fn with_write(self, name: &str, pointer: &str) -> Self {
        self.define(name, Behaviour::Write(pointer.to_owned()));
        self
    }

    #[must_use]
    pub fn with_handler<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&[Value], &mut Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.define(name, Behaviour::Handler(Arc::new(handler)));
        self
    }

    /// Defines (or redefines) `name` to return a fixed value.
    pub fn set_value(&self, name: &str, value: Value) {
        self.define(name, Behaviour::Value(value));
    }

    pub fn remove(&self, name: &str) {
        self.state.lock().ops.remove(name);
    }

    /// Makes `name` fail with a `Call` error until [`MemoryHost::recover`].
    pub fn fail(&self, name: &str, message: &str) {
        self.state.lock().failing.insert(name.to_owned(), message.to_owned());
    }

    pub fn recover(&self, name: &str) {
        let mut state = self.state.lock();
        state.failing.remove(name);
        state.hanging.remove(name);
    }

    /// Makes calls to `name` never complete.
    pub fn hang(&self, name: &str) {
        self.state.lock().hanging.insert(name.to_owned());
    }

    pub fn delay(&self, name: &str, delay: Duration) {
        self.state.lock().delays.insert(name.to_owned(), delay);
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().calls.clone()
    }

    pub fn calls_to(&self, name: &str) -> Vec<Vec<Value>> {
        self.state.lock().calls.iter().filter(|(n, _)| n == name).map(|(_, args)| args.clone()).collect()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.state.lock().calls.iter().filter(|(n, _)| n == name).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn probe_count(&self, name: &str) -> usize {
        self.state.lock().probes.get(name).copied().unwrap_or_default()
    }

    pub fn tree_value(&self, pointer: &str) -> Option<Value> {
        self.state.lock().tree.pointer(pointer).cloned()
    }

    pub fn set_tree_value(&self, pointer: &str, value: Value) {
        write_pointer(&mut self.state.lock().tree, pointer, value);
    }

    /// Routes [`MemoryHost::emit`] to the store's notification entry points.
    pub fn connect_notifier(&self, notifier: Arc<dyn HostNotifier>) {
        self.state.lock().notifier = Some(notifier);
    }

    /// Sends a store notification. Returns `false` when nothing is connected.
    pub fn emit(&self, entry: &str, args: Vec<Value>) -> bool {
        let notifier = self.state.lock().notifier.clone();
        notifier.is_some_and(|n| {
            n.notify(entry, args);
            true
        })
    }

    /// Attaches to `bridge` and fires the ready event, the way a real host does on load.
    pub fn attach_to(self: &Arc<Self>, bridge: &BridgeHandle) {
        bridge.attach(self.clone());
        bridge.announce();
    }

    fn define(&self, name: &str, behaviour: Behaviour) {
        self.state.lock().ops.insert(name.to_owned(), behaviour);
    }

    fn execute(&self, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
        let mut state = self.state.lock();
        if let Some(message) = state.failing.get(name) {
            return Err(BridgeError::call(name, message.clone()));
        }
        let behaviour = state.ops.get(name).cloned().ok_or_else(|| BridgeError::unsupported(name.to_owned()))?;
        match behaviour {
            Behaviour::Value(value) => Ok(value),
            Behaviour::Read(pointer) => Ok(state.tree.pointer(&pointer).cloned().unwrap_or(Value::Null)),
            Behaviour::Write(pointer) => {
                write_pointer(&mut state.tree, &pointer, args.first().cloned().unwrap_or(Value::Null));
                Ok(Value::Bool(true))
            },
            Behaviour::Handler(handler) => handler(args, &mut state.tree).map_err(|e| BridgeError::call(name, e)),
        }
    }
}

#[async_trait]
impl Capability for MemoryHost {
    fn has_operation(&self, name: &str) -> bool {
        let mut state = self.state.lock();
        *state.probes.entry(name.to_owned()).or_default() += 1;
        state.ops.contains_key(name)
    }

    async fn invoke(&self, name: &str, args: Vec<Value>) -> Result<Value, BridgeError> {
        let (hanging, delay) = {
            let mut state = self.state.lock();
            state.calls.push((name.to_owned(), args.clone()));
            (state.hanging.contains(name), state.delays.get(name).copied())
        };
        if hanging {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.execute(name, &args)
    }
}

/// Writes `value` at `pointer`, creating intermediate objects.
fn write_pointer(tree: &mut Value, pointer: &str, value: Value) {
    let mut node = tree;
    for token in pointer.split('/').skip(1) {
        let key = token.replace("~1", "/").replace("~0", "~");
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else { return };
        node = map.entry(key).or_insert(Value::Null);
    }
    *node = value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn read_write_and_handlers_share_the_tree() {
        let host = MemoryHost::new(json!({"macros": {"enabled": false}}))
            .with_read("macros_get", "/macros")
            .with_write("macros_set_enabled", "/macros/enabled")
            .with_handler("macros_toggle", |_, tree| {
                let flag = tree.pointer_mut("/macros/enabled").ok_or("missing")?;
                *flag = json!(!flag.as_bool().unwrap_or_default());
                Ok(flag.clone())
            });

        host.invoke("macros_set_enabled", vec![json!(true)]).await.unwrap();
        assert_eq!(host.invoke("macros_get", vec![]).await.unwrap(), json!({"enabled": true}));
        assert_eq!(host.invoke("macros_toggle", vec![]).await.unwrap(), json!(false));
        assert_eq!(host.call_count("macros_get"), 1);
    }

    #[tokio::test]
    async fn failures_and_unknown_operations() {
        let host = MemoryHost::new(json!({})).with_value("buff_run_once", json!(true));
        host.fail("buff_run_once", "window lost");
        assert!(matches!(host.invoke("buff_run_once", vec![]).await, Err(BridgeError::Call { .. })));

        host.recover("buff_run_once");
        assert_eq!(host.invoke("buff_run_once", vec![]).await.unwrap(), json!(true));
        assert!(matches!(host.invoke("nope", vec![]).await, Err(BridgeError::Unsupported { .. })));
    }

    #[test]
    fn write_pointer_creates_parents() {
        let mut tree = json!(null);
        write_pointer(&mut tree, "/respawn/wait_seconds", json!(30));
        assert_eq!(tree, json!({"respawn": {"wait_seconds": 30}}));
    }
}
