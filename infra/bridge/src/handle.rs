use crate::capability::Capability;
use crate::descriptor::{CapabilityDescriptor, Operation, PushStep};
use crate::error::{BridgeError, BridgeErrorExt};
use crate::gate::{ReadinessConfig, ReadinessGate};
use crate::negotiator::Negotiator;
use revive_domain::reply::OpReply;
use revive_domain::state::BridgeState;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, trace};

#[derive(Debug)]
struct HandleInner {
    gate: ReadinessGate,
    negotiator: Negotiator,
    negotiated: AtomicBool,
}

/// Process-wide bridge handle, cloned into every feature slice.
#[derive(Debug, Clone)]
pub struct BridgeHandle {
    inner: Arc<HandleInner>,
}

impl BridgeHandle {
    pub fn new(config: impl Into<ReadinessConfig>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                gate: ReadinessGate::new(config.into()),
                negotiator: Negotiator::new(),
                negotiated: AtomicBool::new(false),
            }),
        }
    }

    pub fn gate(&self) -> &ReadinessGate {
        &self.inner.gate
    }

    pub fn attach(&self, capability: Arc<dyn Capability>) {
        self.inner.gate.attach(capability);
    }

    pub fn announce(&self) {
        self.inner.gate.announce();
    }

    /// Waits for the gate, then resolves every registered descriptor once.
    pub async fn ready(&self) -> Arc<dyn Capability> {
        let cap = self.inner.gate.await_ready().await;
        if !self.inner.negotiated.swap(true, Ordering::AcqRel) {
            let descriptors = self.inner.negotiator.descriptors();
            let unresolved = self.inner.negotiator.resolve_all(cap.as_ref());
            info!(features = descriptors.len(), unresolved = unresolved.len(), "Capabilities negotiated");
        }
        cap
    }

    pub fn is_ready(&self) -> bool {
        self.inner.gate.is_ready()
    }

    pub fn state(&self) -> BridgeState {
        self.inner.gate.state()
    }

    pub fn probe(&self, operation: Option<&str>) -> bool {
        self.inner.gate.probe(operation)
    }

    pub fn register(&self, descriptor: CapabilityDescriptor) {
        self.inner.negotiator.register(descriptor);
    }

    /// Host name `op` resolves to, if the bridge is up and exposes a candidate.
    pub fn resolve(&self, op: &Operation) -> Option<&'static str> {
        let cap = self.inner.gate.capability()?;
        self.inner.negotiator.resolve(cap.as_ref(), op)
    }

    pub fn supports(&self, op: &Operation) -> bool {
        self.resolve(op).is_some()
    }

    /// Invokes `op` through its resolved host name.
    ///
    /// # Errors
    /// `NotReady` before the gate opened, `Unsupported` when no candidate is exposed,
    /// otherwise whatever the host returns.
    pub async fn call(&self, op: &Operation, args: Vec<Value>) -> Result<Value, BridgeError> {
        let cap = self.inner.gate.capability().ok_or(BridgeError::NotReady { context: Some(op.key.into()) })?;
        let name = self.inner.negotiator.resolve(cap.as_ref(), op).ok_or_else(|| BridgeError::unsupported(op.key))?;
        trace!(op = op.key, name, args = args.len(), "Invoking");
        cap.invoke(name, args).await
    }

    pub async fn call_as<T: DeserializeOwned>(&self, op: &Operation, args: Vec<Value>) -> Result<T, BridgeError> {
        let value = self.call(op, args).await?;
        serde_json::from_value(value).context(op.key)
    }

    /// One-shot action call. Never fails: every problem becomes a failed [`OpReply`].
    pub async fn call_soft(&self, op: &Operation, args: Vec<Value>) -> OpReply {
        match self.call(op, args).await {
            Ok(Value::Bool(ok)) => OpReply::from(ok),
            Ok(Value::Null) => OpReply::refused("no_reply"),
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value(value).unwrap_or_else(|e| OpReply::failure(format!("Malformed reply: {e}")))
            },
            Ok(_) => OpReply::success(),
            Err(e) => OpReply::failure(e.to_string()),
        }
    }

    /// Runs the first alternative of `step` whose operations all resolve.
    ///
    /// Calls run in order; the first failure aborts the sequence. A reply of `{ok: false}`
    /// counts as a failure.
    pub async fn run_step(&self, step: &PushStep) -> Result<(), BridgeError> {
        if !self.is_ready() {
            return Err(BridgeError::NotReady { context: Some(step.label.into()) });
        }
        let calls = step
            .alternatives
            .iter()
            .find(|calls| calls.iter().all(|call| self.supports(&call.op)))
            .ok_or_else(|| BridgeError::unsupported(step.label))?;

        for call in calls {
            let reply = self.call(&call.op, call.args.clone()).await?;
            if let Some(false) = reply.get("ok").and_then(Value::as_bool) {
                let message = reply.get("error").and_then(Value::as_str).unwrap_or("rejected");
                return Err(BridgeError::call(call.op.key, message));
            }
        }
        Ok(())
    }
}

impl Default for BridgeHandle {
    fn default() -> Self {
        Self::new(ReadinessConfig::default())
    }
}
