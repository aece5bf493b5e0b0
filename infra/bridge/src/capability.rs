use crate::error::BridgeError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// The host's call surface.
///
/// Operations are looked up by name; the set may grow after attachment, so
/// `has_operation` is asked again until a name has been resolved once.
#[async_trait]
pub trait Capability: Send + Sync + Debug + 'static {
    fn has_operation(&self, name: &str) -> bool;

    async fn invoke(&self, name: &str, args: Vec<Value>) -> Result<Value, BridgeError>;
}

/// Inbound side of the host: store-initiated notifications dispatched by entry point name
/// (`onStatus`, `onRows`, `onRowSelected`, `onBuffMethods`).
pub trait HostNotifier: Send + Sync + Debug + 'static {
    fn notify(&self, entry: &str, args: Vec<Value>);
}
