use crate::capability::Capability;
use crate::descriptor::{CapabilityDescriptor, Operation};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use tracing::{debug, info};

/// Maps logical operations onto the host names that implement them.
///
/// Hits are cached for the lifetime of the process; misses are retried on the next lookup
/// because hosts may expose operations late.
#[derive(Debug, Default)]
pub struct Negotiator {
    resolved: RwLock<FxHashMap<&'static str, &'static str>>,
    descriptors: RwLock<Vec<CapabilityDescriptor>>,
}

impl Negotiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a feature's operation table, replacing an earlier one for the same feature.
    pub fn register(&self, descriptor: CapabilityDescriptor) {
        let mut descriptors = self.descriptors.write();
        match descriptors.iter_mut().find(|d| d.feature == descriptor.feature) {
            Some(existing) => *existing = descriptor,
            None => descriptors.push(descriptor),
        }
    }

    pub fn descriptors(&self) -> Vec<CapabilityDescriptor> {
        self.descriptors.read().clone()
    }

    pub fn resolve(&self, capability: &dyn Capability, op: &Operation) -> Option<&'static str> {
        if let Some(name) = self.cached(op) {
            return Some(name);
        }
        let name = op.candidates.iter().copied().find(|name| capability.has_operation(name))?;
        debug!(op = op.key, name, "Operation resolved");
        self.resolved.write().insert(op.key, name);
        Some(name)
    }

    pub fn cached(&self, op: &Operation) -> Option<&'static str> {
        self.resolved.read().get(op.key).copied()
    }

    /// Resolves every registered operation, returning the keys nothing matched.
    pub fn resolve_all(&self, capability: &dyn Capability) -> Vec<&'static str> {
        let descriptors = self.descriptors.read().clone();
        let mut unresolved = Vec::new();
        for descriptor in &descriptors {
            for op in &descriptor.operations {
                if self.resolve(capability, op).is_none() {
                    unresolved.push(op.key);
                }
            }
        }
        if !unresolved.is_empty() {
            info!(count = unresolved.len(), ops = ?unresolved, "Operations not exposed by host");
        }
        unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use serde_json::json;

    const SAVE: Operation = Operation::new("autofarm.save", &["autofarm_save", "af_save_settings", "af_set_config"]);
    const RUN: Operation = Operation::new("teleport.run", &["teleport_run_now", "tp_now"]);

    #[test]
    fn first_exposed_candidate_wins() {
        let host = MemoryHost::new(json!({})).with_value("af_set_config", json!(true)).with_value(
            "af_save_settings",
            json!(true),
        );
        let negotiator = Negotiator::new();
        assert_eq!(negotiator.resolve(&host, &SAVE), Some("af_save_settings"));
    }

    #[test]
    fn hit_is_cached_without_reprobing() {
        let host = MemoryHost::new(json!({})).with_value("tp_now", json!(true));
        let negotiator = Negotiator::new();
        assert_eq!(negotiator.resolve(&host, &RUN), Some("tp_now"));
        let probes = host.probe_count("teleport_run_now");

        host.set_value("teleport_run_now", json!(true));
        assert_eq!(negotiator.resolve(&host, &RUN), Some("tp_now"));
        assert_eq!(host.probe_count("teleport_run_now"), probes);
    }

    #[test]
    fn miss_is_retried() {
        let host = MemoryHost::new(json!({}));
        let negotiator = Negotiator::new();
        assert_eq!(negotiator.resolve(&host, &RUN), None);

        host.set_value("tp_now", json!(true));
        assert_eq!(negotiator.resolve(&host, &RUN), Some("tp_now"));
    }

    #[test]
    fn resolve_all_reports_missing_keys() {
        let host = MemoryHost::new(json!({})).with_value("autofarm_save", json!(true));
        let negotiator = Negotiator::new();
        negotiator.register(CapabilityDescriptor::new("autofarm", 1, [SAVE]));
        negotiator.register(CapabilityDescriptor::new("teleport", 1, [RUN]));
        negotiator.register(CapabilityDescriptor::new("teleport", 2, [RUN]));

        assert_eq!(negotiator.descriptors().len(), 2);
        assert_eq!(negotiator.resolve_all(&host), vec!["teleport.run"]);
        assert_eq!(negotiator.cached(&SAVE), Some("autofarm_save"));
    }
}
