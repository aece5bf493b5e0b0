use serde_json::Value;
use std::fmt;

/// A logical store operation and the host names that may implement it, most preferred first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub key: &'static str,
    pub candidates: &'static [&'static str],
}

impl Operation {
    pub const fn new(key: &'static str, candidates: &'static [&'static str]) -> Self {
        Self { key, candidates }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key)
    }
}

/// The operations a feature slice needs, registered once at startup.
///
/// `version` identifies the host surface revision the table was written against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub feature: &'static str,
    pub version: u32,
    pub operations: Vec<Operation>,
}

impl CapabilityDescriptor {
    pub fn new(feature: &'static str, version: u32, operations: impl IntoIterator<Item = Operation>) -> Self {
        Self { feature, version, operations: operations.into_iter().collect() }
    }
}

/// One call of a push step.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Operation,
    pub args: Vec<Value>,
}

impl Call {
    pub const fn new(op: Operation, args: Vec<Value>) -> Self {
        Self { op, args }
    }
}

/// A unit of work sent to the store for one edit group.
///
/// Holds alternative call sequences; the first whose operations all resolve is executed.
#[derive(Debug, Clone, PartialEq)]
pub struct PushStep {
    pub label: &'static str,
    pub alternatives: Vec<Vec<Call>>,
}

impl PushStep {
    /// Single call, no alternatives.
    pub fn call(label: &'static str, op: Operation, args: Vec<Value>) -> Self {
        Self { label, alternatives: vec![vec![Call::new(op, args)]] }
    }

    pub fn sequence(label: &'static str, calls: Vec<Call>) -> Self {
        Self { label, alternatives: vec![calls] }
    }

    /// Adds a fallback sequence tried when the earlier ones are not fully supported.
    #[must_use]
    pub fn or(mut self, calls: Vec<Call>) -> Self {
        self.alternatives.push(calls);
        self
    }
}
