//! Seams to the host runtime that consumes the definitions.

use std::collections::BTreeSet;

use fieldsmith_core::Value;

/// Capability the host must provide before any definitions are declared.
pub const LOCAL_FIELD_GROUPS: &str = "acf_add_local_field_group";

/// The runtime that will load the generated definitions.
pub trait Host {
    /// Whether the runtime exposes the named capability.
    fn provides(&self, capability: &str) -> bool;
}

/// A host with a fixed set of capabilities.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    capabilities: BTreeSet<String>,
}

impl StaticHost {
    /// A host that provides nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host running Advanced Custom Fields Pro.
    pub fn acf_pro() -> Self {
        Self::new().with(LOCAL_FIELD_GROUPS)
    }

    /// Add a capability.
    pub fn with(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }
}

impl Host for StaticHost {
    fn provides(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Accepts finished definitions one at a time, like the host's registration call.
pub trait Registry {
    fn register(&mut self, definition: Value);
}

impl Registry for Vec<Value> {
    fn register(&mut self, definition: Value) {
        self.push(definition);
    }
}
