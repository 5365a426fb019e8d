//! Tool registry

use crate::Tool;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Registry of tools available to an agent.
///
/// Tools are keyed by name; listing is deterministic (name order) so the
/// tool definitions sent to the model are stable across runs.
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(BTreeMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap();
        if let Some(previous) = tools.insert(tool.name().to_string(), tool) {
            tracing::warn!(name = previous.name(), "tool re-registered, replacing");
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        tools.get(name).cloned()
    }

    /// All registered tools, in name order
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        tools.values().cloned().collect()
    }

    /// Registered tool names, in order
    pub fn names(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap();
        tools.keys().cloned().collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap();
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap();
        tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolResult;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        async fn execute(&self, _params: Value) -> ToolResult {
            Ok(json!(self.0))
        }

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(NamedTool("beta")));
        registry.register(Arc::new(NamedTool("alpha")));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_listing_is_name_ordered() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("gamma")));
        registry.register(Arc::new(NamedTool("alpha")));
        registry.register(Arc::new(NamedTool("beta")));

        assert_eq!(registry.names(), ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_reregistration_replaces() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("alpha")));
        registry.register(Arc::new(NamedTool("alpha")));
        assert_eq!(registry.len(), 1);
    }
}
