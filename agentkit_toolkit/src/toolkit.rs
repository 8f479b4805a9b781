use std::sync::Arc;

use agentkit_core::{default_registry, ActionRegistry, Agentkit};
use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::tool::{ActionTool, AgentTool, ToolDefinition};

/// The built-in actions exposed as agent tools.
///
/// Tools keep registry order and are fixed once the toolkit is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toolkit {
    tools: Vec<ActionTool>,
}

impl Toolkit {
    /// Wrap every action of the default registry.
    pub fn from_agentkit(agentkit: Arc<Agentkit>) -> Self {
        Self::from_registry(&default_registry(), agentkit)
    }

    /// Wrap every action of `registry`, one tool per action, in order.
    pub fn from_registry(registry: &ActionRegistry, agentkit: Arc<Agentkit>) -> Self {
        let tools: Vec<ActionTool> = registry
            .iter()
            .map(|action| ActionTool::new(Arc::clone(action), Arc::clone(&agentkit)))
            .collect();
        tracing::debug!(tools = tools.len(), "built toolkit");
        Self { tools }
    }

    pub fn get_tools(&self) -> &[ActionTool] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Option<&ActionTool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(AgentTool::definition).collect()
    }

    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value> {
        let tool = self
            .tool(name)
            .ok_or_else(|| anyhow!("Unknown tool: {name}"))?;
        tool.invoke(args).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl<'a> IntoIterator for &'a Toolkit {
    type Item = &'a ActionTool;
    type IntoIter = std::slice::Iter<'a, ActionTool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}
