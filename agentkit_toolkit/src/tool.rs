use std::fmt;
use std::sync::Arc;

use agentkit_core::{Action, ActionMetadata, Agentkit};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Function-calling description of a tool, as an LLM provider expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Interface an agent orchestrator drives: describe, then invoke by name.
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters(&self) -> &Value;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().clone(),
        }
    }

    async fn invoke(&self, args: Value) -> Result<Value>;
}

/// An action bound to the agentkit it runs against.
#[derive(Clone)]
pub struct ActionTool {
    name: String,
    description: String,
    args_schema: Value,
    agentkit: Arc<Agentkit>,
    action: Arc<dyn Action>,
}

impl ActionTool {
    pub fn new(action: Arc<dyn Action>, agentkit: Arc<Agentkit>) -> Self {
        let ActionMetadata {
            name,
            description,
            input_schema,
            ..
        } = action.metadata().clone();

        Self {
            name,
            description,
            args_schema: input_schema,
            agentkit,
            action,
        }
    }

    pub fn args_schema(&self) -> &Value {
        &self.args_schema
    }

    pub fn agentkit(&self) -> &Arc<Agentkit> {
        &self.agentkit
    }

    pub fn action(&self) -> &Arc<dyn Action> {
        &self.action
    }
}

impl fmt::Debug for ActionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("args_schema", &self.args_schema)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ActionTool {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.args_schema == other.args_schema
            && Arc::ptr_eq(&self.agentkit, &other.agentkit)
            && Arc::ptr_eq(&self.action, &other.action)
    }
}

#[async_trait]
impl AgentTool for ActionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &Value {
        &self.args_schema
    }

    async fn invoke(&self, args: Value) -> Result<Value> {
        tracing::debug!(tool = %self.name, "invoking tool");
        self.action.call(&self.agentkit, args).await
    }
}
