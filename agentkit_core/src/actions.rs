use std::sync::Arc;

use async_trait::async_trait;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agentkit::Agentkit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionExample {
    pub input: Value,
    pub output: Value,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMetadata {
    pub name: String,
    pub similes: Vec<String>,
    pub description: String,
    pub examples: Vec<ActionExample>,
    pub input_schema: Value,
}

#[async_trait]
pub trait Action: Send + Sync {
    fn metadata(&self) -> &ActionMetadata;

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value>;
}

/// Ordered collection of actions; iteration follows registration order.
#[derive(Default, Clone)]
pub struct ActionRegistry {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append an action. Registering a name twice replaces the earlier
    /// action but keeps its position.
    pub fn register<A>(&mut self, action: A)
    where
        A: Action + 'static,
    {
        self.register_arc(Arc::new(action));
    }

    pub fn register_arc(&mut self, action: Arc<dyn Action>) {
        let name = action.metadata().name.as_str();
        match self.actions.iter().position(|a| a.metadata().name == name) {
            Some(idx) => {
                tracing::debug!(action = %name, "replacing registered action");
                self.actions[idx] = action;
            }
            None => self.actions.push(action),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions
            .iter()
            .find(|a| a.metadata().name == name)
            .cloned()
    }

    pub fn all(&self) -> Vec<Arc<dyn Action>> {
        self.actions.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Action>> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Execute an action by name with the given JSON input.
    pub async fn execute(&self, name: &str, kit: &Agentkit, input: Value) -> Result<Value> {
        let action = self
            .get(name)
            .ok_or_else(|| anyhow!("Unknown action: {name}"))?;
        action.call(kit, input).await
    }

    /// Return metadata for all registered actions (useful for AI tool schemas).
    pub fn metadata(&self) -> Vec<ActionMetadata> {
        self.actions
            .iter()
            .map(|a| a.metadata().clone())
            .collect()
    }
}
