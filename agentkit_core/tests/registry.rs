use std::sync::Arc;

use agentkit_core::{
    default_registry, Action, ActionMetadata, ActionRegistry, Agentkit, KeypairWallet,
    ModelConfig, Network,
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use solana_sdk::signature::Keypair;

struct EchoAction {
    meta: ActionMetadata,
}

impl EchoAction {
    fn named(name: &str, description: &str) -> Self {
        Self {
            meta: ActionMetadata {
                name: name.to_string(),
                similes: vec![],
                description: description.to_string(),
                examples: vec![],
                input_schema: json!({ "type": "object" }),
            },
        }
    }
}

#[async_trait]
impl Action for EchoAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, _kit: &Agentkit, input: Value) -> Result<Value> {
        Ok(json!({ "action": self.meta.description, "input": input }))
    }
}

fn devnet_kit() -> Agentkit {
    Agentkit::new(
        Arc::new(KeypairWallet::new(Keypair::new())),
        Network::Devnet,
        Network::Devnet.default_rpc_url(),
        ModelConfig::default(),
    )
}

#[test]
fn default_registry_lists_builtin_actions_in_order() {
    let names: Vec<String> = default_registry()
        .metadata()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(
        names,
        [
            "get_wallet_details",
            "get_balance",
            "get_balance_nft",
            "request_faucet_funds",
            "transfer",
            "transfer_nft",
            "trade",
            "deploy_token",
            "mint_nft",
            "deploy_nft",
        ]
    );
}

#[test]
fn registration_order_is_preserved() {
    let mut registry = ActionRegistry::new();
    for name in ["zeta", "alpha", "mid"] {
        registry.register(EchoAction::named(name, name));
    }
    let names: Vec<&str> = registry.iter().map(|a| a.metadata().name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn re_registering_a_name_replaces_in_place() {
    let mut registry = ActionRegistry::new();
    registry.register(EchoAction::named("a", "first"));
    registry.register(EchoAction::named("b", "b"));
    registry.register(EchoAction::named("a", "second"));

    assert_eq!(registry.len(), 2);
    let all = registry.all();
    assert_eq!(all[0].metadata().name, "a");
    assert_eq!(all[0].metadata().description, "second");
    assert_eq!(all[1].metadata().name, "b");
}

#[test]
fn empty_registry() {
    let registry = ActionRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.get("anything").is_none());
    assert!(registry.metadata().is_empty());
}

#[tokio::test]
async fn execute_dispatches_by_name() {
    let mut registry = ActionRegistry::new();
    registry.register(EchoAction::named("echo", "echo"));
    let kit = devnet_kit();

    let out = registry.execute("echo", &kit, json!({ "x": 1 })).await.unwrap();
    assert_eq!(out["input"]["x"], 1);

    let err = registry.execute("missing", &kit, json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "Unknown action: missing");
}
