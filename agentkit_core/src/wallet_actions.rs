use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::{Action, ActionExample, ActionMetadata};
use crate::agentkit::Agentkit;
use agentkit_token::to_base_units;

// =============================================================================
// get_wallet_details - address and cluster of the agent's wallet
// =============================================================================

#[derive(Debug)]
pub struct GetWalletDetailsAction {
    meta: ActionMetadata,
}

impl GetWalletDetailsAction {
    pub fn new() -> Self {
        let meta = ActionMetadata {
            name: "get_wallet_details".to_string(),
            similes: vec![
                "wallet address".to_string(),
                "show wallet".to_string(),
                "wallet info".to_string(),
            ],
            description: "Get the details of the agent's wallet: its public address and the Solana network it is connected to.".to_string(),
            examples: vec![ActionExample {
                input: json!({}),
                output: json!({
                    "status": "success",
                    "address": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                    "network": "devnet",
                }),
                explanation: "Show the agent's wallet address and network".to_string(),
            }],
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false,
            }),
        };

        Self { meta }
    }
}

impl Default for GetWalletDetailsAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for GetWalletDetailsAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, _input: Value) -> Result<Value> {
        Ok(json!({
            "status": "success",
            "address": kit.address().to_string(),
            "network": kit.network.as_str(),
        }))
    }
}

// =============================================================================
// request_faucet_funds - airdrop test SOL on non-mainnet clusters
// =============================================================================

pub const DEFAULT_AIRDROP_SOL: f64 = 1.0;

/// Lamports to request for an optional SOL amount, defaulting to one SOL.
pub fn airdrop_lamports(amount: Option<f64>) -> Result<u64> {
    to_base_units(amount.unwrap_or(DEFAULT_AIRDROP_SOL), 9)
}

#[derive(Debug)]
pub struct RequestFaucetFundsAction {
    meta: ActionMetadata,
}

impl RequestFaucetFundsAction {
    pub fn new() -> Self {
        let meta = ActionMetadata {
            name: "request_faucet_funds".to_string(),
            similes: vec![
                "airdrop".to_string(),
                "request airdrop".to_string(),
                "get test sol".to_string(),
                "faucet".to_string(),
            ],
            description: "Request test SOL from the cluster faucet. Only available on devnet, testnet and localnet.".to_string(),
            examples: vec![ActionExample {
                input: json!({ "amount": 1 }),
                output: json!({
                    "status": "success",
                    "signature": "2ZE7Rz5RrCBqaYnEFxvLJ9FyeqZ8sQ4P3b9uTUQbZzvL3yX9Bo5jMx2Q9Y86udVkYWKSW",
                    "amount": 1,
                }),
                explanation: "Airdrop 1 SOL to the agent's wallet".to_string(),
            }],
            input_schema: json!({
                "type": "object",
                "properties": {
                    "amount": {
                        "type": "number",
                        "description": "Amount of SOL to request; defaults to 1",
                        "exclusiveMinimum": 0,
                    }
                },
                "additionalProperties": false,
            }),
        };

        Self { meta }
    }
}

impl Default for RequestFaucetFundsAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for RequestFaucetFundsAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct Input {
            #[serde(default)]
            amount: Option<f64>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let lamports = airdrop_lamports(parsed.amount)?;
        let signature = kit.request_faucet_funds(lamports).await?;
        let amount = parsed.amount.unwrap_or(DEFAULT_AIRDROP_SOL);

        Ok(json!({
            "status": "success",
            "signature": signature,
            "amount": amount,
        }))
    }
}
