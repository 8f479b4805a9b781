//! Swaps routed through the Jupiter aggregator.

use std::str::FromStr;

use async_trait::async_trait;
use anyhow::{anyhow, bail, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use solana_sdk::{pubkey::Pubkey, transaction::VersionedTransaction};

use crate::actions::{Action, ActionExample, ActionMetadata};
use crate::agentkit::Agentkit;
use crate::config::Network;
use agentkit_token::to_base_units;

const JUPITER_API_URL: &str = "https://quote-api.jup.ag/v6";
pub const NATIVE_SOL_MINT: &str = "So11111111111111111111111111111111111111112";
const DEFAULT_SLIPPAGE_PERCENT: f64 = 0.5;
const MAX_SLIPPAGE_PERCENT: f64 = 50.0;

fn base64_decode(input: &str) -> Result<Vec<u8>> {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    Ok(STANDARD.decode(input)?)
}

/// Convert a slippage percentage into basis points.
pub fn slippage_bps(percent: f64) -> Result<u16> {
    if !percent.is_finite() || percent < 0.0 || percent > MAX_SLIPPAGE_PERCENT {
        bail!("slippage must be between 0 and {MAX_SLIPPAGE_PERCENT} percent, got {percent}");
    }
    Ok((percent * 100.0).round() as u16)
}

/// Jupiter quote request parameters, amounts in base units.
pub fn quote_query(
    input_mint: &Pubkey,
    output_mint: &Pubkey,
    amount: u64,
    slippage_bps: u16,
) -> Vec<(&'static str, String)> {
    vec![
        ("inputMint", input_mint.to_string()),
        ("outputMint", output_mint.to_string()),
        ("amount", amount.to_string()),
        ("slippageBps", slippage_bps.to_string()),
    ]
}

// =============================================================================
// trade - swap one token for another via Jupiter
// =============================================================================

#[derive(Debug)]
pub struct TradeAction {
    meta: ActionMetadata,
}

impl TradeAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "inputMint": {
                    "type": "string",
                    "description": "Mint of the token to sell; use So11111111111111111111111111111111111111112 for SOL",
                },
                "outputMint": {
                    "type": "string",
                    "description": "Mint of the token to buy",
                },
                "amount": {
                    "type": "number",
                    "description": "Amount of the input token to sell, in token units",
                    "exclusiveMinimum": 0,
                },
                "slippage": {
                    "type": "number",
                    "description": "Slippage tolerance in percent; defaults to 0.5",
                }
            },
            "required": ["inputMint", "outputMint", "amount"],
            "additionalProperties": false,
        });

        let examples = vec![ActionExample {
            input: json!({
                "inputMint": NATIVE_SOL_MINT,
                "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "amount": 1.0,
                "slippage": 1.0,
            }),
            output: json!({
                "status": "success",
                "signature": "2Yx7wK4F1dZ9Rr6cT3bN8mVqL5hP2sJgA7kXeU4nW9oCzH3fB6yQdM1tE8vRa5Lp",
                "inputMint": NATIVE_SOL_MINT,
                "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "inAmount": "1000000000",
                "outAmount": "145230000",
            }),
            explanation: "Swap 1 SOL for USDC with 1% slippage".to_string(),
        }];

        let meta = ActionMetadata {
            name: "trade".to_string(),
            similes: vec![
                "swap tokens".to_string(),
                "exchange tokens".to_string(),
                "buy token".to_string(),
                "sell token".to_string(),
            ],
            description: "Swap one token for another using the Jupiter aggregator. Only available on mainnet-beta.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for TradeAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for TradeAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Input {
            input_mint: String,
            output_mint: String,
            amount: f64,
            #[serde(default)]
            slippage: Option<f64>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        if kit.network != Network::MainnetBeta {
            bail!("Trading via Jupiter is only available on mainnet-beta, not {}", kit.network);
        }
        let input_mint = Pubkey::from_str(&parsed.input_mint)?;
        let output_mint = Pubkey::from_str(&parsed.output_mint)?;
        if input_mint == output_mint {
            bail!("input and output mints must differ");
        }
        let bps = slippage_bps(parsed.slippage.unwrap_or(DEFAULT_SLIPPAGE_PERCENT))?;

        let decimals = if parsed.input_mint == NATIVE_SOL_MINT {
            9
        } else {
            kit.mint_decimals(&input_mint).await?
        };
        let raw_amount = to_base_units(parsed.amount, decimals)?;

        let client = reqwest::Client::new();
        let quote: Value = client
            .get(format!("{JUPITER_API_URL}/quote"))
            .query(&quote_query(&input_mint, &output_mint, raw_amount, bps))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let swap: Value = client
            .post(format!("{JUPITER_API_URL}/swap"))
            .json(&json!({
                "quoteResponse": quote,
                "userPublicKey": kit.address().to_string(),
                "wrapAndUnwrapSol": true,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let tx_b64 = swap["swapTransaction"]
            .as_str()
            .ok_or_else(|| anyhow!("No swapTransaction in Jupiter response"))?;
        let tx: VersionedTransaction = bincode::deserialize(&base64_decode(tx_b64)?)?;

        tracing::info!(%input_mint, %output_mint, raw_amount, bps, "submitting swap");
        let signature = kit.sign_and_send(tx.message, &[]).await?;

        Ok(json!({
            "status": "success",
            "signature": signature,
            "inputMint": parsed.input_mint,
            "outputMint": parsed.output_mint,
            "inAmount": quote["inAmount"],
            "outAmount": quote["outAmount"],
        }))
    }
}
