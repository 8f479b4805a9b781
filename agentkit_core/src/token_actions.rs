use std::str::FromStr;

use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use solana_sdk::{
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};

use crate::actions::{Action, ActionExample, ActionMetadata};
use crate::agentkit::Agentkit;
use crate::nft_actions::{metadata_instruction, metadata_pda, token_metadata, MetadataParams};
use agentkit_token::{to_base_units, TokenActions};

const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn parse_optional_pubkey(raw: Option<&str>) -> Result<Option<Pubkey>> {
    raw.map(Pubkey::from_str).transpose().map_err(Into::into)
}

// =============================================================================
// get_balance - SOL or SPL token balance of the wallet
// =============================================================================

#[derive(Debug)]
pub struct GetBalanceAction {
    meta: ActionMetadata,
}

impl GetBalanceAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "tokenAddress": {
                    "type": "string",
                    "description": "Optional SPL token mint address; if omitted, SOL balance is returned",
                }
            },
            "required": [],
            "additionalProperties": false,
        });

        let examples = vec![
            ActionExample {
                input: json!({}),
                output: json!({
                    "status": "success",
                    "balance": 100.0,
                    "token": "SOL",
                }),
                explanation: "Get SOL balance of the wallet".to_string(),
            },
            ActionExample {
                input: json!({ "tokenAddress": USDC_MINT }),
                output: json!({
                    "status": "success",
                    "balance": 1000.0,
                    "token": USDC_MINT,
                }),
                explanation: "Get USDC token balance".to_string(),
            },
        ];

        let meta = ActionMetadata {
            name: "get_balance".to_string(),
            similes: vec![
                "check balance".to_string(),
                "get wallet balance".to_string(),
                "check token balance".to_string(),
            ],
            description: "Get the balance of the agent's wallet. If no tokenAddress is provided, the balance is returned in SOL; otherwise the balance of that SPL token is returned.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for GetBalanceAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for GetBalanceAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Input {
            #[serde(default)]
            token_address: Option<String>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let mint = parse_optional_pubkey(parsed.token_address.as_deref())?;

        let balance = kit.get_balance(mint).await?;
        let token = parsed.token_address.unwrap_or_else(|| "SOL".to_string());

        Ok(json!({
            "status": "success",
            "balance": balance,
            "token": token,
        }))
    }
}

// =============================================================================
// transfer - send SOL or an SPL token to another wallet
// =============================================================================

#[derive(Debug)]
pub struct TransferAction {
    meta: ActionMetadata,
}

impl TransferAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "description": "Recipient wallet address",
                },
                "amount": {
                    "type": "number",
                    "description": "Amount to send, in SOL or token units",
                    "exclusiveMinimum": 0,
                },
                "mint": {
                    "type": "string",
                    "description": "Optional SPL token mint address; omit to send SOL",
                }
            },
            "required": ["to", "amount"],
            "additionalProperties": false,
        });

        let examples = vec![
            ActionExample {
                input: json!({
                    "to": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                    "amount": 1,
                }),
                output: json!({
                    "status": "success",
                    "signature": "5UfgJ5vVZxUxefDGqzqkVLHzHxVTyYH9StYyHKgvHYmXJgqJKxEqy9k4Rz9LpXrHF9kUZB7",
                    "to": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                    "amount": 1,
                    "token": "SOL",
                }),
                explanation: "Transfer 1 SOL to the recipient address".to_string(),
            },
            ActionExample {
                input: json!({
                    "to": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                    "amount": 100,
                    "mint": USDC_MINT,
                }),
                output: json!({
                    "status": "success",
                    "signature": "4VfgJ5vVZxUxefDGqzqkVLHzHxVTyYH9StYyHKgvHYmXJgqJKxEqy9k4Rz9LpXrHF9kUZB7",
                    "to": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                    "amount": 100,
                    "token": USDC_MINT,
                }),
                explanation: "Transfer 100 USDC to the recipient address".to_string(),
            },
        ];

        let meta = ActionMetadata {
            name: "transfer".to_string(),
            similes: vec![
                "send tokens".to_string(),
                "transfer funds".to_string(),
                "send money".to_string(),
                "send sol".to_string(),
            ],
            description: "Transfer SOL or an SPL token from the agent's wallet to another address. The recipient's token account is created if it does not exist yet.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for TransferAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for TransferAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct Input {
            to: String,
            amount: f64,
            #[serde(default)]
            mint: Option<String>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        if !(parsed.amount > 0.0) {
            anyhow::bail!("Amount must be greater than zero");
        }
        let to = Pubkey::from_str(&parsed.to)?;
        let mint = parse_optional_pubkey(parsed.mint.as_deref())?;

        let signature = kit.transfer(to, parsed.amount, mint).await?;

        Ok(json!({
            "status": "success",
            "signature": signature,
            "to": parsed.to,
            "amount": parsed.amount,
            "token": parsed.mint.unwrap_or_else(|| "SOL".to_string()),
        }))
    }
}

// =============================================================================
// deploy_token - create a new SPL token mint with metadata
// =============================================================================

const DEFAULT_TOKEN_DECIMALS: u8 = 9;

/// Instructions creating `mint` with `payer` as mint and freeze authority,
/// then minting `initial_supply` base units to `holder`'s associated account
/// when it is non-zero.
pub fn create_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    decimals: u8,
    holder: &Pubkey,
    initial_supply: u64,
) -> Result<Vec<Instruction>> {
    let mut instructions = vec![
        system_instruction::create_account(
            payer,
            mint,
            rent_lamports,
            spl_token::state::Mint::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_mint(
            &spl_token::id(),
            mint,
            payer,
            Some(payer),
            decimals,
        )?,
    ];

    if initial_supply > 0 {
        let ata = get_associated_token_address(holder, mint);
        instructions.push(create_associated_token_account_idempotent(
            payer,
            holder,
            mint,
            &spl_token::id(),
        ));
        instructions.push(spl_token::instruction::mint_to(
            &spl_token::id(),
            mint,
            &ata,
            payer,
            &[],
            initial_supply,
        )?);
    }

    Ok(instructions)
}

#[derive(Debug)]
pub struct DeployTokenAction {
    meta: ActionMetadata,
}

impl DeployTokenAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Token name, at most 32 bytes",
                },
                "symbol": {
                    "type": "string",
                    "description": "Token symbol, at most 10 bytes",
                },
                "uri": {
                    "type": "string",
                    "description": "Optional metadata JSON URI",
                },
                "decimals": {
                    "type": "integer",
                    "description": "Decimal places; defaults to 9",
                    "minimum": 0,
                    "maximum": 9,
                },
                "initialSupply": {
                    "type": "number",
                    "description": "Optional supply to mint to the agent's wallet, in token units",
                }
            },
            "required": ["name", "symbol"],
            "additionalProperties": false,
        });

        let examples = vec![ActionExample {
            input: json!({
                "name": "Agent Coin",
                "symbol": "AGC",
                "decimals": 6,
                "initialSupply": 1000000,
            }),
            output: json!({
                "status": "success",
                "mint": "3xYkKZQpA6dpBzkDvRCVtwBqCT5Mc8PTUT7MbdhrE2ay",
                "decimals": 6,
                "initialSupply": 1000000,
                "signature": "2kX9fRcdN5BWuo6cUXULmy9sbn1WgTgEKN6ewm5jv5VSJ3azYk4LpEqBLTdPEAfGQXLdu",
            }),
            explanation: "Create a token with 6 decimals and one million units minted to the wallet".to_string(),
        }];

        let meta = ActionMetadata {
            name: "deploy_token".to_string(),
            similes: vec![
                "create token".to_string(),
                "launch token".to_string(),
                "new spl token".to_string(),
                "deploy new token".to_string(),
            ],
            description: "Deploy a new SPL token with name and symbol metadata. The agent's wallet is the mint authority and receives the initial supply.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for DeployTokenAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for DeployTokenAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Input {
            name: String,
            symbol: String,
            #[serde(default)]
            uri: Option<String>,
            #[serde(default)]
            decimals: Option<u8>,
            #[serde(default)]
            initial_supply: Option<f64>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let decimals = parsed.decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS);
        if decimals > 9 {
            anyhow::bail!("decimals must be between 0 and 9, got {decimals}");
        }
        let params = MetadataParams {
            name: parsed.name,
            symbol: parsed.symbol,
            uri: parsed.uri.unwrap_or_default(),
            seller_fee_basis_points: 0,
            collection: None,
        };
        params.validate()?;
        let supply = match parsed.initial_supply {
            Some(amount) => to_base_units(amount, decimals)?,
            None => 0,
        };

        let payer = kit.address();
        let mint = Keypair::new();
        let mint_pubkey = mint.pubkey();
        let rent = kit
            .rent_exempt_minimum(spl_token::state::Mint::LEN)
            .await?;

        let mut instructions =
            create_mint_instructions(&payer, &mint_pubkey, rent, decimals, &payer, supply)?;
        instructions.push(metadata_instruction(
            &payer,
            &mint_pubkey,
            token_metadata(&payer, &params),
            None,
        ));

        tracing::info!(mint = %mint_pubkey, decimals, supply, "deploying token");
        let signature = kit.submit(&instructions, &[&mint]).await?;

        Ok(json!({
            "status": "success",
            "mint": mint_pubkey.to_string(),
            "metadata": metadata_pda(&mint_pubkey).to_string(),
            "name": params.name,
            "symbol": params.symbol,
            "decimals": decimals,
            "initialSupply": parsed.initial_supply.unwrap_or(0.0),
            "signature": signature,
        }))
    }
}
