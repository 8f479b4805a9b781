//! NFT actions: holdings, transfers, and Metaplex minting of single NFTs and
//! collection NFTs.

use std::str::FromStr;

use async_trait::async_trait;
use anyhow::{bail, Result};
use mpl_token_metadata::instructions::{
    CreateMasterEditionV3, CreateMasterEditionV3InstructionArgs, CreateMetadataAccountV3,
    CreateMetadataAccountV3InstructionArgs,
};
use mpl_token_metadata::types::{Collection, CollectionDetails, Creator, DataV2};
use serde::Deserialize;
use serde_json::{json, Value};
use solana_sdk::{
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use spl_associated_token_account::get_associated_token_address;

use crate::actions::{Action, ActionExample, ActionMetadata};
use crate::agentkit::{transfer_instructions, Agentkit};
use crate::token_actions::create_mint_instructions;

const MAX_NAME_LEN: usize = 32;
const MAX_SYMBOL_LEN: usize = 10;
const MAX_URI_LEN: usize = 200;
const MAX_BASIS_POINTS: u16 = 10_000;
const DEFAULT_SELLER_FEE_BASIS_POINTS: u16 = 500;

/// Metaplex metadata fields shared by tokens, NFTs and collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub collection: Option<Pubkey>,
}

impl MetadataParams {
    /// Enforce the Metaplex field limits before anything is sent on chain.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.len() > MAX_NAME_LEN {
            bail!("name must be 1 to {MAX_NAME_LEN} bytes");
        }
        if self.symbol.len() > MAX_SYMBOL_LEN {
            bail!("symbol must be at most {MAX_SYMBOL_LEN} bytes");
        }
        if self.uri.len() > MAX_URI_LEN {
            bail!("uri must be at most {MAX_URI_LEN} bytes");
        }
        if self.seller_fee_basis_points > MAX_BASIS_POINTS {
            bail!(
                "seller fee must be at most {MAX_BASIS_POINTS} basis points, got {}",
                self.seller_fee_basis_points
            );
        }
        Ok(())
    }
}

pub fn metadata_pda(mint: &Pubkey) -> Pubkey {
    let seeds = &[
        b"metadata".as_ref(),
        mpl_token_metadata::ID.as_ref(),
        mint.as_ref(),
    ];
    Pubkey::find_program_address(seeds, &mpl_token_metadata::ID).0
}

pub fn master_edition_pda(mint: &Pubkey) -> Pubkey {
    let seeds = &[
        b"metadata".as_ref(),
        mpl_token_metadata::ID.as_ref(),
        mint.as_ref(),
        b"edition".as_ref(),
    ];
    Pubkey::find_program_address(seeds, &mpl_token_metadata::ID).0
}

/// On-chain metadata with `creator` as the sole, verified creator.
pub fn token_metadata(creator: &Pubkey, params: &MetadataParams) -> DataV2 {
    DataV2 {
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        uri: params.uri.clone(),
        seller_fee_basis_points: params.seller_fee_basis_points,
        creators: Some(vec![Creator {
            address: *creator,
            verified: true,
            share: 100,
        }]),
        collection: params.collection.map(|key| Collection {
            verified: false,
            key,
        }),
        uses: None,
    }
}

pub fn metadata_instruction(
    payer: &Pubkey,
    mint: &Pubkey,
    data: DataV2,
    collection_details: Option<CollectionDetails>,
) -> Instruction {
    CreateMetadataAccountV3 {
        metadata: metadata_pda(mint),
        mint: *mint,
        mint_authority: *payer,
        payer: *payer,
        update_authority: (*payer, true),
        system_program: solana_sdk::system_program::id(),
        rent: None,
    }
    .instruction(CreateMetadataAccountV3InstructionArgs {
        data,
        is_mutable: true,
        collection_details,
    })
}

/// Full instruction list for minting one NFT to `recipient`: a zero-decimal
/// mint with supply one, its metadata, and a master edition capping supply.
/// `as_collection` marks the NFT as a collection parent.
pub fn nft_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    recipient: &Pubkey,
    rent_lamports: u64,
    params: &MetadataParams,
    as_collection: bool,
) -> Result<Vec<Instruction>> {
    params.validate()?;

    let mut instructions = create_mint_instructions(payer, mint, rent_lamports, 0, recipient, 1)?;

    let collection_details = as_collection.then_some(CollectionDetails::V1 { size: 0 });
    instructions.push(metadata_instruction(
        payer,
        mint,
        token_metadata(payer, params),
        collection_details,
    ));

    instructions.push(
        CreateMasterEditionV3 {
            edition: master_edition_pda(mint),
            mint: *mint,
            update_authority: *payer,
            mint_authority: *payer,
            payer: *payer,
            metadata: metadata_pda(mint),
            token_program: spl_token::id(),
            system_program: solana_sdk::system_program::id(),
            rent: None,
        }
        .instruction(CreateMasterEditionV3InstructionArgs {
            max_supply: Some(0),
        }),
    );

    Ok(instructions)
}

async fn mint_nft(
    kit: &Agentkit,
    recipient: Pubkey,
    params: &MetadataParams,
    as_collection: bool,
) -> Result<(Pubkey, String)> {
    params.validate()?;
    let payer = kit.address();
    let mint = Keypair::new();
    let mint_pubkey = mint.pubkey();
    let rent = kit
        .rent_exempt_minimum(spl_token::state::Mint::LEN)
        .await?;

    let instructions =
        nft_mint_instructions(&payer, &mint_pubkey, &recipient, rent, params, as_collection)?;

    tracing::info!(mint = %mint_pubkey, %recipient, as_collection, "minting nft");
    let signature = kit.submit(&instructions, &[&mint]).await?;
    Ok((mint_pubkey, signature))
}

// =============================================================================
// get_balance_nft - whether a wallet holds a given NFT
// =============================================================================

#[derive(Debug)]
pub struct GetBalanceNftAction {
    meta: ActionMetadata,
}

impl GetBalanceNftAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "mint": {
                    "type": "string",
                    "description": "NFT mint address",
                },
                "owner": {
                    "type": "string",
                    "description": "Optional wallet to check; defaults to the agent's wallet",
                }
            },
            "required": ["mint"],
            "additionalProperties": false,
        });

        let examples = vec![ActionExample {
            input: json!({ "mint": "7nE9GvcUW3pGSb1Yg8jQpvMnJgBdbzLkHUPg3pRgaNVK" }),
            output: json!({
                "status": "success",
                "mint": "7nE9GvcUW3pGSb1Yg8jQpvMnJgBdbzLkHUPg3pRgaNVK",
                "owner": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                "balance": 1.0,
                "owned": true,
            }),
            explanation: "Check whether the agent's wallet holds an NFT".to_string(),
        }];

        let meta = ActionMetadata {
            name: "get_balance_nft".to_string(),
            similes: vec![
                "nft balance".to_string(),
                "do i own this nft".to_string(),
                "check nft".to_string(),
            ],
            description: "Check how many units of an NFT mint a wallet holds. Defaults to the agent's wallet.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for GetBalanceNftAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for GetBalanceNftAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct Input {
            mint: String,
            #[serde(default)]
            owner: Option<String>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let mint = Pubkey::from_str(&parsed.mint)?;
        let owner = match parsed.owner.as_deref() {
            Some(addr) => Pubkey::from_str(addr)?,
            None => kit.address(),
        };

        let balance = kit.token_balance(&owner, &mint).await?;

        Ok(json!({
            "status": "success",
            "mint": mint.to_string(),
            "owner": owner.to_string(),
            "balance": balance,
            "owned": balance > 0.0,
        }))
    }
}

// =============================================================================
// transfer_nft - send an NFT to another wallet
// =============================================================================

#[derive(Debug)]
pub struct TransferNftAction {
    meta: ActionMetadata,
}

impl TransferNftAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "description": "Recipient wallet address",
                },
                "mint": {
                    "type": "string",
                    "description": "NFT mint address",
                }
            },
            "required": ["to", "mint"],
            "additionalProperties": false,
        });

        let examples = vec![ActionExample {
            input: json!({
                "to": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                "mint": "7nE9GvcUW3pGSb1Yg8jQpvMnJgBdbzLkHUPg3pRgaNVK",
            }),
            output: json!({
                "status": "success",
                "signature": "3pKbM3nZrvxYfU1xW5b2nQbyH7KsAkcQXbV9XxjR1fJzVfPmKc7HnY2Xa9kqPWh1E4",
                "to": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                "mint": "7nE9GvcUW3pGSb1Yg8jQpvMnJgBdbzLkHUPg3pRgaNVK",
            }),
            explanation: "Send an NFT to another wallet".to_string(),
        }];

        let meta = ActionMetadata {
            name: "transfer_nft".to_string(),
            similes: vec![
                "send nft".to_string(),
                "give nft".to_string(),
                "move nft".to_string(),
            ],
            description: "Transfer an NFT held by the agent's wallet to another address.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for TransferNftAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for TransferNftAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct Input {
            to: String,
            mint: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let to = Pubkey::from_str(&parsed.to)?;
        let mint = Pubkey::from_str(&parsed.mint)?;
        let from = kit.address();

        let instructions = transfer_instructions(&from, &to, Some((mint, 0)), 1.0)?;
        tracing::info!(%from, %to, %mint, "transferring nft");
        let signature = kit.submit(&instructions, &[]).await?;

        Ok(json!({
            "status": "success",
            "signature": signature,
            "to": parsed.to,
            "mint": parsed.mint,
        }))
    }
}

// =============================================================================
// mint_nft - mint a Metaplex NFT, optionally into a collection
// =============================================================================

#[derive(Debug)]
pub struct MintNftAction {
    meta: ActionMetadata,
}

impl MintNftAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the NFT",
                },
                "uri": {
                    "type": "string",
                    "description": "Metadata JSON URI",
                },
                "symbol": {
                    "type": "string",
                    "description": "Optional symbol",
                },
                "sellerFeeBasisPoints": {
                    "type": "integer",
                    "description": "Royalty in basis points; defaults to 500 (5%)",
                    "minimum": 0,
                    "maximum": 10000,
                },
                "collectionMint": {
                    "type": "string",
                    "description": "Optional collection NFT mint this NFT belongs to",
                },
                "recipient": {
                    "type": "string",
                    "description": "Optional recipient; defaults to the agent's wallet",
                }
            },
            "required": ["name", "uri"],
            "additionalProperties": false,
        });

        let examples = vec![ActionExample {
            input: json!({
                "name": "Agent #1",
                "uri": "https://example.com/nft/1.json",
                "collectionMint": "7nE9GvcUW3pGSb1Yg8jQpvMnJgBdbzLkHUPg3pRgaNVK",
            }),
            output: json!({
                "status": "success",
                "mint": "9pQ2JvcUW3pGSb1Yg8jQpvMnJgBdbzLkHUPg3pRgaXYZ",
                "recipient": "8x2dR8Mpzuz2YqyZyZjUbYWKSWesBo5jMx2Q9Y86udVk",
                "signature": "5xY2AbcQ1dz1PqjH6w7hMnU5WcqY1mC2kEPx3vJbs8R9GkNtU2YqLd6eVfPo4A",
            }),
            explanation: "Mint an NFT into an existing collection".to_string(),
        }];

        let meta = ActionMetadata {
            name: "mint_nft".to_string(),
            similes: vec![
                "create nft".to_string(),
                "mint nft".to_string(),
                "mint collectible".to_string(),
            ],
            description: "Mint a new NFT with Metaplex metadata, optionally as part of a collection, to the agent's wallet or another recipient.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for MintNftAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for MintNftAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Input {
            name: String,
            uri: String,
            #[serde(default)]
            symbol: Option<String>,
            #[serde(default)]
            seller_fee_basis_points: Option<u16>,
            #[serde(default)]
            collection_mint: Option<String>,
            #[serde(default)]
            recipient: Option<String>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let recipient = match parsed.recipient.as_deref() {
            Some(addr) => Pubkey::from_str(addr)?,
            None => kit.address(),
        };
        let collection = parsed
            .collection_mint
            .as_deref()
            .map(Pubkey::from_str)
            .transpose()?;
        let params = MetadataParams {
            name: parsed.name,
            symbol: parsed.symbol.unwrap_or_default(),
            uri: parsed.uri,
            seller_fee_basis_points: parsed
                .seller_fee_basis_points
                .unwrap_or(DEFAULT_SELLER_FEE_BASIS_POINTS),
            collection,
        };

        let (mint, signature) = mint_nft(kit, recipient, &params, false).await?;

        Ok(json!({
            "status": "success",
            "mint": mint.to_string(),
            "metadata": metadata_pda(&mint).to_string(),
            "masterEdition": master_edition_pda(&mint).to_string(),
            "tokenAccount": get_associated_token_address(&recipient, &mint).to_string(),
            "recipient": recipient.to_string(),
            "signature": signature,
            "name": params.name,
            "symbol": params.symbol,
        }))
    }
}

// =============================================================================
// deploy_nft - create a collection NFT that later mints can belong to
// =============================================================================

#[derive(Debug)]
pub struct DeployNftAction {
    meta: ActionMetadata,
}

impl DeployNftAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Collection name",
                },
                "uri": {
                    "type": "string",
                    "description": "Collection metadata JSON URI",
                },
                "symbol": {
                    "type": "string",
                    "description": "Optional collection symbol",
                },
                "royaltyBasisPoints": {
                    "type": "integer",
                    "description": "Royalty in basis points; defaults to 500 (5%)",
                    "minimum": 0,
                    "maximum": 10000,
                }
            },
            "required": ["name", "uri"],
            "additionalProperties": false,
        });

        let examples = vec![ActionExample {
            input: json!({
                "name": "My Collection",
                "uri": "https://example.com/collection.json",
                "royaltyBasisPoints": 500,
            }),
            output: json!({
                "status": "success",
                "collectionMint": "7nE9GvcUW3pGSb1Yg8jQpvMnJgBdbzLkHUPg3pRgaNVK",
                "name": "My Collection",
                "signature": "4tLpQ8BvH1dKcN2m5Zq7RjXeYw3sFgUoA9Vb6CxTn1MkEr8Pz5JhSy2WqDaG7fK",
            }),
            explanation: "Deploy an NFT collection with 5% royalty".to_string(),
        }];

        let meta = ActionMetadata {
            name: "deploy_nft".to_string(),
            similes: vec![
                "create collection".to_string(),
                "launch collection".to_string(),
                "deploy nft collection".to_string(),
            ],
            description: "Deploy a new NFT collection using Metaplex. The returned collection mint can be passed to mint_nft.".to_string(),
            examples,
            input_schema,
        };

        Self { meta }
    }
}

impl Default for DeployNftAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for DeployNftAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, kit: &Agentkit, input: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Input {
            name: String,
            uri: String,
            #[serde(default)]
            symbol: Option<String>,
            #[serde(default)]
            royalty_basis_points: Option<u16>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let params = MetadataParams {
            name: parsed.name,
            symbol: parsed.symbol.unwrap_or_default(),
            uri: parsed.uri,
            seller_fee_basis_points: parsed
                .royalty_basis_points
                .unwrap_or(DEFAULT_SELLER_FEE_BASIS_POINTS),
            collection: None,
        };

        let (mint, signature) = mint_nft(kit, kit.address(), &params, true).await?;

        Ok(json!({
            "status": "success",
            "collectionMint": mint.to_string(),
            "metadata": metadata_pda(&mint).to_string(),
            "masterEdition": master_edition_pda(&mint).to_string(),
            "name": params.name,
            "signature": signature,
        }))
    }
}
