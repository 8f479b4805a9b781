use std::sync::Arc;

use agentkit_core::{
    default_registry, Agentkit, KeypairWallet, ModelConfig, Network, Wallet,
};
use serde_json::json;
use solana_sdk::signature::{Keypair, Signer};

fn kit_on(network: Network) -> Agentkit {
    Agentkit::new(
        Arc::new(KeypairWallet::new(Keypair::new())),
        network,
        network.default_rpc_url(),
        ModelConfig::default(),
    )
}

#[tokio::test]
async fn wallet_details_report_address_and_network() {
    let kit = kit_on(Network::Testnet);
    let out = default_registry()
        .execute("get_wallet_details", &kit, json!({}))
        .await
        .unwrap();

    assert_eq!(out["status"], "success");
    assert_eq!(out["address"], kit.wallet.pubkey().to_string());
    assert_eq!(out["network"], "testnet");
}

#[tokio::test]
async fn faucet_is_refused_on_mainnet() {
    let kit = kit_on(Network::MainnetBeta);
    let err = default_registry()
        .execute("request_faucet_funds", &kit, json!({}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not available on mainnet-beta"));
}

#[tokio::test]
async fn transfer_rejects_non_positive_amount() {
    let kit = kit_on(Network::Devnet);
    let to = Keypair::new();
    let err = default_registry()
        .execute(
            "transfer",
            &kit,
            json!({ "to": to.pubkey().to_string(), "amount": 0 }),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("greater than zero"));
}

#[tokio::test]
async fn transfer_rejects_bad_recipient() {
    let kit = kit_on(Network::Devnet);
    let result = default_registry()
        .execute("transfer", &kit, json!({ "to": "not-a-key", "amount": 1 }))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn balance_rejects_invalid_mint() {
    let kit = kit_on(Network::Devnet);
    let result = default_registry()
        .execute("get_balance", &kit, json!({ "tokenAddress": "xyz" }))
        .await;
    assert!(result.is_err());
}

#[test]
fn every_builtin_schema_is_an_object() {
    for meta in default_registry().metadata() {
        assert_eq!(meta.input_schema["type"], "object", "{}", meta.name);
        assert!(!meta.description.is_empty());
        assert!(!meta.examples.is_empty());
    }
}

#[tokio::test]
async fn trade_is_refused_off_mainnet() {
    let kit = kit_on(Network::Devnet);
    let err = default_registry()
        .execute(
            "trade",
            &kit,
            json!({
                "inputMint": "So11111111111111111111111111111111111111112",
                "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "amount": 1.0,
            }),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("only available on mainnet-beta"));
}

#[tokio::test]
async fn trade_rejects_same_mint_on_both_sides() {
    let kit = kit_on(Network::MainnetBeta);
    let mint = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
    let err = default_registry()
        .execute(
            "trade",
            &kit,
            json!({ "inputMint": mint, "outputMint": mint, "amount": 1.0 }),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("must differ"));
}

#[tokio::test]
async fn deploy_token_rejects_too_many_decimals() {
    let kit = kit_on(Network::Devnet);
    let err = default_registry()
        .execute(
            "deploy_token",
            &kit,
            json!({ "name": "Agent Coin", "symbol": "AGC", "decimals": 12 }),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("decimals"));
}

#[tokio::test]
async fn mint_nft_validates_metadata_before_sending() {
    let kit = kit_on(Network::Devnet);
    let err = default_registry()
        .execute(
            "mint_nft",
            &kit,
            json!({ "name": "n".repeat(40), "uri": "https://example.com/1.json" }),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("name must be"));
}

#[tokio::test]
async fn deploy_nft_rejects_excess_royalty() {
    let kit = kit_on(Network::Devnet);
    let err = default_registry()
        .execute(
            "deploy_nft",
            &kit,
            json!({
                "name": "My Collection",
                "uri": "https://example.com/collection.json",
                "royaltyBasisPoints": 20000,
            }),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("basis points"));
}

#[tokio::test]
async fn transfer_nft_rejects_bad_mint() {
    let kit = kit_on(Network::Devnet);
    let result = default_registry()
        .execute(
            "transfer_nft",
            &kit,
            json!({ "to": kit.address().to_string(), "mint": "nope" }),
        )
        .await;
    assert!(result.is_err());
}
