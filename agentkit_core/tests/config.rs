use std::collections::HashMap;

use agentkit_core::{
    Agentkit, AgentkitConfig, ConfigError, KeypairWallet, ModelProvider, Network, Wallet,
};
use solana_sdk::{
    hash::Hash,
    message::{v0, VersionedMessage},
    signature::{Keypair, Signer},
    system_instruction,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_to_devnet_and_openai() {
    let config = AgentkitConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.network, Network::Devnet);
    assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
    assert_eq!(config.model.model_name, "gpt-4o-mini");
    assert_eq!(config.model.provider, ModelProvider::OpenAi);
    assert!(config.private_key.is_none());
}

#[test]
fn reads_overrides() {
    let config = AgentkitConfig::from_lookup(lookup(&[
        ("SOLANA_NETWORK", "mainnet-beta"),
        ("SOLANA_RPC_URL", "https://rpc.example.com"),
        ("AGENTKIT_MODEL_NAME", "claude-3-sonnet"),
        ("AGENTKIT_MODEL_PROVIDER", "Anthropic"),
    ]))
    .unwrap();

    assert_eq!(config.network, Network::MainnetBeta);
    assert_eq!(config.rpc_url, "https://rpc.example.com");
    assert_eq!(config.model.model_name, "claude-3-sonnet");
    assert_eq!(config.model.provider, ModelProvider::Anthropic);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = AgentkitConfig::from_lookup(lookup(&[
        ("SOLANA_NETWORK", "testnet"),
        ("SOLANA_RPC_URL", "  "),
    ]))
    .unwrap();
    assert_eq!(config.rpc_url, Network::Testnet.default_rpc_url());
}

#[test]
fn rejects_unknown_network_and_provider() {
    let err = AgentkitConfig::from_lookup(lookup(&[("SOLANA_NETWORK", "moonnet")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownNetwork("moonnet".to_string()));

    let err =
        AgentkitConfig::from_lookup(lookup(&[("AGENTKIT_MODEL_PROVIDER", "llama")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownProvider("llama".to_string()));
}

#[test]
fn network_names_round_trip() {
    for network in [
        Network::MainnetBeta,
        Network::Devnet,
        Network::Testnet,
        Network::Localnet,
    ] {
        assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
    }
    assert!(!Network::MainnetBeta.has_faucet());
    assert!(Network::Localnet.has_faucet());
}

#[test]
fn provider_knows_its_api_key_variable() {
    assert_eq!(ModelProvider::Cerebras.api_key_var(), "CEREBRAS_API_KEY");
    assert_eq!("openai".parse::<ModelProvider>().unwrap(), ModelProvider::OpenAi);
}

#[test]
fn from_config_uses_the_configured_key() {
    let keypair = Keypair::new();
    let config = AgentkitConfig {
        private_key: Some(keypair.to_base58_string()),
        ..AgentkitConfig::default()
    };
    let kit = Agentkit::from_config(config).unwrap();
    assert_eq!(kit.address(), keypair.pubkey());
    assert_eq!(kit.network, Network::Devnet);
}

#[test]
fn from_config_rejects_garbage_keys() {
    let config = AgentkitConfig {
        private_key: Some("definitely not base58 0OIl".to_string()),
        ..AgentkitConfig::default()
    };
    let err = Agentkit::from_config(config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidPrivateKey(_))
    ));
}

#[tokio::test]
async fn keypair_wallet_signs_messages() {
    let keypair = Keypair::new();
    let payer = keypair.pubkey();
    let wallet = KeypairWallet::new(keypair);

    let ix = system_instruction::transfer(&payer, &Keypair::new().pubkey(), 1);
    let message = v0::Message::try_compile(&payer, &[ix], &[], Hash::default()).unwrap();
    let tx = wallet
        .sign_message(VersionedMessage::V0(message), &[])
        .await
        .unwrap();

    assert_eq!(tx.signatures.len(), 1);
    assert!(tx.verify_with_results().into_iter().all(|ok| ok));
}

#[tokio::test]
async fn keypair_wallet_adds_co_signers() {
    let keypair = Keypair::new();
    let payer = keypair.pubkey();
    let wallet = KeypairWallet::new(keypair);
    let new_account = Keypair::new();

    let ix = system_instruction::create_account(
        &payer,
        &new_account.pubkey(),
        1_000_000,
        82,
        &solana_sdk::system_program::id(),
    );
    let message = v0::Message::try_compile(&payer, &[ix], &[], Hash::default()).unwrap();
    let tx = wallet
        .sign_message(VersionedMessage::V0(message), &[&new_account])
        .await
        .unwrap();

    assert_eq!(tx.signatures.len(), 2);
    assert!(tx.verify_with_results().into_iter().all(|ok| ok));
}

#[tokio::test]
async fn keypair_wallet_requires_every_co_signer() {
    let keypair = Keypair::new();
    let payer = keypair.pubkey();
    let wallet = KeypairWallet::new(keypair);

    let ix = system_instruction::create_account(
        &payer,
        &Keypair::new().pubkey(),
        1_000_000,
        82,
        &solana_sdk::system_program::id(),
    );
    let message = v0::Message::try_compile(&payer, &[ix], &[], Hash::default()).unwrap();
    assert!(wallet
        .sign_message(VersionedMessage::V0(message), &[])
        .await
        .is_err());
}
