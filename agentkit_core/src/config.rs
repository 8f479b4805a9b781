use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown Solana network `{0}` (expected mainnet-beta, devnet, testnet or localnet)")]
    UnknownNetwork(String),

    #[error("unsupported model provider `{0}` (expected openai, anthropic or cerebras)")]
    UnknownProvider(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "mainnet-beta",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Localnet => "localnet",
        }
    }

    /// Public RPC endpoint used when no explicit URL is configured.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::Localnet => "http://127.0.0.1:8899",
        }
    }

    /// Whether the cluster hands out airdrops.
    pub fn has_faucet(&self) -> bool {
        !matches!(self, Network::MainnetBeta)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet-beta" | "mainnet" => Ok(Network::MainnetBeta),
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "localnet" | "localhost" => Ok(Network::Localnet),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
    Anthropic,
    Cerebras,
}

impl ModelProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::Anthropic => "anthropic",
            ModelProvider::Cerebras => "cerebras",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "OPENAI_API_KEY",
            ModelProvider::Anthropic => "ANTHROPIC_API_KEY",
            ModelProvider::Cerebras => "CEREBRAS_API_KEY",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ModelProvider::OpenAi),
            "anthropic" => Ok(ModelProvider::Anthropic),
            "cerebras" => Ok(ModelProvider::Cerebras),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Which LLM an orchestrator should drive the tools with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_name: String,
    pub provider: ModelProvider,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: "gpt-4o-mini".to_string(),
            provider: ModelProvider::OpenAi,
        }
    }
}

/// Settings needed to build an [`crate::Agentkit`].
#[derive(Debug, Clone)]
pub struct AgentkitConfig {
    /// Base58 secret key; `None` means a throwaway keypair is generated.
    pub private_key: Option<String>,
    pub network: Network,
    pub rpc_url: String,
    pub model: ModelConfig,
}

impl Default for AgentkitConfig {
    fn default() -> Self {
        let network = Network::Devnet;
        Self {
            private_key: None,
            network,
            rpc_url: network.default_rpc_url().to_string(),
            model: ModelConfig::default(),
        }
    }
}

impl AgentkitConfig {
    /// Read configuration from the process environment, loading `.env` first
    /// when one exists.
    ///
    /// - `SOLANA_PRIVATE_KEY`: base58 secret key (optional)
    /// - `SOLANA_NETWORK`: defaults to `devnet`
    /// - `SOLANA_RPC_URL`: defaults to the network's public endpoint
    /// - `AGENTKIT_MODEL_NAME`: defaults to `gpt-4o-mini`
    /// - `AGENTKIT_MODEL_PROVIDER`: defaults to `openai`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let network = match non_empty("SOLANA_NETWORK") {
            Some(raw) => raw.parse()?,
            None => Network::Devnet,
        };
        let rpc_url = non_empty("SOLANA_RPC_URL")
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        let defaults = ModelConfig::default();
        let provider = match non_empty("AGENTKIT_MODEL_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => defaults.provider,
        };
        let model_name = non_empty("AGENTKIT_MODEL_NAME").unwrap_or(defaults.model_name);

        Ok(Self {
            private_key: non_empty("SOLANA_PRIVATE_KEY"),
            network,
            rpc_url,
            model: ModelConfig {
                model_name,
                provider,
            },
        })
    }
}
