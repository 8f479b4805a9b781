pub mod agentkit;
pub mod config;
pub mod wallet;
pub mod actions;
pub mod token_actions;
pub mod wallet_actions;
pub mod nft_actions;
pub mod defi_actions;

pub use agentkit::{token_account_ui_balance, transfer_instructions, Agentkit};
pub use config::{AgentkitConfig, ConfigError, ModelConfig, ModelProvider, Network};
pub use wallet::{KeypairWallet, Wallet};
pub use actions::{Action, ActionExample, ActionMetadata, ActionRegistry};
pub use token_actions::{
    create_mint_instructions, DeployTokenAction, GetBalanceAction, TransferAction,
};
pub use wallet_actions::{airdrop_lamports, GetWalletDetailsAction, RequestFaucetFundsAction};
pub use nft_actions::{
    nft_mint_instructions, DeployNftAction, GetBalanceNftAction, MetadataParams, MintNftAction,
    TransferNftAction,
};
pub use defi_actions::TradeAction;

/// Register every built-in action, in the order agents see them.
pub fn register_all_actions(registry: &mut ActionRegistry) {
    registry.register(GetWalletDetailsAction::new());
    registry.register(GetBalanceAction::new());
    registry.register(GetBalanceNftAction::new());
    registry.register(RequestFaucetFundsAction::new());
    registry.register(TransferAction::new());
    registry.register(TransferNftAction::new());
    registry.register(TradeAction::new());
    registry.register(DeployTokenAction::new());
    registry.register(MintNftAction::new());
    registry.register(DeployNftAction::new());
}

/// The fixed registry of built-in actions.
pub fn default_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    register_all_actions(&mut registry);
    registry
}
