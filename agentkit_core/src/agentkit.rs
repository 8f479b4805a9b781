use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    program_pack::Pack,
    pubkey::Pubkey,
    signature::Keypair,
    system_instruction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};

use crate::config::{AgentkitConfig, ConfigError, ModelConfig, Network};
use crate::wallet::{KeypairWallet, Wallet};
use agentkit_token::{to_base_units, TokenActions, LAMPORTS_PER_SOL};

/// Credentials and connection state shared by every action: the RPC client,
/// the signing wallet, the cluster it points at and the model settings an
/// orchestrator should use.
pub struct Agentkit {
    pub client: Arc<RpcClient>,
    pub wallet: Arc<dyn Wallet>,
    pub network: Network,
    pub model: ModelConfig,
}

impl Agentkit {
    pub fn new(
        wallet: Arc<dyn Wallet>,
        network: Network,
        rpc_url: &str,
        model: ModelConfig,
    ) -> Self {
        Self {
            client: Arc::new(RpcClient::new(rpc_url.to_string())),
            wallet,
            network,
            model,
        }
    }

    pub fn from_config(config: AgentkitConfig) -> Result<Self> {
        let wallet = match config.private_key.as_deref() {
            Some(secret) => KeypairWallet::from_base58(secret)
                .map_err(|e| ConfigError::InvalidPrivateKey(e.to_string()))?,
            None => {
                let wallet = KeypairWallet::new(Keypair::new());
                tracing::warn!(
                    address = %wallet.pubkey(),
                    "no SOLANA_PRIVATE_KEY configured; using an ephemeral wallet"
                );
                wallet
            }
        };

        Ok(Self::new(
            Arc::new(wallet),
            config.network,
            &config.rpc_url,
            config.model,
        ))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(AgentkitConfig::from_env()?)
    }

    pub fn address(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    /// Request an airdrop of `lamports` and wait for it to land.
    pub async fn request_faucet_funds(&self, lamports: u64) -> Result<String> {
        if !self.network.has_faucet() {
            bail!("Faucet is not available on {}", self.network);
        }
        let address = self.address();

        tracing::info!(%address, lamports, network = %self.network, "requesting airdrop");
        let signature = self
            .client
            .request_airdrop(&address, lamports)
            .await
            .context("airdrop request failed")?;
        self.client.poll_for_signature(&signature).await?;
        Ok(signature.to_string())
    }

    /// Compile, sign and submit `instructions` with the wallet as fee payer.
    /// `co_signers` covers freshly generated accounts such as new mints.
    pub async fn submit(
        &self,
        instructions: &[Instruction],
        co_signers: &[&Keypair],
    ) -> Result<String> {
        let payer = self.address();
        let blockhash = self.client.get_latest_blockhash().await?;
        let message = v0::Message::try_compile(&payer, instructions, &[], blockhash)?;
        self.sign_and_send(VersionedMessage::V0(message), co_signers)
            .await
    }

    /// Sign an already compiled message (e.g. one returned by an aggregator)
    /// and send it.
    pub async fn sign_and_send(
        &self,
        message: VersionedMessage,
        co_signers: &[&Keypair],
    ) -> Result<String> {
        let tx = self.wallet.sign_message(message, co_signers).await?;
        let signature = self.client.send_and_confirm_transaction(&tx).await?;
        Ok(signature.to_string())
    }

    pub async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8> {
        let account = self
            .client
            .get_account(mint)
            .await
            .with_context(|| format!("failed to fetch mint {mint}"))?;
        let state = spl_token::state::Mint::unpack(&account.data)
            .map_err(|e| anyhow!("{mint} is not an SPL token mint: {e}"))?;
        Ok(state.decimals)
    }

    pub async fn rent_exempt_minimum(&self, len: usize) -> Result<u64> {
        Ok(self
            .client
            .get_minimum_balance_for_rent_exemption(len)
            .await?)
    }

    /// UI balance of `owner`'s associated token account for `mint`.
    pub async fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<f64> {
        let ata = get_associated_token_address(owner, mint);
        let account = self
            .client
            .get_account_with_commitment(&ata, self.client.commitment())
            .await?
            .value;
        let decimals = match account {
            Some(_) => self.mint_decimals(mint).await?,
            None => 0,
        };
        token_account_ui_balance(account.as_ref(), decimals)
    }
}

impl fmt::Debug for Agentkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agentkit")
            .field("address", &self.address())
            .field("network", &self.network)
            .field("rpc_url", &self.client.url())
            .field("model", &self.model)
            .finish()
    }
}

/// Instructions moving `amount` (UI units) from `from` to `to`.
///
/// `mint: None` is a system transfer of SOL. `Some((mint, decimals))` is a
/// `transfer_checked` between associated token accounts, preceded by an
/// idempotent creation of the recipient's account.
pub fn transfer_instructions(
    from: &Pubkey,
    to: &Pubkey,
    mint: Option<(Pubkey, u8)>,
    amount: f64,
) -> Result<Vec<Instruction>> {
    match mint {
        None => {
            let lamports = to_base_units(amount, 9)?;
            Ok(vec![system_instruction::transfer(from, to, lamports)])
        }
        Some((mint, decimals)) => {
            let raw = to_base_units(amount, decimals)?;
            let source = get_associated_token_address(from, &mint);
            let destination = get_associated_token_address(to, &mint);
            Ok(vec![
                create_associated_token_account_idempotent(from, to, &mint, &spl_token::id()),
                spl_token::instruction::transfer_checked(
                    &spl_token::id(),
                    &source,
                    &mint,
                    &destination,
                    from,
                    &[],
                    raw,
                    decimals,
                )?,
            ])
        }
    }
}

/// Balance held by a token account, `0.0` when the account does not exist.
pub fn token_account_ui_balance(account: Option<&Account>, decimals: u8) -> Result<f64> {
    let Some(account) = account else {
        return Ok(0.0);
    };
    let state = spl_token::state::Account::unpack(&account.data)
        .map_err(|e| anyhow!("not an SPL token account: {e}"))?;
    Ok(state.amount as f64 / 10f64.powi(decimals as i32))
}

#[async_trait::async_trait]
impl TokenActions for Agentkit {
    async fn transfer(
        &self,
        to: Pubkey,
        amount: f64,
        mint: Option<Pubkey>,
    ) -> Result<String> {
        let from = self.address();
        let mint = match mint {
            Some(mint) => Some((mint, self.mint_decimals(&mint).await?)),
            None => None,
        };
        let instructions = transfer_instructions(&from, &to, mint, amount)?;

        tracing::info!(%from, %to, amount, mint = ?mint.map(|(m, _)| m), "submitting transfer");
        self.submit(&instructions, &[]).await
    }

    async fn get_balance(&self, mint: Option<Pubkey>) -> Result<f64> {
        let owner = self.address();
        match mint {
            None => {
                let lamports = self.client.get_balance(&owner).await?;
                Ok(lamports as f64 / LAMPORTS_PER_SOL as f64)
            }
            Some(mint) => self.token_balance(&owner, &mint).await,
        }
    }
}
