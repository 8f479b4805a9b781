use solana_sdk::{
    message::VersionedMessage,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// trait for signing Solana transactions.
/// allows for flexible wallet implementations, from local keypairs to remote signers.
#[async_trait]
pub trait Wallet: Send + Sync + Debug {
    fn pubkey(&self) -> Pubkey;

    /// Sign a compiled message, producing a transaction ready to submit.
    /// `co_signers` add their signatures alongside the wallet's.
    async fn sign_message(
        &self,
        message: VersionedMessage,
        co_signers: &[&Keypair],
    ) -> anyhow::Result<VersionedTransaction>;
}

/// wallet implementation using a local Solana Keypair.
#[derive(Debug)]
pub struct KeypairWallet {
    keypair: Arc<Keypair>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair: Arc::new(keypair),
        }
    }

    /// Decode a base58-encoded 64 byte secret key.
    pub fn from_base58(secret: &str) -> anyhow::Result<Self> {
        let bytes = bs58::decode(secret.trim()).into_vec()?;
        let keypair = Keypair::from_bytes(&bytes)
            .map_err(|e| anyhow::anyhow!("invalid keypair bytes: {e}"))?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_message(
        &self,
        message: VersionedMessage,
        co_signers: &[&Keypair],
    ) -> anyhow::Result<VersionedTransaction> {
        let mut signers: Vec<&Keypair> = Vec::with_capacity(co_signers.len() + 1);
        signers.push(self.keypair.as_ref());
        signers.extend_from_slice(co_signers);
        let tx = VersionedTransaction::try_new(message, signers.as_slice())?;
        Ok(tx)
    }
}
