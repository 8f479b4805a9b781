// plugins/token/src/lib.rs
use solana_sdk::pubkey::Pubkey;
use async_trait::async_trait;
use anyhow::Result;

/// Balance and transfer operations over SOL and SPL tokens.
///
/// `mint: None` means native SOL; amounts are in UI units (SOL, or the
/// token's decimal-adjusted amount), never raw lamports.
#[async_trait]
pub trait TokenActions {
    /// Send `amount` to `to`, returning the transaction signature.
    async fn transfer(
        &self,
        to: Pubkey,
        amount: f64,
        mint: Option<Pubkey>,
    ) -> Result<String>;

    async fn get_balance(&self, mint: Option<Pubkey>) -> Result<f64>;
}

pub use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Convert a UI amount into base units for a token with `decimals` places.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        anyhow::bail!("Amount must be a positive number, got {amount}");
    }
    let scaled = (amount * 10f64.powi(decimals as i32)).round();
    if scaled < 1.0 || scaled >= u64::MAX as f64 {
        anyhow::bail!("Amount {amount} is out of range for {decimals} decimals");
    }
    Ok(scaled as u64)
}
