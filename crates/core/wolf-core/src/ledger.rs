use async_trait::async_trait;
use solana_program::message::Message;
use solana_program::pubkey::Pubkey;

use crate::{LedgerError, SubmitError, TokenAccount, TokenBalance};

/// Read access to chain state.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// All token accounts owned by `owner` under `token_program`, including empty ones.
    async fn token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Vec<TokenAccount>, LedgerError>;

    /// Raw data for each address, in request order. Accounts that do not exist yield
    /// `None` at their slot; the result always has one slot per requested address.
    async fn multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Vec<u8>>>, LedgerError>;

    /// Balance of a single token account, or `None` if the account does not exist.
    async fn token_account_balance(
        &self,
        address: &Pubkey,
    ) -> Result<Option<TokenBalance>, LedgerError>;
}

/// Signs and sends a transaction message on behalf of the current signer.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Public key that pays for and signs submitted messages.
    fn signer(&self) -> Pubkey;

    /// Sign and send `message`, returning the base-58 transaction signature.
    async fn sign_and_send(&self, message: Message) -> Result<String, SubmitError>;
}
