//! Test helpers: an in-memory [`Ledger`] and a byte-level metadata encoder.

mod builder;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use solana_program::pubkey::Pubkey;
use wolf_core::{Ledger, LedgerError, TokenAccount, TokenBalance};

pub use builder::MetadataBuilder;

/// Ledger call recorded by [`MemoryLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    TokenAccountsByOwner(Pubkey),
    MultipleAccounts(Vec<Pubkey>),
    TokenAccountBalance(Pubkey),
}

/// In-memory ledger with call recording.
#[derive(Default)]
pub struct MemoryLedger {
    token_accounts: HashMap<Pubkey, Vec<TokenAccount>>,
    accounts: HashMap<Pubkey, Vec<u8>>,
    balances: HashMap<Pubkey, TokenBalance>,
    unavailable: bool,
    calls: Mutex<Vec<LedgerCall>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a transport error.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Adds a token account for `owner` and returns its (random) address.
    pub fn add_token_account(&mut self, owner: Pubkey, mint: Pubkey, amount: &str) -> Pubkey {
        let address = Pubkey::new_unique();
        self.token_accounts
            .entry(owner)
            .or_default()
            .push(TokenAccount {
                address,
                mint,
                amount: amount.to_string(),
            });
        address
    }

    pub fn add_account(&mut self, address: Pubkey, data: Vec<u8>) {
        self.accounts.insert(address, data);
    }

    pub fn add_balance(&mut self, address: Pubkey, balance: TokenBalance) {
        self.balances.insert(address, balance);
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Addresses requested through `multiple_accounts`, flattened in call order.
    pub fn fetched_addresses(&self) -> Vec<Pubkey> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                LedgerCall::MultipleAccounts(addresses) => Some(addresses),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn record(&self, call: LedgerCall) -> Result<(), LedgerError> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable {
            return Err(LedgerError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        _token_program: &Pubkey,
    ) -> Result<Vec<TokenAccount>, LedgerError> {
        self.record(LedgerCall::TokenAccountsByOwner(*owner))?;
        Ok(self.token_accounts.get(owner).cloned().unwrap_or_default())
    }

    async fn multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Vec<u8>>>, LedgerError> {
        self.record(LedgerCall::MultipleAccounts(addresses.to_vec()))?;
        Ok(addresses
            .iter()
            .map(|address| self.accounts.get(address).cloned())
            .collect())
    }

    async fn token_account_balance(
        &self,
        address: &Pubkey,
    ) -> Result<Option<TokenBalance>, LedgerError> {
        self.record(LedgerCall::TokenAccountBalance(*address))?;
        Ok(self.balances.get(address).copied())
    }
}
