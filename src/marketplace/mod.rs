//! Client side of the `wolf_marketplace` program: account decoding, instruction
//! encoding and transaction planning.

pub mod accounts;
mod client;
pub mod instructions;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;
use wolf_core::{LedgerError, SubmitError};
use wolf_metadata::DecodeError;

use crate::amount::AmountError;
use crate::discovery::DiscoveryError;

pub use accounts::{ListingAccount, MarketplaceAccount};
pub use client::{discover_marketplace_listings, ListedNft, MarketplaceClient, TransactionPlan};

/// First 8 bytes of `sha256("global:<name>")`, prefixed to instruction data.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    sighash("global", name)
}

/// First 8 bytes of `sha256("account:<Name>")`, prefixed to account data.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    sighash("account", name)
}

fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// Custom errors raised by the marketplace program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum MarketplaceErrorCode {
    InsufficientFundsInVault = 6000,
}

impl MarketplaceErrorCode {
    pub fn message(self) -> &'static str {
        match self {
            Self::InsufficientFundsInVault => "Error: Insufficient funds in vault",
        }
    }

    /// Program error carried by a rejected submission, if it is one of ours.
    pub fn from_submit_error(err: &SubmitError) -> Option<Self> {
        match err {
            SubmitError::ProgramRejected {
                code: Some(code), ..
            } => Self::try_from(*code).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("failed to decode account: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),
    #[error("no signer connected")]
    MissingSigner,
    #[error("{signer} is not the marketplace authority ({authority})")]
    NotMarketplaceAuthority { signer: Pubkey, authority: Pubkey },
    #[error("marketplace account {0} is not initialized")]
    MarketplaceNotInitialized(Pubkey),
    #[error("no listing for mint {0}")]
    ListingNotFound(Pubkey),
    #[error("amount has {found} decimals, reward token has {expected}")]
    DecimalsMismatch { expected: u8, found: u8 },
}
