//! Lists the NFTs an address holds.
//!
//! Token accounts with a zero balance are dropped, the metadata PDA of every remaining
//! mint is fetched in a single batched read, and accounts that are missing or fail to
//! decode are skipped. The result is sorted by NFT name.

use std::sync::Arc;

use solana_program::pubkey::Pubkey;
use wolf_core::{Ledger, LedgerError, TokenAccount};
use wolf_metadata::Metadata;

use crate::collate::NameCollator;
use crate::constants::TOKEN_PROGRAM_ID;
use crate::context::MarketContext;
use crate::pda::metadata_address;

/// An NFT's decoded metadata together with the token account proving ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedNft {
    pub metadata: Metadata,
    pub token_account: Pubkey,
}

impl OwnedNft {
    pub fn mint(&self) -> Pubkey {
        self.metadata.mint
    }

    pub fn name(&self) -> &str {
        self.metadata.name()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("ledger returned {received} account slots for {requested} addresses")]
    SlotCountMismatch { requested: usize, received: usize },
}

/// Discovery bound to a ledger handle.
#[derive(Clone)]
pub struct NftDiscovery {
    ledger: Arc<dyn Ledger>,
}

impl NftDiscovery {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    pub async fn discover(&self, owner: &Pubkey) -> Result<Vec<OwnedNft>, DiscoveryError> {
        let token_accounts = self
            .ledger
            .token_accounts_by_owner(owner, &TOKEN_PROGRAM_ID)
            .await?;
        let total = token_accounts.len();

        let held: Vec<TokenAccount> = token_accounts
            .into_iter()
            .filter(|account| !account.is_empty())
            .collect();
        if held.is_empty() {
            tracing::debug!(
                target: "wolf_market::discovery",
                owner = %owner,
                token_accounts = total,
                "No held token accounts"
            );
            return Ok(Vec::new());
        }

        let addresses: Vec<Pubkey> = held
            .iter()
            .map(|account| metadata_address(&account.mint).address)
            .collect();
        let slots = self.ledger.multiple_accounts(&addresses).await?;
        if slots.len() != addresses.len() {
            return Err(DiscoveryError::SlotCountMismatch {
                requested: addresses.len(),
                received: slots.len(),
            });
        }

        let mut nfts: Vec<OwnedNft> = held
            .iter()
            .zip(slots)
            .filter_map(|(account, slot)| {
                let data = slot?;
                match Metadata::from_account_data(&data) {
                    Ok(metadata) => Some(OwnedNft {
                        metadata,
                        token_account: account.address,
                    }),
                    Err(err) => {
                        tracing::debug!(
                            target: "wolf_market::discovery",
                            mint = %account.mint,
                            error = %err,
                            "Skipping undecodable metadata"
                        );
                        None
                    }
                }
            })
            .collect();
        let mut collator = NameCollator::new();
        nfts.sort_by(|a, b| collator.compare(a.name(), b.name()));

        tracing::debug!(
            target: "wolf_market::discovery",
            owner = %owner,
            token_accounts = total,
            held = held.len(),
            nfts = nfts.len(),
            "Discovered NFTs"
        );
        Ok(nfts)
    }
}

/// NFTs held by `owner`, sorted by name.
pub async fn discover_owned_nfts(
    ctx: &MarketContext,
    owner: &Pubkey,
) -> Result<Vec<OwnedNft>, DiscoveryError> {
    NftDiscovery::new(ctx.ledger().clone()).discover(owner).await
}
