//! Wolf market - client for the `wolf_marketplace` Solana program.
//!
//! Discovers the NFTs a wallet or the marketplace holds, decodes their Metaplex
//! metadata, and plans the marketplace's vault and listing transactions. Chain access
//! goes through the [`Ledger`] carried by a [`MarketContext`]; signing is left to an
//! external [`TransactionSubmitter`].
//!
//! ```rust,ignore
//! let config = MarketConfig::default();
//! let ledger = Arc::new(JsonRpcLedger::new(config.ledger_config())?);
//! let ctx = MarketContext::new(config, ledger);
//!
//! for nft in discover_owned_nfts(&ctx, &owner).await? {
//!     println!("{} {}", nft.name(), nft.mint());
//! }
//! ```

pub mod amount;
pub mod collate;
pub mod config;
pub mod constants;
pub mod context;
pub mod discovery;
pub mod marketplace;
pub mod pda;

pub use amount::{AmountError, TokenAmount};
pub use self::config::MarketConfig;
pub use context::MarketContext;
pub use discovery::{discover_owned_nfts, DiscoveryError, NftDiscovery, OwnedNft};
pub use marketplace::{
    discover_marketplace_listings, ListedNft, MarketError, MarketplaceClient, TransactionPlan,
};

pub use wolf_core::{Ledger, LedgerError, SubmitError, TokenAccount, TokenBalance, TransactionSubmitter};
pub use wolf_metadata::{decode_metadata, Creator, DecodeError, Metadata, MetadataBody, MetadataKey};
