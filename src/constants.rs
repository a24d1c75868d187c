//! Well-known program ids and the deployed marketplace's defaults.

use solana_program::{pubkey, pubkey::Pubkey};

/// Metaplex token-metadata program.
pub const METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// `wolf_marketplace` program on devnet.
pub const MARKETPLACE_PROGRAM_ID: Pubkey = pubkey!("9BPEVBsqVkPVt79sBAjjQngUS5v99gRDFnXwv9rAMSXL");
/// WOLF reward token mint.
pub const REWARD_MINT: Pubkey = pubkey!("AayyhNGi8NaGPhQfGxW3QMU2K3uTk4EbuAUUcnQACSvn");
/// Authority the marketplace account was initialized with.
pub const MARKETPLACE_ADMIN: Pubkey = pubkey!("594WQxpBu4vVDhhW2K7QoNMZaN6j9znxajcZX13as7HD");

pub const REWARD_DECIMALS: u8 = 9;
/// Listing price in whole reward tokens.
pub const LIST_PRICE: &str = "10";

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

pub const METADATA_SEED: &[u8] = b"metadata";
pub const VAULT_SEED: &[u8] = b"vault";
pub const MARKETPLACE_SEED: &[u8] = b"marketplace";
pub const LISTING_SEED: &[u8] = b"listing";
