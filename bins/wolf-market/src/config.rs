//! Command-line arguments for the marketplace client

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use solana_program::pubkey::Pubkey;
use wolf_market::MarketConfig;

/// Wolf NFT marketplace client
///
/// Lists NFTs held by a wallet or the marketplace, reads the reward vault, and prints
/// unsigned transactions for an external wallet to sign.
///
/// # Examples
///
/// ```bash
/// # NFTs held by a wallet
/// wolf-market nfts --owner 594WQxpBu4vVDhhW2K7QoNMZaN6j9znxajcZX13as7HD
///
/// # Marketplace listings as JSON
/// wolf-market --json listings
///
/// # Unsigned deposit of 1.5 WOLF
/// wolf-market plan --signer <PUBKEY> deposit --amount 1.5
/// ```
#[derive(Parser, Debug)]
#[command(name = "wolf-market")]
#[command(about = "Browse and trade on the Wolf NFT marketplace", long_about = None)]
pub struct Cli {
    /// Solana RPC URL (overrides the config file)
    #[arg(long, env = "SOLANA_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, env = "WOLF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the NFTs held by a wallet
    Nfts {
        #[arg(long)]
        owner: Pubkey,
    },
    /// List the NFTs held by the marketplace with their prices
    Listings,
    /// Show the reward vault balance
    Vault,
    /// Show a wallet's reward token balance
    Balance {
        #[arg(long)]
        owner: Pubkey,
    },
    /// Print an unsigned transaction as base64
    Plan {
        /// Wallet that will sign and pay for the transaction
        #[arg(long, env = "WOLF_SIGNER")]
        signer: Pubkey,

        #[command(subcommand)]
        action: PlanAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlanAction {
    /// Create the reward vault and a marketplace owned by the signer
    Initialize,
    /// Deposit reward tokens into the vault
    Deposit {
        /// Amount in whole tokens, e.g. 1.5
        #[arg(long)]
        amount: String,
    },
    /// Withdraw reward tokens from the vault
    Withdraw {
        #[arg(long)]
        amount: String,
    },
    /// List an NFT held by the signer at the configured price
    List {
        #[arg(long)]
        mint: Pubkey,
    },
    /// Buy a listed NFT
    Buy {
        #[arg(long)]
        mint: Pubkey,
    },
}

impl Cli {
    /// Config file (or defaults) with `WOLF_*` and command-line overrides applied.
    pub fn market_config(&self) -> Result<MarketConfig> {
        let mut config = MarketConfig::load_optional(self.config.as_deref())?;
        if let Some(url) = &self.rpc_url {
            config.rpc_url.clone_from(url);
        }
        Ok(config)
    }
}
