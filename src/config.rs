//! Marketplace client configuration, usually read from a `wolf.toml` file.

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use solana_program::pubkey::Pubkey;
use wolf_fetcher_jsonrpc::JsonRpcLedgerConfig;

use crate::amount::{AmountError, TokenAmount};
use crate::constants::{
    DEFAULT_RPC_URL, LIST_PRICE, MARKETPLACE_ADMIN, MARKETPLACE_PROGRAM_ID, REWARD_DECIMALS,
    REWARD_MINT,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub rpc_url: String,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub program_id: Pubkey,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub reward_mint: Pubkey,
    /// Authority whose marketplace PDA holds listed NFTs.
    #[serde(deserialize_with = "pubkey_from_str")]
    pub admin: Pubkey,
    pub reward_decimals: u8,
    /// Price of a new listing, in whole reward tokens.
    pub list_price: String,
    pub commitment: Option<String>,
    pub request_retry: Option<u32>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            program_id: MARKETPLACE_PROGRAM_ID,
            reward_mint: REWARD_MINT,
            admin: MARKETPLACE_ADMIN,
            reward_decimals: REWARD_DECIMALS,
            list_price: LIST_PRICE.to_string(),
            commitment: None,
            request_retry: None,
        }
    }
}

impl MarketConfig {
    /// Loads the configuration from a file, with `WOLF_*` environment variables taking
    /// precedence. Missing keys fall back to the devnet deployment.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        Self::load_optional(Some(config_path.as_ref()))
    }

    /// Like [`MarketConfig::load`], but the file is optional. `WOLF_*` overrides apply
    /// either way.
    pub fn load_optional(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("WOLF"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn list_price(&self) -> Result<TokenAmount, AmountError> {
        TokenAmount::parse_ui(&self.list_price, self.reward_decimals)
    }

    pub fn ledger_config(&self) -> JsonRpcLedgerConfig {
        let mut config = JsonRpcLedgerConfig::new(self.rpc_url.clone());
        config.commitment = self.commitment.clone();
        config.request_retry = self.request_retry;
        config
    }
}

fn pubkey_from_str<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Pubkey::from_str(&value).map_err(serde::de::Error::custom)
}
