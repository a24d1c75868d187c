//! Solana JSON-RPC implementation of [`wolf_core::Ledger`].

mod retry;
mod wire;

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use solana_program::pubkey::Pubkey;
use tracing::{debug, trace};
use url::Url;
use wolf_core::{Ledger, LedgerError, TokenAccount, TokenBalance};

pub use retry::RetryPolicy;

use wire::{EncodedAccount, KeyedTokenAccount, ParsedTokenAccount, RpcResponse, WithContext};

/// `getMultipleAccounts` accepts at most this many keys per request.
pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcLedgerConfig {
    pub rpc_url: String,
    #[serde(default)]
    pub commitment: Option<String>,
    #[serde(default)]
    pub request_retry: Option<u32>,
    #[serde(default)]
    pub request_backoff_ms: Option<u64>,
    #[serde(default)]
    pub max_accounts_per_request: Option<usize>,
}

impl JsonRpcLedgerConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            commitment: None,
            request_retry: None,
            request_backoff_ms: None,
            max_accounts_per_request: None,
        }
    }
}

pub struct JsonRpcLedger {
    client: reqwest::Client,
    url: Url,
    commitment: String,
    retry: RetryPolicy,
    chunk_size: usize,
    next_id: AtomicU64,
}

impl JsonRpcLedger {
    pub fn new(config: JsonRpcLedgerConfig) -> Result<Self, LedgerError> {
        let url = Url::parse(&config.rpc_url)
            .map_err(|e| LedgerError::Transport(format!("invalid rpc url '{}': {e}", config.rpc_url)))?;
        let commitment = config
            .commitment
            .unwrap_or_else(|| "confirmed".to_string());
        let backoff = Duration::from_millis(config.request_backoff_ms.unwrap_or(250));
        let retry = RetryPolicy::new(
            config.request_retry.unwrap_or(0),
            backoff,
            backoff * 8,
            2.0,
        );
        let chunk_size = config
            .max_accounts_per_request
            .unwrap_or(MAX_MULTIPLE_ACCOUNTS)
            .clamp(1, MAX_MULTIPLE_ACCOUNTS);

        Ok(Self {
            client: reqwest::Client::new(),
            url,
            commitment,
            retry,
            chunk_size,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, LedgerError> {
        self.retry
            .execute(|| self.send::<T>(method, params.clone()), LedgerError::is_transient)
            .await
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(target: "wolf_fetcher_jsonrpc", id, method, "sending request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let response: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(format!("{method}: {e}")))?;

        if let Some(error) = response.error {
            debug!(
                target: "wolf_fetcher_jsonrpc",
                method,
                code = error.code,
                message = %error.message,
                "rpc returned an error"
            );
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| LedgerError::InvalidResponse(format!("{method}: missing result")))
    }
}

fn parse_pubkey(value: &str) -> Result<Pubkey, LedgerError> {
    Pubkey::from_str(value)
        .map_err(|e| LedgerError::InvalidResponse(format!("invalid pubkey '{value}': {e}")))
}

fn parse_amount(value: &str) -> Result<u64, LedgerError> {
    value
        .parse()
        .map_err(|e| LedgerError::InvalidResponse(format!("invalid token amount '{value}': {e}")))
}

#[async_trait]
impl Ledger for JsonRpcLedger {
    async fn token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Vec<TokenAccount>, LedgerError> {
        let response: WithContext<Vec<KeyedTokenAccount>> = self
            .call(
                "getTokenAccountsByOwner",
                json!([
                    owner.to_string(),
                    { "programId": token_program.to_string() },
                    { "encoding": "jsonParsed", "commitment": self.commitment },
                ]),
            )
            .await?;

        debug!(
            target: "wolf_fetcher_jsonrpc",
            owner = %owner,
            accounts = response.value.len(),
            "received token accounts"
        );

        response
            .value
            .into_iter()
            .map(|keyed| {
                let info = keyed.account.data.parsed.info;
                Ok(TokenAccount {
                    address: parse_pubkey(&keyed.pubkey)?,
                    mint: parse_pubkey(&info.mint)?,
                    amount: info.token_amount.amount,
                })
            })
            .collect()
    }

    async fn multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Vec<u8>>>, LedgerError> {
        let mut out = Vec::with_capacity(addresses.len());
        for chunk in addresses.chunks(self.chunk_size) {
            let keys: Vec<String> = chunk.iter().map(ToString::to_string).collect();
            let response: WithContext<Vec<Option<EncodedAccount>>> = self
                .call(
                    "getMultipleAccounts",
                    json!([keys, { "encoding": "base64", "commitment": self.commitment }]),
                )
                .await?;

            if response.value.len() != chunk.len() {
                return Err(LedgerError::InvalidResponse(format!(
                    "getMultipleAccounts: requested {} accounts, received {}",
                    chunk.len(),
                    response.value.len()
                )));
            }

            for account in response.value {
                let data = account
                    .map(|account| {
                        STANDARD.decode(&account.data.0).map_err(|e| {
                            LedgerError::InvalidResponse(format!("invalid base64 account data: {e}"))
                        })
                    })
                    .transpose()?;
                out.push(data);
            }
        }

        debug!(
            target: "wolf_fetcher_jsonrpc",
            requested = addresses.len(),
            found = out.iter().filter(|slot| slot.is_some()).count(),
            "fetched accounts"
        );
        Ok(out)
    }

    async fn token_account_balance(
        &self,
        address: &Pubkey,
    ) -> Result<Option<TokenBalance>, LedgerError> {
        let response: WithContext<Option<ParsedTokenAccount>> = self
            .call(
                "getAccountInfo",
                json!([
                    address.to_string(),
                    { "encoding": "jsonParsed", "commitment": self.commitment },
                ]),
            )
            .await?;

        response
            .value
            .map(|account| {
                let amount = account.data.parsed.info.token_amount;
                Ok(TokenBalance {
                    amount: parse_amount(&amount.amount)?,
                    decimals: amount.decimals,
                })
            })
            .transpose()
    }
}
