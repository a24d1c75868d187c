//! Solana JSON-RPC response shapes.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `{ "context": { "slot": .. }, "value": .. }` wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct WithContext<T> {
    pub value: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeyedTokenAccount {
    pub pubkey: String,
    pub account: ParsedTokenAccount,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParsedTokenAccount {
    pub data: ParsedData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParsedData {
    pub parsed: ParsedInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParsedInfo {
    pub info: TokenAccountInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenAccountInfo {
    pub mint: String,
    pub token_amount: UiTokenAmount,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UiTokenAmount {
    pub amount: String,
    pub decimals: u8,
}

/// Account returned with `"encoding": "base64"`: `data` is `[payload, "base64"]`.
#[derive(Debug, Deserialize)]
pub(crate) struct EncodedAccount {
    pub data: (String, String),
}
