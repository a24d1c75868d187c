use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use solana_program::pubkey::Pubkey;
use wolf_core::{Ledger, LedgerError, TokenBalance};
use wolf_fetcher_jsonrpc::{JsonRpcLedger, JsonRpcLedgerConfig};

const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Serves `respond(request)` for every JSON-RPC call and counts requests.
async fn spawn_rpc<F>(respond: F) -> (String, Arc<AtomicUsize>)
where
    F: Fn(&Value) -> Value + Clone + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/",
        post(move |Json(request): Json<Value>| {
            let respond = respond.clone();
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut response = respond(&request);
                response["jsonrpc"] = json!("2.0");
                response["id"] = request["id"].clone();
                Json(response)
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/"), hits)
}

fn ledger(url: &str) -> JsonRpcLedger {
    JsonRpcLedger::new(JsonRpcLedgerConfig::new(url)).unwrap()
}

#[tokio::test]
async fn test_token_accounts_by_owner() {
    let owner = Pubkey::new_unique();
    let held = (Pubkey::new_unique(), Pubkey::new_unique());
    let empty = (Pubkey::new_unique(), Pubkey::new_unique());
    let (url, _) = spawn_rpc(move |request| {
        assert_eq!(request["method"], "getTokenAccountsByOwner");
        assert_eq!(request["params"][0], owner.to_string());
        assert_eq!(request["params"][1]["programId"], TOKEN_PROGRAM);
        assert_eq!(request["params"][2]["encoding"], "jsonParsed");
        let entry = |(address, mint): (Pubkey, Pubkey), amount: &str| {
            json!({
                "pubkey": address.to_string(),
                "account": { "data": { "parsed": { "info": {
                    "mint": mint.to_string(),
                    "tokenAmount": { "amount": amount, "decimals": 0 }
                }}}}
            })
        };
        json!({ "result": { "context": { "slot": 1 }, "value": [entry(held, "1"), entry(empty, "0")] } })
    })
    .await;

    let token_program: Pubkey = TOKEN_PROGRAM.parse().unwrap();
    let accounts = ledger(&url)
        .token_accounts_by_owner(&owner, &token_program)
        .await
        .unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].address, held.0);
    assert_eq!(accounts[0].mint, held.1);
    assert_eq!(accounts[0].amount, "1");
    assert!(accounts[1].is_empty());
}

#[tokio::test]
async fn test_multiple_accounts_chunks_and_preserves_order() {
    let addresses: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
    let present: Vec<String> = vec![addresses[0].to_string(), addresses[3].to_string()];
    let (url, hits) = spawn_rpc(move |request| {
        assert_eq!(request["method"], "getMultipleAccounts");
        assert_eq!(request["params"][1]["encoding"], "base64");
        let value: Vec<Value> = request["params"][0]
            .as_array()
            .unwrap()
            .iter()
            .map(|key| {
                let key = key.as_str().unwrap();
                match present.iter().position(|p| p == key) {
                    Some(index) => {
                        let encoded = STANDARD.encode([index as u8 + 1]);
                        json!({ "data": [encoded, "base64"] })
                    }
                    None => Value::Null,
                }
            })
            .collect();
        json!({ "result": { "context": { "slot": 1 }, "value": value } })
    })
    .await;

    let mut config = JsonRpcLedgerConfig::new(url);
    config.max_accounts_per_request = Some(2);
    let slots = JsonRpcLedger::new(config)
        .unwrap()
        .multiple_accounts(&addresses)
        .await
        .unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(slots, vec![Some(vec![1]), None, None, Some(vec![2]), None]);
}

#[tokio::test]
async fn test_token_account_balance() {
    let vault = Pubkey::new_unique();
    let vault_key = vault.to_string();
    let (url, _) = spawn_rpc(move |request| {
        assert_eq!(request["method"], "getAccountInfo");
        if request["params"][0] == vault_key.as_str() {
            json!({ "result": { "context": { "slot": 1 }, "value": {
                "data": { "parsed": { "info": {
                    "mint": "AayyhNGi8NaGPhQfGxW3QMU2K3uTk4EbuAUUcnQACSvn",
                    "tokenAmount": { "amount": "2500000000", "decimals": 9 }
                }}}
            }}})
        } else {
            json!({ "result": { "context": { "slot": 1 }, "value": null } })
        }
    })
    .await;

    let ledger = ledger(&url);
    assert_eq!(
        ledger.token_account_balance(&vault).await.unwrap(),
        Some(TokenBalance {
            amount: 2_500_000_000,
            decimals: 9
        })
    );
    assert_eq!(
        ledger
            .token_account_balance(&Pubkey::new_unique())
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_rpc_error_is_surfaced() {
    let (url, hits) = spawn_rpc(|_| {
        json!({ "error": { "code": -32602, "message": "Invalid param: WrongSize" } })
    })
    .await;

    let mut config = JsonRpcLedgerConfig::new(url);
    config.request_retry = Some(3);
    let err = JsonRpcLedger::new(config)
        .unwrap()
        .multiple_accounts(&[Pubkey::new_unique()])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::Rpc {
            code: -32602,
            message: "Invalid param: WrongSize".to_string()
        }
    );
    // RPC errors are not retried.
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_node() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ledger(&format!("http://{addr}/"))
        .token_accounts_by_owner(&Pubkey::new_unique(), &Pubkey::new_unique())
        .await
        .unwrap_err();
    assert!(err.is_transient(), "unexpected error: {err:?}");
}
