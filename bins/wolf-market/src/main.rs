//! Wolf market - command-line client for the Wolf NFT marketplace.
//!
//! Read-only commands query the chain directly. Transactions are never signed here:
//! `plan` prints the unsigned message so a wallet can sign and send it.
//!
//! # Usage
//!
//! ```bash
//! # NFTs held by a wallet, sorted by name
//! wolf-market nfts --owner <PUBKEY>
//!
//! # Reward vault balance on a local validator
//! wolf-market --rpc-url http://127.0.0.1:8899 vault
//!
//! # Unsigned listing transaction
//! wolf-market plan --signer <ADMIN> list --mint <MINT>
//! ```

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Command, PlanAction};
use serde_json::json;
use wolf_fetcher_jsonrpc::JsonRpcLedger;
use wolf_market::{
    discover_marketplace_listings, discover_owned_nfts, MarketContext, MarketplaceClient, OwnedNft,
    TokenAmount, TransactionPlan,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.market_config()?;
    tracing::info!("RPC URL: {}", config.rpc_url);
    tracing::info!("Marketplace program: {}", config.program_id);

    let ledger = Arc::new(JsonRpcLedger::new(config.ledger_config())?);
    let ctx = MarketContext::new(config, ledger);

    match cli.command {
        Command::Nfts { owner } => {
            let nfts = discover_owned_nfts(&ctx, &owner).await?;
            print_nfts(&nfts, cli.json);
        }
        Command::Listings => {
            let listings = discover_marketplace_listings(&ctx).await?;
            if cli.json {
                let entries: Vec<_> = listings
                    .iter()
                    .map(|listed| {
                        let mut entry = nft_json(&listed.nft);
                        entry["listing"] = json!(listed.listing.to_string());
                        entry["price"] = json!(listed.price.map(|p| p.to_string()));
                        entry
                    })
                    .collect();
                println!("{}", json!(entries));
            } else {
                for listed in &listings {
                    let price = listed
                        .price
                        .map_or_else(|| "unlisted".to_string(), |p| p.to_string());
                    println!("{}\t{}\t{}", listed.nft.name(), listed.nft.mint(), price);
                }
            }
        }
        Command::Balance { owner } => {
            let client = MarketplaceClient::new(ctx);
            let balance = client.reward_balance(&owner).await?;
            if cli.json {
                println!(
                    "{}",
                    json!({
                        "owner": owner.to_string(),
                        "balance": balance.map(|b| b.to_string()),
                    })
                );
            } else {
                println!("{owner}\t{}", balance.map_or_else(|| "0".to_string(), |b| b.to_string()));
            }
        }
        Command::Vault => {
            let client = MarketplaceClient::new(ctx);
            let vault = client.vault().address;
            let balance = client.vault_balance().await?;
            if cli.json {
                println!(
                    "{}",
                    json!({
                        "vault": vault.to_string(),
                        "balance": balance.map(|b| b.to_string()),
                    })
                );
            } else {
                match balance {
                    Some(balance) => println!("{vault}\t{balance}"),
                    None => println!("{vault}\tnot initialized"),
                }
            }
        }
        Command::Plan { signer, action } => {
            let decimals = ctx.config().reward_decimals;
            let owner_ctx = ctx.clone();
            let client = MarketplaceClient::new(ctx.with_signer(signer));
            let plan = match action {
                PlanAction::Initialize => client.plan_initialize().await?,
                PlanAction::Deposit { amount } => {
                    client
                        .plan_deposit(TokenAmount::parse_ui(&amount, decimals)?)
                        .await?
                }
                PlanAction::Withdraw { amount } => {
                    client
                        .plan_withdraw(TokenAmount::parse_ui(&amount, decimals)?)
                        .await?
                }
                PlanAction::List { mint } => {
                    let nft = discover_owned_nfts(&owner_ctx, &signer)
                        .await?
                        .into_iter()
                        .find(|nft| nft.mint() == mint)
                        .with_context(|| format!("{signer} does not hold an NFT with mint {mint}"))?;
                    client.plan_add_listing(&nft).await?
                }
                PlanAction::Buy { mint } => client.plan_buy(&mint).await?,
            };
            print_plan(&plan, cli.json);
        }
    }

    Ok(())
}

fn nft_json(nft: &OwnedNft) -> serde_json::Value {
    json!({
        "name": nft.name(),
        "symbol": nft.metadata.data.symbol,
        "uri": nft.metadata.data.uri,
        "mint": nft.mint().to_string(),
        "token_account": nft.token_account.to_string(),
    })
}

fn print_nfts(nfts: &[OwnedNft], as_json: bool) {
    if as_json {
        let entries: Vec<_> = nfts.iter().map(nft_json).collect();
        println!("{}", json!(entries));
        return;
    }
    for nft in nfts {
        println!("{}\t{}\t{}", nft.name(), nft.mint(), nft.metadata.data.uri);
    }
}

fn print_plan(plan: &TransactionPlan, as_json: bool) {
    let message = plan.unsigned_message_base64();
    if as_json {
        println!(
            "{}",
            json!({
                "payer": plan.payer.to_string(),
                "instructions": plan.instructions.len(),
                "message": message,
            })
        );
    } else {
        tracing::info!("{} instruction(s), payer {}", plan.instructions.len(), plan.payer);
        println!("{message}");
    }
}
