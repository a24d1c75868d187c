use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_program::instruction::Instruction;
use solana_program::message::Message;
use solana_program::pubkey::Pubkey;
use wolf_core::{SubmitError, TransactionSubmitter};

use super::accounts::{ListingAccount, MarketplaceAccount};
use super::{instructions, MarketError};
use crate::amount::TokenAmount;
use crate::context::MarketContext;
use crate::discovery::{DiscoveryError, NftDiscovery, OwnedNft};
use crate::pda::{
    associated_token_address, listing_address, marketplace_address, vault_address, ProgramAddress,
};

/// Ordered instructions for one transaction, not yet signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPlan {
    pub payer: Pubkey,
    pub instructions: Vec<Instruction>,
}

impl TransactionPlan {
    pub fn message(&self) -> Message {
        Message::new(&self.instructions, Some(&self.payer))
    }

    /// Serialized message, base64-encoded, ready to hand to an external signer.
    pub fn unsigned_message_base64(&self) -> String {
        STANDARD.encode(self.message().serialize())
    }
}

/// An NFT held by the marketplace and its listing price, if the listing account exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedNft {
    pub nft: OwnedNft,
    pub listing: Pubkey,
    pub price: Option<TokenAmount>,
}

/// Plans and submits marketplace operations for the context's signer.
#[derive(Clone)]
pub struct MarketplaceClient {
    ctx: MarketContext,
}

impl MarketplaceClient {
    pub fn new(ctx: MarketContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &MarketContext {
        &self.ctx
    }

    fn signer(&self) -> Result<Pubkey, MarketError> {
        self.ctx.signer().ok_or(MarketError::MissingSigner)
    }

    fn program_id(&self) -> &Pubkey {
        &self.ctx.config().program_id
    }

    pub fn vault(&self) -> ProgramAddress {
        vault_address(self.program_id(), &self.ctx.config().reward_mint)
    }

    /// Marketplace PDA of the configured admin.
    pub fn marketplace(&self) -> ProgramAddress {
        marketplace_address(self.program_id(), &self.ctx.config().admin)
    }

    pub fn listing(&self, mint: &Pubkey) -> ProgramAddress {
        listing_address(self.program_id(), mint)
    }

    fn reward_amount(&self, base_units: u64) -> TokenAmount {
        TokenAmount::from_base_units(base_units, self.ctx.config().reward_decimals)
    }

    fn check_decimals(&self, amount: TokenAmount) -> Result<u64, MarketError> {
        let expected = self.ctx.config().reward_decimals;
        if amount.decimals() != expected {
            return Err(MarketError::DecimalsMismatch {
                expected,
                found: amount.decimals(),
            });
        }
        Ok(amount.base_units())
    }

    /// One slot per address, in request order.
    async fn fetch_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Vec<u8>>>, MarketError> {
        let slots = self.ctx.ledger().multiple_accounts(addresses).await?;
        if slots.len() != addresses.len() {
            return Err(DiscoveryError::SlotCountMismatch {
                requested: addresses.len(),
                received: slots.len(),
            }
            .into());
        }
        Ok(slots)
    }

    async fn fetch_account(&self, address: Pubkey) -> Result<Option<Vec<u8>>, MarketError> {
        Ok(self.fetch_accounts(&[address]).await?.pop().flatten())
    }

    /// Creation instructions for each `(owner, mint)` associated token account that does
    /// not exist yet, checked in a single ledger read.
    async fn create_missing_token_accounts(
        &self,
        payer: &Pubkey,
        wanted: &[(Pubkey, Pubkey)],
    ) -> Result<Vec<Instruction>, MarketError> {
        let addresses: Vec<Pubkey> = wanted
            .iter()
            .map(|(owner, mint)| associated_token_address(owner, mint))
            .collect();
        let slots = self.fetch_accounts(&addresses).await?;
        Ok(wanted
            .iter()
            .zip(slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|((owner, mint), _)| {
                tracing::debug!(
                    target: "wolf_market::marketplace",
                    owner = %owner,
                    mint = %mint,
                    "Associated token account missing, creating"
                );
                instructions::create_associated_token_account(payer, owner, mint)
            })
            .collect())
    }

    pub async fn marketplace_account(&self) -> Result<Option<MarketplaceAccount>, MarketError> {
        let data = self.fetch_account(self.marketplace().address).await?;
        data.map(|data| MarketplaceAccount::from_account_data(&data))
            .transpose()
            .map_err(MarketError::from)
    }

    pub async fn listing_price(&self, mint: &Pubkey) -> Result<Option<TokenAmount>, MarketError> {
        let data = self.fetch_account(self.listing(mint).address).await?;
        let listing = data
            .map(|data| ListingAccount::from_account_data(&data))
            .transpose()?;
        Ok(listing.map(|listing| self.reward_amount(listing.price)))
    }

    /// Reward tokens held by the vault, or `None` before the vault is initialized.
    pub async fn vault_balance(&self) -> Result<Option<TokenAmount>, MarketError> {
        let balance = self
            .ctx
            .ledger()
            .token_account_balance(&self.vault().address)
            .await?;
        Ok(balance.map(|balance| TokenAmount::from_base_units(balance.amount, balance.decimals)))
    }

    /// Reward tokens in `owner`'s associated token account, `None` when it does not exist.
    pub async fn reward_balance(&self, owner: &Pubkey) -> Result<Option<TokenAmount>, MarketError> {
        let token_account = associated_token_address(owner, &self.ctx.config().reward_mint);
        let balance = self
            .ctx
            .ledger()
            .token_account_balance(&token_account)
            .await?;
        Ok(balance.map(|balance| TokenAmount::from_base_units(balance.amount, balance.decimals)))
    }

    /// Reward balance of the connected wallet.
    pub async fn user_reward_balance(&self) -> Result<Option<TokenAmount>, MarketError> {
        let signer = self.signer()?;
        self.reward_balance(&signer).await
    }

    /// NFTs held by the marketplace, each with the price of its listing.
    pub async fn discover_listings(&self) -> Result<Vec<ListedNft>, MarketError> {
        let marketplace = self.marketplace().address;
        let nfts = NftDiscovery::new(self.ctx.ledger().clone())
            .discover(&marketplace)
            .await?;
        if nfts.is_empty() {
            return Ok(Vec::new());
        }

        let listings: Vec<Pubkey> = nfts
            .iter()
            .map(|nft| self.listing(&nft.mint()).address)
            .collect();
        let slots = self.fetch_accounts(&listings).await?;

        Ok(nfts
            .into_iter()
            .zip(listings)
            .zip(slots)
            .map(|((nft, listing), slot)| {
                let price = slot
                    .and_then(|data| match ListingAccount::from_account_data(&data) {
                        Ok(account) => Some(account.price),
                        Err(err) => {
                            tracing::debug!(
                                target: "wolf_market::marketplace",
                                listing = %listing,
                                error = %err,
                                "Undecodable listing account"
                            );
                            None
                        }
                    })
                    .map(|price| self.reward_amount(price));
                ListedNft {
                    nft,
                    listing,
                    price,
                }
            })
            .collect())
    }

    /// Initializes the vault and a marketplace owned by the signer.
    pub async fn plan_initialize(&self) -> Result<TransactionPlan, MarketError> {
        let signer = self.signer()?;
        let config = self.ctx.config();
        let marketplace = marketplace_address(&config.program_id, &signer);
        Ok(TransactionPlan {
            payer: signer,
            instructions: vec![instructions::initialize(
                &config.program_id,
                &self.vault(),
                &marketplace,
                &signer,
                &config.reward_mint,
            )],
        })
    }

    pub async fn plan_deposit(&self, amount: TokenAmount) -> Result<TransactionPlan, MarketError> {
        let signer = self.signer()?;
        let base_units = self.check_decimals(amount)?;
        let reward_mint = self.ctx.config().reward_mint;
        let token_account = associated_token_address(&signer, &reward_mint);

        let mut plan = self
            .create_missing_token_accounts(&signer, &[(signer, reward_mint)])
            .await?;
        plan.push(instructions::deposit(
            self.program_id(),
            &self.vault(),
            &token_account,
            &signer,
            base_units,
        ));
        Ok(TransactionPlan {
            payer: signer,
            instructions: plan,
        })
    }

    pub async fn plan_withdraw(&self, amount: TokenAmount) -> Result<TransactionPlan, MarketError> {
        let signer = self.signer()?;
        let base_units = self.check_decimals(amount)?;
        let reward_mint = self.ctx.config().reward_mint;
        let token_account = associated_token_address(&signer, &reward_mint);

        let mut plan = self
            .create_missing_token_accounts(&signer, &[(signer, reward_mint)])
            .await?;
        plan.push(instructions::withdraw(
            self.program_id(),
            &self.vault(),
            &token_account,
            &signer,
            base_units,
        ));
        Ok(TransactionPlan {
            payer: signer,
            instructions: plan,
        })
    }

    /// Lists `nft` at the configured price. Only the marketplace authority may list.
    pub async fn plan_add_listing(&self, nft: &OwnedNft) -> Result<TransactionPlan, MarketError> {
        let signer = self.signer()?;
        let marketplace = self.marketplace();
        let account = self
            .marketplace_account()
            .await?
            .ok_or(MarketError::MarketplaceNotInitialized(marketplace.address))?;
        if account.authority != signer {
            return Err(MarketError::NotMarketplaceAuthority {
                signer,
                authority: account.authority,
            });
        }

        let price = self.check_decimals(self.ctx.config().list_price()?)?;
        let mint = nft.mint();
        let listing = self.listing(&mint);
        let nft_vault = associated_token_address(&marketplace.address, &mint);

        let mut plan = self
            .create_missing_token_accounts(&signer, &[(marketplace.address, mint)])
            .await?;
        plan.push(instructions::add_listing(
            self.program_id(),
            &marketplace,
            &listing,
            &nft_vault,
            &nft.token_account,
            &signer,
            &mint,
            price,
        ));
        Ok(TransactionPlan {
            payer: signer,
            instructions: plan,
        })
    }

    /// Buys the NFT listed for `mint` at its recorded price.
    pub async fn plan_buy(&self, mint: &Pubkey) -> Result<TransactionPlan, MarketError> {
        let signer = self.signer()?;
        let price = self
            .listing_price(mint)
            .await?
            .ok_or(MarketError::ListingNotFound(*mint))?;
        let reward_mint = self.ctx.config().reward_mint;
        let marketplace = self.marketplace();

        let mut plan = self
            .create_missing_token_accounts(&signer, &[(signer, *mint), (signer, reward_mint)])
            .await?;
        plan.push(instructions::buy(
            self.program_id(),
            &self.vault(),
            &marketplace,
            &self.listing(mint),
            &associated_token_address(&marketplace.address, mint),
            &associated_token_address(&signer, mint),
            &associated_token_address(&signer, &reward_mint),
            &signer,
            mint,
            price.base_units(),
        ));
        Ok(TransactionPlan {
            payer: signer,
            instructions: plan,
        })
    }

    /// Hands `plan` to the wallet. Failures are returned, never swallowed.
    pub async fn submit(
        &self,
        plan: &TransactionPlan,
        submitter: &dyn TransactionSubmitter,
    ) -> Result<String, SubmitError> {
        let result = submitter.sign_and_send(plan.message()).await;
        match &result {
            Ok(signature) => tracing::info!(
                target: "wolf_market::marketplace",
                %signature,
                instructions = plan.instructions.len(),
                "Transaction submitted"
            ),
            Err(err) => tracing::warn!(
                target: "wolf_market::marketplace",
                error = %err,
                "Transaction failed"
            ),
        }
        result
    }
}

/// NFTs held by the configured marketplace, sorted by name, with listing prices.
pub async fn discover_marketplace_listings(
    ctx: &MarketContext,
) -> Result<Vec<ListedNft>, MarketError> {
    MarketplaceClient::new(ctx.clone()).discover_listings().await
}
