use std::sync::Arc;

use solana_program::pubkey::Pubkey;
use wolf_core::Ledger;

use crate::config::MarketConfig;

/// Everything an operation needs: configuration, a ledger handle and the optional
/// connected signer. Cheap to clone; independent contexts share nothing.
#[derive(Clone)]
pub struct MarketContext {
    config: MarketConfig,
    ledger: Arc<dyn Ledger>,
    signer: Option<Pubkey>,
}

impl MarketContext {
    pub fn new(config: MarketConfig, ledger: Arc<dyn Ledger>) -> Self {
        Self {
            config,
            ledger,
            signer: None,
        }
    }

    pub fn with_signer(mut self, signer: Pubkey) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    pub fn signer(&self) -> Option<Pubkey> {
        self.signer
    }
}
