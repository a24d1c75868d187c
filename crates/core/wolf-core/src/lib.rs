//! Core seams for the Wolf marketplace client.
//!
//! The marketplace client never talks to the network directly: it reads chain state
//! through a [`Ledger`] and hands finished messages to a [`TransactionSubmitter`]
//! (usually a wallet). Both are injected, so any number of independent clients can run
//! side by side.

mod error;
mod ledger;
mod types;

pub use error::{LedgerError, SubmitError};
pub use ledger::{Ledger, TransactionSubmitter};
pub use types::{TokenAccount, TokenBalance};
