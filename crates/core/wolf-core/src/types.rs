use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

/// A token-holding account as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccount {
    pub address: Pubkey,
    pub mint: Pubkey,
    /// Raw balance in base units, as the decimal string the ledger returns.
    pub amount: String,
}

impl TokenAccount {
    /// `true` only when the balance is exactly zero. Balances that fail to parse are
    /// treated as held.
    pub fn is_empty(&self) -> bool {
        matches!(self.amount.trim().parse::<u64>(), Ok(0))
    }
}

/// Token balance in base units with the mint's decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub amount: u64,
    pub decimals: u8,
}

impl TokenBalance {
    pub fn ui_amount(&self) -> f64 {
        self.amount as f64 / 10f64.powi(i32::from(self.decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(amount: &str) -> TokenAccount {
        TokenAccount {
            address: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_empty_balance() {
        assert!(account("0").is_empty());
        assert!(account("000").is_empty());
        assert!(!account("1").is_empty());
        assert!(!account("18446744073709551615").is_empty());
        assert!(!account("not-a-number").is_empty());
    }

    #[test]
    fn test_ui_amount() {
        let balance = TokenBalance {
            amount: 1_500_000_000,
            decimals: 9,
        };
        assert!((balance.ui_amount() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_balance_serde() {
        let balance = TokenBalance {
            amount: 42,
            decimals: 0,
        };
        let json = serde_json::to_string(&balance).unwrap();
        assert_eq!(json, r#"{"amount":42,"decimals":0}"#);
    }
}
