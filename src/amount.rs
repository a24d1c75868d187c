//! Token amounts in base units.
//!
//! User input is parsed from decimal strings exactly once, here, into base units. No
//! floating point is involved, so `"0.1"` with 9 decimals is exactly `100_000_000`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid amount '{0}'")]
    Invalid(String),
    #[error("amount '{value}' has more than {decimals} decimal places")]
    TooPrecise { value: String, decimals: u8 },
    #[error("amount '{0}' does not fit in 64 bits")]
    Overflow(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount {
    base_units: u64,
    decimals: u8,
}

impl TokenAmount {
    pub const fn from_base_units(base_units: u64, decimals: u8) -> Self {
        Self {
            base_units,
            decimals,
        }
    }

    /// Parse a non-negative decimal such as `"12"`, `"0.5"` or `".25"`.
    pub fn parse_ui(value: &str, decimals: u8) -> Result<Self, AmountError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AmountError::Empty);
        }
        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(AmountError::Invalid(value.to_string()));
        }
        if fraction.len() > usize::from(decimals) {
            return Err(AmountError::TooPrecise {
                value: value.to_string(),
                decimals,
            });
        }

        let overflow = || AmountError::Overflow(value.to_string());
        let scale = 10u64.checked_pow(u32::from(decimals)).ok_or_else(overflow)?;
        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let fraction_units: u64 = if fraction.is_empty() {
            0
        } else {
            let padding = u32::from(decimals) - fraction.len() as u32;
            fraction
                .parse::<u64>()
                .map_err(|_| overflow())?
                .checked_mul(10u64.pow(padding))
                .ok_or_else(overflow)?
        };
        let base_units = whole
            .checked_mul(scale)
            .and_then(|units| units.checked_add(fraction_units))
            .ok_or_else(overflow)?;
        Ok(Self::from_base_units(base_units, decimals))
    }

    pub fn base_units(&self) -> u64 {
        self.base_units
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.base_units);
        }
        let scale = 10u128.pow(u32::from(self.decimals));
        let units = u128::from(self.base_units);
        let whole = units / scale;
        let fraction = units % scale;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{fraction:0width$}", width = usize::from(self.decimals));
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}
