//! Anchor accounts owned by the marketplace program.

use solana_program::pubkey::Pubkey;
use wolf_metadata::layout::{self, Encoding, Field};
use wolf_metadata::{AccountReader, DecodeError};

use super::account_discriminator;

const MARKETPLACE_ACCOUNT: &[Field] = &[
    Field {
        name: "authority",
        encoding: Encoding::Pubkey,
    },
    Field {
        name: "mint_authority",
        encoding: Encoding::Pubkey,
    },
];

const LISTING_ACCOUNT: &[Field] = &[Field {
    name: "price",
    encoding: Encoding::U64,
}];

/// Marketplace state at `["marketplace", admin]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketplaceAccount {
    /// Only this key may add listings.
    pub authority: Pubkey,
    pub mint_authority: Pubkey,
}

impl MarketplaceAccount {
    pub const NAME: &'static str = "MarketplaceAccount";

    pub fn from_account_data(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = AccountReader::new(data);
        reader.expect_discriminator(&account_discriminator(Self::NAME))?;
        let mut record = layout::decode(&mut reader, MARKETPLACE_ACCOUNT)?;
        Ok(Self {
            authority: record.pubkey("authority")?,
            mint_authority: record.pubkey("mint_authority")?,
        })
    }
}

/// Listing record at `["listing", mint]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingAccount {
    /// Price in reward-token base units.
    pub price: u64,
}

impl ListingAccount {
    pub const NAME: &'static str = "ListingAccount";

    pub fn from_account_data(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = AccountReader::new(data);
        reader.expect_discriminator(&account_discriminator(Self::NAME))?;
        let mut record = layout::decode(&mut reader, LISTING_ACCOUNT)?;
        Ok(Self {
            price: record.u64("price")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(name: &str, body: &[u8]) -> Vec<u8> {
        let mut data = account_discriminator(name).to_vec();
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_decode_marketplace_account() {
        let authority = Pubkey::new_unique();
        let mint_authority = Pubkey::new_unique();
        let mut body = authority.to_bytes().to_vec();
        body.extend_from_slice(&mint_authority.to_bytes());

        let account =
            MarketplaceAccount::from_account_data(&encode("MarketplaceAccount", &body)).unwrap();
        assert_eq!(account.authority, authority);
        assert_eq!(account.mint_authority, mint_authority);
    }

    #[test]
    fn test_decode_listing_account_with_padding() {
        let mut body = 10_000_000_000u64.to_le_bytes().to_vec();
        body.extend_from_slice(&[0; 16]);
        let listing = ListingAccount::from_account_data(&encode("ListingAccount", &body)).unwrap();
        assert_eq!(listing.price, 10_000_000_000);
    }

    #[test]
    fn test_wrong_discriminator_is_rejected() {
        let data = encode("MarketplaceAccount", &7u64.to_le_bytes());
        assert_eq!(
            ListingAccount::from_account_data(&data),
            Err(DecodeError::DiscriminatorMismatch { offset: 0 })
        );
    }

    #[test]
    fn test_truncated_listing() {
        let data = encode("ListingAccount", &[1, 2, 3]);
        assert!(matches!(
            ListingAccount::from_account_data(&data),
            Err(DecodeError::UnexpectedEof { offset: 8, .. })
        ));
    }
}
