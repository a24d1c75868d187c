//! Typed Metaplex metadata records.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use solana_program::pubkey::Pubkey;

use crate::layout::{self, Record};
use crate::{AccountReader, DecodeError};

/// Account kind tag written as the first byte of every token-metadata account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetadataKey {
    Uninitialized = 0,
    EditionV1 = 1,
    MasterEditionV1 = 2,
    ReservationListV1 = 3,
    MetadataV1 = 4,
    ReservationListV2 = 5,
    MasterEditionV2 = 6,
    EditionMarker = 7,
    UseAuthorityRecord = 8,
    CollectionAuthorityRecord = 9,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    /// Royalty share in percent. Shares are not checked to sum to 100.
    pub share: u8,
}

/// Mutable descriptive payload of an NFT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBody {
    pub name: String,
    pub symbol: String,
    /// Usually points to off-chain JSON.
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
}

/// Decoded `MetadataV1` account snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub key: MetadataKey,
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub data: MetadataBody,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
}

impl Metadata {
    /// Decode the `MetadataV1` prefix of an account buffer. Trailing bytes are ignored.
    pub fn from_account_data(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = AccountReader::new(data);
        let record = layout::decode(&mut reader, layout::METADATA_V1)?;
        Self::from_record(record)
    }

    fn from_record(mut record: Record) -> Result<Self, DecodeError> {
        let key = record.key("key")?;
        let update_authority = record.pubkey("update_authority")?;
        let mint = record.pubkey("mint")?;
        let data = MetadataBody::from_record(record.record("data")?)?;
        let primary_sale_happened = record.bool("primary_sale_happened")?;
        let is_mutable = record.bool("is_mutable")?;
        Ok(Self {
            key,
            update_authority,
            mint,
            data,
            primary_sale_happened,
            is_mutable,
        })
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }
}

impl MetadataBody {
    fn from_record(mut record: Record) -> Result<Self, DecodeError> {
        let name = strip_padding(record.string("name")?);
        let symbol = strip_padding(record.string("symbol")?);
        let uri = strip_padding(record.string("uri")?);
        let seller_fee_basis_points = record.u16("seller_fee_basis_points")?;
        let creators = record
            .records("creators")?
            .map(|items| {
                items
                    .into_iter()
                    .map(Creator::from_record)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Ok(Self {
            name,
            symbol,
            uri,
            seller_fee_basis_points,
            creators,
        })
    }
}

impl Creator {
    fn from_record(mut record: Record) -> Result<Self, DecodeError> {
        Ok(Self {
            address: record.pubkey("address")?,
            verified: record.bool("verified")?,
            share: record.u8("share")?,
        })
    }
}

/// On-chain strings live in fixed-capacity buffers padded with NUL bytes.
fn strip_padding(value: String) -> String {
    if value.contains('\0') {
        value.replace('\0', "")
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_padding() {
        assert_eq!(strip_padding("Wolf #1\0\0\0".to_string()), "Wolf #1");
        assert_eq!(strip_padding("plain".to_string()), "plain");
        assert_eq!(strip_padding("\0\0".to_string()), "");
    }

    #[test]
    fn test_metadata_key_conversion() {
        assert_eq!(MetadataKey::try_from(4u8).unwrap(), MetadataKey::MetadataV1);
        assert!(MetadataKey::try_from(42u8).is_err());
        assert_eq!(u8::from(MetadataKey::MasterEditionV2), 6);
    }
}
