//! Decoder for Metaplex token-metadata accounts.
//!
//! The account layout is declared once as static field tables in [`layout`] and walked by
//! a generic bounds-checked reader. Only the `MetadataV1` prefix is decoded; trailing
//! fields written by newer program versions are ignored.
//!
//! ```rust,ignore
//! let metadata = wolf_metadata::decode_metadata(&account.data)?;
//! println!("{} ({})", metadata.data.name, metadata.mint);
//! ```

mod error;
pub mod layout;
mod reader;
mod record;

pub use error::DecodeError;
pub use reader::AccountReader;
pub use record::{Creator, Metadata, MetadataBody, MetadataKey};

/// Decode a `MetadataV1` account buffer, stripping NUL padding from name, symbol and uri.
pub fn decode_metadata(data: &[u8]) -> Result<Metadata, DecodeError> {
    Metadata::from_account_data(data)
}
