//! Static field-layout tables and the generic routine that walks them.
//!
//! A layout is an ordered list of `(name, encoding)` pairs. [`decode`] consumes one
//! layout from an [`AccountReader`] and yields a [`Record`] whose typed accessors check
//! both field name and shape, so a record type can only be built from the table it was
//! declared against.

use std::collections::VecDeque;

use solana_program::pubkey::{Pubkey, PUBKEY_BYTES};

use crate::{AccountReader, DecodeError, MetadataKey};

/// Wire encoding of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    U8,
    U16,
    U64,
    /// Single byte restricted to `0`/`1`.
    Bool,
    /// 32 raw bytes.
    Pubkey,
    /// `u32` length prefix then UTF-8 bytes.
    String,
    /// Metadata key byte that must equal the given variant.
    Key(MetadataKey),
    /// Nested layout, encoded inline.
    Struct(&'static [Field]),
    /// Option tag (`0`/`1`) then, when present, a `u32` count of nested records.
    OptionVec(&'static [Field]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub encoding: Encoding,
}

const fn field(name: &'static str, encoding: Encoding) -> Field {
    Field { name, encoding }
}

pub const CREATOR: &[Field] = &[
    field("address", Encoding::Pubkey),
    field("verified", Encoding::Bool),
    field("share", Encoding::U8),
];

pub const METADATA_BODY: &[Field] = &[
    field("name", Encoding::String),
    field("symbol", Encoding::String),
    field("uri", Encoding::String),
    field("seller_fee_basis_points", Encoding::U16),
    field("creators", Encoding::OptionVec(CREATOR)),
];

/// Prefix of a `MetadataV1` account. Later fields (edition nonce, collection, ...) are
/// left unread.
pub const METADATA_V1: &[Field] = &[
    field("key", Encoding::Key(MetadataKey::MetadataV1)),
    field("update_authority", Encoding::Pubkey),
    field("mint", Encoding::Pubkey),
    field("data", Encoding::Struct(METADATA_BODY)),
    field("primary_sale_happened", Encoding::Bool),
    field("is_mutable", Encoding::Bool),
];

/// Smallest number of bytes a layout can occupy.
pub fn min_encoded_len(fields: &[Field]) -> usize {
    fields
        .iter()
        .map(|f| match f.encoding {
            Encoding::U8 | Encoding::Bool | Encoding::Key(_) | Encoding::OptionVec(_) => 1,
            Encoding::U16 => 2,
            Encoding::U64 => 8,
            Encoding::Pubkey => PUBKEY_BYTES,
            Encoding::String => 4,
            Encoding::Struct(inner) => min_encoded_len(inner),
        })
        .sum()
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U64(u64),
    Bool(bool),
    Pubkey(Pubkey),
    String(String),
    Key(MetadataKey),
    Struct(Record),
    OptionVec(Option<Vec<Record>>),
}

/// Decoded values in layout order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    entries: VecDeque<(&'static str, Value)>,
}

/// Decode `fields` from the reader's current position.
pub fn decode(reader: &mut AccountReader<'_>, fields: &'static [Field]) -> Result<Record, DecodeError> {
    let mut entries = VecDeque::with_capacity(fields.len());
    for f in fields {
        let value = match f.encoding {
            Encoding::U8 => Value::U8(reader.read_u8()?),
            Encoding::U16 => Value::U16(reader.read_u16()?),
            Encoding::U64 => Value::U64(reader.read_u64()?),
            Encoding::Bool => Value::Bool(reader.read_bool()?),
            Encoding::Pubkey => Value::Pubkey(reader.read_pubkey()?),
            Encoding::String => Value::String(reader.read_string()?),
            Encoding::Key(expected) => Value::Key(read_key(reader, expected)?),
            Encoding::Struct(inner) => Value::Struct(decode(reader, inner)?),
            Encoding::OptionVec(inner) => {
                if reader.read_option_tag()? {
                    let count = reader.read_seq_len(min_encoded_len(inner))?;
                    let mut items = Vec::with_capacity(count);
                    for _ in 0..count {
                        items.push(decode(reader, inner)?);
                    }
                    Value::OptionVec(Some(items))
                } else {
                    Value::OptionVec(None)
                }
            }
        };
        entries.push_back((f.name, value));
    }
    Ok(Record { entries })
}

fn read_key(reader: &mut AccountReader<'_>, expected: MetadataKey) -> Result<MetadataKey, DecodeError> {
    let offset = reader.position();
    let value = reader.read_u8()?;
    let found =
        MetadataKey::try_from(value).map_err(|_| DecodeError::UnknownKey { offset, value })?;
    if found != expected {
        return Err(DecodeError::UnexpectedKey {
            offset,
            expected,
            found,
        });
    }
    Ok(found)
}

macro_rules! accessor {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(&mut self, field: &'static str) -> Result<$ty, DecodeError> {
            match self.take(field)? {
                Value::$variant(v) => Ok(v),
                _ => Err(DecodeError::SchemaMismatch { field }),
            }
        }
    };
}

impl Record {
    /// Pops the next entry, which must be named `field`.
    fn take(&mut self, field: &'static str) -> Result<Value, DecodeError> {
        match self.entries.pop_front() {
            Some((name, value)) if name == field => Ok(value),
            Some(entry) => {
                self.entries.push_front(entry);
                Err(DecodeError::SchemaMismatch { field })
            }
            None => Err(DecodeError::SchemaMismatch { field }),
        }
    }

    accessor!(u8, U8, u8);
    accessor!(u16, U16, u16);
    accessor!(u64, U64, u64);
    accessor!(bool, Bool, bool);
    accessor!(pubkey, Pubkey, Pubkey);
    accessor!(string, String, String);
    accessor!(key, Key, MetadataKey);
    accessor!(record, Struct, Record);
    accessor!(records, OptionVec, Option<Vec<Record>>);

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
