use crate::MetadataKey;

/// Failure while decoding an account buffer.
///
/// Every variant that originates from the byte stream carries the offset at which the
/// mismatch was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("invalid boolean byte {value:#04x} at offset {offset}")]
    InvalidBool { offset: usize, value: u8 },
    #[error("invalid option tag {value} at offset {offset}")]
    InvalidOptionTag { offset: usize, value: u8 },
    #[error("string at offset {offset} claims {len} bytes but only {available} remain")]
    StringOverflow {
        offset: usize,
        len: usize,
        available: usize,
    },
    #[error("sequence at offset {offset} claims {count} items but only {available} bytes remain")]
    SequenceOverflow {
        offset: usize,
        count: usize,
        available: usize,
    },
    #[error("string at offset {offset} is not valid utf-8")]
    InvalidUtf8 { offset: usize },
    #[error("unknown metadata key {value} at offset {offset}")]
    UnknownKey { offset: usize, value: u8 },
    #[error("expected {expected:?} account at offset {offset}, found {found:?}")]
    UnexpectedKey {
        offset: usize,
        expected: MetadataKey,
        found: MetadataKey,
    },
    #[error("account discriminator mismatch at offset {offset}")]
    DiscriminatorMismatch { offset: usize },
    #[error("layout field `{field}` does not match the record shape")]
    SchemaMismatch { field: &'static str },
}

impl DecodeError {
    /// Byte offset of the mismatch, if the error came from the byte stream.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEof { offset, .. }
            | Self::InvalidBool { offset, .. }
            | Self::InvalidOptionTag { offset, .. }
            | Self::StringOverflow { offset, .. }
            | Self::SequenceOverflow { offset, .. }
            | Self::InvalidUtf8 { offset }
            | Self::UnknownKey { offset, .. }
            | Self::UnexpectedKey { offset, .. }
            | Self::DiscriminatorMismatch { offset } => Some(*offset),
            Self::SchemaMismatch { .. } => None,
        }
    }
}
