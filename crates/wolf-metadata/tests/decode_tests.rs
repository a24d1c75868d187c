use solana_program::pubkey::Pubkey;
use wolf_metadata::{decode_metadata, Creator, DecodeError, MetadataKey};
use wolf_test_utils::MetadataBuilder;

fn compact(mint: Pubkey) -> MetadataBuilder {
    // key(1) + authority(32) + mint(32) = 65, then:
    // name len @65 "Wolf" @69, symbol len @73 "W" @77, uri len @78 "u" @82,
    // fee @83, creators tag @85, primary sale @86, is mutable @87
    MetadataBuilder::new(mint)
        .name("Wolf")
        .symbol("W")
        .uri("u")
        .unpadded()
}

#[test]
fn test_decode_padded_metadata() {
    let mint = Pubkey::new_unique();
    let authority = Pubkey::new_unique();
    let creator = Pubkey::new_unique();
    let data = MetadataBuilder::new(mint)
        .update_authority(authority)
        .name("Wolf #1")
        .symbol("WOLF")
        .uri("https://arweave.net/wolf1.json")
        .seller_fee_basis_points(500)
        .creator(creator, true, 100)
        .primary_sale_happened(true)
        .is_mutable(false)
        .build();

    let metadata = decode_metadata(&data).unwrap();
    assert_eq!(metadata.key, MetadataKey::MetadataV1);
    assert_eq!(metadata.update_authority, authority);
    assert_eq!(metadata.mint, mint);
    assert_eq!(metadata.data.name, "Wolf #1");
    assert_eq!(metadata.data.symbol, "WOLF");
    assert_eq!(metadata.data.uri, "https://arweave.net/wolf1.json");
    assert_eq!(metadata.data.seller_fee_basis_points, 500);
    assert_eq!(
        metadata.data.creators,
        Some(vec![Creator {
            address: creator,
            verified: true,
            share: 100
        }])
    );
    assert!(metadata.primary_sale_happened);
    assert!(!metadata.is_mutable);
}

#[test]
fn test_unpadded_strings_are_unchanged() {
    let metadata = decode_metadata(&compact(Pubkey::new_unique()).build()).unwrap();
    assert_eq!(metadata.name(), "Wolf");
    assert_eq!(metadata.data.symbol, "W");
    assert_eq!(metadata.data.uri, "u");
    assert_eq!(metadata.data.creators, None);
}

#[test]
fn test_present_but_empty_creators() {
    let data = compact(Pubkey::new_unique()).no_creators().build();
    let metadata = decode_metadata(&data).unwrap();
    assert_eq!(metadata.data.creators, Some(Vec::new()));
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let mint = Pubkey::new_unique();
    let plain = decode_metadata(&compact(mint).build()).unwrap();
    // edition nonce option + token standard + junk
    let extended = decode_metadata(&compact(mint).trailing(&[1, 254, 0, 0xde, 0xad]).build()).unwrap();
    assert_eq!(plain, extended);
}

#[test]
fn test_every_truncation_fails() {
    let data = compact(Pubkey::new_unique()).build();
    assert_eq!(data.len(), 88);
    for len in 0..data.len() {
        assert!(
            decode_metadata(&data[..len]).is_err(),
            "prefix of {len} bytes decoded"
        );
    }
}

#[test]
fn test_short_buffers_fail_with_eof() {
    for len in [0usize, 1, 33, 65] {
        let data = vec![4u8; len];
        match decode_metadata(&data) {
            Err(DecodeError::UnexpectedEof { offset, .. }) => assert!(offset <= len),
            other => panic!("unexpected result for {len} bytes: {other:?}"),
        }
    }
}

#[test]
fn test_invalid_option_tag() {
    let mut data = compact(Pubkey::new_unique()).build();
    data[85] = 2;
    assert_eq!(
        decode_metadata(&data),
        Err(DecodeError::InvalidOptionTag {
            offset: 85,
            value: 2
        })
    );
}

#[test]
fn test_invalid_bool() {
    let mut data = compact(Pubkey::new_unique()).build();
    data[86] = 7;
    let err = decode_metadata(&data).unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidBool {
            offset: 86,
            value: 7
        }
    );
    assert_eq!(err.offset(), Some(86));
}

#[test]
fn test_string_length_beyond_buffer() {
    let mut data = compact(Pubkey::new_unique()).build();
    data[65..69].copy_from_slice(&1_000u32.to_le_bytes());
    assert_eq!(
        decode_metadata(&data),
        Err(DecodeError::StringOverflow {
            offset: 65,
            len: 1_000,
            available: 88 - 69
        })
    );
}

#[test]
fn test_invalid_utf8() {
    let mut data = compact(Pubkey::new_unique()).build();
    data[69] = 0xff;
    assert_eq!(
        decode_metadata(&data),
        Err(DecodeError::InvalidUtf8 { offset: 65 })
    );
}

#[test]
fn test_creator_count_beyond_buffer() {
    let data = compact(Pubkey::new_unique())
        .creator(Pubkey::new_unique(), false, 50)
        .build();
    let mut data = data;
    // creators tag @85, count @86
    data[86..90].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(
        decode_metadata(&data),
        Err(DecodeError::SequenceOverflow { offset: 86, .. })
    ));
}

#[test]
fn test_other_account_kinds_are_rejected() {
    let data = compact(Pubkey::new_unique())
        .key(MetadataKey::MasterEditionV2.into())
        .build();
    assert_eq!(
        decode_metadata(&data),
        Err(DecodeError::UnexpectedKey {
            offset: 0,
            expected: MetadataKey::MetadataV1,
            found: MetadataKey::MasterEditionV2
        })
    );

    let data = compact(Pubkey::new_unique()).key(99).build();
    assert_eq!(
        decode_metadata(&data),
        Err(DecodeError::UnknownKey {
            offset: 0,
            value: 99
        })
    );
}
