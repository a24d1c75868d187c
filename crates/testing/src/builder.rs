use solana_program::pubkey::Pubkey;

const METADATA_V1: u8 = 4;
const MAX_NAME_LENGTH: usize = 32;
const MAX_SYMBOL_LENGTH: usize = 10;
const MAX_URI_LENGTH: usize = 200;

/// Encodes `MetadataV1` account bytes the way the token-metadata program writes them.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    key: u8,
    update_authority: Pubkey,
    mint: Pubkey,
    name: String,
    symbol: String,
    uri: String,
    seller_fee_basis_points: u16,
    creators: Option<Vec<(Pubkey, bool, u8)>>,
    primary_sale_happened: bool,
    is_mutable: bool,
    padded: bool,
    trailing: Vec<u8>,
}

impl MetadataBuilder {
    pub fn new(mint: Pubkey) -> Self {
        Self {
            key: METADATA_V1,
            update_authority: Pubkey::new_from_array([1u8; 32]),
            mint,
            name: String::new(),
            symbol: String::new(),
            uri: String::new(),
            seller_fee_basis_points: 0,
            creators: None,
            primary_sale_happened: false,
            is_mutable: true,
            padded: true,
            trailing: Vec::new(),
        }
    }

    pub fn key(mut self, key: u8) -> Self {
        self.key = key;
        self
    }

    pub fn update_authority(mut self, authority: Pubkey) -> Self {
        self.update_authority = authority;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = uri.to_string();
        self
    }

    pub fn seller_fee_basis_points(mut self, bps: u16) -> Self {
        self.seller_fee_basis_points = bps;
        self
    }

    pub fn creator(mut self, address: Pubkey, verified: bool, share: u8) -> Self {
        self.creators
            .get_or_insert_with(Vec::new)
            .push((address, verified, share));
        self
    }

    /// Present but empty creators list.
    pub fn no_creators(mut self) -> Self {
        self.creators = Some(Vec::new());
        self
    }

    pub fn primary_sale_happened(mut self, value: bool) -> Self {
        self.primary_sale_happened = value;
        self
    }

    pub fn is_mutable(mut self, value: bool) -> Self {
        self.is_mutable = value;
        self
    }

    /// Write strings without the program's fixed-width NUL padding.
    pub fn unpadded(mut self) -> Self {
        self.padded = false;
        self
    }

    /// Extra bytes after the decoded prefix (edition nonce, token standard, ...).
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing = bytes.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![self.key];
        out.extend_from_slice(self.update_authority.as_ref());
        out.extend_from_slice(self.mint.as_ref());
        self.push_string(&mut out, &self.name, MAX_NAME_LENGTH);
        self.push_string(&mut out, &self.symbol, MAX_SYMBOL_LENGTH);
        self.push_string(&mut out, &self.uri, MAX_URI_LENGTH);
        out.extend_from_slice(&self.seller_fee_basis_points.to_le_bytes());
        match &self.creators {
            None => out.push(0),
            Some(creators) => {
                out.push(1);
                out.extend_from_slice(&(creators.len() as u32).to_le_bytes());
                for (address, verified, share) in creators {
                    out.extend_from_slice(address.as_ref());
                    out.push(u8::from(*verified));
                    out.push(*share);
                }
            }
        }
        out.push(u8::from(self.primary_sale_happened));
        out.push(u8::from(self.is_mutable));
        out.extend_from_slice(&self.trailing);
        out
    }

    fn push_string(&self, out: &mut Vec<u8>, value: &str, width: usize) {
        let mut bytes = value.as_bytes().to_vec();
        if self.padded && bytes.len() < width {
            bytes.resize(width, 0);
        }
        out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&bytes);
    }
}
