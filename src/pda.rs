//! Program-derived addresses used by the marketplace.
//!
//! Derivation panics only if no bump seed yields an off-curve address, which cannot
//! happen for these fixed seed shapes.

use solana_program::pubkey::Pubkey;

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, LISTING_SEED, MARKETPLACE_SEED, METADATA_PROGRAM_ID,
    METADATA_SEED, TOKEN_PROGRAM_ID, VAULT_SEED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramAddress {
    pub address: Pubkey,
    pub bump: u8,
}

fn find(seeds: &[&[u8]], program_id: &Pubkey) -> ProgramAddress {
    let (address, bump) = Pubkey::find_program_address(seeds, program_id);
    ProgramAddress { address, bump }
}

/// Token-metadata account for `mint`: seeds `["metadata", metadata_program, mint]`.
pub fn metadata_address(mint: &Pubkey) -> ProgramAddress {
    find(
        &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
}

/// Reward-token vault: seeds `["vault", reward_mint]`.
pub fn vault_address(program_id: &Pubkey, reward_mint: &Pubkey) -> ProgramAddress {
    find(&[VAULT_SEED, reward_mint.as_ref()], program_id)
}

/// Marketplace state and NFT custody authority: seeds `["marketplace", authority]`.
pub fn marketplace_address(program_id: &Pubkey, authority: &Pubkey) -> ProgramAddress {
    find(&[MARKETPLACE_SEED, authority.as_ref()], program_id)
}

/// Listing record for an NFT: seeds `["listing", mint]`.
pub fn listing_address(program_id: &Pubkey, mint: &Pubkey) -> ProgramAddress {
    find(&[LISTING_SEED, mint.as_ref()], program_id)
}

/// Associated token account of `owner` for `mint`. `owner` may itself be a PDA.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    find(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .address
}
