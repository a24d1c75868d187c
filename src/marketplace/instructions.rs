//! Instruction encoders for the marketplace program.
//!
//! Account order and writable/signer flags follow the program's IDL. Data is the 8-byte
//! instruction discriminator followed by the little-endian arguments.

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::{system_program, sysvar};

use super::instruction_discriminator;
use crate::constants::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::pda::{associated_token_address, ProgramAddress};

struct InstructionData(Vec<u8>);

impl InstructionData {
    fn new(name: &str) -> Self {
        Self(instruction_discriminator(name).to_vec())
    }

    fn u8(mut self, value: u8) -> Self {
        self.0.push(value);
        self
    }

    fn u64(mut self, value: u64) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }
}

/// Creates the reward vault and the marketplace account of `authority`.
pub fn initialize(
    program_id: &Pubkey,
    vault: &ProgramAddress,
    marketplace: &ProgramAddress,
    authority: &Pubkey,
    reward_mint: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(vault.address, false),
            AccountMeta::new(marketplace.address, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(*reward_mint, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data: InstructionData::new("initialize")
            .u8(vault.bump)
            .u8(marketplace.bump)
            .0,
    }
}

fn vault_transfer(
    name: &str,
    program_id: &Pubkey,
    vault: &ProgramAddress,
    token_account: &Pubkey,
    user: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(vault.address, false),
            AccountMeta::new(*token_account, false),
            AccountMeta::new_readonly(*user, true),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: InstructionData::new(name).u8(vault.bump).u64(amount).0,
    }
}

/// Moves `amount` base units from `token_account` into the vault.
pub fn deposit(
    program_id: &Pubkey,
    vault: &ProgramAddress,
    token_account: &Pubkey,
    user: &Pubkey,
    amount: u64,
) -> Instruction {
    vault_transfer("deposit", program_id, vault, token_account, user, amount)
}

/// Moves `amount` base units from the vault into `token_account`.
pub fn withdraw(
    program_id: &Pubkey,
    vault: &ProgramAddress,
    token_account: &Pubkey,
    user: &Pubkey,
    amount: u64,
) -> Instruction {
    vault_transfer("withdraw", program_id, vault, token_account, user, amount)
}

pub fn add_listing(
    program_id: &Pubkey,
    marketplace: &ProgramAddress,
    listing: &ProgramAddress,
    nft_vault: &Pubkey,
    nft_user: &Pubkey,
    authority: &Pubkey,
    mint: &Pubkey,
    price: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(marketplace.address, false),
            AccountMeta::new(listing.address, false),
            AccountMeta::new(*nft_vault, false),
            AccountMeta::new(*nft_user, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: InstructionData::new("add_listing")
            .u8(marketplace.bump)
            .u8(listing.bump)
            .u64(price)
            .0,
    }
}

pub fn buy(
    program_id: &Pubkey,
    vault: &ProgramAddress,
    marketplace: &ProgramAddress,
    listing: &ProgramAddress,
    nft_vault: &Pubkey,
    nft_user: &Pubkey,
    reward_user: &Pubkey,
    authority: &Pubkey,
    mint: &Pubkey,
    price: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(vault.address, false),
            AccountMeta::new(marketplace.address, false),
            AccountMeta::new(listing.address, false),
            AccountMeta::new(*nft_vault, false),
            AccountMeta::new(*nft_user, false),
            AccountMeta::new(*reward_user, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: InstructionData::new("buy")
            .u8(vault.bump)
            .u8(marketplace.bump)
            .u8(listing.bump)
            .u64(price)
            .0,
    }
}

/// Creates the associated token account of `owner` for `mint`, paid by `payer`.
pub fn create_associated_token_account(payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(associated_token_address(owner, mint), false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: Vec::new(),
    }
}
