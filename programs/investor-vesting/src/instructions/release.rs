use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{INVESTOR_LEDGER_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::engine::{self, VaultCustody};
use crate::error::VestingError;
use crate::state::{InvestorLedger, VestingState};

/// Releases everything currently unlocked to the signing investor.
pub fn release(ctx: Context<Release>) -> Result<()> {
    // Capture AccountInfos before taking mutable borrows of the state.
    let mut custody = VaultCustody {
        vault: ctx.accounts.vault.to_account_info(),
        balance: ctx.accounts.vault.amount,
        destination: ctx.accounts.investor_token_account.to_account_info(),
        destination_owner: ctx.accounts.investor_token_account.owner,
        authority: ctx.accounts.vesting_state.to_account_info(),
        authority_bump: ctx.accounts.vesting_state.bump,
        token_program: ctx.accounts.token_program.to_account_info(),
    };
    let investor = ctx.accounts.investor.key();
    let now = Clock::get()?.unix_timestamp;

    let released = engine::release::release(
        &mut ctx.accounts.vesting_state,
        &mut *ctx.accounts.investor_ledger.load_mut()?,
        &mut custody,
        investor,
        now,
    )?;

    emit!(TokensReleased {
        investor,
        amount: released.amount,
        received: released.grant.received,
        promised: released.grant.promised,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Release<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [INVESTOR_LEDGER_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub investor_ledger: AccountLoader<'info, InvestorLedger>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump = vesting_state.vault_bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = investor_token_account.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
        constraint = investor_token_account.owner == investor.key() @ VestingError::InvalidTokenAccount,
    )]
    pub investor_token_account: Account<'info, TokenAccount>,

    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensReleased {
    pub investor: Pubkey,
    pub amount: u64,
    pub received: u64,
    pub promised: u64,
}
