use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{INVESTOR_LEDGER_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::engine::enrollment::{self, Tier};
use crate::error::VestingError;
use crate::state::{InvestorLedger, VestingState};

/// Enrolls tier A (vesting from now) and tier B (vesting after
/// `extra_delay_b` seconds) in one all-or-nothing step.
pub fn enroll_batch(
    ctx: Context<EnrollBatch>,
    tier_a: Vec<Pubkey>,
    tier_b: Vec<Pubkey>,
    amounts_a: Vec<u64>,
    amounts_b: Vec<u64>,
    extra_delay_b: u64,
) -> Result<()> {
    let vesting_state_key = ctx.accounts.vesting_state.key();
    let custody_balance = ctx.accounts.vault.amount;

    let st = &mut ctx.accounts.vesting_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, VestingError::UnauthorizedAdmin);

    let now = Clock::get()?.unix_timestamp;
    let start_b = enrollment::delayed_start(now, extra_delay_b)?;
    let keys = st.program_keys(vesting_state_key);

    let total = enrollment::enroll_batch(
        st,
        &mut *ctx.accounts.investor_ledger.load_mut()?,
        &keys,
        custody_balance,
        Tier {
            wallets: &tier_a,
            amounts: &amounts_a,
            vesting_start: now,
        },
        Tier {
            wallets: &tier_b,
            amounts: &amounts_b,
            vesting_start: start_b,
        },
    )?;

    emit!(BatchEnrolled {
        count_a: tier_a.len() as u16,
        count_b: tier_b.len() as u16,
        start_a: now,
        start_b,
        promised_total: total,
        total_vested: st.total_vested,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EnrollBatch<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [INVESTOR_LEDGER_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub investor_ledger: AccountLoader<'info, InvestorLedger>,

    #[account(
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump = vesting_state.vault_bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,
}

#[event]
pub struct BatchEnrolled {
    pub count_a: u16,
    pub count_b: u16,
    pub start_a: i64,
    pub start_b: i64,
    pub promised_total: u64,
    pub total_vested: u64,
}
