use anchor_lang::prelude::*;

use crate::constants::{INVESTOR_LEDGER_SEED, VESTING_STATE_SEED};
use crate::engine::release::releasable_now;
use crate::state::{InvestorLedger, VestingState};

/// Read-only quote of what `investor` could release right now.
pub fn releasable_amount(ctx: Context<ReleasableAmount>, investor: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let releasable = releasable_now(
        &ctx.accounts.vesting_state,
        &*ctx.accounts.investor_ledger.load()?,
        &investor,
        now,
    )?;

    emit!(ReleasableQuote {
        investor,
        releasable,
        timestamp: now,
    });

    Ok(releasable)
}

/// Read-only view of an investor's grant record.
pub fn grant_of(ctx: Context<ReleasableAmount>, investor: Pubkey) -> Result<crate::state::Grant> {
    let ledger = ctx.accounts.investor_ledger.load()?;
    ledger.active_grant(&investor)
}

#[derive(Accounts)]
pub struct ReleasableAmount<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        seeds = [INVESTOR_LEDGER_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub investor_ledger: AccountLoader<'info, InvestorLedger>,
}

#[event]
pub struct ReleasableQuote {
    pub investor: Pubkey,
    pub releasable: u64,
    pub timestamp: i64,
}
