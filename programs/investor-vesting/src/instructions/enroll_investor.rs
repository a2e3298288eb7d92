use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{INVESTOR_LEDGER_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::engine::enrollment;
use crate::error::VestingError;
use crate::state::{InvestorLedger, VestingState};

pub fn enroll_investor(
    ctx: Context<EnrollInvestor>,
    investor: Pubkey,
    amount: u64,
    extra_delay: u64,
) -> Result<()> {
    let vesting_state_key = ctx.accounts.vesting_state.key();
    let custody_balance = ctx.accounts.vault.amount;

    let st = &mut ctx.accounts.vesting_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, VestingError::UnauthorizedAdmin);

    let now = Clock::get()?.unix_timestamp;
    let vesting_start = enrollment::delayed_start(now, extra_delay)?;
    let keys = st.program_keys(vesting_state_key);

    let grant = enrollment::enroll_investor(
        st,
        &mut *ctx.accounts.investor_ledger.load_mut()?,
        &keys,
        custody_balance,
        investor,
        amount,
        vesting_start,
    )?;

    emit!(InvestorEnrolled {
        investor,
        promised: grant.promised,
        vesting_start: grant.vesting_start,
        total_vested: st.total_vested,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EnrollInvestor<'info> {
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
pub struct InvestorEnrolled {
    pub investor: Pubkey,
    pub promised: u64,
    pub vesting_start: i64,
    pub total_vested: u64,
}
