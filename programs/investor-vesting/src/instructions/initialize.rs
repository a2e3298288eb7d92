use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{INVESTOR_LEDGER_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{InvestorLedger, VestingState};
use crate::utils::schedule::validate_schedule;

pub fn initialize(ctx: Context<Initialize>, schedule: Vec<u16>) -> Result<()> {
    validate_schedule(&schedule)?;
    require_keys_neq!(
        ctx.accounts.mint.key(),
        Pubkey::default(),
        VestingError::InvalidAddress
    );

    let st = &mut ctx.accounts.vesting_state;
    st.admin = ctx.accounts.admin.key();
    st.mint = ctx.accounts.mint.key();
    st.vault = ctx.accounts.vault.key();
    st.ledger = ctx.accounts.investor_ledger.key();
    st.total_vested = 0;
    st.total_released = 0;
    st.locked = false;
    st.bump = ctx.bumps.vesting_state;
    st.vault_bump = ctx.bumps.vault;
    st.schedule = schedule;

    // Zeroed slots; entries are appended in enrollment order.
    ctx.accounts.investor_ledger.load_init()?.count = 0;

    emit!(VestingInitialized {
        admin: st.admin,
        mint: st.mint,
        vault: st.vault,
        milestones: st.schedule.len() as u8,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(schedule: Vec<u16>)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = VestingState::space_for_schedule(schedule.len()),
        seeds = [VESTING_STATE_SEED],
        bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        init,
        payer = admin,
        space = InvestorLedger::SPACE,
        seeds = [INVESTOR_LEDGER_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub investor_ledger: AccountLoader<'info, InvestorLedger>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = vesting_state,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub milestones: u8,
}
