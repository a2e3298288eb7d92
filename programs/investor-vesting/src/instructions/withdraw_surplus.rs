use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{VAULT_SEED, VESTING_STATE_SEED};
use crate::engine::{self, VaultCustody};
use crate::error::VestingError;
use crate::state::VestingState;

/// Returns custody not reserved by any grant to the admin.
pub fn withdraw_surplus(ctx: Context<WithdrawSurplus>, amount: u64) -> Result<()> {
    let st = &ctx.accounts.vesting_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, VestingError::UnauthorizedAdmin);
    require_keys_eq!(
        ctx.accounts.admin_destination.owner,
        ctx.accounts.admin.key(),
        VestingError::InvalidTokenAccount
    );

    let mut custody = VaultCustody {
        vault: ctx.accounts.vault.to_account_info(),
        balance: ctx.accounts.vault.amount,
        destination: ctx.accounts.admin_destination.to_account_info(),
        destination_owner: ctx.accounts.admin_destination.owner,
        authority: st.to_account_info(),
        authority_bump: st.bump,
        token_program: ctx.accounts.token_program.to_account_info(),
    };
    let remaining = engine::withdraw_surplus(st, &mut custody, &st.admin, amount)?;

    emit!(SurplusWithdrawn {
        admin: st.admin,
        amount,
        remaining_surplus: remaining,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawSurplus<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump = vesting_state.vault_bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = admin_destination.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub admin_destination: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct SurplusWithdrawn {
    pub admin: Pubkey,
    pub amount: u64,
    pub remaining_surplus: u64,
}
