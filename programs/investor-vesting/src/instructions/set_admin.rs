use anchor_lang::prelude::*;

use crate::constants::VESTING_STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;

/// Hands ownership to `new_admin`.
pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
    let vesting_state_key = ctx.accounts.vesting_state.key();
    let st = &mut ctx.accounts.vesting_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, VestingError::UnauthorizedAdmin);

    // A program-owned admin could never sign again.
    if st.program_keys(vesting_state_key).is_invalid_beneficiary(&new_admin) {
        return err!(VestingError::InvalidAddress);
    }

    let old_admin = st.admin;
    st.admin = new_admin;

    emit!(AdminTransferred {
        old_admin,
        new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetAdmin<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    pub admin: Signer<'info>,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
