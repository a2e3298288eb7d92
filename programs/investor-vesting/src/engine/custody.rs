use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::VESTING_STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;

/// The token ledger holding the vested asset on the program's behalf.
///
/// `transfer` is all-or-nothing: it either moves `amount` to `to` or fails
/// without effect.
pub trait Custody {
    fn balance(&self) -> u64;
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// SPL Token vault owned by the vesting state PDA.
pub struct VaultCustody<'info> {
    pub vault: AccountInfo<'info>,
    /// Vault balance as loaded at instruction start.
    pub balance: u64,
    /// Token account credited by `transfer`.
    pub destination: AccountInfo<'info>,
    /// Owner of `destination`; the only `to` this custody pays.
    pub destination_owner: Pubkey,
    /// Vesting state PDA (vault authority).
    pub authority: AccountInfo<'info>,
    pub authority_bump: u8,
    pub token_program: AccountInfo<'info>,
}

impl<'info> Custody for VaultCustody<'info> {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        check_recipient(&self.destination_owner, to)?;
        let bump = [self.authority_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[VESTING_STATE_SEED, &bump]];
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: self.destination.clone(),
                    authority: self.authority.clone(),
                },
                signer_seeds,
            ),
            amount,
        )?;
        msg!("transferred {} to {}", amount, to);
        self.balance = self.balance.saturating_sub(amount);
        Ok(())
    }
}

/// `to` must own the token account being credited.
pub fn check_recipient(destination_owner: &Pubkey, to: &Pubkey) -> Result<()> {
    require_keys_eq!(*to, *destination_owner, VestingError::InvalidTokenAccount);
    Ok(())
}

/// Sends unreserved custody (balance above `total_vested`) to `to`.
pub fn withdraw_surplus<C: Custody>(
    state: &VestingState,
    custody: &mut C,
    to: &Pubkey,
    amount: u64,
) -> Result<u64> {
    require_gt!(amount, 0, VestingError::ZeroAmount);
    let available = state.available_custody(custody.balance());
    require_gte!(available, amount, VestingError::FundsInsufficient);
    custody.transfer(to, amount)?;
    Ok(available - amount)
}
