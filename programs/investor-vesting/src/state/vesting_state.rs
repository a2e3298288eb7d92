use anchor_lang::prelude::*;

use crate::constants::MAX_SCHEDULE_LEN;
use crate::error::VestingError;

/// Singleton vesting state PDA: schedule, accounting totals and release guard.
#[account]
pub struct VestingState {
    /// Owner principal allowed to enroll investors.
    pub admin: Pubkey,
    /// Vested token mint.
    pub mint: Pubkey,
    /// Custody token account (authority = this PDA).
    pub vault: Pubkey,
    /// Investor ledger PDA.
    pub ledger: Pubkey,
    /// Sum over all grants of `promised - received` (custody reserved for investors).
    pub total_vested: u64,
    /// Cumulative amount transferred out to investors.
    pub total_released: u64,
    /// Busy flag held for the duration of a release.
    pub locked: bool,
    pub bump: u8,
    pub vault_bump: u8,
    /// Basis points unlocked by each 30-day milestone; sums to 10_000.
    pub schedule: Vec<u16>,
}

impl VestingState {
    /// Space for discriminator + fixed fields + schedule vec.
    pub const fn space(schedule_len: usize) -> usize {
        8 +                    // discriminator
        32 +                   // admin
        32 +                   // mint
        32 +                   // vault
        32 +                   // ledger
        8 +                    // total_vested
        8 +                    // total_released
        1 +                    // locked
        1 +                    // bump
        1 +                    // vault_bump
        4 + 2 * schedule_len   // schedule
    }

    /// Allocation for an incoming schedule, capped so oversized input fails
    /// validation instead of allocation.
    pub fn space_for_schedule(schedule_len: usize) -> usize {
        Self::space(schedule_len.min(MAX_SCHEDULE_LEN))
    }

    /// Custody headroom: balance not yet reserved for any grant.
    pub fn available_custody(&self, custody_balance: u64) -> u64 {
        custody_balance.saturating_sub(self.total_vested)
    }

    /// Reserves `amount` of custody for newly enrolled grants.
    pub fn reserve(&mut self, amount: u64) -> Result<()> {
        self.total_vested = self
            .total_vested
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }

    /// Moves `amount` from vesting to released.
    pub fn settle(&mut self, amount: u64) -> Result<()> {
        let total_vested = self
            .total_vested
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;
        let total_released = self
            .total_released
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        self.total_vested = total_vested;
        self.total_released = total_released;
        Ok(())
    }

    /// Undoes a `settle` whose transfer did not go through.
    pub fn unsettle(&mut self, amount: u64) -> Result<()> {
        let total_released = self
            .total_released
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;
        let total_vested = self
            .total_vested
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        self.total_vested = total_vested;
        self.total_released = total_released;
        Ok(())
    }

    /// Program-owned addresses, given this account's own key.
    pub fn program_keys(&self, vesting_state: Pubkey) -> ProgramKeys {
        ProgramKeys {
            program: crate::ID,
            vesting_state,
            ledger: self.ledger,
            vault: self.vault,
        }
    }

    pub fn acquire_guard(&mut self) -> Result<()> {
        if self.locked {
            msg!("release rejected: guard already held");
            return err!(VestingError::ReentrantCall);
        }
        self.locked = true;
        Ok(())
    }

    pub fn release_guard(&mut self) {
        self.locked = false;
    }
}

/// Addresses owned by the program itself; none of them may hold a grant or
/// become admin, since custody sent there could never be recovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramKeys {
    pub program: Pubkey,
    pub vesting_state: Pubkey,
    pub ledger: Pubkey,
    pub vault: Pubkey,
}

impl ProgramKeys {
    pub fn contains(&self, key: &Pubkey) -> bool {
        [self.program, self.vesting_state, self.ledger, self.vault].contains(key)
    }

    /// Zero key or program-owned key.
    pub fn is_invalid_beneficiary(&self, key: &Pubkey) -> bool {
        *key == Pubkey::default() || self.contains(key)
    }
}
