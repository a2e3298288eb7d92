use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::constants::MAX_INVESTORS;
use crate::error::VestingError;
use crate::state::ProgramKeys;

/// One investor's vesting record.
///
/// `promised` and `vesting_start` are fixed at enrollment; `received` only grows
/// and never exceeds `promised`.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable,
)]
#[repr(C)]
pub struct Grant {
    pub received: u64,
    pub promised: u64,
    pub vesting_start: i64,
}

impl Grant {
    pub fn is_active(&self) -> bool {
        self.promised > 0
    }

    pub fn is_fully_claimed(&self) -> bool {
        self.received >= self.promised
    }

    /// Amount still reserved for this grant.
    pub fn outstanding(&self) -> u64 {
        self.promised.saturating_sub(self.received)
    }
}

/// A ledger slot: the investor wallet and its grant.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable,
)]
#[repr(C)]
pub struct InvestorEntry {
    pub wallet: Pubkey,
    pub grant: Grant,
}

impl InvestorEntry {
    pub const SIZE: usize = core::mem::size_of::<InvestorEntry>();
}

/// PDA holding every enrolled investor in enrollment order (<= `MAX_INVESTORS`).
///
/// Zero-copy: instructions borrow the account data in place, so reading or
/// updating the ledger never touches the heap. Slots past `count` are zeroed.
#[account(zero_copy)]
pub struct InvestorLedger {
    pub count: u32,
    pub _padding: [u8; 4],
    pub entries: [InvestorEntry; MAX_INVESTORS],
}

impl InvestorLedger {
    /// Discriminator + fixed slot array. Small enough to be created by the
    /// `init` constraint in one system program call.
    pub const SPACE: usize = 8 + core::mem::size_of::<InvestorLedger>();

    /// Occupied slots in enrollment order.
    pub fn enrolled(&self) -> &[InvestorEntry] {
        &self.entries[..self.len()]
    }

    pub fn len(&self) -> usize {
        (self.count as usize).min(MAX_INVESTORS)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots still free for new grants.
    pub fn remaining_capacity(&self) -> usize {
        MAX_INVESTORS - self.len()
    }

    /// Enrolled wallets in enrollment order.
    pub fn investors(&self) -> impl Iterator<Item = &Pubkey> + '_ {
        self.enrolled().iter().map(|e| &e.wallet)
    }

    pub fn lookup(&self, wallet: &Pubkey) -> Option<&Grant> {
        self.enrolled()
            .iter()
            .find(|e| e.wallet == *wallet)
            .map(|e| &e.grant)
    }

    /// Grant of an investor holding `promised > 0`, else `NotInvestor`.
    pub fn active_grant(&self, wallet: &Pubkey) -> Result<Grant> {
        match self.lookup(wallet) {
            Some(grant) if grant.is_active() => Ok(*grant),
            _ => {
                msg!("no grant for {}", wallet);
                err!(VestingError::NotInvestor)
            }
        }
    }

    /// Checks that `wallet` may receive a new grant of `promised`.
    pub fn check_enrollable(&self, wallet: &Pubkey, promised: u64, keys: &ProgramKeys) -> Result<()> {
        if keys.is_invalid_beneficiary(wallet) {
            return Err(error!(VestingError::InvalidAddress).with_values((wallet, promised)));
        }
        require_gt!(promised, 0, VestingError::ZeroAmount);
        if let Some(existing) = self.lookup(wallet).filter(|g| g.is_active()) {
            return Err(error!(VestingError::AlreadyEnrolled).with_values((wallet, existing.promised)));
        }
        Ok(())
    }

    /// Appends a fresh grant for `wallet` in the next free slot.
    pub fn register_grant(
        &mut self,
        wallet: Pubkey,
        promised: u64,
        vesting_start: i64,
        keys: &ProgramKeys,
    ) -> Result<Grant> {
        self.check_enrollable(&wallet, promised, keys)?;
        require_gt!(self.remaining_capacity(), 0, VestingError::InputTooLarge);
        let grant = Grant {
            received: 0,
            promised,
            vesting_start,
        };
        let slot = self.len();
        self.entries[slot] = InvestorEntry { wallet, grant };
        self.count += 1;
        Ok(grant)
    }

    /// Records `amount` as released to `wallet`.
    pub fn record_receipt(&mut self, wallet: &Pubkey, amount: u64) -> Result<Grant> {
        let grant = self.grant_mut(wallet)?;
        let received = grant
            .received
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        require_gte!(grant.promised, received, VestingError::MathOverflow);
        grant.received = received;
        Ok(*grant)
    }

    /// Undoes a `record_receipt` whose transfer did not go through.
    pub fn revert_receipt(&mut self, wallet: &Pubkey, amount: u64) -> Result<Grant> {
        let grant = self.grant_mut(wallet)?;
        grant.received = grant
            .received
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(*grant)
    }

    /// Sum of `promised - received` over every grant.
    pub fn outstanding_total(&self) -> Result<u64> {
        let total: u128 = self
            .enrolled()
            .iter()
            .map(|e| e.grant.outstanding() as u128)
            .sum();
        Ok(u64::try_from(total).map_err(|_| VestingError::MathOverflow)?)
    }

    fn grant_mut(&mut self, wallet: &Pubkey) -> Result<&mut Grant> {
        let len = self.len();
        match self.entries[..len]
            .iter_mut()
            .find(|e| e.wallet == *wallet && e.grant.is_active())
        {
            Some(entry) => Ok(&mut entry.grant),
            None => {
                msg!("no grant for {}", wallet);
                err!(VestingError::NotInvestor)
            }
        }
    }
}
