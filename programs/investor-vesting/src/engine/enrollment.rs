use anchor_lang::prelude::*;

use crate::constants::MAX_BATCH_SIZE;
use crate::error::VestingError;
use crate::state::{Grant, InvestorLedger, ProgramKeys, VestingState};

/// One side of a batch enrollment: parallel wallet and amount lists sharing a
/// vesting start.
#[derive(Clone, Copy, Debug)]
pub struct Tier<'a> {
    pub wallets: &'a [Pubkey],
    pub amounts: &'a [u64],
    pub vesting_start: i64,
}

impl<'a> Tier<'a> {
    fn entries(&self) -> impl Iterator<Item = (Pubkey, u64, i64)> + 'a {
        let start = self.vesting_start;
        self.wallets
            .iter()
            .zip(self.amounts.iter())
            .map(move |(wallet, amount)| (*wallet, *amount, start))
    }
}

/// `now + extra_delay`, rejecting delays that do not fit a timestamp.
pub fn delayed_start(now: i64, extra_delay: u64) -> Result<i64> {
    let delay = i64::try_from(extra_delay).map_err(|_| VestingError::MathOverflow)?;
    Ok(now.checked_add(delay).ok_or(VestingError::MathOverflow)?)
}

/// Enrolls a single investor, reserving `amount` of custody headroom.
pub fn enroll_investor(
    state: &mut VestingState,
    ledger: &mut InvestorLedger,
    keys: &ProgramKeys,
    custody_balance: u64,
    wallet: Pubkey,
    amount: u64,
    vesting_start: i64,
) -> Result<Grant> {
    let available = state.available_custody(custody_balance);
    require_gte!(available, amount, VestingError::FundsInsufficient);

    let grant = ledger.register_grant(wallet, amount, vesting_start, keys)?;
    state.reserve(amount)?;

    msg!(
        "enrolled {}: promised {} from {}",
        wallet,
        amount,
        vesting_start
    );
    Ok(grant)
}

/// Enrolls two tiers at once. Either every entry is registered or none is.
///
/// Returns the combined promised amount.
pub fn enroll_batch(
    state: &mut VestingState,
    ledger: &mut InvestorLedger,
    keys: &ProgramKeys,
    custody_balance: u64,
    tier_a: Tier<'_>,
    tier_b: Tier<'_>,
) -> Result<u64> {
    require_eq!(tier_a.wallets.len(), tier_a.amounts.len(), VestingError::LengthMismatch);
    require_eq!(tier_b.wallets.len(), tier_b.amounts.len(), VestingError::LengthMismatch);

    let count = tier_a.wallets.len() + tier_b.wallets.len();
    require_gte!(MAX_BATCH_SIZE, count, VestingError::InputTooLarge);
    require_gte!(ledger.remaining_capacity(), count, VestingError::InputTooLarge);

    let mut total: u64 = 0;
    for amount in tier_a.amounts.iter().chain(tier_b.amounts.iter()) {
        total = total.checked_add(*amount).ok_or(VestingError::MathOverflow)?;
    }
    let available = state.available_custody(custody_balance);
    require_gte!(available, total, VestingError::FundsInsufficient);

    // Validate every entry before touching the ledger.
    let entries: Vec<(Pubkey, u64, i64)> = tier_a.entries().chain(tier_b.entries()).collect();
    for (i, (wallet, amount, _)) in entries.iter().enumerate() {
        ledger.check_enrollable(wallet, *amount, keys)?;
        if entries[..i].iter().any(|(earlier, _, _)| earlier == wallet) {
            return Err(error!(VestingError::AlreadyEnrolled).with_values((wallet, amount)));
        }
    }

    state.reserve(total)?;
    for (wallet, amount, vesting_start) in entries {
        ledger.register_grant(wallet, amount, vesting_start, keys)?;
    }

    msg!("batch enrolled {} investors, promised {}", count, total);
    Ok(total)
}
