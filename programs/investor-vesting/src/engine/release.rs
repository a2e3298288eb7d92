use anchor_lang::prelude::*;

use crate::engine::Custody;
use crate::state::{Grant, InvestorLedger, VestingState};
use crate::utils::schedule;

/// Result of a successful release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Released {
    pub amount: u64,
    pub grant: Grant,
}

/// Amount `wallet` could release at `now`, without mutating anything.
pub fn releasable_now(
    state: &VestingState,
    ledger: &InvestorLedger,
    wallet: &Pubkey,
    now: i64,
) -> Result<u64> {
    let grant = ledger.active_grant(wallet)?;
    schedule::releasable(
        &state.schedule,
        grant.vesting_start,
        now,
        grant.promised,
        grant.received,
    )
}

/// Releases everything unlocked for `investor` at `now` through `custody`.
///
/// Runs under the state's release guard, which is cleared on every exit path.
/// Ledger and totals are advanced before the transfer and rolled back if the
/// transfer fails.
///
/// The guard lives on the loaded `VestingState` and is never stored as `true`:
/// Anchor writes the state back only after the handler returns. It rejects
/// nested releases made through a `Custody` inside the same call. On chain the
/// runtime already refuses re-entry into this program from the token CPI. The
/// zero-copy ledger is written in place, so its receipt is already advanced
/// when the CPI runs.
pub fn release<C: Custody>(
    state: &mut VestingState,
    ledger: &mut InvestorLedger,
    custody: &mut C,
    investor: Pubkey,
    now: i64,
) -> Result<Released> {
    state.acquire_guard()?;
    let outcome = release_guarded(state, ledger, custody, investor, now);
    state.release_guard();
    outcome
}

fn release_guarded<C: Custody>(
    state: &mut VestingState,
    ledger: &mut InvestorLedger,
    custody: &mut C,
    investor: Pubkey,
    now: i64,
) -> Result<Released> {
    let amount = releasable_now(state, ledger, &investor, now)?;

    let grant = ledger.record_receipt(&investor, amount)?;
    if let Err(e) = state.settle(amount) {
        ledger.revert_receipt(&investor, amount)?;
        return Err(e);
    }

    if amount > 0 {
        if let Err(e) = custody.transfer(&investor, amount) {
            msg!("transfer of {} to {} failed, rolling back", amount, investor);
            state.unsettle(amount)?;
            ledger.revert_receipt(&investor, amount)?;
            return Err(e);
        }
    }

    msg!(
        "released {} to {} ({}/{})",
        amount,
        investor,
        grant.received,
        grant.promised
    );
    Ok(Released { amount, grant })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MILESTONE_SECONDS, SECONDS_PER_DAY};
    use crate::engine::enrollment::{enroll_batch, enroll_investor, Tier};
    use crate::engine::fixtures::{fixture, NOW};
    use crate::error::test_support::assert_vesting_err;
    use crate::error::VestingError;

    const DAY: i64 = SECONDS_PER_DAY;

    #[test]
    fn full_release_after_single_milestone() {
        let mut f = fixture(vec![10_000], 1_000);
        let investor = Pubkey::new_unique();
        enroll_investor(&mut f.state, &mut f.ledger, &f.keys, 1_000, investor, 1_000, NOW).unwrap();

        let at = NOW + MILESTONE_SECONDS + 1;
        assert_eq!(releasable_now(&f.state, &f.ledger, &investor, at).unwrap(), 1_000);

        let released = release(&mut f.state, &mut f.ledger, &mut f.custody, investor, at).unwrap();
        assert_eq!(released.amount, 1_000);
        assert_eq!(released.grant.received, 1_000);
        assert_eq!(f.state.total_released, 1_000);
        assert_eq!(f.state.total_vested, 0);
        assert_eq!(f.custody.transfers, vec![(investor, 1_000)]);
        f.assert_totals_consistent();

        assert_vesting_err(
            release(&mut f.state, &mut f.ledger, &mut f.custody, investor, at + 1),
            VestingError::AllClaimed,
        );
        assert!(!f.state.locked);
    }

    #[test]
    fn second_release_at_same_timestamp_is_zero() {
        let mut f = fixture(vec![5_000, 5_000], 1_000);
        let investor = Pubkey::new_unique();
        enroll_investor(&mut f.state, &mut f.ledger, &f.keys, 1_000, investor, 1_000, NOW).unwrap();

        let at = NOW + 45 * DAY;
        let first = release(&mut f.state, &mut f.ledger, &mut f.custody, investor, at).unwrap();
        assert_eq!(first.amount, 750);
        let second = release(&mut f.state, &mut f.ledger, &mut f.custody, investor, at).unwrap();
        assert_eq!(second.amount, 0);
        assert_eq!(second.grant.received, 750);
        assert_eq!(f.custody.transfers.len(), 1);
        f.assert_totals_consistent();
    }

    #[test]
    fn stranger_is_not_investor() {
        let mut f = fixture(vec![10_000], 1_000);
        assert_vesting_err(
            release(&mut f.state, &mut f.ledger, &mut f.custody, Pubkey::new_unique(), NOW),
            VestingError::NotInvestor,
        );
        assert_vesting_err(
            releasable_now(&f.state, &f.ledger, &Pubkey::new_unique(), NOW),
            VestingError::NotInvestor,
        );
        assert!(!f.state.locked);
    }

    #[test]
    fn release_before_start_is_locked() {
        let mut f = fixture(vec![10_000], 1_000);
        let investor = Pubkey::new_unique();
        enroll_investor(&mut f.state, &mut f.ledger, &f.keys, 1_000, investor, 1_000, NOW + DAY).unwrap();
        assert_vesting_err(
            release(&mut f.state, &mut f.ledger, &mut f.custody, investor, NOW),
            VestingError::LockNotOver,
        );
        assert!(!f.state.locked);
        assert_eq!(f.ledger.lookup(&investor).unwrap().received, 0);
    }

    #[test]
    fn nested_release_is_rejected() {
        let mut f = fixture(vec![10_000], 1_000);
        let investor = Pubkey::new_unique();
        enroll_investor(&mut f.state, &mut f.ledger, &f.keys, 1_000, investor, 1_000, NOW).unwrap();

        // An outer release holds the guard.
        f.state.acquire_guard().unwrap();
        assert_vesting_err(
            release(&mut f.state, &mut f.ledger, &mut f.custody, investor, NOW + 2 * MILESTONE_SECONDS),
            VestingError::ReentrantCall,
        );
        assert!(f.custody.transfers.is_empty());
        assert_eq!(f.state.total_released, 0);
        f.state.release_guard();

        release(&mut f.state, &mut f.ledger, &mut f.custody, investor, NOW + 2 * MILESTONE_SECONDS).unwrap();
        assert_eq!(f.state.total_released, 1_000);
        assert!(!f.state.locked);
    }

    #[test]
    fn failed_transfer_rolls_back() {
        let mut f = fixture(vec![10_000], 1_000);
        let investor = Pubkey::new_unique();
        enroll_investor(&mut f.state, &mut f.ledger, &f.keys, 1_000, investor, 1_000, NOW).unwrap();

        f.custody.fail_transfers = true;
        let result = release(&mut f.state, &mut f.ledger, &mut f.custody, investor, NOW + 10 * DAY);
        assert!(result.is_err());
        assert!(!f.state.locked);
        assert_eq!(f.ledger.lookup(&investor).unwrap().received, 0);
        assert_eq!((f.state.total_vested, f.state.total_released), (1_000, 0));
        f.assert_totals_consistent();

        // The caller simply retries.
        f.custody.fail_transfers = false;
        let released = release(&mut f.state, &mut f.ledger, &mut f.custody, investor, NOW + 10 * DAY).unwrap();
        assert_eq!(released.amount, 333);
    }

    #[test]
    fn totals_stay_consistent_across_a_mixed_sequence() {
        let mut f = fixture(vec![2_000, 3_000, 5_000], 10_000);
        let solo = Pubkey::new_unique();
        let a = [Pubkey::new_unique(), Pubkey::new_unique()];
        let b = [Pubkey::new_unique()];

        enroll_investor(&mut f.state, &mut f.ledger, &f.keys, f.custody.balance, solo, 3_000, NOW).unwrap();
        f.assert_totals_consistent();
        enroll_batch(
            &mut f.state,
            &mut f.ledger,
            &f.keys,
            f.custody.balance,
            Tier { wallets: &a, amounts: &[1_000, 2_500], vesting_start: NOW },
            Tier { wallets: &b, amounts: &[3_500], vesting_start: NOW + 60 * DAY },
        )
        .unwrap();
        f.assert_totals_consistent();
        assert_eq!(f.state.available_custody(f.custody.balance), 0);

        let mut now = NOW;
        while now < NOW + 200 * DAY {
            now += 11 * DAY + 17;
            for investor in [solo, a[0], a[1], b[0]] {
                match release(&mut f.state, &mut f.ledger, &mut f.custody, investor, now) {
                    Ok(_) => {}
                    Err(e) => {
                        let grant = *f.ledger.lookup(&investor).unwrap();
                        assert!(
                            now < grant.vesting_start || grant.is_fully_claimed(),
                            "unexpected error {:?}",
                            e
                        );
                    }
                }
                f.assert_totals_consistent();
            }
        }

        assert_eq!(f.state.total_vested, 0);
        assert_eq!(f.state.total_released, 10_000);
        assert_eq!(f.custody.balance, 0);
    }
}
