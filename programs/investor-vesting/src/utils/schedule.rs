//! Milestone schedule math.
//!
//! A schedule is a list of basis-point shares, one per 30-day milestone bucket.
//! Bucket `k` (0-based) spans `[start + k * 30d, start + (k + 1) * 30d]`:
//! - a bucket whose end is strictly in the past is fully vested
//! - the bucket containing `now` vests pro rata by elapsed seconds, later buckets not at all
//! - once every bucket has ended the whole promised amount is vested (no rounding dust)
//!
//! Truncation order is fixed: `promised * bps / 10_000` for full buckets and
//! `promised * bps * elapsed / 10_000 / 30d` for the current one.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, MAX_SCHEDULE_LEN, MILESTONE_SECONDS};
use crate::error::VestingError;

/// Rejects schedules longer than ten years or not summing to exactly 100%.
pub fn validate_schedule(schedule: &[u16]) -> Result<()> {
    require_gte!(MAX_SCHEDULE_LEN, schedule.len(), VestingError::InputTooLarge);
    let sum: u64 = schedule.iter().map(|bps| u64::from(*bps)).sum();
    require_eq!(sum, BPS_DENOMINATOR, VestingError::PercentSumInvalid);
    Ok(())
}

/// Amount that may be released right now for one grant.
///
/// Fails with `LockNotOver` before `vesting_start` and `AllClaimed` once
/// `received` has reached `promised`. Zero is a valid answer.
pub fn releasable(
    schedule: &[u16],
    vesting_start: i64,
    now: i64,
    promised: u64,
    received: u64,
) -> Result<u64> {
    require_gte!(now, vesting_start, VestingError::LockNotOver);
    require_gt!(promised, received, VestingError::AllClaimed);

    let vested = vested_amount(schedule, vesting_start, now, promised)?;
    Ok(vested
        .checked_sub(received)
        .ok_or(VestingError::MathOverflow)?)
}

/// Cumulative amount unlocked at `now` (callers guarantee `now >= vesting_start`).
pub fn vested_amount(schedule: &[u16], vesting_start: i64, now: i64, promised: u64) -> Result<u64> {
    let promised = promised as u128;
    let bucket_len = MILESTONE_SECONDS as u128;
    let mut vested: u128 = 0;

    for (k, bps) in schedule.iter().enumerate() {
        let bucket_start = milestone_start(vesting_start, k)?;
        let bucket_end = bucket_start
            .checked_add(MILESTONE_SECONDS)
            .ok_or(VestingError::MathOverflow)?;
        let share = promised
            .checked_mul(u128::from(*bps))
            .ok_or(VestingError::MathOverflow)?;

        if now > bucket_end {
            vested = vested
                .checked_add(share / u128::from(BPS_DENOMINATOR))
                .ok_or(VestingError::MathOverflow)?;
            continue;
        }

        // `now` lies inside bucket k; later buckets are unreachable.
        let elapsed = now
            .checked_sub(bucket_start)
            .and_then(|s| u128::try_from(s).ok())
            .ok_or(VestingError::MathOverflow)?;
        let partial = share
            .checked_mul(elapsed)
            .ok_or(VestingError::MathOverflow)?
            / u128::from(BPS_DENOMINATOR)
            / bucket_len;
        vested = vested
            .checked_add(partial)
            .ok_or(VestingError::MathOverflow)?;
        return Ok(u64::try_from(vested).map_err(|_| VestingError::MathOverflow)?);
    }

    Ok(promised as u64)
}

/// Start timestamp of bucket `k` (0-based).
fn milestone_start(vesting_start: i64, k: usize) -> Result<i64> {
    let offset = i64::try_from(k)
        .ok()
        .and_then(|k| k.checked_mul(MILESTONE_SECONDS))
        .ok_or(VestingError::MathOverflow)?;
    Ok(vesting_start
        .checked_add(offset)
        .ok_or(VestingError::MathOverflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use crate::error::test_support::assert_vesting_err;

    const T: i64 = 1_767_225_600; // 2026-01-01 00:00:00 UTC
    const DAY: i64 = SECONDS_PER_DAY;
    const MONTH: i64 = MILESTONE_SECONDS;

    #[test]
    fn validate_accepts_full_schedules() {
        validate_schedule(&[10_000]).unwrap();
        validate_schedule(&[2_500, 2_500, 5_000]).unwrap();

        let mut ten_years = vec![83u16; MAX_SCHEDULE_LEN];
        ten_years[0] += 10_000 - 83 * MAX_SCHEDULE_LEN as u16;
        validate_schedule(&ten_years).unwrap();
    }

    #[test]
    fn validate_rejects_bad_sums() {
        assert_vesting_err(validate_schedule(&[5_000, 4_000]), VestingError::PercentSumInvalid);
        assert_vesting_err(validate_schedule(&[5_000, 5_001]), VestingError::PercentSumInvalid);
        assert_vesting_err(validate_schedule(&[]), VestingError::PercentSumInvalid);
    }

    #[test]
    fn validate_rejects_more_than_ten_years() {
        let mut schedule = vec![0u16; MAX_SCHEDULE_LEN + 1];
        schedule[0] = 10_000;
        assert_vesting_err(validate_schedule(&schedule), VestingError::InputTooLarge);
    }

    #[test]
    fn single_milestone_unlocks_fully_after_thirty_days() {
        assert_eq!(releasable(&[10_000], T, T + MONTH + 1, 1_000, 0).unwrap(), 1_000);
        assert_eq!(releasable(&[10_000], T, T + MONTH, 1_000, 0).unwrap(), 1_000);
        // Pro rata before that.
        assert_eq!(releasable(&[10_000], T, T + 15 * DAY, 1_000, 0).unwrap(), 500);
        assert_eq!(releasable(&[10_000], T, T + 3 * DAY, 1_000, 0).unwrap(), 100);
        assert_eq!(releasable(&[10_000], T, T, 1_000, 0).unwrap(), 0);
    }

    #[test]
    fn mid_second_bucket() {
        // First bucket complete (500) plus half of the second (250).
        assert_eq!(releasable(&[5_000, 5_000], T, T + 45 * DAY, 1_000, 0).unwrap(), 750);
        assert_eq!(releasable(&[5_000, 5_000], T, T + 45 * DAY, 1_000, 500).unwrap(), 250);
    }

    #[test]
    fn zero_share_buckets_are_skipped_over() {
        let schedule = [0, 0, 10_000];
        assert_eq!(releasable(&schedule, T, T + 2 * MONTH, 900, 0).unwrap(), 0);
        assert_eq!(releasable(&schedule, T, T + 2 * MONTH + 10 * DAY, 900, 0).unwrap(), 300);
    }

    #[test]
    fn truncates_each_step() {
        // 7 * 3333 / 10000 = 2 for each full bucket.
        let schedule = [3_333, 3_333, 3_334];
        assert_eq!(vested_amount(&schedule, T, T + MONTH + 1, 7).unwrap(), 2);
        assert_eq!(vested_amount(&schedule, T, T + 2 * MONTH + 1, 7).unwrap(), 4);
        // Exactly at the final boundary the last bucket is still pro-rated.
        assert_eq!(vested_amount(&schedule, T, T + 3 * MONTH, 7).unwrap(), 6);
        // Past every bucket the full amount is vested, dust included.
        assert_eq!(vested_amount(&schedule, T, T + 3 * MONTH + 1, 7).unwrap(), 7);
    }

    #[test]
    fn lock_not_over_before_start() {
        assert_vesting_err(releasable(&[10_000], T, T - 1, 1_000, 0), VestingError::LockNotOver);
    }

    #[test]
    fn all_claimed_once_received_reaches_promised() {
        assert_vesting_err(
            releasable(&[10_000], T, T + 2 * MONTH, 1_000, 1_000),
            VestingError::AllClaimed,
        );
    }

    #[test]
    fn releasable_is_monotonic_in_time() {
        let schedule = [1_000, 0, 2_500, 1_500, 5_000];
        let promised = 123_456_789;
        let mut last = 0;
        let mut now = T;
        while now <= T + 6 * MONTH {
            let vested = releasable(&schedule, T, now, promised, 0).unwrap();
            assert!(vested >= last, "vested went down at {}", now - T);
            last = vested;
            now += 7 * 3_600 + 13;
        }
        assert_eq!(last, promised);
    }

    #[test]
    fn large_amounts_do_not_overflow() {
        assert_eq!(
            releasable(&[1, 9_999], T, T + MONTH + 1, u64::MAX, 0).unwrap(),
            u64::MAX / 10_000 + (u64::MAX as u128 * 9_999 / 10_000 / MONTH as u128) as u64
        );
        assert_eq!(releasable(&[1, 9_999], T, T + 2 * MONTH + 1, u64::MAX, 0).unwrap(), u64::MAX);
    }
}
