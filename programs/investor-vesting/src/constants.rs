//! Program-wide constants.

/// Seed of the singleton vesting state PDA. The PDA also signs for the vault.
pub const VESTING_STATE_SEED: &[u8] = b"vesting_state";

/// Seed of the investor ledger PDA (derived under the vesting state key).
pub const INVESTOR_LEDGER_SEED: &[u8] = b"investor_ledger";

/// Seed of the custody vault token account (derived under the vesting state key).
pub const VAULT_SEED: &[u8] = b"vault";

/// A complete schedule sums to exactly this many basis points (100.00%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Max milestones in a schedule (one per month, ten years).
pub const MAX_SCHEDULE_LEN: usize = 120;

/// Max combined tier A + tier B entries per `enroll_batch` call.
pub const MAX_BATCH_SIZE: usize = 180;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Length of one milestone bucket in days.
pub const MILESTONE_DAYS: i64 = 30;

/// Length of one milestone bucket in seconds.
pub const MILESTONE_SECONDS: i64 = MILESTONE_DAYS * SECONDS_PER_DAY;

/// Ledger capacity. One full batch fits, and the fixed ledger account stays
/// under the 10 KiB limit for accounts created by CPI.
pub const MAX_INVESTORS: usize = 180;
