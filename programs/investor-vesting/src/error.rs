use anchor_lang::prelude::*;

/// Custom error codes for the investor vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Available custody is insufficient for the requested amount")]
    FundsInsufficient,

    #[msg("Address and amount lists differ in length")]
    LengthMismatch,

    #[msg("Lock period is not over yet")]
    LockNotOver,

    #[msg("Input too large")]
    InputTooLarge,

    #[msg("Address already holds a grant")]
    AlreadyEnrolled,

    #[msg("Invalid address (zero or program-owned)")]
    InvalidAddress,

    #[msg("Schedule basis points must sum to 10000")]
    PercentSumInvalid,

    #[msg("Grant is fully claimed")]
    AllClaimed,

    #[msg("Caller holds no grant")]
    NotInvestor,

    #[msg("Amount must be > 0")]
    ZeroAmount,

    #[msg("Release already in progress")]
    ReentrantCall,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,
}
