use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("6chjxixDSweei2YWKgcyNUsat3EvYqkkrx2aBFSBR4FS");

#[program]
pub mod investor_vesting {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, schedule: Vec<u16>) -> Result<()> {
        instructions::initialize::initialize(ctx, schedule)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens::deposit_tokens(ctx, amount)
    }

    pub fn enroll_investor(
        ctx: Context<EnrollInvestor>,
        investor: Pubkey,
        amount: u64,
        extra_delay: u64,
    ) -> Result<()> {
        instructions::enroll_investor::enroll_investor(ctx, investor, amount, extra_delay)
    }

    pub fn enroll_batch(
        ctx: Context<EnrollBatch>,
        tier_a: Vec<Pubkey>,
        tier_b: Vec<Pubkey>,
        amounts_a: Vec<u64>,
        amounts_b: Vec<u64>,
        extra_delay_b: u64,
    ) -> Result<()> {
        instructions::enroll_batch::enroll_batch(
            ctx,
            tier_a,
            tier_b,
            amounts_a,
            amounts_b,
            extra_delay_b,
        )
    }

    pub fn release(ctx: Context<Release>) -> Result<()> {
        instructions::release::release(ctx)
    }

    pub fn releasable_amount(ctx: Context<ReleasableAmount>, investor: Pubkey) -> Result<u64> {
        instructions::releasable_amount::releasable_amount(ctx, investor)
    }

    pub fn grant_of(ctx: Context<ReleasableAmount>, investor: Pubkey) -> Result<state::Grant> {
        instructions::releasable_amount::grant_of(ctx, investor)
    }

    pub fn withdraw_surplus(ctx: Context<WithdrawSurplus>, amount: u64) -> Result<()> {
        instructions::withdraw_surplus::withdraw_surplus(ctx, amount)
    }

    pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::set_admin::set_admin(ctx, new_admin)
    }
}
