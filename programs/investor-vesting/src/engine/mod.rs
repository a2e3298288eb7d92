//! Accounting engine: enrollment and release over the vesting state and the
//! investor ledger. Instructions wire accounts in; everything here is plain
//! state mutation plus calls through [`Custody`].

pub mod custody;
pub mod enrollment;
pub mod release;

pub use custody::*;

#[cfg(test)]
pub(crate) mod fixtures {
    use anchor_lang::prelude::*;
    use bytemuck::Zeroable;

    use super::Custody;
    use crate::state::{InvestorLedger, ProgramKeys, VestingState};

    pub const NOW: i64 = 1_767_225_600; // 2026-01-01 00:00:00 UTC

    pub struct Fixture {
        pub state: VestingState,
        pub ledger: Box<InvestorLedger>,
        pub custody: MockCustody,
        pub keys: ProgramKeys,
    }

    pub fn fixture(schedule: Vec<u16>, balance: u64) -> Fixture {
        let keys = ProgramKeys {
            program: crate::ID,
            vesting_state: Pubkey::new_unique(),
            ledger: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
        };
        Fixture {
            state: VestingState {
                admin: Pubkey::new_unique(),
                mint: Pubkey::new_unique(),
                vault: keys.vault,
                ledger: keys.ledger,
                total_vested: 0,
                total_released: 0,
                locked: false,
                bump: 255,
                vault_bump: 254,
                schedule,
            },
            ledger: Box::new(InvestorLedger::zeroed()),
            custody: MockCustody {
                balance,
                transfers: vec![],
                fail_transfers: false,
            },
            keys,
        }
    }

    impl Fixture {
        /// `total_vested` equals the ledger's outstanding sum and is covered by custody.
        pub fn assert_totals_consistent(&self) {
            assert_eq!(self.state.total_vested, self.ledger.outstanding_total().unwrap());
            assert!(self.custody.balance >= self.state.total_vested);
            for entry in self.ledger.enrolled() {
                assert!(entry.grant.received <= entry.grant.promised);
            }
        }
    }

    /// In-memory token custody recording every outgoing transfer.
    pub struct MockCustody {
        pub balance: u64,
        pub transfers: Vec<(Pubkey, u64)>,
        pub fail_transfers: bool,
    }

    impl Custody for MockCustody {
        fn balance(&self) -> u64 {
            self.balance
        }

        fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
            if self.fail_transfers || amount > self.balance {
                return Err(ProgramError::InsufficientFunds.into());
            }
            self.balance -= amount;
            self.transfers.push((*to, amount));
            Ok(())
        }
    }
}
