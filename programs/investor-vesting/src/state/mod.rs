pub mod investor_ledger;
pub mod vesting_state;

pub use investor_ledger::*;
pub use vesting_state::*;
