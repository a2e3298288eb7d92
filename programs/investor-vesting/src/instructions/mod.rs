pub mod deposit_tokens;
pub mod enroll_batch;
pub mod enroll_investor;
pub mod initialize;
pub mod releasable_amount;
pub mod release;
pub mod set_admin;
pub mod withdraw_surplus;

pub use deposit_tokens::*;
pub use enroll_batch::*;
pub use enroll_investor::*;
pub use initialize::*;
pub use releasable_amount::*;
pub use release::*;
pub use set_admin::*;
pub use withdraw_surplus::*;
