//! Power card effects.
//!
//! - `can_use`: eligibility per card type
//! - `plan` / `apply`: crate-internal check-then-act resolution of a card use
//! - persistent effects (`consume_boost`, `expire_shield`) and the pending
//!   PRECISION and CHALLENGE sub-rounds
//! - `roll_award` / `draw_specific`: acquiring new cards
//!
//! Dispatch is an exhaustive match over `PowerCardType`; there is no
//! string-keyed effect table.

mod targeting;
mod eligibility;
mod resolver;
mod award;

pub use targeting::UseTarget;
pub use eligibility::can_use;
pub use resolver::{close_challenge, close_precision, consume_boost, expire_shield, PowerOutcome};
pub(crate) use resolver::{apply, plan};
pub use award::{draw_specific, roll_award};
