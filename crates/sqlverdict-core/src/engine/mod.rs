pub mod judge;
pub mod runner;

pub use judge::{judge_item, ItemOutcome, SpjAttempt};
pub use runner::{RunPolicy, Runner};
