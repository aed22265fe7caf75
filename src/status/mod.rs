//! Stochastic status mechanics layered onto combat
//!
//! - Stack overflow: attacking too often inside a sliding window stuns.
//! - Bug mode: taking a hit may roll a timed bundle of control debuffs.

pub mod bug;
pub mod constants;
pub mod stack_overflow;
pub mod system;

pub use bug::{BugEffect, BugState};
pub use stack_overflow::{effective_threshold, StackOverflowState};
pub use system::StatusEffectSystem;
