pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{Entrant, MatchConfig};
pub use error::{Result, SmashError};
pub use types::{Facing, FighterId, TimeMs, Vec2};
