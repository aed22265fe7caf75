//! Reference orchestrator: physics, hit detection and a headless frame loop

pub mod constants;
pub mod headless;
pub mod hits;
pub mod physics;
pub mod summary;

pub use headless::{HeadlessMatch, MatchPhase, PendingRespawn};
pub use hits::{find_hits, strike_reaches};
pub use physics::step_fighter;
pub use summary::{FighterResult, MatchSummary};
