//! CPU opponents: skill tiers, personalities and the decision engine

pub mod behavior;
pub mod constants;
pub mod controller;
pub mod decision;
pub mod execution;
pub mod personality;
pub mod skill;
pub mod stage;
pub mod targeting;

pub use behavior::{AiBehavior, AiState, InputError};
pub use controller::AiController;
pub use decision::{choose_behavior, DecisionContext};
pub use personality::AiPersonality;
pub use skill::{AiSkill, Difficulty};
pub use stage::StageInfo;
pub use targeting::{select_target, target_score};
