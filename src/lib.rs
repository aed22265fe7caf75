//! Syntax Smash - platform-fighter combat core
//!
//! Fighters, status mechanics, CPU opponents and scoring, plus a headless
//! reference orchestrator that drives them frame by frame.

pub mod ai;
pub mod arena;
pub mod core;
pub mod fighter;
pub mod roster;
pub mod score;
pub mod simulation;
pub mod status;
