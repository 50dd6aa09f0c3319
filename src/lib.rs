//! Simulation core for a single-screen arcade shooter.
//!
//! Nothing in this library touches the terminal: the binary samples input,
//! feeds it to [`compute::tick`] and draws whatever [`entities::GameState::sprites`]
//! reports back.

pub mod collision;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod score;
