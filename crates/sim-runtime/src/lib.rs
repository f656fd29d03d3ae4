#![deny(warnings)]

//! Game orchestration for Startup Tycoon.
//!
//! [`Game`] owns every piece of mutable simulation state and exposes the
//! action entry points and the weekly [`Game::next_turn`] pipeline. All
//! randomness flows through the game's seeded dice, so a whole run is
//! reproducible from its seed and action script.

pub mod achievements;
pub mod game;
pub mod snapshot;
pub mod turn;

pub use game::Game;
pub use snapshot::GameSnapshot;
pub use turn::TurnReport;
