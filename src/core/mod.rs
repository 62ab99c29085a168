//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! These are the building blocks shared by the economy, chance and turn
//! modules. Matches configure them via `RulesConfig` rather than by
//! modifying the core.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use player::{Holdings, Player, PlayerId};
pub use rng::{GameRng, GameRngState, RandomSource};
#[cfg(any(test, feature = "test-util"))]
pub use rng::ScriptedRng;
pub use config::RulesConfig;
pub use action::{Action, ActionRecord, DecisionKind};
pub use error::GameError;
pub use state::GameState;
