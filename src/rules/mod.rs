//! Turn resolution and the rules facade.
//!
//! - `turn`: dice, movement, landing classification, win check
//! - `pending`: the single-slot decision gate
//! - `engine`: the `RulesEngine` trait and the standard `Rules`
//!
//! Sessions call into `RulesEngine`; nothing outside this module decides
//! when a turn advances.

pub mod engine;
pub mod pending;
pub mod turn;

pub use engine::{GameResult, Rules, RulesEngine};
pub use pending::{PendingAction, PendingSlot};
pub use turn::{DiceRoll, Landing, MoveResult, TurnEngine};
