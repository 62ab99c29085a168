//! # rust-monopoly
//!
//! Rules engine and turn-resolution state machine for a Monopoly-style
//! board game played by 2–4 remote players.
//!
//! ## Design Principles
//!
//! 1. **Match-Owned State**: No globals. A `Match` owns its `GameState`;
//!    hosting several games means holding several values.
//!
//! 2. **One Decision At A Time**: A single pending slot suspends the turn
//!    until the landing player buys, pays, upgrades, teleports or passes.
//!
//! 3. **Deterministic**: Dice and card draws come from a seeded
//!    `RandomSource`, so equal seeds replay equal games.
//!
//! ## Architecture
//!
//! - **Closed Tile Kinds**: Landing dispatch is an exhaustive `match` over
//!   `TileKind`; chance effects are a tagged enum.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for the board
//!   and action history.
//!
//! - **Transactions**: Every operation either applies fully or returns a
//!   `GameError` with the state untouched.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, RNG, configuration, errors
//! - `board`: Tiles, color groups, the standard 36-tile ring
//! - `economy`: Purchases, upgrades, rent, bankruptcy, valuation
//! - `chance`: Chance deck and card effects
//! - `rules`: Turn engine, pending slot, `RulesEngine`
//! - `events`: Events emitted by operations
//! - `game`: `Match` sessions and snapshots
//!
//! ```
//! use rust_monopoly::{MatchBuilder, ScriptedRng, TileIndex};
//!
//! let mut game = MatchBuilder::new().build_with_rng(ScriptedRng::with_dice([5, 3]));
//! let alice = game.join("Alice").unwrap().0;
//! let bob = game.join("Bob").unwrap().0;
//! game.start().unwrap();
//!
//! // 5 + 3 lands Alice on tile 8, which is for sale
//! let outcome = game.roll(alice).unwrap();
//! assert!(outcome.required_action().is_some());
//!
//! let outcome = game.resolve_buy(alice, TileIndex::new(8)).unwrap();
//! assert_eq!(outcome.snapshot.player(alice).unwrap().cash, 1350);
//! assert_eq!(outcome.snapshot.current, Some(bob));
//! ```

pub mod core;
pub mod board;
pub mod economy;
pub mod chance;
pub mod rules;
pub mod events;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Player,
    GameRng, GameRngState, RandomSource,
    RulesConfig,
    Action, ActionRecord, DecisionKind,
    GameError, GameState,
};

#[cfg(any(test, feature = "test-util"))]
pub use crate::core::ScriptedRng;

pub use crate::board::{Board, ColorGroup, Tile, TileIndex, TileKind, RING_SIZE};

pub use crate::economy::{Economy, Settlement};

pub use crate::chance::{ChanceCard, ChanceDeck, ChanceEffect, ChanceOutcome, ChanceResolver};

pub use crate::rules::{
    DiceRoll, Landing, MoveResult, TurnEngine,
    PendingAction, PendingSlot,
    GameResult, Rules, RulesEngine,
};

pub use crate::events::GameEvent;

pub use crate::game::{GameSnapshot, Match, MatchBuilder, Outcome, PlayerSnapshot};
