//! Player actions and action history.
//!
//! An `Action` is everything a seated player can ask the engine to do once
//! the game is running. Lobby operations (join, start, leave) are not
//! actions; they go through the session directly.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::TileIndex;

/// The kind of decision a landing can demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Buy the unowned tile from the bank.
    Buy,
    /// Pay rent to the tile's owner.
    PayRent,
    /// Add a house to a monopolized property.
    Upgrade,
    /// Choose a tile to jump to.
    Teleport,
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DecisionKind::Buy => "buy",
            DecisionKind::PayRent => "pay-rent",
            DecisionKind::Upgrade => "upgrade",
            DecisionKind::Teleport => "teleport",
        };
        f.write_str(name)
    }
}

/// A complete game action.
///
/// ```
/// use rust_monopoly::board::TileIndex;
/// use rust_monopoly::core::{Action, DecisionKind};
///
/// let buy = Action::Buy(TileIndex::new(8));
/// assert_eq!(buy.decision_kind(), Some(DecisionKind::Buy));
/// assert_eq!(buy.tile(), Some(TileIndex::new(8)));
///
/// assert_eq!(Action::Roll.decision_kind(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Roll the dice and move.
    Roll,
    /// Resolve a pending buy.
    Buy(TileIndex),
    /// Resolve a pending rent payment.
    PayRent(TileIndex),
    /// Resolve a pending upgrade.
    Upgrade(TileIndex),
    /// Resolve a pending teleport by naming the destination.
    Teleport(TileIndex),
    /// Decline the pending decision, or end the turn when none is pending.
    Pass,
    /// Pay the fine to leave jail before rolling.
    PayJailFine,
}

impl Action {
    /// The pending decision this action resolves, if it resolves one.
    #[must_use]
    pub fn decision_kind(&self) -> Option<DecisionKind> {
        match self {
            Action::Buy(_) => Some(DecisionKind::Buy),
            Action::PayRent(_) => Some(DecisionKind::PayRent),
            Action::Upgrade(_) => Some(DecisionKind::Upgrade),
            Action::Teleport(_) => Some(DecisionKind::Teleport),
            Action::Roll | Action::Pass | Action::PayJailFine => None,
        }
    }

    /// Target tile, for resolution actions.
    #[must_use]
    pub fn tile(&self) -> Option<TileIndex> {
        match self {
            Action::Buy(t) | Action::PayRent(t) | Action::Upgrade(t) | Action::Teleport(t) => {
                Some(*t)
            }
            Action::Roll | Action::Pass | Action::PayJailFine => None,
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number across the whole game (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
