//! The pending-decision slot.
//!
//! ## State Machine
//!
//! ```text
//!            occupy(decision)
//!   Empty ─────────────────────▶ Occupied(decision)
//!     ▲                                │
//!     └──── clear / pass / leave ──────┘
//! ```
//!
//! At most one decision is outstanding per match. While the slot is
//! occupied no dice may be rolled, and only the named player's matching
//! resolution is accepted.

use serde::{Deserialize, Serialize};

use crate::board::TileIndex;
use crate::chance::ChanceCard;
use crate::core::{DecisionKind, GameError, PlayerId};

/// A decision the landing player must make before play continues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Who must decide.
    pub player: PlayerId,

    pub kind: DecisionKind,

    /// Target tile. `None` accepts any on-board tile (teleport).
    pub tile: Option<TileIndex>,

    /// Price, cost or rent, depending on the kind.
    pub amount: Option<u64>,

    /// Who receives rent.
    pub creditor: Option<PlayerId>,

    /// The card that opened the decision.
    pub card: Option<ChanceCard>,
}

impl PendingAction {
    /// Offer to buy an unowned tile.
    #[must_use]
    pub fn buy(player: PlayerId, tile: TileIndex, price: u64) -> Self {
        Self {
            player,
            kind: DecisionKind::Buy,
            tile: Some(tile),
            amount: Some(price),
            creditor: None,
            card: None,
        }
    }

    /// Rent owed to `creditor`.
    #[must_use]
    pub fn pay_rent(player: PlayerId, tile: TileIndex, amount: u64, creditor: PlayerId) -> Self {
        Self {
            player,
            kind: DecisionKind::PayRent,
            tile: Some(tile),
            amount: Some(amount),
            creditor: Some(creditor),
            card: None,
        }
    }

    /// Offer to add a house.
    #[must_use]
    pub fn upgrade(player: PlayerId, tile: TileIndex, cost: u64) -> Self {
        Self {
            player,
            kind: DecisionKind::Upgrade,
            tile: Some(tile),
            amount: Some(cost),
            creditor: None,
            card: None,
        }
    }

    /// Choose any destination tile.
    #[must_use]
    pub fn teleport(player: PlayerId, card: ChanceCard) -> Self {
        Self {
            player,
            kind: DecisionKind::Teleport,
            tile: None,
            amount: None,
            creditor: None,
            card: Some(card),
        }
    }

    /// Whether a resolution call from `player` of `kind` on `tile` is the
    /// one this decision is waiting for.
    #[must_use]
    pub fn matches(&self, player: PlayerId, kind: DecisionKind, tile: TileIndex) -> bool {
        self.player == player && self.kind == kind && self.tile.map_or(true, |t| t == tile)
    }
}

/// Holds at most one outstanding decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingSlot {
    #[default]
    Empty,
    Occupied(PendingAction),
}

impl PendingSlot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, PendingSlot::Empty)
    }

    /// The outstanding decision, if any.
    #[must_use]
    pub fn current(&self) -> Option<&PendingAction> {
        match self {
            PendingSlot::Empty => None,
            PendingSlot::Occupied(action) => Some(action),
        }
    }

    /// Player who must decide, if any.
    #[must_use]
    pub fn holder(&self) -> Option<PlayerId> {
        self.current().map(|a| a.player)
    }

    /// Fail with `ActionPending` while a decision is outstanding.
    pub fn ensure_empty(&self) -> Result<(), GameError> {
        match self {
            PendingSlot::Empty => Ok(()),
            PendingSlot::Occupied(action) => Err(GameError::ActionPending(action.kind)),
        }
    }

    /// Record a new decision. The slot must be empty.
    pub fn occupy(&mut self, action: PendingAction) -> Result<(), GameError> {
        self.ensure_empty()?;
        *self = PendingSlot::Occupied(action);
        Ok(())
    }

    /// Replace whatever is outstanding with a new decision.
    ///
    /// Used when resolving one decision immediately opens another (a
    /// teleport landing on a purchasable tile).
    pub fn replace(&mut self, action: PendingAction) -> Option<PendingAction> {
        match std::mem::replace(self, PendingSlot::Occupied(action)) {
            PendingSlot::Empty => None,
            PendingSlot::Occupied(previous) => Some(previous),
        }
    }

    /// Check a resolution call against the outstanding decision.
    ///
    /// Returns the decision on a match, without clearing it; the caller
    /// clears only once the underlying action has succeeded.
    pub fn validate(
        &self,
        player: PlayerId,
        kind: DecisionKind,
        tile: TileIndex,
    ) -> Result<&PendingAction, GameError> {
        match self.current() {
            Some(action) if action.matches(player, kind, tile) => Ok(action),
            _ => Err(GameError::NoMatchingPendingAction {
                player,
                kind,
                tile: Some(tile),
            }),
        }
    }

    /// Empty the slot, returning what was outstanding.
    pub fn clear(&mut self) -> Option<PendingAction> {
        match std::mem::take(self) {
            PendingSlot::Empty => None,
            PendingSlot::Occupied(action) => Some(action),
        }
    }

    /// Empty the slot only if `player` holds it.
    pub fn clear_for(&mut self, player: PlayerId) -> Option<PendingAction> {
        if self.holder() == Some(player) {
            self.clear()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance::ChanceEffect;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn tile(i: u8) -> TileIndex {
        TileIndex::new(i)
    }

    #[test]
    fn test_empty_by_default() {
        let slot = PendingSlot::default();

        assert!(slot.is_empty());
        assert!(slot.current().is_none());
        assert!(slot.ensure_empty().is_ok());
    }

    #[test]
    fn test_occupy_blocks_second_decision() {
        let mut slot = PendingSlot::default();
        slot.occupy(PendingAction::buy(A, tile(8), 150)).unwrap();

        assert_eq!(slot.holder(), Some(A));
        assert_eq!(
            slot.occupy(PendingAction::buy(B, tile(3), 100)),
            Err(GameError::ActionPending(DecisionKind::Buy))
        );
        assert_eq!(slot.current().unwrap().tile, Some(tile(8)));
    }

    #[test]
    fn test_validate_requires_player_kind_and_tile() {
        let mut slot = PendingSlot::default();
        slot.occupy(PendingAction::buy(A, tile(8), 150)).unwrap();

        assert!(slot.validate(A, DecisionKind::Buy, tile(8)).is_ok());
        assert_eq!(
            slot.validate(A, DecisionKind::Buy, tile(7)),
            Err(GameError::NoMatchingPendingAction {
                player: A,
                kind: DecisionKind::Buy,
                tile: Some(tile(7)),
            })
        );
        assert!(slot.validate(B, DecisionKind::Buy, tile(8)).is_err());
        assert!(slot.validate(A, DecisionKind::Upgrade, tile(8)).is_err());
    }

    #[test]
    fn test_validate_on_empty_slot() {
        let slot = PendingSlot::default();
        assert!(slot.validate(A, DecisionKind::PayRent, tile(1)).is_err());
    }

    #[test]
    fn test_teleport_accepts_any_tile() {
        let mut slot = PendingSlot::default();
        let card = ChanceCard::new("Teleport anywhere", ChanceEffect::Teleport);
        slot.occupy(PendingAction::teleport(A, card)).unwrap();

        assert!(slot.validate(A, DecisionKind::Teleport, tile(0)).is_ok());
        assert!(slot.validate(A, DecisionKind::Teleport, tile(35)).is_ok());
        assert!(slot.validate(B, DecisionKind::Teleport, tile(35)).is_err());
    }

    #[test]
    fn test_clear_for_only_clears_holder() {
        let mut slot = PendingSlot::default();
        slot.occupy(PendingAction::pay_rent(A, tile(6), 30, B)).unwrap();

        assert!(slot.clear_for(B).is_none());
        assert!(!slot.is_empty());

        let cleared = slot.clear_for(A).unwrap();
        assert_eq!(cleared.amount, Some(30));
        assert_eq!(cleared.creditor, Some(B));
        assert!(slot.is_empty());
    }

    #[test]
    fn test_replace_chains_decisions() {
        let mut slot = PendingSlot::default();
        let card = ChanceCard::new("Teleport anywhere", ChanceEffect::Teleport);
        slot.occupy(PendingAction::teleport(A, card)).unwrap();

        let previous = slot.replace(PendingAction::buy(A, tile(35), 700));

        assert_eq!(previous.unwrap().kind, DecisionKind::Teleport);
        assert_eq!(slot.current().unwrap().kind, DecisionKind::Buy);
    }
}
