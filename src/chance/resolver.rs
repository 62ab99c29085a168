//! Applying a drawn card to a player.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::card::{ChanceCard, ChanceEffect};
use crate::board::{Board, TileIndex};
use crate::core::{GameError, GameState, PlayerId, RulesConfig};

/// What applying a card did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanceOutcome {
    /// The player was relocated. `start_bonus` is what they collected.
    Moved {
        from: TileIndex,
        to: TileIndex,
        start_bonus: u64,
    },

    /// The player was sent to jail as a prisoner.
    Imprisoned { from: TileIndex, to: TileIndex },

    /// Cash changed by `delta` (floored at zero); `cash` is the new balance.
    CashAdjusted { delta: i64, cash: u64 },

    /// The card asks the player to pick a destination.
    TeleportOffered,

    /// Nothing happened (no utility on the board, or an off-board target).
    NoEffect,
}

/// Applies chance cards.
///
/// Relocation never triggers a second landing effect: the player stays on
/// the destination until their next roll.
pub struct ChanceResolver;

impl ChanceResolver {
    /// Apply `card` to `player`.
    pub fn apply(
        state: &mut GameState,
        config: &RulesConfig,
        player: PlayerId,
        card: &ChanceCard,
    ) -> Result<ChanceOutcome, GameError> {
        let from = state
            .player(player)
            .ok_or(GameError::PlayerNotFound(player))?
            .position;

        let outcome = match card.effect {
            ChanceEffect::MoveTo(target) => Self::move_to(state, config, player, from, target),
            ChanceEffect::MoveBack(steps) => {
                let to = TileIndex::new(from.0.saturating_sub(steps));
                Self::relocate(state, player, to);
                ChanceOutcome::Moved {
                    from,
                    to,
                    start_bonus: 0,
                }
            }
            ChanceEffect::NearestUtility => match Self::nearest_utility(&state.board, from) {
                Some(to) => {
                    Self::relocate(state, player, to);
                    ChanceOutcome::Moved {
                        from,
                        to,
                        start_bonus: 0,
                    }
                }
                None => ChanceOutcome::NoEffect,
            },
            ChanceEffect::Money(delta) => {
                let p = state
                    .player_mut(player)
                    .ok_or(GameError::PlayerNotFound(player))?;
                p.adjust_cash(delta);
                ChanceOutcome::CashAdjusted {
                    delta,
                    cash: p.cash,
                }
            }
            ChanceEffect::Teleport => ChanceOutcome::TeleportOffered,
        };

        debug!(%player, card = %card.description, ?outcome, "Chance card applied");
        Ok(outcome)
    }

    /// Closest utility to `from` by ring distance; ties go to the first in
    /// board order.
    #[must_use]
    pub fn nearest_utility(board: &Board, from: TileIndex) -> Option<TileIndex> {
        board
            .utilities()
            .map(|t| t.index)
            .min_by_key(|&to| Board::ring_distance(from, to))
    }

    fn move_to(
        state: &mut GameState,
        config: &RulesConfig,
        player: PlayerId,
        from: TileIndex,
        target: TileIndex,
    ) -> ChanceOutcome {
        if !state.board.contains(target) {
            warn!(%player, %target, "Chance card targets a tile off the board");
            return ChanceOutcome::NoEffect;
        }

        if config.jail_card_imprisons && state.board.jail() == Some(target) {
            if let Some(p) = state.player_mut(player) {
                p.position = target;
                p.in_jail = true;
                p.jail_turns = 0;
            }
            return ChanceOutcome::Imprisoned { from, to: target };
        }

        let start_bonus = if target < from || target == TileIndex::START {
            config.start_bonus
        } else {
            0
        };
        if let Some(p) = state.player_mut(player) {
            p.position = target;
            p.credit(start_bonus);
        }
        ChanceOutcome::Moved {
            from,
            to: target,
            start_bonus,
        }
    }

    fn relocate(state: &mut GameState, player: PlayerId, to: TileIndex) {
        if let Some(p) = state.player_mut(player) {
            p.position = to;
        }
    }
}
