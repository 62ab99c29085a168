//! Dice, movement and landing effects.
//!
//! ## Turn Flow
//!
//! ```text
//! Idle ──roll──▶ Rolled ──move──▶ Moved ──land──▶ Landed ──┬──▶ Idle (advance)
//!                                                          └──▶ AwaitingDecision
//! ```
//!
//! `TurnEngine` implements each arrow as a separate step over `GameState`.
//! Sequencing them, and deciding when the turn advances, is the job of
//! [`Rules`](super::Rules).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::pending::PendingAction;
use crate::board::{TileIndex, TileKind, RING_SIZE};
use crate::chance::{ChanceCard, ChanceDeck, ChanceOutcome, ChanceResolver};
use crate::core::{GameError, GameState, PlayerId, RandomSource, RulesConfig};
use crate::economy::{rent, Economy};

/// Two six-sided dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
    pub total: u8,
    pub is_double: bool,
}

impl DiceRoll {
    #[must_use]
    pub fn new(die1: u8, die2: u8) -> Self {
        Self {
            die1,
            die2,
            total: die1 + die2,
            is_double: die1 == die2,
        }
    }
}

/// Result of moving a token around the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub from: TileIndex,
    pub to: TileIndex,
    pub passed_start: bool,
}

/// What landing on a tile produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Landing {
    /// Immunity absorbed the landing; `remaining` landings are still covered.
    ImmunityTick { remaining: u8 },

    /// Landed on the start tile.
    Start,

    /// Nothing to do here (own tile with no upgrade available, empty deck).
    Idle { tile: TileIndex },

    /// Unowned tile for sale.
    BuyOffer { tile: TileIndex, price: u64 },

    /// Own monopolized property with room for a house.
    UpgradeOffer { tile: TileIndex, cost: u64 },

    /// Someone else's tile.
    RentDue {
        tile: TileIndex,
        amount: u64,
        creditor: PlayerId,
    },

    /// A chance card was drawn and applied.
    Chance {
        card: ChanceCard,
        outcome: ChanceOutcome,
    },

    /// Just visiting.
    JailVisit,

    /// Penalty tile: immune to landing effects for a while.
    Penalty { immunity_turns: u8 },
}

impl Landing {
    /// The decision this landing opens for `player`, if any.
    #[must_use]
    pub fn decision(&self, player: PlayerId) -> Option<PendingAction> {
        match self {
            Landing::BuyOffer { tile, price } => Some(PendingAction::buy(player, *tile, *price)),
            Landing::UpgradeOffer { tile, cost } => {
                Some(PendingAction::upgrade(player, *tile, *cost))
            }
            Landing::RentDue {
                tile,
                amount,
                creditor,
            } => Some(PendingAction::pay_rent(player, *tile, *amount, *creditor)),
            Landing::Chance {
                card,
                outcome: ChanceOutcome::TeleportOffered,
            } => Some(PendingAction::teleport(player, card.clone())),
            _ => None,
        }
    }
}

/// Dice, movement and landing dispatch.
pub struct TurnEngine;

impl TurnEngine {
    /// Roll two dice and record them as the last roll.
    ///
    /// Doubles extend the streak; the streak is informational only.
    pub fn roll(state: &mut GameState, rng: &mut dyn RandomSource) -> DiceRoll {
        let roll = DiceRoll::new(rng.roll_die(), rng.roll_die());
        if roll.is_double {
            state.doubles_streak = state.doubles_streak.saturating_add(1);
        }
        state.last_roll = Some(roll);
        debug!(die1 = roll.die1, die2 = roll.die2, total = roll.total, "Dice rolled");
        roll
    }

    /// Next position and whether the move passes start.
    #[must_use]
    pub fn step(from: TileIndex, steps: u8) -> MoveResult {
        let old = from.0;
        let new = ((u16::from(old) + u16::from(steps)) % u16::from(RING_SIZE)) as u8;
        MoveResult {
            from,
            to: TileIndex::new(new),
            passed_start: new < old || (old > 30 && new < 10),
        }
    }

    /// Advance a player's token, paying the start bonus when it wraps.
    pub fn move_player(
        state: &mut GameState,
        config: &RulesConfig,
        player: PlayerId,
        steps: u8,
    ) -> Result<MoveResult, GameError> {
        let p = state
            .player_mut(player)
            .ok_or(GameError::PlayerNotFound(player))?;
        let result = Self::step(p.position, steps);
        p.position = result.to;
        if result.passed_start {
            p.credit(config.start_bonus);
        }
        debug!(%player, from = %result.from, to = %result.to, passed_start = result.passed_start, "Moved");
        Ok(result)
    }

    /// Classify and apply the effect of the tile a player stands on.
    ///
    /// Only the immediate effects are applied here (immunity, chance cards,
    /// penalty). Anything that needs a choice comes back as a landing whose
    /// [`Landing::decision`] is set.
    pub fn landing_effect(
        state: &mut GameState,
        config: &RulesConfig,
        deck: &ChanceDeck,
        rng: &mut dyn RandomSource,
        player: PlayerId,
    ) -> Result<Landing, GameError> {
        let p = state
            .player_mut(player)
            .ok_or(GameError::PlayerNotFound(player))?;

        if p.immunity_turns > 0 {
            p.immunity_turns -= 1;
            return Ok(Landing::ImmunityTick {
                remaining: p.immunity_turns,
            });
        }

        let position = p.position;
        let (kind, owner) = state
            .board
            .tile(position)
            .map(|t| (t.kind, t.owner))
            .ok_or(GameError::InvalidTarget(position))?;

        let landing = match kind {
            TileKind::Start => Landing::Start,
            TileKind::Jail => Landing::JailVisit,
            TileKind::Penalty => {
                if let Some(p) = state.player_mut(player) {
                    p.immunity_turns = config.immunity_turns;
                }
                Landing::Penalty {
                    immunity_turns: config.immunity_turns,
                }
            }
            TileKind::Chance => match deck.draw(rng) {
                Some(card) => {
                    let outcome = ChanceResolver::apply(state, config, player, card)?;
                    Landing::Chance {
                        card: card.clone(),
                        outcome,
                    }
                }
                None => {
                    warn!("Chance deck is empty");
                    Landing::Idle { tile: position }
                }
            },
            TileKind::Property { price, .. } | TileKind::Utility { price } => match owner {
                None => Landing::BuyOffer {
                    tile: position,
                    price,
                },
                Some(owner) if owner == player => {
                    if Economy::can_upgrade(&state.board, player, position, config.max_houses) {
                        Landing::UpgradeOffer {
                            tile: position,
                            cost: rent::upgrade_cost(price),
                        }
                    } else {
                        Landing::Idle { tile: position }
                    }
                }
                Some(creditor) => {
                    let total = state.last_roll.map(|r| u64::from(r.total));
                    let amount = Economy::rent(&state.board, position, total).unwrap_or(0);
                    Landing::RentDue {
                        tile: position,
                        amount,
                        creditor,
                    }
                }
            },
        };

        debug!(%player, tile = %position, ?landing, "Landed");
        Ok(landing)
    }

    /// First candidate whose valuation reaches the win threshold.
    ///
    /// Returns the winner and their valuation.
    #[must_use]
    pub fn check_winner(
        state: &GameState,
        config: &RulesConfig,
        candidates: &[PlayerId],
    ) -> Option<(PlayerId, u64)> {
        candidates.iter().find_map(|&id| {
            let player = state.player(id).filter(|p| p.active)?;
            let valuation = Economy::valuation(&state.board, player);
            (valuation >= config.win_valuation).then_some((id, valuation))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance::ChanceEffect;
    use crate::core::{Player, ScriptedRng};
    use proptest::prelude::*;

    fn table(positions: &[u8]) -> GameState {
        let mut state = GameState::default();
        for &pos in positions {
            let id = state.alloc_player_id();
            let mut p = Player::new(id, format!("P{}", id.raw()), 1500);
            p.position = TileIndex::new(pos);
            state.players.push(p);
        }
        state
    }

    fn land(state: &mut GameState, player: PlayerId) -> Landing {
        let mut rng = ScriptedRng::new();
        TurnEngine::landing_effect(
            state,
            &RulesConfig::default(),
            &ChanceDeck::standard(),
            &mut rng,
            player,
        )
        .unwrap()
    }

    fn own(state: &mut GameState, player: PlayerId, tiles: &[u8]) {
        for &i in tiles {
            let tile = TileIndex::new(i);
            state.board.tile_mut(tile).unwrap().owner = Some(player);
            state.player_mut(player).unwrap().holdings.push(tile);
        }
    }

    #[test]
    fn test_roll_tracks_doubles_streak() {
        let mut state = table(&[0]);
        let mut rng = ScriptedRng::with_dice([3, 3, 2, 2, 1, 4]);

        assert!(TurnEngine::roll(&mut state, &mut rng).is_double);
        assert!(TurnEngine::roll(&mut state, &mut rng).is_double);
        assert_eq!(state.doubles_streak, 2);

        let roll = TurnEngine::roll(&mut state, &mut rng);
        assert!(!roll.is_double);
        assert_eq!(roll.total, 5);
        assert_eq!(state.last_roll, Some(roll));
        assert_eq!(state.doubles_streak, 2);
    }

    #[test]
    fn test_step_wraps_and_passes_start() {
        let result = TurnEngine::step(TileIndex::new(33), 5);
        assert_eq!(result.to, TileIndex::new(2));
        assert!(result.passed_start);

        let result = TurnEngine::step(TileIndex::new(0), 8);
        assert_eq!(result.to, TileIndex::new(8));
        assert!(!result.passed_start);
    }

    #[test]
    fn test_move_player_pays_start_bonus() {
        let mut state = table(&[34]);
        let id = PlayerId::new(0);

        let result = TurnEngine::move_player(&mut state, &RulesConfig::default(), id, 4).unwrap();

        assert_eq!(result.to, TileIndex::new(2));
        assert_eq!(state.player(id).unwrap().cash, 1700);
    }

    #[test]
    fn test_land_on_start_and_jail() {
        let mut state = table(&[0, 18]);

        assert_eq!(land(&mut state, PlayerId::new(0)), Landing::Start);
        assert_eq!(land(&mut state, PlayerId::new(1)), Landing::JailVisit);
        assert!(!state.player(PlayerId::new(1)).unwrap().in_jail);
    }

    #[test]
    fn test_land_unowned_offers_buy_regardless_of_cash() {
        let mut state = table(&[35]);
        let id = PlayerId::new(0);
        state.player_mut(id).unwrap().cash = 10;

        let landing = land(&mut state, id);

        assert_eq!(
            landing,
            Landing::BuyOffer {
                tile: TileIndex::new(35),
                price: 700
            }
        );
        assert_eq!(
            landing.decision(id),
            Some(PendingAction::buy(id, TileIndex::new(35), 700))
        );
    }

    #[test]
    fn test_land_foreign_tile_owes_rent() {
        let mut state = table(&[6, 0]);
        own(&mut state, PlayerId::new(1), &[6, 7, 8]);

        assert_eq!(
            land(&mut state, PlayerId::new(0)),
            Landing::RentDue {
                tile: TileIndex::new(6),
                amount: 30,
                creditor: PlayerId::new(1)
            }
        );
    }

    #[test]
    fn test_land_foreign_utility_uses_last_roll() {
        let mut state = table(&[14, 0]);
        own(&mut state, PlayerId::new(1), &[4, 14]);
        state.last_roll = Some(DiceRoll::new(4, 5));

        assert_eq!(
            land(&mut state, PlayerId::new(0)),
            Landing::RentDue {
                tile: TileIndex::new(14),
                amount: 90,
                creditor: PlayerId::new(1)
            }
        );
    }

    #[test]
    fn test_land_own_monopoly_offers_upgrade() {
        let mut state = table(&[12]);
        let id = PlayerId::new(0);
        own(&mut state, id, &[12, 13]);

        assert_eq!(
            land(&mut state, id),
            Landing::UpgradeOffer {
                tile: TileIndex::new(12),
                cost: 100
            }
        );

        state.board.tile_mut(TileIndex::new(12)).unwrap().houses = 4;
        assert_eq!(
            land(&mut state, id),
            Landing::Idle {
                tile: TileIndex::new(12)
            }
        );
    }

    #[test]
    fn test_land_own_without_monopoly_is_idle() {
        let mut state = table(&[12]);
        let id = PlayerId::new(0);
        own(&mut state, id, &[12]);

        let landing = land(&mut state, id);
        assert_eq!(landing.decision(id), None);
    }

    #[test]
    fn test_penalty_then_immunity_ticks() {
        let mut state = table(&[27]);
        let id = PlayerId::new(0);

        assert_eq!(land(&mut state, id), Landing::Penalty { immunity_turns: 3 });

        // Immunity short-circuits even a buy offer
        state.player_mut(id).unwrap().position = TileIndex::new(8);
        assert_eq!(land(&mut state, id), Landing::ImmunityTick { remaining: 2 });
        assert_eq!(land(&mut state, id), Landing::ImmunityTick { remaining: 1 });
        assert_eq!(land(&mut state, id), Landing::ImmunityTick { remaining: 0 });
        assert!(matches!(land(&mut state, id), Landing::BuyOffer { .. }));
    }

    #[test]
    fn test_chance_applies_card() {
        let mut state = table(&[9]);
        let id = PlayerId::new(0);
        let mut rng = ScriptedRng::new();
        rng.push_picks([6]);

        let landing = TurnEngine::landing_effect(
            &mut state,
            &RulesConfig::default(),
            &ChanceDeck::standard(),
            &mut rng,
            id,
        )
        .unwrap();

        match landing {
            Landing::Chance { card, outcome } => {
                assert_eq!(card.effect, ChanceEffect::Money(200));
                assert_eq!(outcome, ChanceOutcome::CashAdjusted { delta: 200, cash: 1700 });
            }
            other => panic!("expected chance landing, got {:?}", other),
        }
    }

    #[test]
    fn test_chance_teleport_opens_decision() {
        let mut state = table(&[9]);
        let id = PlayerId::new(0);
        let deck = ChanceDeck::new(vec![ChanceCard::new("Teleport", ChanceEffect::Teleport)]);
        let mut rng = ScriptedRng::new();

        let landing =
            TurnEngine::landing_effect(&mut state, &RulesConfig::default(), &deck, &mut rng, id)
                .unwrap();

        let decision = landing.decision(id).unwrap();
        assert_eq!(decision.kind, crate::core::DecisionKind::Teleport);
        assert_eq!(decision.tile, None);
    }

    #[test]
    fn test_check_winner_order() {
        let mut state = table(&[0, 0]);
        let config = RulesConfig::default();
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));

        assert_eq!(TurnEngine::check_winner(&state, &config, &[a, b]), None);

        state.player_mut(b).unwrap().cash = 6000;
        assert_eq!(TurnEngine::check_winner(&state, &config, &[a, b]), Some((b, 6000)));

        state.player_mut(a).unwrap().cash = 7000;
        assert_eq!(TurnEngine::check_winner(&state, &config, &[a, b]), Some((a, 7000)));
    }

    proptest! {
        #[test]
        fn prop_dice_in_range(seed: u64) {
            let mut state = table(&[0]);
            let mut rng = crate::core::GameRng::new(seed);
            let roll = TurnEngine::roll(&mut state, &mut rng);
            prop_assert!((1..=6).contains(&roll.die1));
            prop_assert!((1..=6).contains(&roll.die2));
            prop_assert!((2..=12).contains(&roll.total));
            prop_assert_eq!(roll.is_double, roll.die1 == roll.die2);
        }

        #[test]
        fn prop_step_stays_on_board(from in 0u8..36, steps in 2u8..=12) {
            let result = TurnEngine::step(TileIndex::new(from), steps);
            prop_assert!(result.to.0 < RING_SIZE);
            prop_assert_eq!(result.passed_start, result.to.0 < from || (from > 30 && result.to.0 < 10));
            prop_assert_eq!(
                (u16::from(from) + u16::from(steps)) % 36,
                u16::from(result.to.0)
            );
        }
    }
}
