//! Rules engine: validates and applies player actions.
//!
//! `RulesEngine` is the seam between a session and the rules:
//! - What actions are legal
//! - How actions modify state
//! - When the game is over
//!
//! [`Rules`] is the standard implementation. It sequences the
//! [`TurnEngine`] steps, runs economic resolutions through [`Economy`],
//! and gates everything on the [`PendingSlot`](super::PendingSlot).

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::pending::PendingAction;
use super::turn::{Landing, TurnEngine};
use crate::board::TileIndex;
use crate::chance::ChanceDeck;
use crate::core::{
    Action, DecisionKind, GameError, GameState, Player, PlayerId, RandomSource, RulesConfig,
};
use crate::economy::{Economy, Settlement};
use crate::events::GameEvent;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    /// Winner's valuation at the moment the game ended.
    pub valuation: u64,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the player can't act
/// - `apply_action`: Must be deterministic given the same random source
/// - `apply_action`: A rejected action must leave the state untouched
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Get the rules configuration.
    fn config(&self) -> &RulesConfig;

    /// Actions `player` may take right now.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action, returning the events it produced.
    fn apply_action(
        &self,
        state: &mut GameState,
        rng: &mut dyn RandomSource,
        player: PlayerId,
        action: &Action,
    ) -> Result<Vec<GameEvent>, GameError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `action` is currently legal for `player`.
    fn is_legal(&self, state: &GameState, player: PlayerId, action: &Action) -> bool {
        self.legal_actions(state, player).contains(action)
    }
}

/// Standard rules over a chance deck.
#[derive(Clone, Debug, Default)]
pub struct Rules {
    config: RulesConfig,
    deck: ChanceDeck,
}

impl Rules {
    pub fn new(config: RulesConfig, deck: ChanceDeck) -> Self {
        Self { config, deck }
    }

    pub fn deck(&self) -> &ChanceDeck {
        &self.deck
    }

    // === Lobby ===

    /// Seat a new player.
    pub fn join(
        &self,
        state: &mut GameState,
        name: impl Into<String>,
    ) -> Result<(PlayerId, Vec<GameEvent>), GameError> {
        if state.started {
            return Err(GameError::AlreadyStarted);
        }
        if state.player_count() >= self.config.max_players {
            return Err(GameError::GameFull);
        }

        let id = state.alloc_player_id();
        let player = Player::new(id, name, self.config.starting_cash);
        let name = player.name.clone();
        state.players.push(player);

        info!(player = %id, %name, "Player joined");
        Ok((id, vec![GameEvent::PlayerJoined { player: id, name }]))
    }

    /// Leave the lobby; the first seat takes the first turn.
    pub fn start(&self, state: &mut GameState) -> Result<Vec<GameEvent>, GameError> {
        if state.started {
            return Err(GameError::AlreadyStarted);
        }
        if state.player_count() < self.config.min_players {
            return Err(GameError::TooFewPlayers {
                required: self.config.min_players,
            });
        }

        state.started = true;
        state.current = 0;
        let first = state.players[0].id;

        info!(players = state.player_count(), %first, "Game started");
        Ok(vec![GameEvent::GameStarted { first }])
    }

    /// Remove a player, returning their tiles to the bank.
    pub fn leave(
        &self,
        state: &mut GameState,
        player: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        let seat = state
            .seat_of(player)
            .ok_or(GameError::PlayerNotFound(player))?;
        let mut events = Vec::new();

        if let Some(cancelled) = state.pending.clear_for(player) {
            events.push(GameEvent::DecisionCancelled {
                player,
                kind: cancelled.kind,
            });
        }

        let released = Economy::release_holdings(state, player);
        state.players.remove(seat);
        events.push(GameEvent::PlayerLeft {
            player,
            released: released.to_vec(),
        });
        info!(%player, released = released.len(), "Player left");

        let remaining = state.player_count();
        let in_play = state.started && !state.is_over();

        if state.started && state.active_count() == 0 {
            *state = GameState::new(state.board.clone());
            events.push(GameEvent::MatchReset);
            info!("Match reset to an empty lobby");
            return Ok(events);
        }

        let held_turn = in_play && seat == state.current;
        if seat < state.current {
            state.current -= 1;
        } else if held_turn {
            // Step back one seat so the advance lands on the leaver's successor
            state.current = (seat + remaining - 1) % remaining;
        }
        if state.current >= remaining {
            state.current = 0;
        }

        if in_play && state.active_count() == 1 {
            let last = state.active_players().next().map(|p| p.id);
            if let Some(last) = last {
                self.finish(state, last, &mut events);
                return Ok(events);
            }
        }

        if held_turn {
            Self::advance(state, &mut events);
        }

        Ok(events)
    }

    // === Turn ===

    /// Roll, move and land.
    pub fn roll(
        &self,
        state: &mut GameState,
        rng: &mut dyn RandomSource,
        player: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        Self::ensure_running(state)?;
        Self::ensure_turn(state, player)?;
        state.pending.ensure_empty()?;

        let mut events = Vec::new();
        state.record_action(player, Action::Roll);

        if let Some(p) = state.player_mut(player).filter(|p| p.in_jail) {
            p.jail_turns += 1;
            if p.jail_turns < self.config.jail_sentence {
                let served = p.jail_turns;
                debug!(%player, served, "Serving jail time");
                events.push(GameEvent::JailTurn { player, served });
                Self::advance(state, &mut events);
                return Ok(events);
            }
            p.in_jail = false;
            p.jail_turns = 0;
            debug!(%player, "Released from jail");
            events.push(GameEvent::JailReleased { player });
        }

        let roll = TurnEngine::roll(state, rng);
        events.push(GameEvent::DiceRolled {
            player,
            roll,
            doubles_streak: state.doubles_streak,
        });

        let moved = TurnEngine::move_player(state, &self.config, player, roll.total)?;
        events.push(GameEvent::Moved {
            player,
            from: moved.from,
            to: moved.to,
            passed_start: moved.passed_start,
        });

        let landing = self.land(state, rng, player, &mut events)?;
        self.conclude(state, player, &[player], landing.decision(player), &mut events)?;
        Ok(events)
    }

    /// Resolve the outstanding decision.
    ///
    /// The decision must belong to `player` and match `kind` and `tile`.
    /// On failure nothing changes and the decision stays outstanding.
    pub fn resolve(
        &self,
        state: &mut GameState,
        rng: &mut dyn RandomSource,
        player: PlayerId,
        kind: DecisionKind,
        tile: TileIndex,
    ) -> Result<Vec<GameEvent>, GameError> {
        Self::ensure_running(state)?;
        let pending = state.pending.validate(player, kind, tile)?.clone();
        let mut events = Vec::new();

        match kind {
            DecisionKind::Buy => {
                let price = Economy::purchase(state, player, tile)?;
                state.record_action(player, Action::Buy(tile));
                events.push(GameEvent::PropertyBought {
                    player,
                    tile,
                    price,
                });
                self.conclude(state, player, &[player], None, &mut events)?;
            }
            DecisionKind::Upgrade => {
                let cost = Economy::upgrade(state, player, tile, self.config.max_houses)?;
                state.record_action(player, Action::Upgrade(tile));
                let houses = state.board.tile(tile).map_or(0, |t| t.houses);
                events.push(GameEvent::Upgraded {
                    player,
                    tile,
                    houses,
                    cost,
                });
                self.conclude(state, player, &[player], None, &mut events)?;
            }
            DecisionKind::PayRent => self.pay_rent(state, &pending, tile, &mut events)?,
            DecisionKind::Teleport => {
                if !state.board.contains(tile) {
                    return Err(GameError::InvalidTarget(tile));
                }
                let p = state
                    .player_mut(player)
                    .ok_or(GameError::PlayerNotFound(player))?;
                let from = p.position;
                p.position = tile;
                state.record_action(player, Action::Teleport(tile));
                events.push(GameEvent::Teleported {
                    player,
                    from,
                    to: tile,
                });

                let landing = self.land(state, rng, player, &mut events)?;
                self.conclude(state, player, &[player], landing.decision(player), &mut events)?;
            }
        }

        Ok(events)
    }

    /// Decline the outstanding decision, or end the turn when none is open.
    pub fn pass(
        &self,
        state: &mut GameState,
        player: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        if state.is_over() {
            return Err(GameError::GameOver);
        }

        let mut events = Vec::new();
        match state.pending.holder() {
            Some(holder) if holder == player => {
                if let Some(declined) = state.pending.clear() {
                    debug!(%player, kind = %declined.kind, "Decision declined");
                    events.push(GameEvent::DecisionDeclined {
                        player,
                        kind: declined.kind,
                    });
                }
            }
            Some(_) => return Err(GameError::NotYourTurn),
            None => {
                Self::ensure_running(state)?;
                Self::ensure_turn(state, player)?;
            }
        }

        state.record_action(player, Action::Pass);
        Self::advance(state, &mut events);
        Ok(events)
    }

    /// Buy a way out of jail. The player may roll normally afterwards.
    pub fn pay_jail_fine(
        &self,
        state: &mut GameState,
        player: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        Self::ensure_running(state)?;
        Self::ensure_turn(state, player)?;
        state.pending.ensure_empty()?;

        let fine = self.config.jail_fine;
        let p = state
            .player_mut(player)
            .ok_or(GameError::PlayerNotFound(player))?;
        if !p.in_jail {
            return Err(GameError::NotInJail(player));
        }
        if !p.debit(fine) {
            return Err(GameError::InsufficientFunds {
                needed: fine,
                available: p.cash,
            });
        }
        p.in_jail = false;
        p.jail_turns = 0;

        state.record_action(player, Action::PayJailFine);
        info!(%player, fine, "Jail fine paid");
        Ok(vec![GameEvent::JailFinePaid {
            player,
            amount: fine,
        }])
    }

    // === Internals ===

    fn ensure_running(state: &GameState) -> Result<(), GameError> {
        if state.is_over() {
            return Err(GameError::GameOver);
        }
        if !state.started {
            return Err(GameError::GameNotStarted);
        }
        Ok(())
    }

    fn ensure_turn(state: &GameState, player: PlayerId) -> Result<(), GameError> {
        if state.current_player_id() == Some(player) {
            Ok(())
        } else {
            Err(GameError::NotYourTurn)
        }
    }

    fn land(
        &self,
        state: &mut GameState,
        rng: &mut dyn RandomSource,
        player: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<Landing, GameError> {
        let landing = TurnEngine::landing_effect(state, &self.config, &self.deck, rng, player)?;
        let tile = state.player(player).map_or(TileIndex::START, |p| p.position);

        events.push(GameEvent::Landed {
            player,
            tile,
            landing: landing.clone(),
        });
        if let Landing::Chance { card, outcome } = &landing {
            events.push(GameEvent::ChanceDrawn {
                player,
                card: card.clone(),
                outcome: outcome.clone(),
            });
        }
        Ok(landing)
    }

    fn pay_rent(
        &self,
        state: &mut GameState,
        pending: &PendingAction,
        tile: TileIndex,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let payer = pending.player;
        let creditor = pending.creditor.ok_or(GameError::InvalidTarget(tile))?;
        let amount = pending.amount.unwrap_or(0);

        match Economy::settle_rent(state, payer, creditor, amount) {
            Settlement::Paid { amount } => {
                state.record_action(payer, Action::PayRent(tile));
                events.push(GameEvent::RentPaid {
                    payer,
                    creditor,
                    tile,
                    amount,
                });
                self.conclude(state, payer, &[payer, creditor], None, events)
            }
            Settlement::Bankrupt {
                recovered,
                released,
            } => {
                state.record_action(payer, Action::PayRent(tile));
                events.push(GameEvent::Bankrupted {
                    player: payer,
                    creditor,
                    recovered,
                    released: released.to_vec(),
                });

                if state.active_count() == 1 {
                    let last = state.active_players().next().map(|p| p.id);
                    if let Some(last) = last {
                        self.finish(state, last, events);
                        return Ok(());
                    }
                }
                self.conclude(state, payer, &[payer, creditor], None, events)
            }
            Settlement::Refused | Settlement::NoCreditor => Err(GameError::InvalidTarget(tile)),
        }
    }

    /// Close out an accepted operation: win check, then either open the
    /// next decision or advance the turn.
    fn conclude(
        &self,
        state: &mut GameState,
        player: PlayerId,
        candidates: &[PlayerId],
        decision: Option<PendingAction>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        if let Some((winner, _)) = TurnEngine::check_winner(state, &self.config, candidates) {
            self.finish(state, winner, events);
            return Ok(());
        }

        match decision {
            Some(action) => {
                debug!(%player, kind = %action.kind, tile = ?action.tile, "Awaiting decision");
                state.pending.replace(action.clone());
                events.push(GameEvent::ActionRequired { action });
            }
            None => {
                state.pending.clear();
                Self::advance(state, events);
            }
        }
        Ok(())
    }

    fn finish(&self, state: &mut GameState, winner: PlayerId, events: &mut Vec<GameEvent>) {
        let (name, valuation) = state
            .player(winner)
            .map(|p| (p.name.clone(), Economy::valuation(&state.board, p)))
            .unwrap_or_default();

        state.winner = Some(winner);
        state.final_valuation = Some(valuation);
        state.pending.clear();

        info!(%winner, %name, valuation, "Game over");
        events.push(GameEvent::GameOver {
            winner,
            name,
            valuation,
        });
    }

    fn advance(state: &mut GameState, events: &mut Vec<GameEvent>) {
        if let Some(next) = state.advance_turn() {
            debug!(player = %next, turn = state.turn_number, "Turn changed");
            events.push(GameEvent::TurnChanged {
                player: next,
                turn: state.turn_number,
            });
        }
    }
}

impl RulesEngine for Rules {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if !state.started || state.is_over() {
            return Vec::new();
        }

        if let Some(pending) = state.pending.current() {
            if pending.player != player {
                return Vec::new();
            }
            let cash = state.player(player).map_or(0, |p| p.cash);
            let affordable = pending.amount.map_or(true, |a| cash >= a);

            let mut actions = match (pending.kind, pending.tile) {
                (DecisionKind::Buy, Some(t)) if affordable => vec![Action::Buy(t)],
                (DecisionKind::Upgrade, Some(t)) if affordable => vec![Action::Upgrade(t)],
                (DecisionKind::PayRent, Some(t))
                    if pending.creditor.is_some_and(|c| state.seat_of(c).is_some()) =>
                {
                    vec![Action::PayRent(t)]
                }
                (DecisionKind::Teleport, Some(t)) => vec![Action::Teleport(t)],
                (DecisionKind::Teleport, None) => {
                    state.board.tiles().map(|t| Action::Teleport(t.index)).collect()
                }
                _ => Vec::new(),
            };
            actions.push(Action::Pass);
            return actions;
        }

        match state.current_player() {
            Some(p) if p.id == player => {
                let mut actions = vec![Action::Roll];
                if p.in_jail && p.cash >= self.config.jail_fine {
                    actions.push(Action::PayJailFine);
                }
                actions.push(Action::Pass);
                actions
            }
            _ => Vec::new(),
        }
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        rng: &mut dyn RandomSource,
        player: PlayerId,
        action: &Action,
    ) -> Result<Vec<GameEvent>, GameError> {
        match *action {
            Action::Roll => self.roll(state, rng, player),
            Action::Buy(t) | Action::PayRent(t) | Action::Upgrade(t) | Action::Teleport(t) => {
                match action.decision_kind() {
                    Some(kind) => self.resolve(state, rng, player, kind, t),
                    None => Err(GameError::InvalidTarget(t)),
                }
            }
            Action::Pass => self.pass(state, player),
            Action::PayJailFine => self.pay_jail_fine(state, player),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        let winner = state.winner?;
        let valuation = state.final_valuation.unwrap_or_default();
        Some(GameResult { winner, valuation })
    }
}
