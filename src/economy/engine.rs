//! Economic operations on game state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::rent;
use crate::board::{Board, TileIndex, TileKind};
use crate::core::{GameError, GameState, Holdings, Player, PlayerId};

/// Result of a rent settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// Rent moved from payer to creditor.
    Paid { amount: u64 },

    /// Payer could not cover the rent and is out of the game.
    ///
    /// `recovered` is the cash the creditor received; `released` lists the
    /// tiles returned to the bank.
    Bankrupt { recovered: u64, released: Holdings },

    /// Payer is immune; nothing moved.
    Refused,

    /// Payer or creditor is not seated; nothing moved.
    NoCreditor,
}

impl Settlement {
    /// Whether the full rent was paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        matches!(self, Settlement::Paid { .. })
    }

    /// Whether the payer went bankrupt.
    #[must_use]
    pub fn is_bankrupt(&self) -> bool {
        matches!(self, Settlement::Bankrupt { .. })
    }
}

/// Purchases, upgrades, rent and valuation.
pub struct Economy;

impl Economy {
    /// Buy an unowned property or utility from the bank.
    ///
    /// Returns the price paid.
    pub fn purchase(
        state: &mut GameState,
        player: PlayerId,
        tile: TileIndex,
    ) -> Result<u64, GameError> {
        let price = match state.board.tile(tile) {
            Some(t) if t.owner.is_none() => t.price().ok_or(GameError::InvalidTarget(tile))?,
            _ => return Err(GameError::InvalidTarget(tile)),
        };

        let buyer = state
            .player_mut(player)
            .ok_or(GameError::PlayerNotFound(player))?;
        if !buyer.debit(price) {
            return Err(GameError::InsufficientFunds {
                needed: price,
                available: buyer.cash,
            });
        }
        buyer.holdings.push(tile);

        if let Some(t) = state.board.tile_mut(tile) {
            t.owner = Some(player);
        }

        info!(%player, %tile, price, "Tile purchased");
        Ok(price)
    }

    /// Whether `player` may add a house to `tile` right now, ignoring cash.
    #[must_use]
    pub fn can_upgrade(board: &Board, player: PlayerId, tile: TileIndex, max_houses: u8) -> bool {
        match board.tile(tile) {
            Some(t) => match t.kind {
                TileKind::Property { group, .. } => {
                    t.owner == Some(player)
                        && t.houses < max_houses
                        && board.monopolizes(player, group)
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Add one house to a monopolized property.
    ///
    /// Returns the cost paid.
    pub fn upgrade(
        state: &mut GameState,
        player: PlayerId,
        tile: TileIndex,
        max_houses: u8,
    ) -> Result<u64, GameError> {
        if !Self::can_upgrade(&state.board, player, tile, max_houses) {
            return Err(GameError::InvalidTarget(tile));
        }
        let cost = state
            .board
            .tile(tile)
            .and_then(|t| t.price())
            .map(rent::upgrade_cost)
            .ok_or(GameError::InvalidTarget(tile))?;

        let owner = state
            .player_mut(player)
            .ok_or(GameError::PlayerNotFound(player))?;
        if !owner.debit(cost) {
            return Err(GameError::InsufficientFunds {
                needed: cost,
                available: owner.cash,
            });
        }

        let mut houses = 0;
        if let Some(t) = state.board.tile_mut(tile) {
            t.houses += 1;
            houses = t.houses;
        }

        info!(%player, %tile, cost, houses, "Property upgraded");
        Ok(cost)
    }

    /// Rent owed for landing on an owned tile.
    ///
    /// `None` for unowned or non-ownable tiles.
    #[must_use]
    pub fn rent(board: &Board, tile: TileIndex, last_roll_total: Option<u64>) -> Option<u64> {
        let t = board.tile(tile)?;
        let owner = t.owner?;
        match t.kind {
            TileKind::Property {
                base_rent, group, ..
            } => Some(rent::property_rent(
                base_rent,
                board.monopolizes(owner, group),
                t.houses,
            )),
            TileKind::Utility { .. } => Some(rent::utility_rent(
                board.utilities_owned_by(owner),
                last_roll_total,
            )),
            _ => None,
        }
    }

    /// Move rent from `payer` to `creditor`.
    ///
    /// A payer who cannot cover the amount goes bankrupt: marked inactive,
    /// every holding returns to the bank with its houses, and whatever cash
    /// is left goes to the creditor.
    pub fn settle_rent(
        state: &mut GameState,
        payer: PlayerId,
        creditor: PlayerId,
        amount: u64,
    ) -> Settlement {
        let (Some(payer_seat), Some(creditor_seat)) = (state.seat_of(payer), state.seat_of(creditor))
        else {
            warn!(%payer, %creditor, "Rent settlement with a missing party");
            return Settlement::NoCreditor;
        };

        if state.players[payer_seat].is_immune() {
            debug!(%payer, "Rent refused: payer is immune");
            return Settlement::Refused;
        }

        if state.players[payer_seat].cash < amount {
            let released = Self::release_holdings(state, payer);
            let debtor = &mut state.players[payer_seat];
            let recovered = std::mem::take(&mut debtor.cash);
            debtor.active = false;
            state.players[creditor_seat].credit(recovered);

            info!(%payer, %creditor, amount, recovered, "Player bankrupt");
            return Settlement::Bankrupt {
                recovered,
                released,
            };
        }

        state.players[payer_seat].cash -= amount;
        state.players[creditor_seat].credit(amount);
        debug!(%payer, %creditor, amount, "Rent paid");
        Settlement::Paid { amount }
    }

    /// Return every tile a player owns to the bank, houses included.
    ///
    /// Returns the released tiles.
    pub fn release_holdings(state: &mut GameState, player: PlayerId) -> Holdings {
        let Some(p) = state.player_mut(player) else {
            return Holdings::new();
        };
        let released = std::mem::take(&mut p.holdings);
        for &tile in &released {
            if let Some(t) = state.board.tile_mut(tile) {
                t.release();
            }
        }
        released
    }

    /// Cash plus the liquidation value of holdings and houses.
    #[must_use]
    pub fn valuation(board: &Board, player: &Player) -> u64 {
        player
            .holdings
            .iter()
            .filter_map(|&i| board.tile(i))
            .filter_map(|t| {
                t.price()
                    .map(|price| price + u64::from(t.houses) * rent::house_value(price))
            })
            .fold(player.cash, u64::saturating_add)
    }
}
