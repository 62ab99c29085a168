//! Tile definitions.
//!
//! A `Tile` pairs static data (name, kind, prices) with the two pieces of
//! per-game state that ever change on the board: owner and house count.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Position on the ring, `0..RING_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileIndex(pub u8);

impl TileIndex {
    /// The start tile.
    pub const START: TileIndex = TileIndex(0);

    /// Create a new tile index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the index as a `usize` for slice access.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color groups of the standard board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    LightBlue,
    LightGreen,
    Orange,
    DarkBlue,
    DarkGreen,
    Brown,
    Yellow,
    Pink,
    Red,
    Purple,
    OrangePremium,
}

impl ColorGroup {
    /// Display key, e.g. `"light-blue"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ColorGroup::LightBlue => "light-blue",
            ColorGroup::LightGreen => "light-green",
            ColorGroup::Orange => "orange",
            ColorGroup::DarkBlue => "dark-blue",
            ColorGroup::DarkGreen => "dark-green",
            ColorGroup::Brown => "brown",
            ColorGroup::Yellow => "yellow",
            ColorGroup::Pink => "pink",
            ColorGroup::Red => "red",
            ColorGroup::Purple => "purple",
            ColorGroup::OrangePremium => "orange-premium",
        }
    }
}

impl std::fmt::Display for ColorGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a tile is and the static numbers attached to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Collect the start bonus when passing or landing.
    Start,
    /// Buildable property.
    Property {
        price: u64,
        base_rent: u64,
        group: ColorGroup,
    },
    /// Ownable utility; rent scales with the last dice total.
    Utility { price: u64 },
    /// Draw a chance card.
    Chance,
    /// Jail. Landing here is only a visit.
    Jail,
    /// Penalty tile granting temporary rent immunity.
    Penalty,
}

/// A tile on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Position on the ring.
    pub index: TileIndex,

    /// Display name.
    pub name: String,

    /// Kind and static prices.
    pub kind: TileKind,

    /// Owner, for ownable tiles. Set by purchase, cleared by forfeiture.
    pub owner: Option<PlayerId>,

    /// Houses built. Non-zero only on properties.
    pub houses: u8,
}

impl Tile {
    /// Create an unowned tile.
    pub fn new(index: u8, name: impl Into<String>, kind: TileKind) -> Self {
        Self {
            index: TileIndex::new(index),
            name: name.into(),
            kind,
            owner: None,
            houses: 0,
        }
    }

    /// Purchase price for ownable tiles.
    #[must_use]
    pub fn price(&self) -> Option<u64> {
        match self.kind {
            TileKind::Property { price, .. } | TileKind::Utility { price } => Some(price),
            _ => None,
        }
    }

    /// Color group for properties.
    #[must_use]
    pub fn group(&self) -> Option<ColorGroup> {
        match self.kind {
            TileKind::Property { group, .. } => Some(group),
            _ => None,
        }
    }

    /// Whether the tile can be bought.
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        self.price().is_some()
    }

    /// Whether this is a buildable property.
    #[must_use]
    pub fn is_property(&self) -> bool {
        matches!(self.kind, TileKind::Property { .. })
    }

    /// Whether this is a utility.
    #[must_use]
    pub fn is_utility(&self) -> bool {
        matches!(self.kind, TileKind::Utility { .. })
    }

    /// Return the tile to the bank.
    pub fn release(&mut self) {
        self.owner = None;
        self.houses = 0;
    }
}
