//! The board: a fixed ring of tiles plus the color-group index.
//!
//! ## Layout
//!
//! The shape of the board never changes after construction; only tile
//! ownership and house counts mutate. All position arithmetic is modulo
//! [`RING_SIZE`].
//!
//! Tiles are stored in an `im::Vector` so snapshotting the board after
//! every operation is O(1).

mod layout;
mod tile;

pub use tile::{ColorGroup, Tile, TileIndex, TileKind};

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Number of tiles on the ring.
pub const RING_SIZE: u8 = 36;

/// Ordered member tiles of one color group.
pub type GroupMembers = SmallVec<[TileIndex; 4]>;

/// The game board.
///
/// Serializes as its tile list; the group index is rebuilt on the way in.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Board {
    tiles: Vector<Tile>,

    /// Color group → member positions in board order.
    groups: FxHashMap<ColorGroup, GroupMembers>,
}

impl Board {
    /// Build a board from tiles in ring order.
    ///
    /// Panics if the tile count is not [`RING_SIZE`] or a tile's index does
    /// not match its position; both are authoring errors in static data.
    #[must_use]
    pub fn new(tiles: Vec<Tile>) -> Self {
        match Self::try_from(tiles) {
            Ok(board) => board,
            Err(msg) => panic!("{}", msg),
        }
    }

    /// The standard 36-tile board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(layout::standard_tiles())
    }

    fn index_groups(tiles: &[Tile]) -> FxHashMap<ColorGroup, GroupMembers> {
        let mut groups: FxHashMap<ColorGroup, GroupMembers> = FxHashMap::default();
        for tile in tiles {
            if let Some(group) = tile.group() {
                groups.entry(group).or_default().push(tile.index);
            }
        }
        groups
    }

    /// Get a tile.
    #[must_use]
    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.tiles.get(index.index())
    }

    /// Get a mutable tile.
    pub fn tile_mut(&mut self, index: TileIndex) -> Option<&mut Tile> {
        self.tiles.get_mut(index.index())
    }

    /// Iterate over all tiles in ring order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Whether an index is on the board.
    #[must_use]
    pub fn contains(&self, index: TileIndex) -> bool {
        index.index() < self.tiles.len()
    }

    /// Member tiles of a color group, in board order.
    #[must_use]
    pub fn group_members(&self, group: ColorGroup) -> &[TileIndex] {
        self.groups.get(&group).map_or(&[], |members| members.as_slice())
    }

    /// Whether `player` owns every tile of `group`.
    #[must_use]
    pub fn monopolizes(&self, player: PlayerId, group: ColorGroup) -> bool {
        let members = self.group_members(group);
        !members.is_empty()
            && members
                .iter()
                .all(|&i| self.tile(i).and_then(|t| t.owner) == Some(player))
    }

    /// Utility tiles in board order.
    pub fn utilities(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.is_utility())
    }

    /// Number of utilities owned by `player`.
    #[must_use]
    pub fn utilities_owned_by(&self, player: PlayerId) -> usize {
        self.utilities().filter(|t| t.owner == Some(player)).count()
    }

    /// Position of the first jail tile.
    #[must_use]
    pub fn jail(&self) -> Option<TileIndex> {
        self.tiles
            .iter()
            .find(|t| t.kind == TileKind::Jail)
            .map(|t| t.index)
    }

    /// Shortest distance between two positions going either way round.
    #[must_use]
    pub fn ring_distance(from: TileIndex, to: TileIndex) -> u8 {
        let direct = from.0.abs_diff(to.0);
        direct.min(RING_SIZE - direct)
    }
}

impl TryFrom<Vec<Tile>> for Board {
    type Error = String;

    fn try_from(tiles: Vec<Tile>) -> Result<Self, Self::Error> {
        if tiles.len() != usize::from(RING_SIZE) {
            return Err(format!("Board must have exactly {} tiles", RING_SIZE));
        }
        if let Some((i, tile)) = tiles.iter().enumerate().find(|(i, t)| t.index.index() != *i) {
            return Err(format!("Tile {} is out of order at position {}", tile.name, i));
        }

        let groups = Self::index_groups(&tiles);
        Ok(Self {
            tiles: tiles.into_iter().collect(),
            groups,
        })
    }
}

impl From<Board> for Vec<Tile> {
    fn from(board: Board) -> Self {
        board.tiles.into_iter().collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
