//! Standard board layout.

use super::tile::{ColorGroup, Tile, TileKind};

fn property(index: u8, name: &str, price: u64, group: ColorGroup) -> Tile {
    // Base rent is a tenth of the price on every standard property.
    Tile::new(
        index,
        name,
        TileKind::Property {
            price,
            base_rent: price / 10,
            group,
        },
    )
}

fn utility(index: u8, name: &str) -> Tile {
    Tile::new(index, name, TileKind::Utility { price: 200 })
}

/// The 36 tiles of the standard board, in ring order.
pub(super) fn standard_tiles() -> Vec<Tile> {
    use ColorGroup::*;

    vec![
        Tile::new(0, "START", TileKind::Start),
        property(1, "Alpha Block", 100, LightBlue),
        property(2, "Delta Block", 100, LightBlue),
        property(3, "Sigma Block", 100, LightBlue),
        utility(4, "Electricity"),
        utility(5, "Transport"),
        property(6, "Sports", 150, LightGreen),
        property(7, "Parking", 150, LightGreen),
        property(8, "Courier Point", 150, LightGreen),
        Tile::new(9, "CHANCE", TileKind::Chance),
        property(10, "Aavin", 170, Orange),
        property(11, "Hunger", 170, Orange),
        property(12, "Gym Khana", 200, DarkBlue),
        property(13, "Dominos", 200, DarkBlue),
        utility(14, "Water Pump"),
        property(15, "VMart", 220, DarkGreen),
        property(16, "North Square", 220, DarkGreen),
        property(17, "Gazebo", 220, DarkGreen),
        Tile::new(18, "JAIL", TileKind::Jail),
        property(19, "Chota Dhobi", 250, Brown),
        property(20, "Mess", 250, Brown),
        property(21, "A Block", 270, Yellow),
        property(22, "D1 Block", 270, Yellow),
        property(23, "D2 Block", 270, Yellow),
        utility(24, "Health Center"),
        property(25, "B Block", 300, Pink),
        property(26, "C Block", 300, Pink),
        Tile::new(27, "IOT", TileKind::Penalty),
        property(28, "AB-1", 350, Red),
        property(29, "AB-2", 350, Red),
        property(30, "AB-3", 350, Red),
        property(31, "AB-4", 350, Red),
        utility(32, "Library"),
        property(33, "Guest House", 400, Purple),
        property(34, "MG Auditorium", 450, Purple),
        property(35, "ADMIN BLOCK", 700, OrangePremium),
    ]
}
