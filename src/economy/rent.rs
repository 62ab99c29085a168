//! Pure price arithmetic: rent, upgrade cost, house value.
//!
//! All multipliers are applied in integer math. The 1.5× per-house factor
//! is computed as `base · 3^h / 2^h`, which equals `floor(base × 1.5^h)`
//! exactly.

/// Dice total assumed for utility rent before anyone has rolled.
pub const DEFAULT_ROLL_TOTAL: u64 = 7;

/// Rent for a property.
///
/// Base rent doubles under a monopoly, then each house multiplies it by
/// 1.5, compounding, rounded down once at the end.
#[must_use]
pub fn property_rent(base_rent: u64, monopolized: bool, houses: u8) -> u64 {
    let base = if monopolized {
        base_rent.saturating_mul(2)
    } else {
        base_rent
    };
    let h = u32::from(houses);
    base.saturating_mul(3u64.saturating_pow(h)) / 2u64.saturating_pow(h)
}

/// Dice multiplier for utilities, by how many utilities the owner holds.
#[must_use]
pub fn utility_multiplier(owned: usize) -> u64 {
    match owned {
        1 => 4,
        2 => 10,
        3 => 15,
        _ => 20,
    }
}

/// Rent for a utility.
#[must_use]
pub fn utility_rent(owned: usize, roll_total: Option<u64>) -> u64 {
    utility_multiplier(owned).saturating_mul(roll_total.unwrap_or(DEFAULT_ROLL_TOTAL))
}

/// Cost of one house: half the price, rounded up.
#[must_use]
pub fn upgrade_cost(price: u64) -> u64 {
    price.div_ceil(2)
}

/// Liquidation value of one house: half the price, rounded down.
#[must_use]
pub fn house_value(price: u64) -> u64 {
    price / 2
}
