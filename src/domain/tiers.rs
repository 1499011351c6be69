/// Competitive tier ladder as indexed by the stats API.
///
/// Indices 1 and 2 are unused legacy slots and render as "Unknown".
const TIER_NAMES: [&str; 28] = [
    "Unranked",
    "Unknown",
    "Unknown",
    "Iron 1",
    "Iron 2",
    "Iron 3",
    "Bronze 1",
    "Bronze 2",
    "Bronze 3",
    "Silver 1",
    "Silver 2",
    "Silver 3",
    "Gold 1",
    "Gold 2",
    "Gold 3",
    "Platinum 1",
    "Platinum 2",
    "Platinum 3",
    "Diamond 1",
    "Diamond 2",
    "Diamond 3",
    "Ascendant 1",
    "Ascendant 2",
    "Ascendant 3",
    "Immortal 1",
    "Immortal 2",
    "Immortal 3",
    "Radiant",
];

/// Display name for a tier index
pub fn tier_name(tier_index: u32) -> &'static str {
    TIER_NAMES
        .get(tier_index as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Tier family ("Gold", "Immortal", ...) used for emoji lookup
pub fn tier_family(tier_name: &str) -> &str {
    tier_name.split_whitespace().next().unwrap_or(tier_name)
}
