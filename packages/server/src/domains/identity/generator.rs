//! Alias candidate generation.
//!
//! Candidates read as adjective + noun + two-digit number ("QuietWillow42").
//! The word lists lean calm on purpose - these names sit next to people's
//! hardest moments. Uniqueness is NOT guaranteed here; the alias model owns
//! the atomic check-and-reserve.

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Amber", "Bright", "Calm", "Clever", "Cozy", "Gentle", "Golden", "Hazel",
    "Honest", "Humble", "Kind", "Lively", "Lucky", "Mellow", "Merry", "Misty",
    "Patient", "Peaceful", "Quiet", "Rosy", "Serene", "Steady", "Sunny", "Warm",
];

const NOUNS: &[&str] = &[
    "Aspen", "Birch", "Breeze", "Brook", "Cedar", "Clover", "Dawn", "Fern",
    "Harbor", "Heron", "Juniper", "Lake", "Lantern", "Meadow", "Otter", "Pebble",
    "Pine", "River", "Robin", "Sparrow", "Trail", "Willow", "Wren", "Yarrow",
];

/// One aesthetic candidate, e.g. "GentleRiver42".
pub fn candidate() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let number = rng.random_range(10..100);
    format!("{adjective}{noun}{number}")
}

/// A candidate with a timestamp suffix, used once the aesthetic attempts are
/// exhausted. Less pretty, but collisions become practically impossible.
pub fn forced_candidate(timestamp_millis: i64) -> String {
    format!("{}-{}", candidate(), timestamp_millis)
}
