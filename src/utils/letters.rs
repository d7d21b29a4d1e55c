use std::collections::BTreeMap;
use once_cell::sync::Lazy;

/// Words a new chain can open with. All lowercase ASCII.
pub const SEED_WORDS: [&str; 24] = [
    "apple", "beach", "cloud", "dance", "earth", "flame", "green", "heart",
    "image", "juice", "kite", "light", "music", "night", "ocean", "peace",
    "quiet", "river", "storm", "table", "until", "voice", "water", "youth",
];

/// How many words may start with each letter in a single game.
/// Vowels get three uses, rare consonants a single one.
pub static INITIAL_LETTER_LIMITS: Lazy<BTreeMap<char, u8>> = Lazy::new(|| {
    let mut map = BTreeMap::new();

    // 3 uses
    for ch in ['a', 'e', 'i', 'o'] {
        map.insert(ch, 3);
    }

    // 2 uses
    for ch in [
        'b', 'c', 'd', 'f', 'g', 'h', 'l', 'm', 'n', 'p', 'r', 's', 't', 'u', 'w',
    ] {
        map.insert(ch, 2);
    }

    // 1 use
    for ch in ['j', 'k', 'q', 'v', 'x', 'y', 'z'] {
        map.insert(ch, 1);
    }

    map
});

/// Get the starting capacity for a letter (0 for anything outside a-z)
pub fn letter_capacity(letter: char) -> u8 {
    let lower = letter.to_ascii_lowercase();
    INITIAL_LETTER_LIMITS.get(&lower).copied().unwrap_or(0)
}
