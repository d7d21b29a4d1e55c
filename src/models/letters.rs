use serde::Serialize;
use std::collections::BTreeMap;

use crate::utils::letters::{letter_capacity, INITIAL_LETTER_LIMITS};

/// Bonus attached to a letter for the current turn. Applies when a word
/// ends with that letter.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Multiplier {
    #[serde(rename = "2x")]
    Double,
    #[serde(rename = "3x")]
    Triple,
}

impl Multiplier {
    pub fn value(self) -> u32 {
        match self {
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }
}

pub type MultiplierSet = BTreeMap<char, Multiplier>;

/// Remaining uses per letter as the first letter of a word.
///
/// Keys are the lowercase letters a-z, ordered, so iteration is
/// deterministic for seeded multiplier draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LetterBudget(BTreeMap<char, u8>);

impl LetterBudget {
    /// Every letter at its starting capacity
    pub fn full() -> Self {
        Self(INITIAL_LETTER_LIMITS.clone())
    }

    pub fn remaining(&self, letter: char) -> u8 {
        self.0
            .get(&letter.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Use up one start for `letter`. Returns false (and changes nothing)
    /// when the letter is already exhausted.
    pub fn consume(&mut self, letter: char) -> bool {
        match self.0.get_mut(&letter.to_ascii_lowercase()) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Letters that can still start a word, in alphabetical order
    pub fn available_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0
            .iter()
            .filter(|&(_, &remaining)| remaining > 0)
            .map(|(&letter, _)| letter)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        self.0.iter().map(|(&letter, &remaining)| (letter, remaining))
    }

    #[cfg(test)]
    pub(crate) fn set_remaining(&mut self, letter: char, remaining: u8) {
        self.0.insert(letter, remaining);
    }
}

impl Default for LetterBudget {
    fn default() -> Self {
        Self::full()
    }
}

/// Coarse budget level, for colouring a letter board
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    Exhausted,
    Scarce,
    Available,
}

impl LetterStatus {
    pub fn from_remaining(remaining: u8) -> Self {
        match remaining {
            0 => LetterStatus::Exhausted,
            1 => LetterStatus::Scarce,
            _ => LetterStatus::Available,
        }
    }
}

/// One tile of the letter board as the presentation layer sees it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LetterInfo {
    pub letter: char,
    pub remaining: u8,
    pub total: u8,
    pub status: LetterStatus,
    pub multiplier: Option<Multiplier>,
    pub is_required: bool,
}

impl LetterInfo {
    pub fn new(
        letter: char,
        remaining: u8,
        multiplier: Option<Multiplier>,
        is_required: bool,
    ) -> Self {
        Self {
            letter,
            remaining,
            total: letter_capacity(letter),
            status: LetterStatus::from_remaining(remaining),
            // Exhausted letters never show a bonus
            multiplier: multiplier.filter(|_| remaining > 0),
            is_required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_stops_at_zero() {
        let mut budget = LetterBudget::full();
        assert_eq!(budget.remaining('z'), 1);

        assert!(budget.consume('z'));
        assert_eq!(budget.remaining('z'), 0);

        assert!(!budget.consume('z'), "Exhausted letter should not be consumed again");
        assert_eq!(budget.remaining('z'), 0);
    }

    #[test]
    fn test_remaining_is_case_insensitive() {
        let mut budget = LetterBudget::full();
        assert!(budget.consume('A'));
        assert_eq!(budget.remaining('a'), 2);
        assert_eq!(budget.remaining('A'), 2);
        assert_eq!(budget.remaining('#'), 0);
    }

    #[test]
    fn test_available_letters_skip_exhausted() {
        let mut budget = LetterBudget::full();
        budget.consume('j');
        budget.consume('k');

        let available: Vec<char> = budget.available_letters().collect();
        assert_eq!(available.len(), 24);
        assert!(!available.contains(&'j'));
        assert!(!available.contains(&'k'));
        assert_eq!(available.first(), Some(&'a'));
    }

    #[test]
    fn test_letter_status() {
        assert_eq!(LetterStatus::from_remaining(0), LetterStatus::Exhausted);
        assert_eq!(LetterStatus::from_remaining(1), LetterStatus::Scarce);
        assert_eq!(LetterStatus::from_remaining(3), LetterStatus::Available);
    }

    #[test]
    fn test_letter_info_hides_multiplier_when_exhausted() {
        let info = LetterInfo::new('q', 0, Some(Multiplier::Triple), false);
        assert_eq!(info.total, 1);
        assert_eq!(info.status, LetterStatus::Exhausted);
        assert!(info.multiplier.is_none());

        let info = LetterInfo::new('e', 2, Some(Multiplier::Double), true);
        assert_eq!(info.multiplier, Some(Multiplier::Double));
        assert!(info.is_required);
    }
}
