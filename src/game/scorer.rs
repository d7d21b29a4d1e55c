use crate::models::{LetterBudget, MultiplierSet, ScoreBreakdown};

/// Bonus for using the last start of a letter
const EXHAUSTING_BONUS: u32 = 15;
/// Bonus for leaving a letter with a single start
const SCARCITY_BONUS: u32 = 5;

pub struct Scorer;

impl Scorer {
    /// Score an already validated word.
    ///
    /// `budget` is the letter budget *before* the word consumes its first
    /// letter. Scoring rules:
    /// - 2 points per letter
    /// - speed bonus of 1.5 points per remaining second, rounded down
    /// - +15 if the word uses the last start of its first letter, +5 if
    ///   exactly one start is left afterwards
    /// - the whole sum is multiplied by the bonus on the word's last letter
    pub fn calculate(
        word: &str,
        time_remaining: u32,
        budget: &LetterBudget,
        multipliers: &MultiplierSet,
    ) -> ScoreBreakdown {
        let base_points = Self::base_points(word);
        let time_bonus = Self::time_bonus(time_remaining);
        let scarcity_bonus = word
            .chars()
            .next()
            .map(|first| Self::scarcity_bonus(budget.remaining(first)))
            .unwrap_or(0);

        let last = word.chars().last().map(|ch| ch.to_ascii_lowercase());
        let bonus = last.and_then(|ch| multipliers.get(&ch).map(|m| (ch, m.value())));
        let multiplier = bonus.map(|(_, value)| value).unwrap_or(1);

        ScoreBreakdown {
            word: word.to_string(),
            base_points,
            time_bonus,
            scarcity_bonus,
            multiplier,
            multiplier_letter: bonus.map(|(ch, _)| ch),
            total: (base_points + time_bonus + scarcity_bonus) * multiplier,
        }
    }

    fn base_points(word: &str) -> u32 {
        word.chars().count() as u32 * 2
    }

    /// floor(seconds * 1.5)
    fn time_bonus(time_remaining: u32) -> u32 {
        time_remaining * 3 / 2
    }

    fn scarcity_bonus(remaining_before_use: u8) -> u32 {
        match remaining_before_use {
            1 => EXHAUSTING_BONUS,
            2 => SCARCITY_BONUS,
            _ => 0,
        }
    }
}
