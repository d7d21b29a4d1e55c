use rand::Rng;

use crate::models::{LetterBudget, Multiplier, MultiplierSet};

/// Letters tagged 2x per turn
const DOUBLE_COUNT: usize = 2;

pub struct MultiplierGenerator;

impl MultiplierGenerator {
    /// Pick this turn's bonus letters from those that can still start a word.
    ///
    /// Up to two distinct letters get 2x, then one more distinct letter gets
    /// 3x if any remain. Draws are uniform and without replacement.
    pub fn generate(budget: &LetterBudget, rng: &mut impl Rng) -> MultiplierSet {
        let mut pool: Vec<char> = budget.available_letters().collect();
        let mut multipliers = MultiplierSet::new();

        for _ in 0..DOUBLE_COUNT {
            match Self::draw(&mut pool, rng) {
                Some(letter) => {
                    multipliers.insert(letter, Multiplier::Double);
                }
                None => return multipliers,
            }
        }

        if let Some(letter) = Self::draw(&mut pool, rng) {
            multipliers.insert(letter, Multiplier::Triple);
        }

        multipliers
    }

    fn draw(pool: &mut Vec<char>, rng: &mut impl Rng) -> Option<char> {
        if pool.is_empty() {
            return None;
        }
        let index = rng.random_range(0..pool.len());
        Some(pool.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn count(multipliers: &MultiplierSet, kind: Multiplier) -> usize {
        multipliers.values().filter(|&&m| m == kind).count()
    }

    #[test]
    fn test_full_budget_gets_two_doubles_and_a_triple() {
        let budget = LetterBudget::full();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let multipliers = MultiplierGenerator::generate(&budget, &mut rng);

            assert_eq!(multipliers.len(), 3, "seed {} should tag three letters", seed);
            assert_eq!(count(&multipliers, Multiplier::Double), 2);
            assert_eq!(count(&multipliers, Multiplier::Triple), 1);
        }
    }

    #[test]
    fn test_only_available_letters_are_tagged() {
        let mut budget = LetterBudget::full();
        for letter in 'a'..='z' {
            if !"xyz".contains(letter) {
                budget.set_remaining(letter, 0);
            }
        }

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let multipliers = MultiplierGenerator::generate(&budget, &mut rng);
            assert!(
                multipliers.keys().all(|letter| "xyz".contains(*letter)),
                "Exhausted letters must not receive a multiplier: {:?}",
                multipliers
            );
        }
    }

    #[test]
    fn test_small_pools() {
        let mut budget = LetterBudget::full();
        for letter in 'a'..='z' {
            budget.set_remaining(letter, 0);
        }
        let mut rng = StdRng::seed_from_u64(7);
        assert!(MultiplierGenerator::generate(&budget, &mut rng).is_empty());

        budget.set_remaining('m', 1);
        let multipliers = MultiplierGenerator::generate(&budget, &mut rng);
        assert_eq!(multipliers.get(&'m'), Some(&Multiplier::Double));
        assert_eq!(multipliers.len(), 1);

        budget.set_remaining('n', 2);
        let multipliers = MultiplierGenerator::generate(&budget, &mut rng);
        assert_eq!(count(&multipliers, Multiplier::Double), 2);
        assert_eq!(count(&multipliers, Multiplier::Triple), 0);
    }

    #[test]
    fn test_same_seed_same_multipliers() {
        let budget = LetterBudget::full();
        let first = MultiplierGenerator::generate(&budget, &mut StdRng::seed_from_u64(42));
        let second = MultiplierGenerator::generate(&budget, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
