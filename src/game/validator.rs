use crate::{error::SubmitError, game::MIN_WORD_LENGTH, models::LetterBudget};

/// A submission that passed every chaining rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWord {
    /// Lowercased word as it will appear in the chain
    pub text: String,
    pub first: char,
    pub last: char,
}

pub struct WordValidator;

impl WordValidator {
    /// Run the chaining rules against `raw`, stopping at the first failure.
    ///
    /// Order matters: characters, length, repetition, continuity, budget.
    pub fn validate(
        raw: &str,
        chain: &[String],
        budget: &LetterBudget,
    ) -> Result<ValidatedWord, SubmitError> {
        let word = raw.to_ascii_lowercase();

        if !Self::is_letters_only(&word) {
            return Err(SubmitError::InvalidCharacters);
        }

        // ASCII only from here on, so byte length is letter count
        if word.len() < MIN_WORD_LENGTH {
            return Err(SubmitError::TooShort {
                min_len: MIN_WORD_LENGTH,
            });
        }

        if Self::is_already_used(&word, chain) {
            return Err(SubmitError::AlreadyUsed { word });
        }

        let bytes = word.as_bytes();
        let first = bytes[0] as char;
        let last = bytes[bytes.len() - 1] as char;

        if let Some(required) = Self::required_letter(chain) {
            if first != required {
                return Err(SubmitError::ChainMismatch { required });
            }
        }

        if budget.remaining(first) == 0 {
            return Err(SubmitError::LetterExhausted { letter: first });
        }

        Ok(ValidatedWord {
            text: word,
            first,
            last,
        })
    }

    /// Non-empty and nothing but a-z / A-Z
    fn is_letters_only(word: &str) -> bool {
        !word.is_empty() && word.bytes().all(|b| b.is_ascii_alphabetic())
    }

    fn is_already_used(word: &str, chain: &[String]) -> bool {
        chain.iter().any(|used| used.eq_ignore_ascii_case(word))
    }

    fn required_letter(chain: &[String]) -> Option<char> {
        chain
            .last()
            .and_then(|word| word.chars().last())
            .map(|ch| ch.to_ascii_lowercase())
    }
}
