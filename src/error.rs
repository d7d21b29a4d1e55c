use serde::Serialize;
use thiserror::Error;

/// Why a submitted word was turned down. Rejections are recoverable and
/// leave the session untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitError {
    #[error("Word can only contain letters")]
    InvalidCharacters,
    #[error("Word must be at least {min_len} letters long")]
    TooShort { min_len: usize },
    #[error("Word has already been used")]
    AlreadyUsed { word: String },
    #[error("Word must start with \"{}\"", .required.to_ascii_uppercase())]
    ChainMismatch { required: char },
    #[error("No more uses remaining for letter \"{}\"", .letter.to_ascii_uppercase())]
    LetterExhausted { letter: char },
}
