// Word chain rules engine

pub mod engine;
pub mod multipliers;
pub mod scorer;
pub mod validator;

pub use engine::{GameEngine, SubmitOutcome};
pub use multipliers::MultiplierGenerator;
pub use scorer::Scorer;
pub use validator::{ValidatedWord, WordValidator};

/// Seconds on the clock at the start of every turn
pub const TURN_TIME_ALLOWANCE: u32 = 10;

/// Shortest word the chain accepts
pub const MIN_WORD_LENGTH: usize = 3;
