pub mod game;
pub mod letters;

pub use game::{
    // Session state
    GameOverReason, GameSession, SessionState,
    // Display records
    GameSnapshot, GameSummary, ScoreBreakdown,
};
pub use letters::{LetterBudget, LetterInfo, LetterStatus, Multiplier, MultiplierSet};
