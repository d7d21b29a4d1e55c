use serde::Serialize;
use std::fmt;

use crate::{
    error::SubmitError,
    game::TURN_TIME_ALLOWANCE,
    models::letters::{LetterBudget, LetterInfo, MultiplierSet},
};

/// Why a session ended
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// The turn timer reached zero
    TimeExpired,
    /// The last accepted word ended on a letter with no uses left
    DeadEnd { letter: char },
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::TimeExpired => write!(f, "time ran out"),
            GameOverReason::DeadEnd { letter } => write!(
                f,
                "no words can start with \"{}\" anymore",
                letter.to_ascii_uppercase()
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No game has been started yet
    Idle,
    /// Accepting words, timer running
    Active,
    /// A submission is being applied; further submissions are dropped
    Submitting,
    /// Terminal until restarted
    Over { reason: GameOverReason },
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }

    /// Active or in the middle of a submission
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SessionState::Active | SessionState::Submitting)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, SessionState::Over { .. })
    }
}

/// How the points for one accepted word were made up
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub word: String,
    pub base_points: u32,
    pub time_bonus: u32,
    /// +15 when the word used the last start of its first letter, +5 when one is left
    pub scarcity_bonus: u32,
    pub multiplier: u32,
    /// Letter that granted the multiplier; only set when multiplier > 1
    pub multiplier_letter: Option<char>,
    pub total: u32,
}

/// Per-game state. Replaced wholesale on every start; the high score lives
/// on the engine instead.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub chain: Vec<String>,
    pub budget: LetterBudget,
    pub multipliers: MultiplierSet,
    pub time_remaining: u32,
    pub score: u32,
    pub input: String,
    pub last_breakdown: Option<ScoreBreakdown>,
    pub last_error: Option<SubmitError>,
}

impl GameSession {
    pub fn new(seed_word: String, budget: LetterBudget, multipliers: MultiplierSet) -> Self {
        Self {
            chain: vec![seed_word],
            budget,
            multipliers,
            ..Self::default()
        }
    }

    /// Letter the next word has to start with
    pub fn required_letter(&self) -> Option<char> {
        self.chain.last().and_then(|word| word.chars().last())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            chain: Vec::new(),
            budget: LetterBudget::full(),
            multipliers: MultiplierSet::new(),
            time_remaining: TURN_TIME_ALLOWANCE,
            score: 0,
            input: String::new(),
            last_breakdown: None,
            last_error: None,
        }
    }
}

/// End-of-game summary
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameSummary {
    pub reason: GameOverReason,
    pub chain_length: usize,
    pub final_score: u32,
    pub high_score: u32,
    pub is_new_high_score: bool,
}

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub state: SessionState,
    pub chain: Vec<String>,
    pub letters: Vec<LetterInfo>,
    pub multipliers: MultiplierSet,
    pub time_remaining: u32,
    pub score: u32,
    pub high_score: u32,
    pub required_letter: Option<char>,
    pub input: String,
    pub last_breakdown: Option<ScoreBreakdown>,
    pub error: Option<String>,
    pub summary: Option<GameSummary>,
}
