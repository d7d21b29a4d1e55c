//! Rules engine for a single-player word chain game.
//!
//! Each word must start with the last letter of the previous one. Every
//! letter can only open a limited number of words, the turn timer rewards
//! fast answers, and a few letters carry a 2x/3x bonus each turn when a word
//! ends on them.
//!
//! ```
//! use word_chain::{GameEngine, SubmitOutcome};
//!
//! let mut engine = GameEngine::with_seed(7);
//! engine.start();
//!
//! let required = engine.required_letter().unwrap();
//! let outcome = engine.submit("x");
//! assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
//! assert_eq!(engine.required_letter(), Some(required));
//!
//! // The caller drives the clock
//! engine.tick();
//! assert_eq!(engine.time_remaining(), 9);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod utils;

pub use error::SubmitError;
pub use game::{GameEngine, SubmitOutcome};
pub use models::{GameOverReason, GameSnapshot, ScoreBreakdown, SessionState};
