use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::SubmitError,
    game::{MultiplierGenerator, Scorer, WordValidator, TURN_TIME_ALLOWANCE},
    models::{
        GameOverReason, GameSession, GameSnapshot, GameSummary, LetterBudget, LetterInfo,
        MultiplierSet, ScoreBreakdown, SessionState,
    },
    utils::letters::SEED_WORDS,
};

/// Result of handing a word to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Word joined the chain and scored
    Accepted(ScoreBreakdown),
    /// Word broke a rule; nothing changed
    Rejected(SubmitError),
    /// No session was accepting input (idle, over, or mid-submission)
    Ignored,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            SubmitOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }

    pub fn breakdown(&self) -> Option<&ScoreBreakdown> {
        match self {
            SubmitOutcome::Accepted(breakdown) => Some(breakdown),
            _ => None,
        }
    }
}

/// Owns one game session at a time plus the high score, which outlives
/// sessions.
///
/// Time is driven from outside: the caller invokes [`GameEngine::tick`] once
/// per second while the session is active.
pub struct GameEngine<R = StdRng> {
    rng: R,
    state: SessionState,
    session: GameSession,
    high_score: u32,
}

impl GameEngine<StdRng> {
    /// Engine seeded from the operating system
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Engine with a fixed seed, for reproducible games
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            state: SessionState::Idle,
            session: GameSession::default(),
            high_score: 0,
        }
    }

    /// Begin a fresh session with a random seed word. Abandons any session
    /// in progress.
    pub fn start(&mut self) {
        let index = self.rng.random_range(0..SEED_WORDS.len());
        self.begin(SEED_WORDS[index]);
    }

    /// Same as [`GameEngine::start`]; the action offered after game over
    pub fn restart(&mut self) {
        self.start();
    }

    fn begin(&mut self, seed_word: &str) {
        let seed_word = seed_word.to_ascii_lowercase();

        // The seed word spends a start of its own first letter
        let mut budget = LetterBudget::full();
        if let Some(first) = seed_word.chars().next() {
            budget.consume(first);
        }
        let multipliers = MultiplierGenerator::generate(&budget, &mut self.rng);

        tracing::info!(
            "Game started with seed word '{}' (multipliers: {:?})",
            seed_word,
            multipliers
        );

        self.session = GameSession::new(seed_word, budget, multipliers);
        self.state = SessionState::Active;
    }

    /// Advance the turn timer by one second. Does nothing unless active.
    pub fn tick(&mut self) {
        if !self.state.is_active() {
            return;
        }

        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        if self.session.time_remaining == 0 {
            self.finish(GameOverReason::TimeExpired);
        }
    }

    /// Try to extend the chain with `raw`.
    ///
    /// Only an active session takes submissions. While one is being applied
    /// the session sits in [`SessionState::Submitting`], and anything that
    /// arrives then is dropped rather than queued.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if !self.state.is_active() {
            tracing::debug!("Ignoring submission '{}' in state {:?}", raw, self.state);
            return SubmitOutcome::Ignored;
        }

        self.state = SessionState::Submitting;

        let word = match WordValidator::validate(
            raw,
            &self.session.chain,
            &self.session.budget,
        ) {
            Ok(word) => word,
            Err(err) => {
                tracing::debug!("Rejected '{}': {}", raw, err);
                self.session.last_error = Some(err.clone());
                self.state = SessionState::Active;
                return SubmitOutcome::Rejected(err);
            }
        };

        // Score against the budget before this word spends its first letter
        let breakdown = Scorer::calculate(
            &word.text,
            self.session.time_remaining,
            &self.session.budget,
            &self.session.multipliers,
        );

        self.session.budget.consume(word.first);
        self.session.chain.push(word.text);
        self.session.score += breakdown.total;
        self.high_score = self.high_score.max(self.session.score);
        self.session.last_breakdown = Some(breakdown.clone());
        self.session.last_error = None;

        tracing::info!(
            "Accepted '{}' for {} points (score {})",
            breakdown.word,
            breakdown.total,
            self.session.score
        );

        // The word still counts even when it leaves the chain nowhere to go
        if self.session.budget.remaining(word.last) == 0 {
            self.finish(GameOverReason::DeadEnd { letter: word.last });
        } else {
            self.session.time_remaining = TURN_TIME_ALLOWANCE;
            self.session.input.clear();
            self.session.multipliers =
                MultiplierGenerator::generate(&self.session.budget, &mut self.rng);
            self.state = SessionState::Active;
        }

        SubmitOutcome::Accepted(breakdown)
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> SubmitOutcome {
        let raw = self.session.input.clone();
        self.submit(&raw)
    }

    /// Replace the input buffer. Only an active session takes typing.
    pub fn set_input(&mut self, text: &str) {
        if self.state.is_active() {
            self.session.input = text.to_string();
        }
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.state = SessionState::Over { reason };
        tracing::info!(
            "Game over: {} (chain length {}, score {}, high score {})",
            reason,
            self.session.chain.len(),
            self.session.score,
            self.high_score
        );
    }
}

impl<R> GameEngine<R> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting)
    }

    pub fn chain(&self) -> &[String] {
        &self.session.chain
    }

    pub fn letter_budget(&self) -> &LetterBudget {
        &self.session.budget
    }

    pub fn multipliers(&self) -> &MultiplierSet {
        &self.session.multipliers
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn input(&self) -> &str {
        &self.session.input
    }

    pub fn last_breakdown(&self) -> Option<&ScoreBreakdown> {
        self.session.last_breakdown.as_ref()
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.session.last_error.as_ref()
    }

    /// Letter the next word must start with; `None` unless a game is running
    pub fn required_letter(&self) -> Option<char> {
        if !self.state.is_in_progress() {
            return None;
        }
        self.session.required_letter()
    }

    /// Letter board in alphabetical order
    pub fn letters(&self) -> Vec<LetterInfo> {
        let required = self.required_letter();
        self.session
            .budget
            .iter()
            .map(|(letter, remaining)| {
                LetterInfo::new(
                    letter,
                    remaining,
                    self.session.multipliers.get(&letter).copied(),
                    required == Some(letter),
                )
            })
            .collect()
    }

    /// End-of-game figures, once the session is over
    pub fn summary(&self) -> Option<GameSummary> {
        match self.state {
            SessionState::Over { reason } => Some(GameSummary {
                reason,
                chain_length: self.session.chain.len(),
                final_score: self.session.score,
                high_score: self.high_score,
                is_new_high_score: self.session.score > 0
                    && self.session.score == self.high_score,
            }),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            chain: self.session.chain.clone(),
            letters: self.letters(),
            multipliers: self.session.multipliers.clone(),
            time_remaining: self.session.time_remaining,
            score: self.session.score,
            high_score: self.high_score,
            required_letter: self.required_letter(),
            input: self.session.input.clone(),
            last_breakdown: self.session.last_breakdown.clone(),
            error: self.session.last_error.as_ref().map(ToString::to_string),
            summary: self.summary(),
        }
    }
}
