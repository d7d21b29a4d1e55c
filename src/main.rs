use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use rand::Rng;
use tokio::{
    sync::mpsc,
    time::{self, Instant, MissedTickBehavior},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use word_chain::{config::Config, GameEngine, SessionState, SubmitOutcome};

/// Player input besides plain words
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Restart,
    Word(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "/quit" | "/exit" => Command::Quit,
        "/restart" => Command::Restart,
        word => Command::Word(word),
    }
}

/// Plain text (or JSON snapshot) rendering of the engine for a terminal
struct View<W> {
    out: W,
    json: bool,
}

impl<W: Write> View<W> {
    fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    fn snapshot<R>(&mut self, engine: &GameEngine<R>) -> Result<()> {
        serde_json::to_writer(&mut self.out, &engine.snapshot())
            .context("Failed to serialize snapshot")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn board<R>(&mut self, engine: &GameEngine<R>) -> Result<()> {
        if self.json {
            return self.snapshot(engine);
        }
        if engine.state().is_over() {
            return self.game_over(engine);
        }

        let letters = engine
            .letters()
            .iter()
            .map(|info| format!("{}{}", info.letter.to_ascii_uppercase(), info.remaining))
            .collect::<Vec<_>>()
            .join(" ");
        let bonuses = engine
            .multipliers()
            .iter()
            .map(|(letter, m)| format!("{} {}x", letter.to_ascii_uppercase(), m.value()))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(self.out, "Chain: {}", engine.chain().join(" → "))?;
        writeln!(
            self.out,
            "Score: {}  High score: {}  Time: {}s",
            engine.score(),
            engine.high_score(),
            engine.time_remaining()
        )?;
        writeln!(self.out, "Letters: {}", letters)?;
        writeln!(self.out, "Bonus letters: {}", bonuses)?;
        if let Some(required) = engine.required_letter() {
            writeln!(
                self.out,
                "Enter a word starting with \"{}\"",
                required.to_ascii_uppercase()
            )?;
        }
        Ok(())
    }

    fn outcome<R>(&mut self, engine: &GameEngine<R>, outcome: &SubmitOutcome) -> Result<()> {
        if self.json {
            return self.snapshot(engine);
        }

        match outcome {
            SubmitOutcome::Accepted(breakdown) => {
                match breakdown.multiplier_letter {
                    Some(letter) => writeln!(
                        self.out,
                        "{} → {}x bonus ({}) = {} points",
                        breakdown.word,
                        breakdown.multiplier,
                        letter.to_ascii_uppercase(),
                        breakdown.total
                    )?,
                    None => writeln!(self.out, "{} = {} points", breakdown.word, breakdown.total)?,
                }
                self.board(engine)
            }
            SubmitOutcome::Rejected(err) => {
                writeln!(self.out, "! {}", err)?;
                Ok(())
            }
            SubmitOutcome::Ignored => Ok(()),
        }
    }

    fn tick<R>(&mut self, engine: &GameEngine<R>) -> Result<()> {
        if self.json {
            return self.snapshot(engine);
        }
        if engine.state().is_over() {
            return self.game_over(engine);
        }
        if engine.time_remaining() <= 3 {
            writeln!(self.out, "{}s left", engine.time_remaining())?;
        }
        Ok(())
    }

    fn game_over<R>(&mut self, engine: &GameEngine<R>) -> Result<()> {
        let Some(summary) = engine.summary() else {
            return Ok(());
        };

        writeln!(self.out, "Game Over! ({})", summary.reason)?;
        writeln!(self.out, "Chain: {}", engine.chain().join(" → "))?;
        writeln!(self.out, "Chain Length: {} words", summary.chain_length)?;
        writeln!(self.out, "Final Score: {}", summary.final_score)?;
        if summary.is_new_high_score {
            writeln!(self.out, "New High Score!")?;
        }
        writeln!(self.out, "Press Enter to play again or type /quit to exit.")?;
        Ok(())
    }
}

/// Run games until the player quits, or until input closes and the current
/// game has ended. Returns the engine so the caller can read the high score.
async fn play<R: Rng, W: Write>(
    mut engine: GameEngine<R>,
    mut lines: mpsc::Receiver<String>,
    tick_every: Duration,
    view: &mut View<W>,
) -> Result<GameEngine<R>> {
    engine.start();
    view.board(&engine)?;

    // First tick one full period after the turn starts
    let mut ticker = time::interval_at(Instant::now() + tick_every, tick_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut input_open = true;

    loop {
        if !input_open && !engine.state().is_in_progress() {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                if engine.state().is_active() {
                    engine.tick();
                    view.tick(&engine)?;
                }
            }
            line = lines.recv(), if input_open => {
                let Some(line) = line else {
                    tracing::debug!("Input closed, letting the current game run out");
                    input_open = false;
                    continue;
                };

                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Restart => {
                        engine.restart();
                        ticker.reset();
                        view.board(&engine)?;
                    }
                    Command::Word(word) => match engine.state() {
                        SessionState::Over { .. } if word.is_empty() => {
                            engine.restart();
                            ticker.reset();
                            view.board(&engine)?;
                        }
                        SessionState::Over { .. } => {
                            view.game_over(&engine)?;
                        }
                        _ => {
                            engine.set_input(word);
                            let outcome = engine.submit_input();
                            if outcome.is_accepted() {
                                ticker.reset();
                            }
                            view.outcome(&engine, &outcome)?;
                        }
                    },
                }
            }
        }
    }

    Ok(engine)
}

/// Forward stdin lines to the game loop from a dedicated thread
fn spawn_input_reader(tx: mpsc::Sender<String>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they stay out of the game text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_chain=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config.driver);

    let engine = match config.driver.seed {
        Some(seed) => GameEngine::with_seed(seed),
        None => GameEngine::new(),
    };

    let (tx, rx) = mpsc::channel(16);
    spawn_input_reader(tx);

    let mut view = View::new(io::stdout(), config.driver.json_output);
    let engine = play(engine, rx, config.tick_interval(), &mut view).await?;

    tracing::info!("Exiting with high score {}", engine.high_score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEVER: Duration = Duration::from_secs(3600);

    fn run(
        engine: GameEngine,
        lines: mpsc::Receiver<String>,
        tick_every: Duration,
        json: bool,
    ) -> (GameEngine, String) {
        let mut view = View::new(Vec::new(), json);
        let engine = tokio_test::block_on(play(engine, lines, tick_every, &mut view)).unwrap();
        (engine, String::from_utf8(view.out).unwrap())
    }

    fn scripted(lines: &[&str]) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            tx.try_send(line.to_string()).unwrap();
        }
        rx
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(" /quit "), Command::Quit);
        assert_eq!(parse_command("/restart"), Command::Restart);
        assert_eq!(parse_command("Eagle\n"), Command::Word("Eagle"));
        assert_eq!(parse_command(""), Command::Word(""));
    }

    #[test]
    fn test_quit_stops_the_game() {
        let (engine, output) = run(GameEngine::with_seed(3), scripted(&["/quit"]), NEVER, false);

        assert_eq!(engine.state(), SessionState::Active);
        assert!(output.contains("Enter a word starting with"));
    }

    #[test]
    fn test_rejection_is_reported() {
        let (engine, output) = run(
            GameEngine::with_seed(3),
            scripted(&["12", "/quit"]),
            NEVER,
            false,
        );

        assert_eq!(engine.chain().len(), 1);
        assert!(
            output.contains("! Word can only contain letters"),
            "Output should show the rejection: {}",
            output
        );
    }

    #[test]
    fn test_accepted_word_is_scored() {
        // A twin engine with the same seed opens with the same word
        let mut twin = GameEngine::with_seed(11);
        twin.start();
        let word = format!("{}ooo", twin.required_letter().unwrap());

        let (engine, output) = run(
            GameEngine::with_seed(11),
            scripted(&[word.as_str(), "/quit"]),
            NEVER,
            false,
        );

        assert_eq!(engine.chain().len(), 2);
        assert!(engine.score() > 0);
        assert!(output.contains(&format!("= {} points", engine.score())));
    }

    #[test]
    fn test_closed_input_plays_out_the_timer() {
        let (tx, rx) = mpsc::channel::<String>(1);
        drop(tx);

        let (engine, output) = run(
            GameEngine::with_seed(3),
            rx,
            Duration::from_millis(1),
            false,
        );

        assert!(engine.state().is_over());
        assert_eq!(engine.time_remaining(), 0);
        assert!(output.contains("Game Over! (time ran out)"));
        assert!(output.contains("1s left"));
    }

    #[test]
    fn test_json_output_is_one_snapshot_per_event() {
        let (_, output) = run(
            GameEngine::with_seed(3),
            scripted(&["12", "/quit"]),
            NEVER,
            true,
        );

        let snapshots: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0]["state"]["state"], "active");
        assert_eq!(snapshots[1]["error"], "Word can only contain letters");
    }
}
