//! Line-oriented driver loop.
//!
//! Plain lines go to [`GameController::apply_command`]. Lines starting with
//! `:` are driver commands that never touch the simulation directly:
//!
//! | Line | Effect |
//! |---|---|
//! | `:save [name]` | bincode save document in the save directory |
//! | `:load [name]` | restores a save document |
//! | `:export [name]` | pretty JSON copy of the state |
//! | `:digest` | hex SHA-256 of the state |
//! | `:tick <seconds>` | advances wall-clock time explicitly |
//! | `:intent <json>` | applies a typed intent |
//! | `:quit` | leaves the loop |

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use keystrike_core::{GameController, Intent, Phase, snapshot};

const DEFAULT_SLOT: &str = "quicksave";

/// What one input line produced.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

pub struct Repl<'a> {
    game: GameController<'a>,
    save_dir: PathBuf,
    show_prompt: bool,
    last_input: Option<Instant>,
}

impl<'a> Repl<'a> {
    pub fn new(game: GameController<'a>, save_dir: PathBuf, show_prompt: bool) -> Self {
        Self {
            game,
            save_dir,
            show_prompt,
            last_input: None,
        }
    }

    pub fn game(&self) -> &GameController<'a> {
        &self.game
    }

    /// Reads lines until EOF or `:quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        self.prompt(&mut output)?;
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            let mut outcome = self.elapsed_tick();
            let handled = self.handle_line(&line);
            outcome.lines.extend(handled.lines);
            for line in &outcome.lines {
                writeln!(output, "{line}")?;
            }
            if handled.quit {
                break;
            }
            self.prompt(&mut output)?;
        }
        Ok(())
    }

    /// Applies one line without any wall-clock tick.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let trimmed = line.trim();
        let Some(meta) = trimmed.strip_prefix(':') else {
            return Outcome::lines(self.game.apply_command(trimmed));
        };

        let (verb, rest) = meta
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((meta, ""));
        let result = match verb {
            "quit" | "q" => {
                return Outcome {
                    lines: vec!["Goodbye.".to_string()],
                    quit: true,
                };
            }
            "save" => self.save(slot(rest)),
            "load" => self.load(slot(rest)),
            "export" => self.export(slot(rest)),
            "digest" => self.digest(),
            "tick" => self.tick(rest),
            "intent" => self.intent(rest),
            other => Ok(vec![format!(
                "Unknown driver command ':{other}'. Try :save, :load, :export, :digest, :tick, :intent or :quit."
            )]),
        };

        match result {
            Ok(lines) => Outcome::lines(lines),
            Err(err) => {
                tracing::warn!(error = %err, verb, "driver command failed");
                Outcome::line(format!("Error: {err:#}"))
            }
        }
    }

    fn elapsed_tick(&mut self) -> Outcome {
        let now = Instant::now();
        let Some(previous) = self.last_input.replace(now) else {
            return Outcome::default();
        };
        let dt = now.duration_since(previous).as_secs_f64();
        Outcome::lines(self.game.tick(dt))
    }

    fn prompt<W: Write>(&self, output: &mut W) -> Result<()> {
        let state = self.game.state();
        match state.phase {
            Phase::Night if self.show_prompt && !state.night_prompt.is_empty() => {
                write!(output, "[night {}] type '{}' > ", state.day, state.night_prompt)?
            }
            Phase::Night => write!(output, "[night {}] > ", state.day)?,
            Phase::Day => write!(output, "[day {} | {} AP] > ", state.day, state.ap)?,
            Phase::GameOver | Phase::Victory => write!(output, "[{}] > ", state.phase)?,
        }
        output.flush()?;
        Ok(())
    }

    fn slot_path(&self, name: &str, extension: &str) -> PathBuf {
        self.save_dir.join(format!("{name}.{extension}"))
    }

    fn save(&self, name: &str) -> Result<Vec<String>> {
        let bytes = snapshot::encode(self.game.state())?;
        let path = self.slot_path(name, "sav");
        write_atomic(&path, &bytes)?;
        tracing::info!(path = %path.display(), nonce = self.game.state().nonce, "saved");
        Ok(vec![format!("Saved to {}.", path.display())])
    }

    fn load(&mut self, name: &str) -> Result<Vec<String>> {
        let path = self.slot_path(name, "sav");
        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let state = snapshot::decode(&bytes)?;
        let day = state.day;
        self.game.restore(state);
        tracing::info!(path = %path.display(), "loaded");
        Ok(vec![format!("Loaded {} (day {day}).", path.display())])
    }

    fn export(&self, name: &str) -> Result<Vec<String>> {
        let json = serde_json::to_string_pretty(self.game.state())?;
        let path = self.slot_path(name, "json");
        write_atomic(&path, json.as_bytes())?;
        Ok(vec![format!("Exported to {}.", path.display())])
    }

    fn digest(&self) -> Result<Vec<String>> {
        let digest = snapshot::digest(self.game.state())?;
        Ok(vec![hex::encode(digest)])
    }

    fn tick(&mut self, seconds: &str) -> Result<Vec<String>> {
        let dt: f64 = seconds
            .parse()
            .with_context(|| format!("'{seconds}' is not a number of seconds"))?;
        Ok(self.game.tick(dt))
    }

    fn intent(&mut self, json: &str) -> Result<Vec<String>> {
        let intent: Intent = serde_json::from_str(json).context("Invalid intent JSON")?;
        Ok(self.game.apply_intent(intent))
    }
}

fn slot(rest: &str) -> &str {
    if rest.is_empty() { DEFAULT_SLOT } else { rest }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move save into {}", path.display()))?;
    Ok(())
}
