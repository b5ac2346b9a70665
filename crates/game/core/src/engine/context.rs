use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::stats::Modifiers;
use crate::state::GameState;

/// Read-only handles passed to every subsystem call.
#[derive(Clone, Copy, Debug)]
pub struct SimContext<'a> {
    pub env: GameEnv<'a>,
    pub config: &'a GameConfig,
}

impl<'a> SimContext<'a> {
    pub fn new(env: GameEnv<'a>, config: &'a GameConfig) -> Self {
        Self { env, config }
    }

    /// Effect multipliers for the current state.
    pub fn modifiers(&self, state: &GameState) -> Modifiers {
        Modifiers::collect(state, self.env.research())
    }
}

/// Ordered human-readable lines produced by one dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
