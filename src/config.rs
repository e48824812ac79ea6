//! Runtime options shared by the report and the step viewer

use crate::grammar::NonTerminal;
use std::time::Duration;

/// Step history budget when none is given on the command line.
pub const DEFAULT_SNAPSHOT_LIMIT_MB: usize = 256;

/// Delay between moves in play mode.
pub const DEFAULT_PLAY_INTERVAL_MS: u64 = 400;

/// Debounce for the play toggle key.
pub const PLAY_TOGGLE_DEBOUNCE_MS: u64 = 200;

/// Event poll timeout of the UI loop.
pub const POLL_INTERVAL_MS: u64 = 50;

/// The sum program parsed when no input file is given.
pub const SAMPLE_PROGRAM: &str = include_str!("../demos/sum.cpp");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Byte budget of the step history
    pub snapshot_limit: usize,
    pub play_interval: Duration,
    /// Non-terminal the parse starts from
    pub entry: NonTerminal,
    /// Print the text report instead of opening the viewer
    pub report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            snapshot_limit: DEFAULT_SNAPSHOT_LIMIT_MB * 1024 * 1024,
            play_interval: Duration::from_millis(DEFAULT_PLAY_INTERVAL_MS),
            entry: NonTerminal::Start,
            report: false,
        }
    }
}

impl Config {
    pub fn with_snapshot_limit_mb(mut self, megabytes: usize) -> Self {
        self.snapshot_limit = megabytes.saturating_mul(1024 * 1024);
        self
    }

    pub fn with_play_interval_ms(mut self, millis: u64) -> Self {
        self.play_interval = Duration::from_millis(millis);
        self
    }

    pub fn with_entry(mut self, entry: NonTerminal) -> Self {
        self.entry = entry;
        self
    }

    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let config = Config::default();
        assert_eq!(config.entry, NonTerminal::Start);
        assert_eq!(config.snapshot_limit, 256 * 1024 * 1024);
        assert!(!config.report);

        let config = config
            .with_snapshot_limit_mb(1)
            .with_play_interval_ms(10)
            .with_entry(NonTerminal::Statements)
            .with_report(true);
        assert_eq!(config.snapshot_limit, 1024 * 1024);
        assert_eq!(config.play_interval, Duration::from_millis(10));
        assert_eq!(config.entry, NonTerminal::Statements);
        assert!(config.report);
    }

    #[test]
    fn test_sample_program_is_embedded() {
        assert!(SAMPLE_PROGRAM.contains("int main()"));
        assert!(SAMPLE_PROGRAM.contains("cout"));
    }
}
