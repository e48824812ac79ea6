// Step history for the parse viewer

use crate::grammar::{ProductionId, Symbol};
use crate::parser::errors::SyntaxError;
use crate::parser::predictive::{ParseRun, Step};
use thiserror::Error;

/// State of the parse automaton after one move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Pending symbols, bottom first
    pub stack: Vec<Symbol>,
    /// Index of the lookahead token
    pub cursor: usize,
    /// The move that produced this state
    pub action: String,
    /// Number of productions applied so far
    pub trace_len: usize,
}

impl Snapshot {
    fn capture(run: &ParseRun<'_>, action: String) -> Self {
        Snapshot {
            stack: run.stack().iter().map(|entry| entry.symbol).collect(),
            cursor: run.cursor(),
            action,
            trace_len: run.trace().len(),
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.stack.len() * std::mem::size_of::<Symbol>()
            + self.action.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Snapshot memory limit exceeded: {current} + {requested} > {limit}")]
pub struct SnapshotLimitExceeded {
    pub current: usize,
    pub requested: usize,
    pub limit: usize,
}

/// Manages the recorded history of a parse
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), SnapshotLimitExceeded> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(SnapshotLimitExceeded {
                current: self.current_memory,
                requested: snapshot_size,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// How a recorded run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected(SyntaxError),
    /// Recording stopped at the memory limit before the run finished
    Truncated,
}

/// A recorded parse: one snapshot per move plus the production trace
#[derive(Debug)]
pub struct Recording {
    pub snapshots: SnapshotManager,
    pub trace: Vec<ProductionId>,
    pub outcome: Outcome,
}

impl Recording {
    /// Drive `run` to completion, capturing the initial state and the state
    /// after every move.
    pub fn record(mut run: ParseRun<'_>, memory_limit: usize) -> Self {
        let mut snapshots = SnapshotManager::new(memory_limit);

        let outcome = match snapshots.push(Snapshot::capture(&run, "start".to_string())) {
            Err(e) => {
                tracing::warn!(error = %e, "step history is empty");
                Outcome::Truncated
            }
            Ok(()) => loop {
                let (action, finished) = match run.step() {
                    Ok(Step::Finished) => break Outcome::Accepted,
                    Ok(step) => (run.describe_step(&step), step == Step::Accepted),
                    Err(error) => {
                        // The state is unchanged; the last snapshot shows where it stopped.
                        break Outcome::Rejected(error);
                    }
                };

                if let Err(e) = snapshots.push(Snapshot::capture(&run, action)) {
                    tracing::warn!(error = %e, steps = snapshots.len(), "step history truncated");
                    break Outcome::Truncated;
                }
                if finished {
                    break Outcome::Accepted;
                }
            },
        };

        tracing::debug!(
            steps = snapshots.len(),
            bytes = snapshots.memory_usage(),
            "recorded parse"
        );

        Recording {
            snapshots,
            trace: run.trace().to_vec(),
            outcome,
        }
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        match &self.outcome {
            Outcome::Rejected(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Grammar, NonTerminal};
    use crate::parser::lexer::Lexer;
    use crate::parser::predictive::PredictiveParser;
    use crate::tables::ParseTable;

    fn table() -> ParseTable {
        let grammar = Grammar::c_subset()
            .clone()
            .with_start(NonTerminal::Statements)
            .unwrap();
        ParseTable::build(&grammar).unwrap()
    }

    #[test]
    fn test_limit_enforced() {
        let mut manager = SnapshotManager::new(10);
        let snapshot = Snapshot {
            stack: vec![],
            cursor: 0,
            action: "start".to_string(),
            trace_len: 0,
        };
        assert!(manager.push(snapshot).is_err());
        assert!(manager.is_empty());
        assert_eq!(manager.memory_usage(), 0);
    }

    #[test]
    fn test_record_accepted() {
        let table = table();
        let tokens = Lexer::new("int x ;").tokenize().unwrap();
        let parser = PredictiveParser::new(&table);
        let recording = Recording::record(parser.start(&tokens), 1 << 20);

        assert_eq!(recording.outcome, Outcome::Accepted);
        let first = recording.snapshots.get(0).unwrap();
        assert_eq!(first.action, "start");
        assert_eq!(first.stack.len(), 2);

        let last = recording.snapshots.last().unwrap();
        assert_eq!(last.action, "accept");
        assert!(last.stack.is_empty());
        assert_eq!(last.trace_len, recording.trace.len());
        assert_eq!(recording.trace, parser.parse(&tokens).unwrap().trace);
    }

    #[test]
    fn test_record_rejected() {
        let table = table();
        let tokens = Lexer::new("cout x ;").tokenize().unwrap();
        let recording = Recording::record(PredictiveParser::new(&table).start(&tokens), 1 << 20);

        assert!(matches!(
            recording.error(),
            Some(SyntaxError::UnexpectedToken { .. })
        ));
        // start, Statements, Output, match cout
        assert_eq!(recording.snapshots.len(), 4);
        assert_eq!(recording.snapshots.last().unwrap().cursor, 1);
    }

    #[test]
    fn test_record_truncated() {
        let table = table();
        let tokens = Lexer::new("int a ; int b ; int c ;").tokenize().unwrap();
        let start = Snapshot {
            stack: vec![Symbol::NonTerminal(NonTerminal::Statements); 2],
            cursor: 0,
            action: "start".to_string(),
            trace_len: 0,
        };
        let limit = start.estimated_size() * 3;
        let recording = Recording::record(PredictiveParser::new(&table).start(&tokens), limit);

        assert_eq!(recording.outcome, Outcome::Truncated);
        assert!(recording.snapshots.len() < 10);
        assert!(recording.snapshots.memory_usage() <= limit);
    }
}
