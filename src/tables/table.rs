//! LL(1) parse table construction
//!
//! Each production `A → α` claims the cells `(A, t)` for every `t` in
//! FIRST(α), and when α is nullable also every `t` in FOLLOW(A), end-marker
//! included. Two different productions claiming one cell is a conflict and
//! the build fails; nothing is ever resolved by precedence.

use super::sets::GrammarSets;
use crate::grammar::{Grammar, GrammarError, NonTerminal, Production, ProductionId, Terminal};
use rustc_hash::FxHashMap;

/// A frozen predictive parse table together with the grammar and sets it
/// was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    grammar: Grammar,
    sets: GrammarSets,
    cells: FxHashMap<(NonTerminal, Terminal), ProductionId>,
}

impl ParseTable {
    pub fn build(grammar: &Grammar) -> Result<Self, GrammarError> {
        let sets = GrammarSets::compute(grammar)?;
        let (cells, mut conflicts) = fill(grammar, &sets);
        if !conflicts.is_empty() {
            tracing::debug!(conflicts = conflicts.len(), "grammar is not LL(1)");
            return Err(conflicts.remove(0));
        }

        tracing::debug!(
            productions = grammar.productions().len(),
            cells = cells.len(),
            start = %grammar.start(),
            "built LL(1) parse table"
        );

        Ok(ParseTable {
            grammar: grammar.clone(),
            sets,
            cells,
        })
    }

    /// Every conflicting claim in `grammar`, in production order. A cell
    /// keeps its first claimant, so one bad alternative may show up once
    /// per terminal it competes on.
    pub fn conflicts(grammar: &Grammar) -> Result<Vec<GrammarError>, GrammarError> {
        let sets = GrammarSets::compute(grammar)?;
        Ok(fill(grammar, &sets).1)
    }

    /// Production to expand `nt` with on lookahead `terminal`.
    pub fn entry(&self, nt: NonTerminal, terminal: Terminal) -> Option<&Production> {
        self.cells
            .get(&(nt, terminal))
            .and_then(|id| self.grammar.production(*id))
    }

    /// Every filled cell of `nt`'s row, in terminal order.
    pub fn row(&self, nt: NonTerminal) -> Vec<(Terminal, ProductionId)> {
        let mut row: Vec<(Terminal, ProductionId)> = self
            .cells
            .iter()
            .filter(|((lhs, _), _)| *lhs == nt)
            .map(|((_, t), id)| (*t, *id))
            .collect();
        row.sort();
        row
    }

    /// Terminals on which `nt` can be expanded.
    pub fn expected(&self, nt: NonTerminal) -> Vec<Terminal> {
        self.row(nt).into_iter().map(|(t, _)| t).collect()
    }

    /// Filled cells ordered by non-terminal declaration, then terminal.
    pub fn cells(&self) -> Vec<(NonTerminal, Terminal, ProductionId)> {
        self.grammar
            .non_terminals()
            .into_iter()
            .flat_map(|nt| {
                self.row(nt)
                    .into_iter()
                    .map(move |(t, id)| (nt, t, id))
            })
            .collect()
    }

    /// Terminals that appear in at least one cell, in terminal order.
    pub fn used_terminals(&self) -> Vec<Terminal> {
        let mut used: Vec<Terminal> = self.cells.keys().map(|(_, t)| *t).collect();
        used.sort();
        used.dedup();
        used
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn sets(&self) -> &GrammarSets {
        &self.sets
    }

    pub fn start(&self) -> NonTerminal {
        self.grammar.start()
    }
}

type Cells = FxHashMap<(NonTerminal, Terminal), ProductionId>;

fn fill(grammar: &Grammar, sets: &GrammarSets) -> (Cells, Vec<GrammarError>) {
    let mut cells = Cells::default();
    let mut conflicts = Vec::new();

    for production in grammar.productions() {
        let first = sets.first_of_sequence(&production.body);
        let mut lookaheads: Vec<Terminal> = first.terminals().collect();
        if first.has_epsilon() {
            if let Some(follow) = sets.follow(production.lhs) {
                lookaheads.extend(follow.terminals());
            }
        }

        for terminal in lookaheads {
            if let Err(conflict) = claim(&mut cells, production, terminal) {
                conflicts.push(conflict);
            }
        }
    }

    (cells, conflicts)
}

fn claim(cells: &mut Cells, production: &Production, terminal: Terminal) -> Result<(), GrammarError> {
    match cells.get(&(production.lhs, terminal)) {
        Some(existing) if *existing != production.id => Err(GrammarError::Conflict {
            non_terminal: production.lhs,
            terminal,
            existing: *existing,
            competing: production.id,
        }),
        Some(_) => Ok(()),
        None => {
            cells.insert((production.lhs, terminal), production.id);
            Ok(())
        }
    }
}
