//! FIRST and FOLLOW set computation
//!
//! Both computations are repeat-until-no-change passes over every
//! production. Sets only grow and are bounded by the terminal alphabet, so a
//! well-formed grammar always settles. Exceeding the pass cap is reported as
//! [`GrammarError::NoFixedPoint`].

use crate::grammar::{Grammar, GrammarError, NonTerminal, Symbol, Terminal};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;

/// A set of terminals that may also contain epsilon.
///
/// FOLLOW sets use the same type but never carry epsilon; the end-marker is
/// the ordinary terminal [`Terminal::EndMarker`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalSet {
    terminals: BTreeSet<Terminal>,
    epsilon: bool,
}

impl TerminalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(terminal: Terminal) -> Self {
        let mut set = Self::new();
        set.insert(terminal);
        set
    }

    pub fn insert(&mut self, terminal: Terminal) -> bool {
        self.terminals.insert(terminal)
    }

    pub fn insert_epsilon(&mut self) -> bool {
        let added = !self.epsilon;
        self.epsilon = true;
        added
    }

    pub fn contains(&self, terminal: Terminal) -> bool {
        self.terminals.contains(&terminal)
    }

    pub fn has_epsilon(&self) -> bool {
        self.epsilon
    }

    /// Add every terminal of `other`, ignoring its epsilon flag. Returns
    /// whether anything was added.
    pub fn union_terminals(&mut self, other: &TerminalSet) -> bool {
        let before = self.terminals.len();
        self.terminals.extend(other.terminals.iter().copied());
        self.terminals.len() != before
    }

    pub fn terminals(&self) -> impl Iterator<Item = Terminal> + '_ {
        self.terminals.iter().copied()
    }

    /// Number of terminals, epsilon excluded.
    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty() && !self.epsilon
    }
}

impl fmt::Display for TerminalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items: Vec<String> = self.terminals.iter().map(|t| t.to_string()).collect();
        if self.epsilon {
            items.push("ε".to_string());
        }
        write!(f, "{{ {} }}", items.join(", "))
    }
}

/// FIRST and FOLLOW sets for every non-terminal of a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSets {
    first: FxHashMap<NonTerminal, TerminalSet>,
    follow: FxHashMap<NonTerminal, TerminalSet>,
}

impl GrammarSets {
    pub fn compute(grammar: &Grammar) -> Result<Self, GrammarError> {
        let cap = pass_budget(grammar);

        let mut sets = GrammarSets {
            first: grammar
                .non_terminals()
                .into_iter()
                .map(|nt| (nt, TerminalSet::new()))
                .collect(),
            follow: FxHashMap::default(),
        };

        let first_passes = sets.compute_first(grammar, cap)?;
        let follow_passes = sets.compute_follow(grammar, cap)?;
        tracing::debug!(
            first_passes,
            follow_passes,
            non_terminals = sets.first.len(),
            "grammar sets reached a fixed point"
        );

        Ok(sets)
    }

    fn compute_first(&mut self, grammar: &Grammar, cap: usize) -> Result<usize, GrammarError> {
        for pass in 1..=cap {
            let mut changed = false;

            for production in grammar.productions() {
                let body_first = self.first_of_sequence(&production.body);
                let entry = self.first.entry(production.lhs).or_default();
                changed |= entry.union_terminals(&body_first);
                if body_first.has_epsilon() {
                    changed |= entry.insert_epsilon();
                }
            }

            if !changed {
                return Ok(pass);
            }
        }

        Err(GrammarError::NoFixedPoint {
            sets: "FIRST",
            passes: cap,
        })
    }

    fn compute_follow(&mut self, grammar: &Grammar, cap: usize) -> Result<usize, GrammarError> {
        self.follow = grammar
            .non_terminals()
            .into_iter()
            .map(|nt| (nt, TerminalSet::new()))
            .collect();
        self.follow
            .entry(grammar.start())
            .or_default()
            .insert(Terminal::EndMarker);

        for pass in 1..=cap {
            let mut changed = false;

            for production in grammar.productions() {
                for (i, symbol) in production.body.iter().enumerate() {
                    let Symbol::NonTerminal(b) = *symbol else {
                        continue;
                    };

                    let trailer = self.first_of_sequence(&production.body[i + 1..]);
                    let lhs_follow = if trailer.has_epsilon() {
                        self.follow.get(&production.lhs).cloned()
                    } else {
                        None
                    };

                    let entry = self.follow.entry(b).or_default();
                    changed |= entry.union_terminals(&trailer);
                    if let Some(lhs_follow) = lhs_follow {
                        changed |= entry.union_terminals(&lhs_follow);
                    }
                }
            }

            if !changed {
                return Ok(pass);
            }
        }

        Err(GrammarError::NoFixedPoint {
            sets: "FOLLOW",
            passes: cap,
        })
    }

    /// FIRST of a single symbol; a terminal's FIRST is itself.
    pub fn first_of_symbol(&self, symbol: Symbol) -> TerminalSet {
        match symbol {
            Symbol::Terminal(t) => TerminalSet::single(t),
            Symbol::NonTerminal(nt) => self.first.get(&nt).cloned().unwrap_or_default(),
        }
    }

    /// FIRST of a symbol string. Contains epsilon when every symbol is
    /// nullable, including the empty string.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> TerminalSet {
        let mut result = TerminalSet::new();

        for symbol in symbols {
            let first = self.first_of_symbol(*symbol);
            result.union_terminals(&first);
            if !first.has_epsilon() {
                return result;
            }
        }

        result.insert_epsilon();
        result
    }

    pub fn first(&self, nt: NonTerminal) -> Option<&TerminalSet> {
        self.first.get(&nt)
    }

    pub fn follow(&self, nt: NonTerminal) -> Option<&TerminalSet> {
        self.follow.get(&nt)
    }

    pub fn is_nullable(&self, nt: NonTerminal) -> bool {
        self.first.get(&nt).is_some_and(TerminalSet::has_epsilon)
    }
}

/// Every productive pass adds at least one element to some set, and there
/// are at most `|N| * (|T| + 1)` elements to add.
fn pass_budget(grammar: &Grammar) -> usize {
    let non_terminals = grammar.non_terminals().len();
    let terminals = grammar.terminals().len();
    non_terminals * (terminals + 1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::NonTerminal as N;
    use crate::grammar::Terminal as T;

    fn sets() -> GrammarSets {
        GrammarSets::compute(Grammar::c_subset()).unwrap()
    }

    fn terminals(set: &TerminalSet) -> Vec<Terminal> {
        set.terminals().collect()
    }

    #[test]
    fn test_first_of_statements() {
        let sets = sets();
        let first = sets.first(N::Statements).unwrap();
        assert_eq!(
            terminals(first),
            vec![T::Int, T::Float, T::While, T::Cin, T::Cout, T::Identifier]
        );
        assert!(first.has_epsilon());
    }

    #[test]
    fn test_first_of_start_skips_nullable_prefix() {
        let sets = sets();
        let first = sets.first(N::Start).unwrap();
        assert_eq!(terminals(first), vec![T::Include, T::Using, T::Int]);
        assert!(!first.has_epsilon());
    }

    #[test]
    fn test_follow_sets() {
        let sets = sets();
        assert_eq!(terminals(sets.follow(N::Start).unwrap()), vec![T::EndMarker]);
        assert_eq!(
            terminals(sets.follow(N::Statements).unwrap()),
            vec![T::Return, T::RBrace]
        );
        assert_eq!(
            terminals(sets.follow(N::Includes).unwrap()),
            vec![T::Using, T::Int]
        );
        assert_eq!(
            terminals(sets.follow(N::OperationTail).unwrap()),
            vec![
                T::RParen,
                T::Semicolon,
                T::Comma,
                T::EqEq,
                T::NotEq,
                T::Lt,
                T::Le,
                T::Gt,
                T::Ge
            ]
        );
    }

    #[test]
    fn test_follow_never_contains_epsilon() {
        let sets = sets();
        for nt in Grammar::c_subset().non_terminals() {
            assert!(!sets.follow(nt).unwrap().has_epsilon(), "FOLLOW({})", nt);
        }
    }

    #[test]
    fn test_first_of_sequence() {
        let sets = sets();
        let seq = [Symbol::NonTerminal(N::InputTail), Symbol::Terminal(T::Semicolon)];
        let first = sets.first_of_sequence(&seq);
        assert_eq!(terminals(&first), vec![T::Semicolon, T::GtGt]);
        assert!(!first.has_epsilon());
        assert!(sets.first_of_sequence(&[]).has_epsilon());
    }

    #[test]
    fn test_nullable() {
        let sets = sets();
        assert!(sets.is_nullable(N::Includes));
        assert!(sets.is_nullable(N::OutputTail));
        assert!(!sets.is_nullable(N::Output));
        assert!(!sets.is_nullable(N::Start));
    }

    #[test]
    fn test_display() {
        let mut set = TerminalSet::single(T::Comma);
        set.insert_epsilon();
        assert_eq!(set.to_string(), "{ ,, ε }");
    }
}
