//! Grammar model
//!
//! A [`Grammar`] is a designated start symbol plus an ordered list of
//! [`Production`]s. Production ids follow declaration order and are what the
//! parse table, the production trace and conflict diagnostics refer to.
//!
//! - [`symbols`]: terminal and non-terminal alphabets
//! - `rules`: the static production table of the C++ subset
//! - [`errors`]: grammar-definition errors
//!
//! The C++ subset grammar is built once per process and handed out as a
//! shared reference by [`Grammar::c_subset`].

pub mod errors;
mod rules;
pub mod symbols;

pub use errors::GrammarError;
pub use symbols::{NonTerminal, Symbol, Terminal, TokenCategory};

use std::fmt;
use std::sync::OnceLock;

/// Index of a production in declaration order (displayed 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionId(pub usize);

impl ProductionId {
    /// The 1-based number shown in traces and diagnostics.
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// `lhs → body`; an empty body is an epsilon production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub id: ProductionId,
    pub lhs: NonTerminal,
    pub body: Vec<Symbol>,
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }

    /// Right-hand side as text, `ε` for an empty body.
    pub fn body_text(&self) -> String {
        if self.body.is_empty() {
            "ε".to_string()
        } else {
            self.body
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.lhs, self.body_text())
    }
}

/// A validated context-free grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: NonTerminal,
    productions: Vec<Production>,
}

static C_SUBSET: OnceLock<Grammar> = OnceLock::new();

impl Grammar {
    /// Build and validate a grammar from `(lhs, body)` rules in declaration
    /// order.
    pub fn new<I>(start: NonTerminal, rules: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (NonTerminal, Vec<Symbol>)>,
    {
        let grammar = Self::from_rules(start, rules);
        grammar.validate()?;
        Ok(grammar)
    }

    /// The grammar of the C++ teaching subset, shared process-wide.
    pub fn c_subset() -> &'static Grammar {
        C_SUBSET.get_or_init(|| {
            Self::from_rules(
                rules::START,
                rules::RULES.iter().map(|(lhs, body)| (*lhs, body.to_vec())),
            )
        })
    }

    fn from_rules<I>(start: NonTerminal, rules: I) -> Self
    where
        I: IntoIterator<Item = (NonTerminal, Vec<Symbol>)>,
    {
        let productions = rules
            .into_iter()
            .enumerate()
            .map(|(i, (lhs, body))| Production {
                id: ProductionId(i),
                lhs,
                body,
            })
            .collect();
        Grammar { start, productions }
    }

    /// Check the structural invariants: the start symbol and every
    /// referenced non-terminal have productions, and no body uses `$`.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if !self.has_productions(self.start) {
            return Err(GrammarError::MissingStart(self.start));
        }

        for production in &self.productions {
            for symbol in &production.body {
                match *symbol {
                    Symbol::Terminal(Terminal::EndMarker) => {
                        return Err(GrammarError::EndMarkerInBody(production.id));
                    }
                    Symbol::NonTerminal(nt) if !self.has_productions(nt) => {
                        return Err(GrammarError::UndefinedNonTerminal {
                            non_terminal: nt,
                            production: production.id,
                        });
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Same productions, different start symbol. Used to parse fragments
    /// such as a statement list on their own.
    pub fn with_start(mut self, start: NonTerminal) -> Result<Self, GrammarError> {
        self.start = start;
        self.validate()?;
        Ok(self)
    }

    /// Append one more alternative, numbered after the existing ones.
    pub fn with_production(
        mut self,
        lhs: NonTerminal,
        body: Vec<Symbol>,
    ) -> Result<Self, GrammarError> {
        let id = ProductionId(self.productions.len());
        self.productions.push(Production { id, lhs, body });
        self.validate()?;
        Ok(self)
    }

    pub fn start(&self) -> NonTerminal {
        self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(id.0)
    }

    /// Alternatives of `nt` in declaration order.
    pub fn alternatives(&self, nt: NonTerminal) -> impl Iterator<Item = &Production> {
        self.productions.iter().filter(move |p| p.lhs == nt)
    }

    pub fn has_productions(&self, nt: NonTerminal) -> bool {
        self.alternatives(nt).next().is_some()
    }

    /// Distinct left-hand sides in order of first declaration.
    pub fn non_terminals(&self) -> Vec<NonTerminal> {
        let mut seen = Vec::new();
        for production in &self.productions {
            if !seen.contains(&production.lhs) {
                seen.push(production.lhs);
            }
        }
        seen
    }

    /// Terminals used by some body, in enum order, followed by `$`.
    pub fn terminals(&self) -> Vec<Terminal> {
        let mut terminals: Vec<Terminal> = Terminal::ALL
            .iter()
            .copied()
            .filter(|t| {
                self.productions
                    .iter()
                    .any(|p| p.body.contains(&Symbol::Terminal(*t)))
            })
            .collect();
        terminals.push(Terminal::EndMarker);
        terminals
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for production in &self.productions {
            writeln!(f, "{:>3} {}", production.id.number(), production)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_subset_is_valid() {
        let grammar = Grammar::c_subset();
        assert_eq!(grammar.validate(), Ok(()));
        assert_eq!(grammar.start(), NonTerminal::Start);
        assert_eq!(grammar.productions().len(), 48);
        assert_eq!(grammar.non_terminals().len(), NonTerminal::ALL.len());
    }

    #[test]
    fn test_production_numbering() {
        let grammar = Grammar::c_subset();
        let assignment = grammar
            .production(ProductionId(16))
            .expect("production 17 exists");
        assert_eq!(assignment.id.number(), 17);
        assert_eq!(assignment.lhs, NonTerminal::Assignment);
        assert_eq!(
            assignment.to_string(),
            "Assignment → identifier Initializer AssignTail"
        );
    }

    #[test]
    fn test_undefined_non_terminal() {
        let result = Grammar::new(
            NonTerminal::Start,
            vec![(NonTerminal::Start, vec![NonTerminal::Loop.into()])],
        );
        assert_eq!(
            result,
            Err(GrammarError::UndefinedNonTerminal {
                non_terminal: NonTerminal::Loop,
                production: ProductionId(0),
            })
        );
    }

    #[test]
    fn test_missing_start() {
        let result = Grammar::new(
            NonTerminal::Start,
            vec![(NonTerminal::Operand, vec![Terminal::Number.into()])],
        );
        assert_eq!(result, Err(GrammarError::MissingStart(NonTerminal::Start)));
    }

    #[test]
    fn test_end_marker_rejected() {
        let result = Grammar::new(
            NonTerminal::Start,
            vec![(NonTerminal::Start, vec![Terminal::EndMarker.into()])],
        );
        assert_eq!(result, Err(GrammarError::EndMarkerInBody(ProductionId(0))));
    }

    #[test]
    fn test_epsilon_display() {
        let grammar = Grammar::c_subset();
        let includes_empty = grammar.production(ProductionId(2)).unwrap();
        assert!(includes_empty.is_epsilon());
        assert_eq!(includes_empty.to_string(), "Includes → ε");
    }

    #[test]
    fn test_alternatives_in_declaration_order() {
        let grammar = Grammar::c_subset();
        let numbers: Vec<usize> = grammar
            .alternatives(NonTerminal::OutputItem)
            .map(|p| p.id.number())
            .collect();
        assert_eq!(numbers, vec![46, 47, 48]);
        assert!(grammar.alternatives(NonTerminal::Main).all(|p| !p.is_epsilon()));
    }
}
