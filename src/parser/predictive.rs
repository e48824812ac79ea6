//! Table-driven predictive parser
//!
//! [`ParseRun`] is the LL(1) pushdown automaton. Each call to
//! [`ParseRun::step`] performs exactly one move: expand the non-terminal on
//! top of the stack with the production the table selects for the current
//! lookahead, match a terminal against the lookahead, or accept. The
//! interactive viewer drives a run step by step; [`PredictiveParser::parse`]
//! simply runs it to completion.
//!
//! The run builds the derivation tree as it goes: the stack remembers for
//! each pending symbol the tree node it will hang under.

use super::errors::SyntaxError;
use super::lexer::{SourceLocation, Token};
use super::tree::{NodeId, ParseTree};
use crate::grammar::{NonTerminal, ProductionId, Symbol, Terminal};
use crate::tables::ParseTable;

/// A pending grammar symbol on the parser stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEntry {
    pub symbol: Symbol,
    /// Node the symbol's subtree attaches to; `None` for the start symbol
    /// and the end-marker.
    pub parent: Option<NodeId>,
    /// Production whose expansion pushed this symbol.
    pub pushed_by: Option<ProductionId>,
}

/// Outcome of one automaton move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Expanded {
        non_terminal: NonTerminal,
        production: ProductionId,
        node: NodeId,
    },
    Matched {
        terminal: Terminal,
        node: NodeId,
    },
    Accepted,
    /// The run already accepted or failed; nothing happened.
    Finished,
}

/// A successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub tree: ParseTree,
    /// Productions in the order they were applied (a leftmost derivation).
    pub trace: Vec<ProductionId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Accepted,
    Failed,
}

/// Predictive parser over a frozen parse table.
#[derive(Debug, Clone, Copy)]
pub struct PredictiveParser<'a> {
    table: &'a ParseTable,
}

impl<'a> PredictiveParser<'a> {
    pub fn new(table: &'a ParseTable) -> Self {
        Self { table }
    }

    /// Begin a run over `tokens`, which should end with the end-marker.
    pub fn start(&self, tokens: &'a [Token]) -> ParseRun<'a> {
        ParseRun::new(self.table, tokens)
    }

    /// Parse the whole token stream.
    pub fn parse(&self, tokens: &'a [Token]) -> Result<Derivation, SyntaxError> {
        let mut run = self.start(tokens);
        loop {
            match run.step()? {
                Step::Accepted | Step::Finished => break,
                Step::Expanded { .. } | Step::Matched { .. } => {}
            }
        }
        tracing::debug!(
            productions = run.trace.len(),
            nodes = run.tree.len(),
            "parse accepted"
        );
        Ok(run.into_derivation())
    }
}

/// State of one parse: stack, input cursor, partial tree and trace.
#[derive(Debug, Clone)]
pub struct ParseRun<'a> {
    table: &'a ParseTable,
    tokens: &'a [Token],
    stack: Vec<StackEntry>,
    cursor: usize,
    tree: ParseTree,
    trace: Vec<ProductionId>,
    status: Status,
}

impl<'a> ParseRun<'a> {
    fn new(table: &'a ParseTable, tokens: &'a [Token]) -> Self {
        let stack = vec![
            StackEntry {
                symbol: Symbol::Terminal(Terminal::EndMarker),
                parent: None,
                pushed_by: None,
            },
            StackEntry {
                symbol: Symbol::NonTerminal(table.start()),
                parent: None,
                pushed_by: None,
            },
        ];

        Self {
            table,
            tokens,
            stack,
            cursor: 0,
            tree: ParseTree::new(),
            trace: Vec::new(),
            status: Status::Running,
        }
    }

    /// Perform one move. Errors end the run; later calls return
    /// [`Step::Finished`].
    pub fn step(&mut self) -> Result<Step, SyntaxError> {
        if self.status != Status::Running {
            return Ok(Step::Finished);
        }

        let result = self.advance();
        match &result {
            Ok(Step::Accepted) => self.status = Status::Accepted,
            Err(_) => self.status = Status::Failed,
            _ => {}
        }
        result
    }

    fn advance(&mut self) -> Result<Step, SyntaxError> {
        let table = self.table;
        let Some(top) = self.stack.last().copied() else {
            return Ok(Step::Finished);
        };
        let lookahead = self.lookahead_token()?;

        match top.symbol {
            Symbol::Terminal(Terminal::EndMarker) if lookahead.is_end_marker() => {
                self.stack.pop();
                tracing::trace!(cursor = self.cursor, "accept");
                Ok(Step::Accepted)
            }
            Symbol::Terminal(expected) => {
                if expected != lookahead.terminal {
                    return Err(SyntaxError::UnexpectedToken {
                        expected,
                        found: lookahead.clone(),
                        production: top.pushed_by,
                    });
                }

                self.stack.pop();
                let node = self.tree.add_leaf(top.parent, lookahead.clone());
                self.cursor += 1;
                tracing::trace!(terminal = %expected, lexeme = %lookahead.lexeme, "match");
                Ok(Step::Matched {
                    terminal: expected,
                    node,
                })
            }
            Symbol::NonTerminal(non_terminal) => {
                let Some(production) = table.entry(non_terminal, lookahead.terminal) else {
                    return Err(self.no_production(non_terminal, lookahead));
                };

                self.stack.pop();
                let node = self
                    .tree
                    .add_interior(top.parent, non_terminal, production.id);
                self.stack
                    .extend(production.body.iter().rev().map(|symbol| StackEntry {
                        symbol: *symbol,
                        parent: Some(node),
                        pushed_by: Some(production.id),
                    }));
                self.trace.push(production.id);
                tracing::trace!(production = %production, lookahead = %lookahead.terminal, "expand");

                Ok(Step::Expanded {
                    non_terminal,
                    production: production.id,
                    node,
                })
            }
        }
    }

    fn lookahead_token(&self) -> Result<&'a Token, SyntaxError> {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(self.cursor).ok_or_else(|| {
            let (offset, location) = tokens
                .last()
                .map(|t| (t.offset + t.width(), t.location))
                .unwrap_or((0, SourceLocation::new(1, 1)));
            SyntaxError::UnterminatedInput { offset, location }
        })
    }

    /// Build the error for a missing table cell, refined to an assignment
    /// target error when the lookahead sits right before `=` where an
    /// identifier could have started an assignment.
    fn no_production(&self, non_terminal: NonTerminal, found: &Token) -> SyntaxError {
        let before_assign = self
            .tokens
            .get(self.cursor + 1)
            .is_some_and(|t| t.terminal == Terminal::Assign);

        if before_assign {
            if let Some(production) = self.identifier_production(non_terminal) {
                let rule = self
                    .table
                    .grammar()
                    .production(production)
                    .map(|p| p.to_string())
                    .unwrap_or_default();
                return SyntaxError::InvalidAssignmentTarget {
                    production,
                    rule,
                    found: found.clone(),
                };
            }
        }

        SyntaxError::NoProduction {
            non_terminal,
            found: found.clone(),
            expected: self.table.expected(non_terminal),
        }
    }

    /// Follow leftmost non-terminals from the `identifier` cell of
    /// `non_terminal` to the production whose body starts with `identifier`.
    /// Only assignment productions qualify; an operand slot is not a target.
    fn identifier_production(&self, non_terminal: NonTerminal) -> Option<ProductionId> {
        let mut current = non_terminal;
        for _ in 0..self.table.grammar().productions().len() {
            let production = self.table.entry(current, Terminal::Identifier)?;
            let first = *production.body.first()?;
            if first == Symbol::Terminal(Terminal::Identifier) {
                return matches!(production.lhs, NonTerminal::Assignment | NonTerminal::AssignTail)
                    .then_some(production.id);
            }
            current = first.as_non_terminal()?;
        }
        None
    }

    /// Pending symbols, bottom first.
    pub fn stack(&self) -> &[StackEntry] {
        &self.stack
    }

    /// Index of the lookahead token.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn lookahead(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn trace(&self) -> &[ProductionId] {
        &self.trace
    }

    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    pub fn table(&self) -> &'a ParseTable {
        self.table
    }

    pub fn is_accepted(&self) -> bool {
        self.status == Status::Accepted
    }

    pub fn is_finished(&self) -> bool {
        self.status != Status::Running
    }

    /// Human-readable description of a move, as shown in the step viewer.
    pub fn describe_step(&self, step: &Step) -> String {
        match step {
            Step::Expanded { production, .. } => match self.table.grammar().production(*production) {
                Some(p) => format!("expand ({}) {}", p.id, p),
                None => format!("expand ({})", production),
            },
            Step::Matched { terminal, node } => {
                let lexeme = self
                    .tree
                    .node(*node)
                    .and_then(|n| n.token())
                    .map(|t| t.lexeme.as_str())
                    .unwrap_or_default();
                if terminal.is_class() {
                    format!("match {} `{}`", terminal, lexeme)
                } else {
                    format!("match `{}`", terminal)
                }
            }
            Step::Accepted => "accept".to_string(),
            Step::Finished => "finished".to_string(),
        }
    }

    pub fn into_derivation(self) -> Derivation {
        Derivation {
            tree: self.tree,
            trace: self.trace,
        }
    }
}
