//! Syntax errors raised by the predictive parser
//!
//! Every variant is anchored to the token where parsing stopped, so the
//! diagnostic printer can point into the source. Parsing never resumes after
//! one of these.

use super::lexer::{SourceLocation, Token};
use crate::grammar::{NonTerminal, ProductionId, Terminal};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Top of stack is a terminal that the lookahead does not match
    #[error("expected {}, found {}{}", .expected.describe(), .found.describe(), pushed_by(.production))]
    UnexpectedToken {
        expected: Terminal,
        found: Token,
        /// Production that pushed the expected terminal; `None` for the
        /// bottom-of-stack end-marker.
        production: Option<ProductionId>,
    },

    /// No table entry for the non-terminal on the lookahead
    #[error("no production of `{non_terminal}` starts with {}; expected one of {}", .found.describe(), describe_all(.expected))]
    NoProduction {
        non_terminal: NonTerminal,
        found: Token,
        expected: Vec<Terminal>,
    },

    /// Something other than an identifier on the left of `=`
    #[error("invalid assignment target {}: production {production} (`{rule}`) requires an identifier before `=`", .found.describe())]
    InvalidAssignmentTarget {
        production: ProductionId,
        rule: String,
        found: Token,
    },

    /// The token stream has no end-marker sentinel
    #[error("input ended without an end-of-input marker")]
    UnterminatedInput {
        offset: usize,
        location: SourceLocation,
    },
}

fn pushed_by(production: &Option<ProductionId>) -> String {
    match production {
        Some(id) => format!(" while matching production {}", id),
        None => String::new(),
    }
}

fn describe_all(terminals: &[Terminal]) -> String {
    terminals
        .iter()
        .map(|t| t.describe())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SyntaxError {
    /// The token where parsing stopped, if there is one.
    pub fn token(&self) -> Option<&Token> {
        match self {
            SyntaxError::UnexpectedToken { found, .. }
            | SyntaxError::NoProduction { found, .. }
            | SyntaxError::InvalidAssignmentTarget { found, .. } => Some(found),
            SyntaxError::UnterminatedInput { .. } => None,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            SyntaxError::UnterminatedInput { location, .. } => *location,
            _ => self
                .token()
                .map(|t| t.location)
                .unwrap_or(SourceLocation::new(1, 1)),
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::UnterminatedInput { offset, .. } => *offset,
            _ => self.token().map(|t| t.offset).unwrap_or(0),
        }
    }

    /// Number of columns the diagnostic pointer should cover.
    pub fn width(&self) -> usize {
        self.token().map(Token::width).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_token() -> Token {
        Token::new(
            Terminal::StringLiteral,
            "\"sum=\"",
            40,
            SourceLocation::new(3, 10),
        )
    }

    #[test]
    fn test_unexpected_token_message() {
        let err = SyntaxError::UnexpectedToken {
            expected: Terminal::LtLt,
            found: string_token(),
            production: Some(ProductionId(42)),
        };
        let message = err.to_string();
        assert!(message.starts_with("expected `<<`, found string-literal"));
        assert!(message.ends_with("while matching production 43"));
        assert_eq!(err.location(), SourceLocation::new(3, 10));
        assert_eq!(err.offset(), 40);
        assert_eq!(err.width(), 6);
    }

    #[test]
    fn test_no_production_lists_expected() {
        let err = SyntaxError::NoProduction {
            non_terminal: NonTerminal::OutputItem,
            found: Token::new(Terminal::Semicolon, ";", 0, SourceLocation::new(1, 1)),
            expected: vec![Terminal::Identifier, Terminal::Number],
        };
        assert_eq!(
            err.to_string(),
            "no production of `OutputItem` starts with `;`; expected one of identifier, number"
        );
    }

    #[test]
    fn test_unterminated_input_anchor() {
        let err = SyntaxError::UnterminatedInput {
            offset: 12,
            location: SourceLocation::new(2, 4),
        };
        assert!(err.token().is_none());
        assert_eq!(err.location(), SourceLocation::new(2, 4));
        assert_eq!(err.width(), 1);
    }
}
