//! Lexer (tokenizer) for the C++ subset
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! predictive parser. Multi-character operators (`<<`, `>>`, `<=`, `>=`,
//! `==`, `!=`) are always merged here so the parser only ever sees atomic
//! terminals. `#include` is followed by a `<name>` header token.
//!
//! The stream always ends with a [`Terminal::EndMarker`] sentinel.

use crate::grammar::Terminal;
use std::fmt;
use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A lexeme classified as a grammar terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub terminal: Terminal,
    /// Source text of the token; string literals keep their quotes.
    pub lexeme: String,
    /// Character offset of the first character in the source.
    pub offset: usize,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        terminal: Terminal,
        lexeme: impl Into<String>,
        offset: usize,
        location: SourceLocation,
    ) -> Self {
        Self {
            terminal,
            lexeme: lexeme.into(),
            offset,
            location,
        }
    }

    /// The end-of-input sentinel placed after the last real token.
    pub fn end_marker(offset: usize, location: SourceLocation) -> Self {
        Self::new(Terminal::EndMarker, "", offset, location)
    }

    pub fn is_end_marker(&self) -> bool {
        self.terminal == Terminal::EndMarker
    }

    /// Width in characters, at least 1 so the sentinel can still be pointed at.
    pub fn width(&self) -> usize {
        self.lexeme.chars().count().max(1)
    }

    /// How the token is named in diagnostics, e.g. ``identifier `x` `` or
    /// `` `;` ``.
    pub fn describe(&self) -> String {
        if self.terminal.is_class() && !self.is_end_marker() {
            format!("{} `{}`", self.terminal.describe(), self.lexeme)
        } else {
            self.terminal.describe()
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end_marker() {
            write!(f, "[$]")
        } else {
            write!(f, "[{}, {}]", self.terminal.category(), self.lexeme)
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for C++ subset source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    expect_header: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            expect_header: false,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::end_marker(self.position, self.current_location()));
                break;
            }

            let token = if self.expect_header {
                self.expect_header = false;
                self.header_name()?
            } else {
                self.next_token()?
            };
            if token.terminal == Terminal::Include {
                self.expect_header = true;
            }
            tokens.push(token);
        }

        tracing::debug!(tokens = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        let terminal = match ch {
            '"' => return self.string_literal(start, loc),
            '#' => return self.directive(start, loc),
            '0'..='9' => return Ok(self.number_literal(start, loc)),
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(start, loc)),

            '=' => self.pick('=', Terminal::EqEq, Terminal::Assign),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Terminal::NotEq
                } else {
                    return Err(LexError {
                        message: "Unexpected character: '!'".to_string(),
                        location: loc,
                    });
                }
            }
            '<' => {
                if self.peek() == Some('<') {
                    self.advance();
                    Terminal::LtLt
                } else {
                    self.pick('=', Terminal::Le, Terminal::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Terminal::GtGt
                } else {
                    self.pick('=', Terminal::Ge, Terminal::Gt)
                }
            }
            '+' => Terminal::Plus,
            '-' => Terminal::Minus,
            '*' => Terminal::Star,
            '/' => Terminal::Slash,
            '(' => Terminal::LParen,
            ')' => Terminal::RParen,
            '{' => Terminal::LBrace,
            '}' => Terminal::RBrace,
            ';' => Terminal::Semicolon,
            ',' => Terminal::Comma,

            _ => {
                return Err(LexError {
                    message: format!("Unexpected character: '{}'", ch),
                    location: loc,
                });
            }
        };

        Ok(self.token_from(terminal, start, loc))
    }

    /// Consume `next` if it follows, choosing between the two-character and
    /// the one-character terminal.
    fn pick(&mut self, next: char, merged: Terminal, single: Terminal) -> Terminal {
        if self.peek() == Some(next) {
            self.advance();
            merged
        } else {
            single
        }
    }

    fn token_from(&self, terminal: Terminal, start: usize, loc: SourceLocation) -> Token {
        let lexeme: String = self.input[start..self.position].iter().collect();
        Token::new(terminal, lexeme, start, loc)
    }

    /// Parse string literal; the quotes stay part of the lexeme
    fn string_literal(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance(); // consume closing quote
                    return Ok(self.token_from(Terminal::StringLiteral, start, loc));
                }
                '\n' => break,
                '\\' => {
                    self.advance();
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal (integers only)
    fn number_literal(&mut self, start: usize, loc: SourceLocation) -> Token {
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
        self.token_from(Terminal::Number, start, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize, loc: SourceLocation) -> Token {
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            self.advance();
        }

        let word: String = self.input[start..self.position].iter().collect();
        let terminal = Terminal::keyword(&word).unwrap_or(Terminal::Identifier);
        Token::new(terminal, word, start, loc)
    }

    /// `#include` is the only supported directive
    fn directive(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        while self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
            self.advance();
        }

        let token = self.token_from(Terminal::Include, start, loc);
        if token.lexeme == "#include" {
            Ok(token)
        } else {
            Err(LexError {
                message: format!("Unsupported preprocessor directive: {}", token.lexeme),
                location: loc,
            })
        }
    }

    /// Parse the `<name>` header after `#include`
    fn header_name(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let loc = self.current_location();

        if self.advance() != Some('<') {
            return Err(LexError {
                message: "Expected '<' after #include".to_string(),
                location: loc,
            });
        }

        while let Some(ch) = self.peek() {
            match ch {
                '>' => {
                    self.advance();
                    return Ok(self.token_from(Terminal::Header, start, loc));
                }
                '\n' => break,
                _ => {
                    self.advance();
                }
            }
        }

        Err(LexError {
            message: "Unterminated header name".to_string(),
            location: loc,
        })
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        // Single-line comment
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        // Multi-line comment
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Terminal as T;

    fn terminals(source: &str) -> Vec<Terminal> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.terminal)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            terminals("int main() { return 0; }"),
            vec![
                T::Int,
                T::Main,
                T::LParen,
                T::RParen,
                T::LBrace,
                T::Return,
                T::Number,
                T::Semicolon,
                T::RBrace,
                T::EndMarker,
            ]
        );
    }

    #[test]
    fn test_operators_are_merged() {
        assert_eq!(
            terminals("<< >> <= >= == != < > ="),
            vec![
                T::LtLt,
                T::GtGt,
                T::Le,
                T::Ge,
                T::EqEq,
                T::NotEq,
                T::Lt,
                T::Gt,
                T::Assign,
                T::EndMarker,
            ]
        );
        assert_eq!(terminals("cin>>x"), vec![T::Cin, T::GtGt, T::Identifier, T::EndMarker]);
    }

    #[test]
    fn test_include_header() {
        let tokens = Lexer::new("#include <iostream>\nusing namespace std;")
            .tokenize()
            .unwrap();
        assert_eq!(tokens[0].terminal, T::Include);
        assert_eq!(tokens[0].lexeme, "#include");
        assert_eq!(tokens[1].terminal, T::Header);
        assert_eq!(tokens[1].lexeme, "<iostream>");
        assert_eq!(tokens[1].location, SourceLocation::new(1, 10));
        assert_eq!(tokens[2].terminal, T::Using);
        assert_eq!(tokens[2].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_string_literal_keeps_quotes() {
        let tokens = Lexer::new(r#"cout << "sum=";"#).tokenize().unwrap();
        assert_eq!(tokens[2].terminal, T::StringLiteral);
        assert_eq!(tokens[2].lexeme, "\"sum=\"");
        assert_eq!(tokens[2].offset, 8);
        assert_eq!(tokens[2].location, SourceLocation::new(1, 9));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            terminals("int x; // comment\nfloat y; /* block\ncomment */ x"),
            vec![
                T::Int,
                T::Identifier,
                T::Semicolon,
                T::Float,
                T::Identifier,
                T::Semicolon,
                T::Identifier,
                T::EndMarker,
            ]
        );
    }

    #[test]
    fn test_end_marker_location() {
        let tokens = Lexer::new("x\n  ").tokenize().unwrap();
        let end = tokens.last().unwrap();
        assert!(end.is_end_marker());
        assert_eq!(end.location, SourceLocation::new(2, 3));
        assert_eq!(end.offset, 4);
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("int x = 1;\n  @").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(2, 3));
        assert!(err.message.contains("'@'"));

        let err = Lexer::new("cout << \"open").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");

        let err = Lexer::new("#define X").tokenize().unwrap_err();
        assert!(err.message.contains("#define"));

        let err = Lexer::new("/* never closed").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
    }
}
