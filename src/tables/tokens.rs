//! Token table: the distinct lexemes of a program grouped by category
//!
//! Entries are ordered by category (strings, numbers, symbols, identifiers,
//! reserved words, directives) and then by lexeme. Each lexeme carries the
//! first eight hex digits of its SHA-256 digest as a short fingerprint.

use crate::grammar::TokenCategory;
use crate::parser::lexer::Token;
use rustc_hash::FxHashSet;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTableEntry {
    pub category: TokenCategory,
    pub lexeme: String,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    entries: Vec<TokenTableEntry>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a token stream; the end-marker is skipped.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut table = Self::new();
        for token in tokens {
            table.insert(token);
        }
        table
    }

    /// Insert a token's lexeme at its sorted position. Returns false when
    /// the lexeme is already present or the token is the end-marker.
    pub fn insert(&mut self, token: &Token) -> bool {
        let category = token.terminal.category();
        if category == TokenCategory::End {
            return false;
        }

        let key = (category, token.lexeme.as_str());
        match self
            .entries
            .binary_search_by(|e| (e.category, e.lexeme.as_str()).cmp(&key))
        {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(
                    pos,
                    TokenTableEntry {
                        category,
                        lexeme: token.lexeme.clone(),
                        fingerprint: fingerprint(&token.lexeme),
                    },
                );
                true
            }
        }
    }

    pub fn entries(&self) -> &[TokenTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categories present in the table, in table order.
    pub fn categories(&self) -> Vec<TokenCategory> {
        let mut seen = FxHashSet::default();
        self.entries
            .iter()
            .filter(|e| seen.insert(e.category))
            .map(|e| e.category)
            .collect()
    }
}

/// First eight hex digits of the SHA-256 digest of `lexeme`.
pub fn fingerprint(lexeme: &str) -> String {
    let digest = Sha256::digest(lexeme.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(8);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    #[test]
    fn test_grouped_and_sorted() {
        let tokens = Lexer::new("int b; int a = 2; cout << \"x\" << a;")
            .tokenize()
            .unwrap();
        let table = TokenTable::from_tokens(&tokens);
        let listing: Vec<(TokenCategory, &str)> = table
            .entries()
            .iter()
            .map(|e| (e.category, e.lexeme.as_str()))
            .collect();
        assert_eq!(
            listing,
            vec![
                (TokenCategory::StringLiteral, "\"x\""),
                (TokenCategory::Number, "2"),
                (TokenCategory::Symbol, ";"),
                (TokenCategory::Symbol, "<<"),
                (TokenCategory::Symbol, "="),
                (TokenCategory::Identifier, "a"),
                (TokenCategory::Identifier, "b"),
                (TokenCategory::ReservedWord, "cout"),
                (TokenCategory::ReservedWord, "int"),
            ]
        );
    }

    #[test]
    fn test_fingerprint() {
        // sha256("int") = 6da88c34...
        assert_eq!(fingerprint("int"), "6da88c34");
        assert_eq!(fingerprint("x").len(), 8);
    }

    #[test]
    fn test_duplicates_ignored() {
        let tokens = Lexer::new("x x x").tokenize().unwrap();
        let table = TokenTable::from_tokens(&tokens);
        assert_eq!(table.len(), 1);
        assert_eq!(table.categories(), vec![TokenCategory::Identifier]);
    }
}
