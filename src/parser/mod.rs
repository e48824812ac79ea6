//! C++ subset front end
//!
//! This module turns source text into a derivation tree:
//! - [`lexer`]: Tokenization (source text → tokens ending in `$`)
//! - [`predictive`]: Table-driven LL(1) parsing (tokens → tree + trace)
//! - [`tree`]: Arena derivation tree
//! - [`errors`]: Syntax errors
//! - [`diagnostic`]: Source-anchored rendering of lexer and syntax errors
//! - [`search`]: Declaration and type lookup over a finished tree
//!
//! # Supported subset
//!
//! - `#include <header>` directives and `using namespace std;`
//! - A single `int main() { ... }` with an optional `return number;`
//! - `int`/`float` declarations with optional initializers
//! - Assignments, `while` loops, `cin >>` input and `cout <<` output
//!
//! # Parser Implementation
//!
//! The parser is a pushdown automaton driven by the table in
//! [`crate::tables`]; no recursive descent and no backtracking.

pub mod diagnostic;
pub mod errors;
pub mod lexer;
pub mod predictive;
pub mod search;
pub mod tree;

pub use diagnostic::DiagnosticPrinter;
pub use errors::SyntaxError;
pub use lexer::{LexError, Lexer, SourceLocation, Token};
pub use predictive::{Derivation, ParseRun, PredictiveParser, StackEntry, Step};
pub use search::{Declaration, ScalarType, TreeSearcher};
pub use tree::{Node, NodeId, NodeKind, ParseTree};
