//! # Introduction
//!
//! cppiler is the front end of a teaching compiler for a small C++ subset.
//! It builds an LL(1) parse table from the subset's grammar, parses programs
//! with a table-driven predictive parser, and reports syntax errors against
//! the source. The parse can be stepped through, one stack move at a time,
//! in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Grammar → FIRST/FOLLOW → Parse table ─┐
//! Source  → Lexer → Tokens ─────────────┴→ Predictive parser → Tree + trace
//! ```
//!
//! 1. [`grammar`]: terminal and non-terminal alphabets and the numbered
//!    productions of the subset.
//! 2. [`tables`]: FIRST/FOLLOW sets, the LL(1) parse table with conflict
//!    detection, and the token table.
//! 3. [`parser`]: lexer, predictive parser, derivation tree, diagnostics and
//!    tree search.
//! 4. [`snapshot`]: per-move step history with a configurable memory limit.
//! 5. [`report`]: the plain-text report of every phase.
//! 6. [`ui`]: ratatui-based step viewer; not part of the stable library API.
//!
//! ## Supported C++ subset
//!
//! `#include <header>`, `using namespace std;`, one `int main()` with
//! `int`/`float` declarations, assignments with `+ - * /`, `while` loops
//! over a comparison, `cin >>`, `cout <<` and `return number;`.

pub mod config;
pub mod grammar;
pub mod parser;
pub mod report;
pub mod snapshot;
pub mod tables;
pub mod ui;

pub use grammar::{Grammar, GrammarError, NonTerminal, Production, ProductionId, Symbol, Terminal};
pub use parser::{Derivation, DiagnosticPrinter, Lexer, PredictiveParser, SyntaxError, Token};
pub use tables::ParseTable;
