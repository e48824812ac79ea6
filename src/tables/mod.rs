//! Parser tables
//!
//! Everything that is computed once from the grammar (or, for the token
//! table, once per program) and read afterwards:
//! - [`sets`]: FIRST/FOLLOW fixed-point computation
//! - [`table`]: the LL(1) parse table and conflict detection
//! - [`tokens`]: the categorized lexeme table with fingerprints
//!
//! All of these are immutable once built and can be shared between parses.

pub mod sets;
pub mod table;
pub mod tokens;

pub use sets::{GrammarSets, TerminalSet};
pub use table::ParseTable;
pub use tokens::{TokenTable, TokenTableEntry};
