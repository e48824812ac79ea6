//! Grammar-definition errors
//!
//! These are detected once, while validating a grammar or building its parse
//! table, and are fatal to the build. None of them is ever resolved by
//! picking an alternative.

use super::{NonTerminal, ProductionId, Terminal};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A right-hand side references a non-terminal with no productions
    #[error("non-terminal `{non_terminal}` used in production {production} has no productions")]
    UndefinedNonTerminal {
        non_terminal: NonTerminal,
        production: ProductionId,
    },

    /// The designated start symbol has no productions
    #[error("start symbol `{0}` has no productions")]
    MissingStart(NonTerminal),

    /// The end-marker is reserved for the parser and may not appear in a body
    #[error("production {0} uses the end-marker `$` in its body")]
    EndMarkerInBody(ProductionId),

    /// Two productions claim the same parse table cell
    #[error(
        "grammar is not LL(1): productions {existing} and {competing} of `{non_terminal}` both apply on `{terminal}`"
    )]
    Conflict {
        non_terminal: NonTerminal,
        terminal: Terminal,
        existing: ProductionId,
        competing: ProductionId,
    },

    /// A set computation did not settle within its pass budget
    #[error("{sets} sets did not reach a fixed point within {passes} passes")]
    NoFixedPoint { sets: &'static str, passes: usize },
}
