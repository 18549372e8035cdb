//! Plurality definition error types.

use thiserror::Error;

/// An error that occurred while compiling a plurality definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluralityError {
    /// The definition string does not follow the clause grammar.
    #[error("syntax error at offset {position} in plurality definition '{definition}': {message}")]
    Syntax {
        definition: String,
        position: usize,
        message: String,
    },

    /// A `(*)` clause appears before another clause.
    #[error("catch-all clause must be last in plurality definition '{definition}'")]
    CatchAllNotLast { definition: String },

    /// A range whose lower bound exceeds its upper bound.
    #[error("empty range {low}→{high} in plurality definition '{definition}'")]
    EmptyRange {
        definition: String,
        low: u64,
        high: u64,
    },

    /// A `%0:` modulus.
    #[error("modulus must be positive in plurality definition '{definition}'")]
    ZeroModulus { definition: String },

    /// A guard that is not a valid regular expression.
    #[error("invalid guard pattern '{pattern}': {message}")]
    InvalidGuard { pattern: String, message: String },
}
