//! Error types for the SWRL reasoner
//!
//! Construction errors surface when atoms, built-ins, and rules are built.
//! Evaluation only fails for unknown built-ins and failed rule tasks;
//! per-row type mismatches inside built-ins drop the row instead.

use thiserror::Error;

/// Reasoner errors
#[derive(Error, Debug)]
pub enum ReasonerError {
    /// Atom constructed without a predicate
    #[error("Atom is missing its predicate")]
    MissingPredicate,

    /// Atom constructed without a left argument
    #[error("Atom is missing its left argument")]
    MissingLeftArgument,

    /// Binary atom constructed without a right argument
    #[error("{0} atom requires a right argument")]
    MissingRightArgument(String),

    /// Rule constructed without an identifier
    #[error("Rule is missing its identifier")]
    MissingRuleId,

    /// Rule constructed without an antecedent
    #[error("Rule '{0}' is missing its antecedent")]
    MissingAntecedent(String),

    /// Rule constructed without a consequent
    #[error("Rule '{0}' is missing its consequent")]
    MissingConsequent(String),

    /// Malformed regular expression or flags
    #[error("Invalid regex: {0}")]
    InvalidRegex(String),

    /// Division built-in constructed with a zero constant
    #[error("Division by zero constant in {0}")]
    DivideByZero(String),

    /// Argument of the wrong shape for its position
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Built-in predicate IRI with no known implementation
    #[error("Unknown built-in predicate: {0}")]
    UnknownBuiltIn(String),

    /// A rule task panicked or was cancelled
    #[error("Rule task failed: {0}")]
    TaskJoin(String),
}

impl ReasonerError {
    /// Create an invalid regex error
    pub fn invalid_regex(msg: impl Into<String>) -> Self {
        ReasonerError::InvalidRegex(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ReasonerError::InvalidArgument(msg.into())
    }

    /// Create a task join error
    pub fn task_join(msg: impl Into<String>) -> Self {
        ReasonerError::TaskJoin(msg.into())
    }
}

/// Result type for reasoner operations
pub type Result<T> = std::result::Result<T, ReasonerError>;
