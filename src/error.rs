//! Error types for xmlschema-scd
//!
//! Every grammar or navigation violation surfaces as a single [`Error`] type.
//! Nothing is recovered internally: a failed parse or resolution returns no
//! partial result and the caller decides what to do with the error.

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for designator parsing and resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed SCD/SCP text
    #[error("grammar error: {0}")]
    Grammar(#[from] ParseError),

    /// A name test used a prefix that no binding declares
    #[error("undeclared namespace prefix '{0}'")]
    UndeclaredPrefix(String),

    /// Construct that is recognized but deliberately not supported
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Positional predicate that is zero, overflowing, or out of range
    #[error("invalid predicate: {0}")]
    InvalidPredicate(String),

    /// Caller broke a contract (e.g. no namespace context for a prefixed name)
    #[error("internal error: {0}")]
    Internal(String),

    /// Schema component graph construction error
    #[error("schema error: {0}")]
    Schema(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl Error {
    /// Check if this error reports an unsupported axis or construct
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }

    /// Check if this error reports a grammar problem
    pub fn is_grammar(&self) -> bool {
        matches!(self, Error::Grammar(_))
    }
}

/// Grammar error with the location inside the designator text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Character offset where the scanner stopped
    pub position: Option<usize>,
    /// The designator text being parsed
    pub expression: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            expression: None,
        }
    }

    /// Set the character offset
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the expression
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(pos) = self.position {
            write!(f, " at position {}", pos)?;
        }

        if let Some(ref expr) = self.expression {
            write!(f, "\n\nExpression: {}", expr)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
