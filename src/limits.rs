//! Limits for designator parsing and resolution
//!
//! Designators usually arrive from configuration or user input, so both the
//! parser and the resolver bound the work a single call may do.

use crate::error::{Error, Result};

/// Global limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum length of an SCD/SCP text, in characters
    pub max_expression_length: usize,

    /// Maximum number of steps in a parsed designator
    pub max_steps: usize,

    /// Maximum size of any intermediate working set
    pub max_result_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_expression_length: 64 * 1024,
            max_steps: 256,
            max_result_size: 1_000_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_expression_length: 4 * 1024,
            max_steps: 32,
            max_result_size: 10_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_expression_length: 16 * 1024 * 1024,
            max_steps: 65_536,
            max_result_size: usize::MAX,
        }
    }

    /// Check if an expression length is within limits
    pub fn check_expression_length(&self, length: usize) -> Result<()> {
        if length > self.max_expression_length {
            Err(Error::LimitExceeded(format!(
                "expression length {} exceeds maximum {}",
                length, self.max_expression_length
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a step count is within limits
    pub fn check_steps(&self, count: usize) -> Result<()> {
        if count > self.max_steps {
            Err(Error::LimitExceeded(format!(
                "step count {} exceeds maximum {}",
                count, self.max_steps
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a working set size is within limits
    pub fn check_result_size(&self, size: usize) -> Result<()> {
        if size > self.max_result_size {
            Err(Error::LimitExceeded(format!(
                "working set size {} exceeds maximum {}",
                size, self.max_result_size
            )))
        } else {
            Ok(())
        }
    }
}
