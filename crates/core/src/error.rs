//! Evaluation errors
//!
//! Every failure aborts the reduction in progress. The state passed in is
//! never modified, so a host that keeps its last good `State` can simply
//! discard the failed word and carry on.

use crate::value::{Shape, Value};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A name with no dictionary binding
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// A primitive needed more stack elements than were present
    #[error("{operation}: stack underflow (needs {required}, have {actual})")]
    StackUnderflow {
        operation: String,
        required: usize,
        actual: usize,
    },

    /// An operand had the wrong shape. `position` counts from the top (0).
    #[error("{operation}: expected {expected} at stack position {position}, got {actual}")]
    TypeMismatch {
        operation: String,
        position: usize,
        expected: Shape,
        actual: Value,
    },

    /// Named quotations nested deeper than the configured limit
    #[error("evaluation depth exceeded {limit} while expanding `{word}`")]
    EvaluationDepthExceeded { word: String, limit: usize },
}

impl EvalError {
    pub fn underflow(operation: &str, required: usize, actual: usize) -> Self {
        EvalError::StackUnderflow {
            operation: operation.to_string(),
            required,
            actual,
        }
    }

    pub fn mismatch(operation: &str, position: usize, expected: Shape, actual: &Value) -> Self {
        EvalError::TypeMismatch {
            operation: operation.to_string(),
            position,
            expected,
            actual: actual.clone(),
        }
    }
}
