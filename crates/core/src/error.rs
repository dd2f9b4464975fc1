//! Runtime Error Handling
//!
//! Every failure raised by dispatch, vectorisation or an element body is a
//! [`RuntimeError`]. Errors are never swallowed: they propagate through
//! `?` back to the execution backend, which decides whether to abort.

use crate::value::Tag;
use std::fmt;

/// Errors raised while evaluating elements
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// No branch handles the observed tags and vectorisation has no target
    OperandType {
        element: String,
        tags: Vec<Tag>,
    },
    /// Fewer operands on the stack than the element's declared arity
    StackUnderflow {
        element: String,
        needed: usize,
        available: usize,
    },
    /// Value-domain failure inside one tag-pair branch
    Computation {
        element: String,
        branch: String,
        message: String,
    },
    /// An operation was applied to the wrong number of operands
    Arity { expected: usize, found: usize },
    /// The value cannot be coerced into a sequence
    NotIterable { tag: Tag },
    /// The input source failed
    Input(String),
    /// Element registration was rejected
    InvalidElement(String),
}

impl RuntimeError {
    /// Shorthand for a [`RuntimeError::Computation`] error
    pub fn computation(
        element: impl Into<String>,
        branch: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RuntimeError::Computation {
            element: element.into(),
            branch: branch.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`RuntimeError::OperandType`] error
    pub fn operand_type(element: impl Into<String>, tags: Vec<Tag>) -> Self {
        RuntimeError::OperandType {
            element: element.into(),
            tags,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::OperandType { element, tags } => {
                let names: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
                write!(
                    f,
                    "{}: unsupported operand types ({})",
                    element,
                    names.join(", ")
                )
            }
            RuntimeError::StackUnderflow {
                element,
                needed,
                available,
            } => write!(
                f,
                "{}: stack underflow (needs {} operands, {} available)",
                element, needed, available
            ),
            RuntimeError::Computation {
                element,
                branch,
                message,
            } => write!(f, "{} {}: {}", element, branch, message),
            RuntimeError::Arity { expected, found } => write!(
                f,
                "arity mismatch: operation takes {} operands, got {}",
                expected, found
            ),
            RuntimeError::NotIterable { tag } => write!(f, "{} is not iterable", tag),
            RuntimeError::Input(msg) => write!(f, "input error: {}", msg),
            RuntimeError::InvalidElement(msg) => write!(f, "invalid element: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        RuntimeError::Input(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
