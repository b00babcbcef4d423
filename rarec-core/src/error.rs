//! Error types for the rewrite-rule compiler.
//!
//! Two failure classes exist and must not be conflated:
//!
//! - [`RarecError`] covers configuration errors: a structurally broken rule
//!   source (malformed sorts, operators the table has never heard of,
//!   variables used without a declaration) or an I/O failure. These abort
//!   the whole run.
//! - [`Gap`] covers encoding gaps: constructs the rule language allows but
//!   the target instruction set cannot express yet. A gap skips the one
//!   rule that hit it and the run continues.

use std::fmt;
use thiserror::Error;

/// Result type for fatal compiler errors.
pub type Result<T> = std::result::Result<T, RarecError>;

/// Fatal errors raised by the compiler.
#[derive(Debug, Error)]
pub enum RarecError {
    /// Rule source could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based source line of the offending token.
        line: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// A sort was constructed with the wrong number of arguments.
    #[error("malformed sort: {0}")]
    MalformedSort(String),

    /// A bound variable was declared with a sort that has no target type.
    #[error("sort `{0}` has no target type")]
    UnsupportedSort(String),

    /// An operator symbol is entirely unknown to the descriptor table.
    ///
    /// Distinct from an operator the table knows but cannot encode; that
    /// case is a recoverable [`Gap`], this one is not.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// A term references a variable the rule never declared.
    #[error("variable `{0}` is used but not declared")]
    UnboundVariable(String),

    /// A rule-source file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invariant violation inside the compiler itself.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A target-encoding gap: the construct is legal in the rule language but
/// has no compact encoding in the target instruction set.
///
/// Gaps are recoverable at rule granularity. The rule that contains one is
/// skipped with a diagnostic; the run itself carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// Operator is known to the table but marked unsupported.
    UnsupportedOp(&'static str),
    /// Negative integer literals have no defined limb encoding.
    NegativeInt,
    /// Rational literals have no target encoding.
    Rational,
    /// String literals have no target encoding.
    String,
    /// A raw placeholder reached the expression compiler.
    Placeholder,
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gap::UnsupportedOp(sym) => write!(f, "unsupported operator `{sym}`"),
            Gap::NegativeInt => write!(f, "negative integer constant"),
            Gap::Rational => write!(f, "rational constant"),
            Gap::String => write!(f, "string constant"),
            Gap::Placeholder => write!(f, "placeholder term"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_display() {
        assert_eq!(
            Gap::UnsupportedOp("bvsdiv").to_string(),
            "unsupported operator `bvsdiv`"
        );
        assert_eq!(Gap::NegativeInt.to_string(), "negative integer constant");
    }

    #[test]
    fn test_error_display() {
        let err = RarecError::UnknownOperator("frobnicate".to_string());
        assert_eq!(err.to_string(), "unknown operator: frobnicate");

        let err = RarecError::UnboundVariable("x".to_string());
        assert!(err.to_string().contains("`x`"));
    }
}
