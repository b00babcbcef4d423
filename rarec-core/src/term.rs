//! Term algebra for rewrite rules.
//!
//! Terms are built once by the parser and read-only afterwards; the
//! compiler never mutates them. The variant set is closed on purpose:
//! every consumer matches exhaustively, so adding a term kind without
//! teaching the expression compiler and the constant encoder about it is
//! a compile error rather than a silent mis-encoding.

use crate::op::Op;
use crate::sort::Sort;
use num_bigint::BigInt;
use num_rational::BigRational;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A term of the surface rule language.
#[derive(Debug, Clone)]
pub enum Term {
    /// Operator application over ordered children.
    App(Op, Vec<Term>),
    /// A rule-scoped bound variable. Identity is the name alone; the sort
    /// is carried for convenience and does not participate in equality.
    Var {
        /// Variable name, unique within one rule.
        name: String,
        /// Declared sort, when known.
        sort: Option<Sort>,
    },
    /// Boolean literal.
    BoolConst(bool),
    /// Arbitrary-precision integer literal.
    IntConst(BigInt),
    /// Rational literal. Parsed, never encodable.
    RatConst(BigRational),
    /// String literal. Parsed, never encodable.
    StrConst(String),
    /// Wildcard matching anything.
    Placeholder,
}

impl Term {
    /// Shorthand for a sortless variable.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var {
            name: name.into(),
            sort: None,
        }
    }

    /// Shorthand for an integer literal.
    #[must_use]
    pub fn int(value: impl Into<BigInt>) -> Self {
        Term::IntConst(value.into())
    }

    /// True iff this term is the literal boolean constant `true`.
    #[must_use]
    pub fn is_literal_true(&self) -> bool {
        matches!(self, Term::BoolConst(true))
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::App(op_a, ch_a), Term::App(op_b, ch_b)) => op_a == op_b && ch_a == ch_b,
            (Term::Var { name: a, .. }, Term::Var { name: b, .. }) => a == b,
            (Term::BoolConst(a), Term::BoolConst(b)) => a == b,
            (Term::IntConst(a), Term::IntConst(b)) => a == b,
            (Term::RatConst(a), Term::RatConst(b)) => a == b,
            (Term::StrConst(a), Term::StrConst(b)) => a == b,
            (Term::Placeholder, Term::Placeholder) => true,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Each arm hashes a distinct tag so payload-equal values of
        // different variants cannot collide by construction.
        match self {
            Term::App(op, children) => {
                0u8.hash(state);
                op.hash(state);
                children.hash(state);
            }
            Term::Var { name, .. } => {
                1u8.hash(state);
                name.hash(state);
            }
            Term::BoolConst(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Term::IntConst(v) => {
                3u8.hash(state);
                v.hash(state);
            }
            Term::RatConst(v) => {
                4u8.hash(state);
                v.hash(state);
            }
            Term::StrConst(v) => {
                5u8.hash(state);
                v.hash(state);
            }
            Term::Placeholder => 6u8.hash(state),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::App(op, children) => {
                write!(f, "({}", op.symbol())?;
                for child in children {
                    write!(f, " {child}")?;
                }
                write!(f, ")")
            }
            Term::Var { name, .. } => write!(f, "{name}"),
            Term::BoolConst(v) => write!(f, "{v}"),
            Term::IntConst(v) => write!(f, "{v}"),
            Term::RatConst(v) => write!(f, "{v}"),
            Term::StrConst(v) => write!(f, "\"{v}\""),
            Term::Placeholder => write!(f, "_"),
        }
    }
}
