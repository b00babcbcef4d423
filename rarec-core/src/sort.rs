//! Sort system for rewrite-rule terms.
//!
//! Sorts classify the bound variables of a rule and drive the parameter
//! types emitted into the compiled rewrite table. The surface language
//! distinguishes concrete sorts (`Bool`, `Int`, `Real`, fixed-width
//! bit-vectors) from the abstract ones used by width-polymorphic rules:
//! `?BitVec` (a bit-vector of any width) and `?` (any sort at all).

use crate::error::{RarecError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The base of a sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKind {
    /// Boolean sort.
    Bool,
    /// Integer sort.
    Int,
    /// Real sort. Parsed, but has no target type.
    Real,
    /// Fixed-width bit-vector sort; carries exactly its bit width.
    BitVec(u32),
    /// Bit-vector of arbitrary width (`?BitVec`).
    AbsBitVec,
    /// Fully abstract sort (`?`).
    AbsAbs,
}

/// A sort together with its surface-language modifiers.
///
/// `is_const` is deliberately excluded from equality and hashing: the
/// reference behavior compares only the base kind and the list flag, and
/// callers must not rely on the const marker for deduplication.
#[derive(Debug, Clone, Eq)]
pub struct Sort {
    /// Base kind of the sort.
    pub kind: SortKind,
    /// The sort denotes a variadic list of its base sort.
    pub is_list: bool,
    /// Constant-folding marker from the rule source.
    pub is_const: bool,
}

impl PartialEq for Sort {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.is_list == other.is_list
    }
}

impl Hash for Sort {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.is_list.hash(state);
    }
}

impl Sort {
    /// Create a plain sort with no modifiers.
    #[must_use]
    pub fn new(kind: SortKind) -> Self {
        Self {
            kind,
            is_list: false,
            is_const: false,
        }
    }

    /// Create a fixed-width bit-vector sort from a parsed argument list.
    ///
    /// The surface syntax is `(_ BitVec w)`; exactly one width argument is
    /// required and anything else is a configuration error.
    pub fn bit_vec(args: &[u32]) -> Result<Self> {
        match args {
            [width] => Ok(Self::new(SortKind::BitVec(*width))),
            _ => Err(RarecError::MalformedSort(format!(
                "BitVec expects exactly 1 width argument, found {}",
                args.len()
            ))),
        }
    }

    /// Mark this sort as a variadic list sort.
    #[must_use]
    pub fn into_list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Mark this sort with the constant-folding marker.
    #[must_use]
    pub fn into_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Render the target parameter type for a bound variable of this sort.
    ///
    /// `Real` has no target type and aborts the run; a rule source that
    /// binds a real-sorted variable is structurally outside the target's
    /// reach, not a per-rule gap.
    pub fn target_type(&self) -> Result<String> {
        let base = match &self.kind {
            SortKind::Bool => "Bool".to_string(),
            SortKind::Int => "Int".to_string(),
            SortKind::AbsBitVec => "BVQ".to_string(),
            SortKind::AbsAbs => "Q".to_string(),
            SortKind::BitVec(width) => format!("BV({width})"),
            SortKind::Real => return Err(RarecError::UnsupportedSort(self.to_string())),
        };
        if self.is_list {
            Ok(format!("{base}s"))
        } else {
            Ok(base)
        }
    }
}

// Display mirrors the surface syntax, with the list marker appended the way
// the rule language writes it.
impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SortKind::Bool => write!(f, "Bool")?,
            SortKind::Int => write!(f, "Int")?,
            SortKind::Real => write!(f, "Real")?,
            SortKind::BitVec(w) => write!(f, "(_ BitVec {w})")?,
            SortKind::AbsBitVec => write!(f, "?BitVec")?,
            SortKind::AbsAbs => write!(f, "?")?,
        }
        if self.is_list {
            write!(f, " :list")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_bit_vec_arity() {
        assert!(Sort::bit_vec(&[32]).is_ok());
        assert!(matches!(
            Sort::bit_vec(&[]),
            Err(RarecError::MalformedSort(_))
        ));
        assert!(matches!(
            Sort::bit_vec(&[8, 16]),
            Err(RarecError::MalformedSort(_))
        ));
    }

    #[test]
    fn test_equality_ignores_const_marker() {
        let plain = Sort::new(SortKind::Bool);
        let marked = Sort::new(SortKind::Bool).into_const();
        assert_eq!(plain, marked);

        let listed = Sort::new(SortKind::Bool).into_list();
        assert_ne!(plain, listed);
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        let mut map = FxHashMap::default();
        map.insert(Sort::new(SortKind::Int), 1);
        // Equal sorts must collide regardless of the const marker.
        assert_eq!(map.get(&Sort::new(SortKind::Int).into_const()), Some(&1));
    }

    #[test]
    fn test_target_types() {
        assert_eq!(Sort::new(SortKind::Bool).target_type().unwrap(), "Bool");
        assert_eq!(Sort::new(SortKind::Int).target_type().unwrap(), "Int");
        assert_eq!(Sort::new(SortKind::AbsBitVec).target_type().unwrap(), "BVQ");
        assert_eq!(Sort::new(SortKind::AbsAbs).target_type().unwrap(), "Q");
        assert_eq!(
            Sort::new(SortKind::BitVec(64)).target_type().unwrap(),
            "BV(64)"
        );
        assert_eq!(
            Sort::new(SortKind::AbsBitVec).into_list().target_type().unwrap(),
            "BVQs"
        );
        assert!(matches!(
            Sort::new(SortKind::Real).target_type(),
            Err(RarecError::UnsupportedSort(_))
        ));
    }
}
