//! Rule model and per-rule compilation policy.
//!
//! One rule either compiles to a complete tuple for exactly one of the two
//! output buckets, or is skipped as a whole. Partial rules never exist:
//! the first encoding gap anywhere in the condition, pattern or
//! replacement discards everything already lowered for that rule.
//!
//! `compile_rule` is side-effect free. Skips are reported through
//! [`RuleOutcome::Skipped`] and logged by the batch driver, which keeps
//! this layer independently testable.

use crate::encode::{Lower, lower_term};
use crate::error::{Gap, Result};
use crate::sort::Sort;
use crate::term::Term;
use rustc_hash::FxHashMap;
use std::fmt;

/// A parsed rewrite rule, consumed read-only.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Rule name as written in the source.
    pub name: String,
    /// Bound variables in declaration order; names are unique per rule.
    pub bound_vars: Vec<(String, Sort)>,
    /// Optional boolean guard.
    pub cond: Option<Term>,
    /// Pattern to match.
    pub lhs: Term,
    /// Replacement term.
    pub rhs: Term,
    /// True for `define-rule*` rules, which rewrite to a normal form by
    /// iteration and have no one-shot encoding.
    pub is_fixed_point: bool,
}

impl Rule {
    /// The stable identifier naming this rule in generated enumerations.
    ///
    /// Rule names use `-` and `.` freely; the identifier must survive
    /// token pasting in the target's table macros, so every
    /// non-alphanumeric character maps to `_` and letters are uppercased.
    #[must_use]
    pub fn enum_id(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

/// Why a rule was skipped rather than compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The rule is a fixed-point rewrite.
    FixedPoint,
    /// Some part of the rule hit a target-encoding gap.
    Gap(Gap),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FixedPoint => write!(f, "fixed-point rule"),
            SkipReason::Gap(gap) => write!(f, "{gap}"),
        }
    }
}

/// Result of compiling one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule compiled to a complete tuple.
    Compiled {
        /// Rendered tuple text, ready for macro wrapping.
        tuple: String,
        /// Whether the tuple carries a condition.
        conditional: bool,
    },
    /// The rule was skipped; nothing of it reaches the output.
    Skipped(SkipReason),
}

/// Lower one part of a rule, separating recoverable gaps from fatal errors.
fn lower_part(
    term: &Term,
    positions: &FxHashMap<String, usize>,
) -> Result<std::result::Result<String, Gap>> {
    match lower_term(term, positions) {
        Ok(text) => Ok(Ok(text)),
        Err(Lower::Gap(gap)) => Ok(Err(gap)),
        Err(Lower::Fatal(err)) => Err(err),
    }
}

/// Compile a single rule into its rendered tuple.
///
/// Policy, in order: fixed-point rules are skipped outright; the variable
/// position table and target parameter types come from the declaration
/// order of the bound variables; the condition is lowered only when
/// present and not the literal `true`; any encoding gap in any of the
/// three parts skips the whole rule. Fatal errors (unbound variables,
/// unsupported sorts) propagate to the caller and abort the run.
pub fn compile_rule(rule: &Rule) -> Result<RuleOutcome> {
    if rule.is_fixed_point {
        return Ok(RuleOutcome::Skipped(SkipReason::FixedPoint));
    }

    let mut param_types = Vec::with_capacity(rule.bound_vars.len());
    let mut positions = FxHashMap::default();
    for (index, (name, sort)) in rule.bound_vars.iter().enumerate() {
        param_types.push(sort.target_type()?);
        positions.insert(name.clone(), index);
    }

    let cond = match &rule.cond {
        Some(cond) if !cond.is_literal_true() => match lower_part(cond, &positions)? {
            Ok(text) => Some(text),
            Err(gap) => return Ok(RuleOutcome::Skipped(SkipReason::Gap(gap))),
        },
        _ => None,
    };
    let lhs = match lower_part(&rule.lhs, &positions)? {
        Ok(text) => text,
        Err(gap) => return Ok(RuleOutcome::Skipped(SkipReason::Gap(gap))),
    };
    let rhs = match lower_part(&rule.rhs, &positions)? {
        Ok(text) => text,
        Err(gap) => return Ok(RuleOutcome::Skipped(SkipReason::Gap(gap))),
    };

    let id = rule.enum_id();
    let params = param_types.join(", ");
    let outcome = match cond {
        None => RuleOutcome::Compiled {
            tuple: format!("({id}, ({params}), {lhs}, {rhs})"),
            conditional: false,
        },
        Some(cond) => RuleOutcome::Compiled {
            tuple: format!("({id}, ({params}), {cond}, {lhs}, {rhs})"),
            conditional: true,
        },
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RarecError;
    use crate::op::Op;
    use crate::sort::SortKind;

    fn double_not_rule() -> Rule {
        Rule {
            name: "bool-double-not-elim".to_string(),
            bound_vars: vec![("x".to_string(), Sort::new(SortKind::Bool))],
            cond: None,
            lhs: Term::App(Op::Not, vec![Term::App(Op::Not, vec![Term::var("x")])]),
            rhs: Term::var("x"),
            is_fixed_point: false,
        }
    }

    #[test]
    fn test_enum_id() {
        assert_eq!(
            double_not_rule().enum_id(),
            "BOOL_DOUBLE_NOT_ELIM"
        );
        let rule = Rule {
            name: "bv-ugt-eliminate.2".to_string(),
            ..double_not_rule()
        };
        assert_eq!(rule.enum_id(), "BV_UGT_ELIMINATE_2");
    }

    #[test]
    fn test_unconditional_tuple() {
        let outcome = compile_rule(&double_not_rule()).unwrap();
        assert_eq!(
            outcome,
            RuleOutcome::Compiled {
                tuple: "(BOOL_DOUBLE_NOT_ELIM, (Bool), not(not(V(0))), V(0))".to_string(),
                conditional: false,
            }
        );
    }

    #[test]
    fn test_literal_true_condition_is_dropped() {
        let mut rule = double_not_rule();
        rule.cond = Some(Term::BoolConst(true));
        let outcome = compile_rule(&rule).unwrap();
        assert!(matches!(
            outcome,
            RuleOutcome::Compiled {
                conditional: false,
                ..
            }
        ));
    }

    #[test]
    fn test_conditional_tuple() {
        let rule = Rule {
            name: "bv-shl-zero".to_string(),
            bound_vars: vec![
                ("x".to_string(), Sort::new(SortKind::AbsBitVec)),
                ("y".to_string(), Sort::new(SortKind::AbsBitVec)),
            ],
            cond: Some(Term::App(
                Op::Eq,
                vec![Term::var("y"), Term::int(0)],
            )),
            lhs: Term::App(Op::Bvshl, vec![Term::var("x"), Term::var("y")]),
            rhs: Term::var("x"),
            is_fixed_point: false,
        };
        let outcome = compile_rule(&rule).unwrap();
        assert_eq!(
            outcome,
            RuleOutcome::Compiled {
                tuple: "(BV_SHL_ZERO, (BVQ, BVQ), eq(V(1), bv_val(32, 0)), \
                        bvshl(V(0), V(1)), V(0))"
                    .to_string(),
                conditional: true,
            }
        );
    }

    #[test]
    fn test_fixed_point_rule_is_skipped() {
        let mut rule = double_not_rule();
        rule.is_fixed_point = true;
        assert_eq!(
            compile_rule(&rule).unwrap(),
            RuleOutcome::Skipped(SkipReason::FixedPoint)
        );
    }

    #[test]
    fn test_unsupported_operator_skips_whole_rule() {
        let mut rule = double_not_rule();
        rule.rhs = Term::App(Op::Bvsdiv, vec![Term::var("x"), Term::var("x")]);
        assert_eq!(
            compile_rule(&rule).unwrap(),
            RuleOutcome::Skipped(SkipReason::Gap(Gap::UnsupportedOp("bvsdiv")))
        );
    }

    #[test]
    fn test_gap_in_condition_skips_whole_rule() {
        let mut rule = double_not_rule();
        rule.cond = Some(Term::App(Op::Bvredand, vec![Term::var("x")]));
        assert_eq!(
            compile_rule(&rule).unwrap(),
            RuleOutcome::Skipped(SkipReason::Gap(Gap::UnsupportedOp("bvredand")))
        );
    }

    #[test]
    fn test_undeclared_variable_is_fatal() {
        let mut rule = double_not_rule();
        rule.rhs = Term::var("ghost");
        assert!(matches!(
            compile_rule(&rule),
            Err(RarecError::UnboundVariable(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_real_sorted_variable_is_fatal() {
        let mut rule = double_not_rule();
        rule.bound_vars = vec![("x".to_string(), Sort::new(SortKind::Real))];
        assert!(matches!(
            compile_rule(&rule),
            Err(RarecError::UnsupportedSort(_))
        ));
    }
}
