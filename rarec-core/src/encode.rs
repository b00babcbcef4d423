//! Lowering of terms into the target instruction syntax.
//!
//! The expression compiler walks a term top-down and renders the compact
//! textual encoding consumed by the downstream checker. Failure is
//! two-tiered: an encoding [`Gap`] skips the enclosing rule, a fatal
//! [`RarecError`] aborts the run. Either way failure is infectious; no
//! partial encoding ever escapes.

use crate::error::{Gap, RarecError};
use crate::term::Term;
use num_bigint::{BigUint, Sign};
use num_traits::Zero;
use rustc_hash::FxHashMap;

/// Failure of a single lowering step.
#[derive(Debug)]
pub enum Lower {
    /// Recoverable: the enclosing rule is skipped.
    Gap(Gap),
    /// Fatal: the whole run aborts.
    Fatal(RarecError),
}

impl From<RarecError> for Lower {
    fn from(err: RarecError) -> Self {
        Lower::Fatal(err)
    }
}

/// Result of lowering one term.
pub type LowerResult = Result<String, Lower>;

/// Little-endian base-2^32 limbs of a non-negative magnitude, rendered the
/// way the target's `bv_val` atom expects them: `0` is the single limb `0`,
/// anything larger is its hex limb sequence, least significant first.
fn magnitude_limbs(magnitude: &BigUint) -> Vec<String> {
    if magnitude.is_zero() {
        vec!["0".to_string()]
    } else {
        magnitude
            .to_u32_digits()
            .iter()
            .map(|limb| format!("{limb:#x}"))
            .collect()
    }
}

/// Encode a boolean or integer literal into target atom syntax.
///
/// Booleans map to the two sentinel atoms. Non-negative integers become a
/// width-32 `bv_val` atom built from their limbs. Negative integers have
/// no defined encoding: guessing one (two's complement, absolute value)
/// would silently change rule semantics, so they are a hard gap.
pub fn encode_const(term: &Term) -> LowerResult {
    match term {
        Term::BoolConst(true) => Ok("_TRUE".to_string()),
        Term::BoolConst(false) => Ok("_FALSE".to_string()),
        Term::IntConst(value) => {
            if value.sign() == Sign::Minus {
                return Err(Lower::Gap(Gap::NegativeInt));
            }
            let limbs = magnitude_limbs(value.magnitude());
            Ok(format!("bv_val(32, {})", limbs.join(", ")))
        }
        Term::RatConst(_) => Err(Lower::Gap(Gap::Rational)),
        Term::StrConst(_) => Err(Lower::Gap(Gap::String)),
        _ => Err(Lower::Fatal(RarecError::Internal(format!(
            "not a constant term: {term}"
        )))),
    }
}

/// Lower a term to target syntax, addressing bound variables through the
/// rule's position table.
///
/// The table maps each declared variable name to its declaration index;
/// binding scope is flat per rule, so a plain map suffices. A variable
/// missing from the table means the rule uses more variables than it
/// declares, which is fatal and deliberately distinct from an
/// unsupported-operator gap.
pub fn lower_term(term: &Term, positions: &FxHashMap<String, usize>) -> LowerResult {
    match term {
        Term::App(op, children) => {
            let mnemonic = op
                .mnemonic()
                .ok_or(Lower::Gap(Gap::UnsupportedOp(op.symbol())))?;
            let mut lowered = Vec::with_capacity(children.len());
            for child in children {
                lowered.push(lower_term(child, positions)?);
            }
            Ok(format!("{mnemonic}({})", lowered.join(", ")))
        }
        Term::Var { name, .. } => match positions.get(name) {
            Some(index) => Ok(format!("V({index})")),
            None => Err(Lower::Fatal(RarecError::UnboundVariable(name.clone()))),
        },
        Term::BoolConst(_) | Term::IntConst(_) => encode_const(term),
        Term::RatConst(_) => Err(Lower::Gap(Gap::Rational)),
        Term::StrConst(_) => Err(Lower::Gap(Gap::String)),
        Term::Placeholder => Err(Lower::Gap(Gap::Placeholder)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Op;
    use num_bigint::BigInt;
    use proptest::prelude::*;

    fn positions(names: &[&str]) -> FxHashMap<String, usize> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect()
    }

    #[test]
    fn test_bool_constants() {
        assert_eq!(encode_const(&Term::BoolConst(true)).unwrap(), "_TRUE");
        assert_eq!(encode_const(&Term::BoolConst(false)).unwrap(), "_FALSE");
    }

    #[test]
    fn test_zero_is_a_single_limb() {
        assert_eq!(encode_const(&Term::int(0)).unwrap(), "bv_val(32, 0)");
    }

    #[test]
    fn test_small_constant() {
        assert_eq!(encode_const(&Term::int(5)).unwrap(), "bv_val(32, 0x5)");
    }

    #[test]
    fn test_two_limb_constant() {
        // 2^32 splits into a zero low limb and a one high limb.
        let value = BigInt::from(1u64 << 32);
        assert_eq!(
            encode_const(&Term::IntConst(value)).unwrap(),
            "bv_val(32, 0x0, 0x1)"
        );
    }

    #[test]
    fn test_negative_constant_is_a_gap() {
        match encode_const(&Term::int(-1)) {
            Err(Lower::Gap(Gap::NegativeInt)) => {}
            other => panic!("expected negative-int gap, got {other:?}"),
        }
    }

    #[test]
    fn test_rational_and_string_constants_fail() {
        let rational = Term::RatConst(num_rational::BigRational::new(
            BigInt::from(1),
            BigInt::from(2),
        ));
        assert!(matches!(
            encode_const(&rational),
            Err(Lower::Gap(Gap::Rational))
        ));
        assert!(matches!(
            encode_const(&Term::StrConst("abc".to_string())),
            Err(Lower::Gap(Gap::String))
        ));
    }

    #[test]
    fn test_variable_position_rendering() {
        let table = positions(&["x", "y"]);
        assert_eq!(lower_term(&Term::var("x"), &table).unwrap(), "V(0)");
        assert_eq!(lower_term(&Term::var("y"), &table).unwrap(), "V(1)");
    }

    #[test]
    fn test_unbound_variable_is_fatal() {
        let table = positions(&["x"]);
        match lower_term(&Term::var("z"), &table) {
            Err(Lower::Fatal(RarecError::UnboundVariable(name))) => assert_eq!(name, "z"),
            other => panic!("expected fatal unbound-variable error, got {other:?}"),
        }
    }

    #[test]
    fn test_application_rendering() {
        let table = positions(&["x"]);
        let term = Term::App(Op::Not, vec![Term::App(Op::Not, vec![Term::var("x")])]);
        assert_eq!(lower_term(&term, &table).unwrap(), "not(not(V(0)))");
    }

    #[test]
    fn test_unsupported_operator_is_a_gap() {
        let table = positions(&["x", "y"]);
        let term = Term::App(Op::Bvsdiv, vec![Term::var("x"), Term::var("y")]);
        assert!(matches!(
            lower_term(&term, &table),
            Err(Lower::Gap(Gap::UnsupportedOp("bvsdiv")))
        ));
    }

    #[test]
    fn test_child_failure_is_infectious() {
        let table = positions(&["x"]);
        // The unsupported operator sits below a supported one; the whole
        // application must fail without partial output.
        let term = Term::App(
            Op::Bvadd,
            vec![
                Term::var("x"),
                Term::App(Op::Bvsdiv, vec![Term::var("x"), Term::var("x")]),
            ],
        );
        assert!(matches!(
            lower_term(&term, &table),
            Err(Lower::Gap(Gap::UnsupportedOp(_)))
        ));
    }

    #[test]
    fn test_placeholder_is_a_gap() {
        let table = positions(&[]);
        assert!(matches!(
            lower_term(&Term::Placeholder, &table),
            Err(Lower::Gap(Gap::Placeholder))
        ));
    }

    proptest! {
        #[test]
        fn prop_limbs_round_trip(value in any::<u128>()) {
            let magnitude = BigUint::from(value);
            let limbs = magnitude_limbs(&magnitude);
            let decoded: Vec<u32> = limbs
                .iter()
                .map(|limb| {
                    limb.strip_prefix("0x")
                        .map_or_else(|| limb.parse().unwrap(), |hex| {
                            u32::from_str_radix(hex, 16).unwrap()
                        })
                })
                .collect();
            prop_assert_eq!(BigUint::new(decoded), magnitude);
        }

        #[test]
        fn prop_negative_never_encodes(value in 1u64..=u64::MAX) {
            let negative = Term::IntConst(-BigInt::from(value));
            prop_assert!(matches!(
                encode_const(&negative),
                Err(Lower::Gap(Gap::NegativeInt))
            ));
        }
    }
}
