//! rarec-core - Rewrite-Rule Table Compiler
//!
//! This crate compiles declarative term-rewriting rules (algebraic
//! simplification laws over boolean, integer and bit-vector terms) into a
//! compact, position-addressed instruction encoding consumed by a proof
//! checker running in a constrained kernel-side verifier environment:
//! - A closed term algebra with structural equality ([`Term`], [`Sort`])
//! - An operator descriptor table with an explicit unsupported sentinel
//!   ([`Op`])
//! - Constant and expression lowering into target atom syntax
//! - A per-rule compilation policy that separates conditional from
//!   unconditional rules and skips what the target cannot encode
//! - A batch driver that renders whole rule files into table text
//!
//! # Examples
//!
//! ## Compiling a single rule
//!
//! ```
//! use rarec_core::{compile_rule, parse_rules, RuleOutcome};
//!
//! let rules = parse_rules(
//!     "(define-rule bool-double-not-elim ((t Bool)) (not (not t)) t)",
//! )
//! .unwrap();
//! let outcome = compile_rule(&rules[0]).unwrap();
//!
//! assert_eq!(
//!     outcome,
//!     RuleOutcome::Compiled {
//!         tuple: "(BOOL_DOUBLE_NOT_ELIM, (Bool), not(not(V(0))), V(0))".to_string(),
//!         conditional: false,
//!     }
//! );
//! ```
//!
//! ## Rules the target cannot encode are skipped, not errors
//!
//! ```
//! use rarec_core::{compile_rule, parse_rules, RuleOutcome, SkipReason, Gap};
//!
//! let rules = parse_rules(
//!     "(define-rule bv-sdiv-self ((x ?BitVec)) (bvsdiv x x) x)",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     compile_rule(&rules[0]).unwrap(),
//!     RuleOutcome::Skipped(SkipReason::Gap(Gap::UnsupportedOp("bvsdiv"))),
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod driver;
pub mod encode;
pub mod error;
pub mod op;
pub mod rare;
pub mod rule;
pub mod sort;
pub mod term;

pub use driver::{CompileOptions, compile_files};
pub use encode::{Lower, encode_const, lower_term};
pub use error::{Gap, RarecError, Result};
pub use op::Op;
pub use rare::parse_rules;
pub use rule::{Rule, RuleOutcome, SkipReason, compile_rule};
pub use sort::{Sort, SortKind};
pub use term::Term;
