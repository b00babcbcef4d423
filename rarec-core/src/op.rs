//! Operator descriptor table.
//!
//! Maps every operator of the surface rule language to its target
//! instruction mnemonic, or to nothing when the target has no compact
//! encoding for it yet. The table is closed: a symbol it does not contain
//! at all is a configuration error ([`crate::RarecError::UnknownOperator`]),
//! while a contained-but-unmapped operator is a per-rule encoding gap.

/// Defines the operator enum together with its symbol and mnemonic tables.
///
/// Keeping all three projections in one invocation guarantees they cannot
/// drift apart when an operator is added.
macro_rules! op_table {
    ($($(#[$meta:meta])* $variant:ident => ($symbol:literal, $mnemonic:expr)),+ $(,)?) => {
        /// An operator of the surface rule language.
        // Variant names mirror their surface symbols; the table below is
        // the single source of truth.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Op {
            $($(#[$meta])* $variant),+
        }

        impl Op {
            /// The operator's symbol in the rule language.
            #[must_use]
            pub fn symbol(self) -> &'static str {
                match self {
                    $(Op::$variant => $symbol),+
                }
            }

            /// The target mnemonic, or `None` for operators the target
            /// cannot encode yet.
            #[must_use]
            pub fn mnemonic(self) -> Option<&'static str> {
                match self {
                    $(Op::$variant => $mnemonic),+
                }
            }

            /// Look up an operator by its surface symbol.
            ///
            /// `None` means the symbol is entirely unknown to the table,
            /// which callers must treat as fatal.
            #[must_use]
            pub fn from_symbol(symbol: &str) -> Option<Self> {
                match symbol {
                    $($symbol => Some(Op::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

op_table! {
    // Arrays
    Store => ("store", None),
    Select => ("select", None),

    // Bit-vector predicates
    Bvugt => ("bvugt", Some("bvugt")),
    Bvuge => ("bvuge", Some("bvuge")),
    Bvsgt => ("bvsgt", Some("bvsgt")),
    Bvsge => ("bvsge", Some("bvsge")),
    Bvslt => ("bvslt", Some("bvslt")),
    Bvsle => ("bvsle", Some("bvsle")),
    Bvult => ("bvult", Some("bvult")),
    Bvule => ("bvule", Some("bvule")),
    Bvredand => ("bvredand", None),
    Bvredor => ("bvredor", None),

    // Bit-vector arithmetic
    Bvneg => ("bvneg", Some("bvneg")),
    Bvadd => ("bvadd", Some("bvadd")),
    Bvsub => ("bvsub", Some("bvsub")),
    Bvmul => ("bvmul", Some("bvmul")),
    Bvsdiv => ("bvsdiv", None),
    Bvudiv => ("bvudiv", None),
    Bvsrem => ("bvsrem", None),
    Bvurem => ("bvurem", None),
    Bvsmod => ("bvsmod", None),

    // Bit-vector shifts
    Bvshl => ("bvshl", Some("bvshl")),
    Bvlshr => ("bvlshr", Some("bvlshr")),
    Bvashr => ("bvashr", Some("bvashr")),
    RotateLeft => ("rotate_left", None),
    RotateRight => ("rotate_right", None),

    // Bitwise bit-vector operations
    Bvnot => ("bvnot", Some("bvnot")),
    Bvand => ("bvand", Some("bvand")),
    Bvor => ("bvor", Some("bvor")),
    Bvxor => ("bvxor", Some("bvxor")),
    Bvnand => ("bvnand", None),
    Bvnor => ("bvnor", None),
    Bvxnor => ("bvxnor", None),

    // Bit-vector overflow checks
    Bvuaddo => ("bvuaddo", None),
    Bvsaddo => ("bvsaddo", None),
    Bvumulo => ("bvumulo", None),
    Bvsmulo => ("bvsmulo", None),
    Bvusubo => ("bvusubo", None),
    Bvssubo => ("bvssubo", None),
    Bvsdivo => ("bvsdivo", None),
    Bvnego => ("bvnego", None),

    Bvite => ("bvite", Some("bvite")),
    Bvcomp => ("bvcomp", None),

    ZeroExtend => ("zero_extend", Some("zero_extend")),
    SignExtend => ("sign_extend", Some("sign_extend")),
    Concat => ("concat", Some("concat")),
    Extract => ("extract", Some("extract")),
    Repeat => ("repeat", Some("repeat")),

    BvSize => ("@bvsize", Some("bvsize")),
    BvConst => ("@bv", Some("bv_sym_val")),
    BvMax => ("@bvmax", Some("bvmax")),

    // Boolean
    Not => ("not", Some("not")),
    And => ("and", Some("conj")),
    Or => ("or", Some("disj")),
    Implies => ("=>", Some("implies")),
    Xor => ("xor", Some("xor")),

    // Arithmetic. Integer arithmetic lowers onto the 32-bit bit-vector
    // instructions; the parser only produces `Neg` through the binary
    // subtraction path, so its entry is effectively unreachable.
    Neg => ("neg", Some("bvneg")),
    Add => ("+", Some("bvadd")),
    Sub => ("-", Some("bvsub")),
    Mult => ("*", Some("bvmul")),
    IntDiv => ("div", None),
    IntDivTotal => ("div_total", None),
    Div => ("/", None),
    DivTotal => ("/_total", None),
    Mod => ("mod", None),
    ModTotal => ("mod_total", None),
    Abs => ("abs", None),
    Lt => ("<", Some("bvslt")),
    Gt => (">", Some("bvsgt")),
    Leq => ("<=", Some("bvsle")),
    Geq => (">=", Some("bvsge")),
    Pow2 => ("int.pow2", None),
    ToInt => ("to_int", None),
    ToReal => ("to_real", None),
    IsInt => ("is_int", None),
    Divisible => ("divisible", None),

    // Backdoors for some bit-vector rewrites
    IntIsPow2 => ("int.ispow2", None),
    IntLog2 => ("int.log2", None),

    // Theory-independent
    Eq => ("=", Some("eq")),
    Ite => ("ite", Some("ite")),
    // Lambda is not a real operator; it exists to simplify parsing.
    Lambda => ("lambda", None),
    BoundVars => ("bound_vars", None),
    Distinct => ("distinct", Some("neq")),

    UbvToInt => ("ubv_to_int", None),
    SbvToInt => ("sbv_to_int", None),
    IntToBv => ("int_to_bv", None),

    TypeOf => ("@type_of", None),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_round_trip() {
        for symbol in ["bvadd", "and", "=>", "<=", "@bvsize", "distinct"] {
            let op = Op::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
        }
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(Op::from_symbol("frobnicate"), None);
        assert_eq!(Op::from_symbol(""), None);
    }

    #[test]
    fn test_unsupported_entries_resolve_but_have_no_mnemonic() {
        for symbol in ["bvsdiv", "store", "mod", "rotate_left", "lambda"] {
            let op = Op::from_symbol(symbol).unwrap();
            assert_eq!(op.mnemonic(), None, "{symbol} should be unsupported");
        }
    }

    #[test]
    fn test_renamed_mnemonics() {
        assert_eq!(Op::And.mnemonic(), Some("conj"));
        assert_eq!(Op::Or.mnemonic(), Some("disj"));
        assert_eq!(Op::Distinct.mnemonic(), Some("neq"));
        assert_eq!(Op::Add.mnemonic(), Some("bvadd"));
        assert_eq!(Op::Lt.mnemonic(), Some("bvslt"));
    }
}
