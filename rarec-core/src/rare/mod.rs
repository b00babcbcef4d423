//! Front end for the rule-definition language.

pub mod lexer;
pub mod parser;

pub use parser::{Parser, parse_rules};
