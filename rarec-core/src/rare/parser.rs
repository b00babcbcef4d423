//! Recursive-descent parser for rule definitions.
//!
//! Three definition forms exist:
//!
//! ```text
//! (define-rule <name> (<bindings>) <pattern> <replacement>)
//! (define-cond-rule <name> (<bindings>) <condition> <pattern> <replacement>)
//! (define-rule* <name> (<bindings>) <pattern> <replacement> [<context>])
//! ```
//!
//! where each binding is `(<var> <sort> [:list] [:const])`. The starred
//! form declares a fixed-point rule. The parser upholds the contract the
//! compiler relies on: bound-variable names are unique within a rule, and
//! every application head is an operator the descriptor table knows.

use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{RarecError, Result};
use crate::op::Op;
use crate::rule::Rule;
use crate::sort::{Sort, SortKind};
use crate::term::Term;
use num_bigint::BigInt;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Parser over one rule-source text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
}

/// Parse a complete rule-source text into its rule sequence.
pub fn parse_rules(input: &str) -> Result<Vec<Rule>> {
    Parser::new(input).parse_rules()
}

impl<'a> Parser<'a> {
    /// Create a parser over `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            peeked: None,
        }
    }

    fn error(&self, line: usize, message: impl Into<String>) -> RarecError {
        RarecError::Parse {
            line,
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.peeked.take().or_else(|| self.lexer.next_token())
    }

    fn peek_token(&mut self) -> Option<&Token> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next_token();
        }
        self.peeked.as_ref()
    }

    fn expect_token(&mut self, what: &str) -> Result<Token> {
        let line = self.lexer.line();
        let token = self
            .next_token()
            .ok_or_else(|| self.error(line, format!("expected {what}, found end of input")))?;
        if matches!(token.kind, TokenKind::UnterminatedString(_)) {
            return Err(self.error(token.line, "unterminated string literal, missing `\"`"));
        }
        Ok(token)
    }

    fn expect_lparen(&mut self) -> Result<()> {
        let token = self.expect_token("'('")?;
        match token.kind {
            TokenKind::LParen => Ok(()),
            other => Err(self.error(token.line, format!("expected '(', found {other:?}"))),
        }
    }

    fn expect_rparen(&mut self) -> Result<()> {
        let token = self.expect_token("')'")?;
        match token.kind {
            TokenKind::RParen => Ok(()),
            other => Err(self.error(token.line, format!("expected ')', found {other:?}"))),
        }
    }

    fn expect_symbol(&mut self, what: &str) -> Result<(String, usize)> {
        let token = self.expect_token(what)?;
        match token.kind {
            TokenKind::Symbol(s) => Ok((s, token.line)),
            other => Err(self.error(token.line, format!("expected {what}, found {other:?}"))),
        }
    }

    fn at_rparen(&mut self) -> bool {
        matches!(
            self.peek_token(),
            Some(Token {
                kind: TokenKind::RParen,
                ..
            })
        )
    }

    /// Parse rule definitions until end of input.
    pub fn parse_rules(&mut self) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();
        while self.peek_token().is_some() {
            self.expect_lparen()?;
            rules.push(self.parse_rule()?);
        }
        Ok(rules)
    }

    fn parse_rule(&mut self) -> Result<Rule> {
        let (form, form_line) = self.expect_symbol("rule definition form")?;
        let is_fixed_point = match form.as_str() {
            "define-rule" | "define-cond-rule" => false,
            "define-rule*" => true,
            other => {
                return Err(self.error(form_line, format!("unknown definition form `{other}`")));
            }
        };

        let (name, _) = self.expect_symbol("rule name")?;
        let bound_vars = self.parse_bindings(&name)?;
        let sorts: FxHashMap<&str, &Sort> = bound_vars
            .iter()
            .map(|(var, sort)| (var.as_str(), sort))
            .collect();

        let mut body: SmallVec<[Term; 3]> = SmallVec::new();
        while !self.at_rparen() {
            body.push(self.parse_term(&sorts)?);
        }
        self.expect_rparen()?;

        let (cond, lhs, rhs) = match (form.as_str(), body.len()) {
            ("define-rule", 2) => {
                let mut it = body.into_iter();
                (None, it.next().unwrap(), it.next().unwrap())
            }
            ("define-cond-rule", 3) => {
                let mut it = body.into_iter();
                (Some(it.next().unwrap()), it.next().unwrap(), it.next().unwrap())
            }
            // The optional trailing term of define-rule* is the rewriting
            // context; fixed-point rules are skipped by the compiler, so
            // it is parsed and dropped.
            ("define-rule*", 2 | 3) => {
                let mut it = body.into_iter();
                (None, it.next().unwrap(), it.next().unwrap())
            }
            (_, n) => {
                return Err(self.error(
                    form_line,
                    format!("`{form}` has {n} body terms, which is not a valid arity"),
                ));
            }
        };

        Ok(Rule {
            name,
            bound_vars,
            cond,
            lhs,
            rhs,
            is_fixed_point,
        })
    }

    fn parse_bindings(&mut self, rule: &str) -> Result<Vec<(String, Sort)>> {
        self.expect_lparen()?;
        let mut bound_vars: Vec<(String, Sort)> = Vec::new();
        while !self.at_rparen() {
            self.expect_lparen()?;
            let (var, line) = self.expect_symbol("variable name")?;
            if bound_vars.iter().any(|(name, _)| *name == var) {
                return Err(self.error(
                    line,
                    format!("duplicate bound variable `{var}` in rule `{rule}`"),
                ));
            }
            let mut sort = self.parse_sort()?;
            while !self.at_rparen() {
                let token = self.expect_token("binding attribute")?;
                match token.kind {
                    TokenKind::Keyword(k) if k == "list" => sort = sort.into_list(),
                    TokenKind::Keyword(k) if k == "const" => sort = sort.into_const(),
                    other => {
                        return Err(self.error(
                            token.line,
                            format!("unexpected binding attribute {other:?}"),
                        ));
                    }
                }
            }
            self.expect_rparen()?;
            bound_vars.push((var, sort));
        }
        self.expect_rparen()?;
        Ok(bound_vars)
    }

    fn parse_sort(&mut self) -> Result<Sort> {
        let token = self.expect_token("sort")?;
        match token.kind {
            TokenKind::Symbol(s) => match s.as_str() {
                "Bool" => Ok(Sort::new(SortKind::Bool)),
                "Int" => Ok(Sort::new(SortKind::Int)),
                "Real" => Ok(Sort::new(SortKind::Real)),
                "?BitVec" => Ok(Sort::new(SortKind::AbsBitVec)),
                "?" => Ok(Sort::new(SortKind::AbsAbs)),
                other => Err(self.error(token.line, format!("unknown sort `{other}`"))),
            },
            TokenKind::LParen => {
                // Indexed sort: (_ BitVec <width>)
                let (underscore, line) = self.expect_symbol("`_`")?;
                if underscore != "_" {
                    return Err(self.error(line, format!("unknown sort head `{underscore}`")));
                }
                let (base, line) = self.expect_symbol("indexed sort name")?;
                if base != "BitVec" {
                    return Err(self.error(line, format!("unknown indexed sort `{base}`")));
                }
                let mut widths: SmallVec<[u32; 1]> = SmallVec::new();
                while !self.at_rparen() {
                    let token = self.expect_token("bit width")?;
                    match token.kind {
                        TokenKind::Numeral(n) => {
                            let width = n.parse::<u32>().map_err(|_| {
                                self.error(token.line, format!("invalid bit width `{n}`"))
                            })?;
                            widths.push(width);
                        }
                        other => {
                            return Err(self
                                .error(token.line, format!("expected bit width, found {other:?}")));
                        }
                    }
                }
                self.expect_rparen()?;
                Sort::bit_vec(&widths)
            }
            other => Err(self.error(token.line, format!("expected sort, found {other:?}"))),
        }
    }

    fn parse_term(&mut self, sorts: &FxHashMap<&str, &Sort>) -> Result<Term> {
        let token = self.expect_token("term")?;
        match token.kind {
            TokenKind::LParen => {
                let (head, _) = self.expect_symbol("operator")?;
                let op = Op::from_symbol(&head)
                    .ok_or_else(|| RarecError::UnknownOperator(head.clone()))?;
                let mut children = Vec::new();
                while !self.at_rparen() {
                    children.push(self.parse_term(sorts)?);
                }
                self.expect_rparen()?;
                Ok(Term::App(op, children))
            }
            TokenKind::Symbol(s) => match s.as_str() {
                "true" => Ok(Term::BoolConst(true)),
                "false" => Ok(Term::BoolConst(false)),
                "_" => Ok(Term::Placeholder),
                name => Ok(Term::Var {
                    name: name.to_string(),
                    sort: sorts.get(name).map(|&sort| sort.clone()),
                }),
            },
            TokenKind::Numeral(n) => {
                let value = n.parse::<BigInt>().map_err(|_| {
                    self.error(token.line, format!("invalid integer literal `{n}`"))
                })?;
                Ok(Term::IntConst(value))
            }
            TokenKind::Decimal(d) => parse_decimal(&d)
                .map(Term::RatConst)
                .ok_or_else(|| self.error(token.line, format!("invalid decimal literal `{d}`"))),
            TokenKind::StringLit(s) => Ok(Term::StrConst(s)),
            other => Err(self.error(token.line, format!("expected term, found {other:?}"))),
        }
    }
}

/// Parse `d.f` into the exact rational `df / 10^|f|`.
fn parse_decimal(text: &str) -> Option<num_rational::BigRational> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, frac) = digits.split_once('.')?;
    let numerator = format!("{whole}{frac}").parse::<BigInt>().ok()?;
    let mut denominator = BigInt::from(1);
    for _ in 0..frac.len() {
        denominator *= 10;
    }
    let value = num_rational::BigRational::new(numerator, denominator);
    Some(if negative { -value } else { value })
}
