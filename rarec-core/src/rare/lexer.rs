//! Lexer for the rule-definition language.
//!
//! The surface syntax is s-expressions with `;` line comments, `:keyword`
//! attributes and double-quoted string literals. The lexer tracks line
//! numbers for error reporting only; no other position information is
//! needed downstream.

use std::iter::Peekable;
use std::str::Chars;

/// Kind of a lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Bare symbol, including operator glyphs like `=>` or `@bvsize`.
    Symbol(String),
    /// Integer numeral, optionally with a leading `-`.
    Numeral(String),
    /// Decimal numeral such as `1.5`.
    Decimal(String),
    /// Double-quoted string literal, quotes stripped.
    StringLit(String),
    /// String literal whose closing quote is missing at end of input.
    UnterminatedString(String),
    /// `:keyword` attribute, colon stripped.
    Keyword(String),
}

/// A token with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was lexed.
    pub kind: TokenKind,
    /// Source line of the first character.
    pub line: usize,
}

/// Streaming lexer over rule-source text.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | ';' | '"')
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    /// The line the lexer is currently on.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == ';' {
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn lex_run(&mut self, first: char) -> String {
        let mut text = String::new();
        text.push(first);
        while let Some(&c) = self.chars.peek() {
            if is_symbol_char(c) {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }

    /// Lex the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let line = self.line;
        let c = self.bump()?;
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '"' => {
                let mut text = String::new();
                let mut terminated = false;
                while let Some(c) = self.bump() {
                    if c == '"' {
                        terminated = true;
                        break;
                    }
                    text.push(c);
                }
                if terminated {
                    TokenKind::StringLit(text)
                } else {
                    TokenKind::UnterminatedString(text)
                }
            }
            ':' => {
                let word = self.lex_run(c);
                TokenKind::Keyword(word[1..].to_string())
            }
            _ => {
                let word = self.lex_run(c);
                classify_word(word)
            }
        };
        Some(Token { kind, line })
    }
}

/// A run of symbol characters is a numeral exactly when it looks like one;
/// everything else, operator glyphs included, is a symbol.
fn classify_word(word: String) -> TokenKind {
    let digits = word.strip_prefix('-').unwrap_or(&word);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        TokenKind::Numeral(word)
    } else if !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() == 1
        && !digits.starts_with('.')
        && !digits.ends_with('.')
    {
        TokenKind::Decimal(word)
    } else {
        TokenKind::Symbol(word)
    }
}
