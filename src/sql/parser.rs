use crate::sql::token::Token;
use crate::sql::tree::{self, Flatten, Statement};
use crate::*;
use sqlparser::dialect::Dialect;
use std::iter::FusedIterator;

/// Positioned token stream over one SQL text.
///
/// The text is lexed and split into statements up front; tokens are
/// classified and positioned lazily, one per call to `next`. Iterating the
/// same `Parser` again starts a fresh pass with fresh counters.
///
/// Positions:
/// - The first token is at row 0, column `initial_offset`.
/// - A newline token moves the next token to the start of the following row.
/// - Any other token moves the column forward by its length in chars.
/// - Counting carries on across statements; only line breaks reset it.
///
/// Tokens whose own text spans lines (a `--` comment with its line break, a
/// multi-line string or block comment, a compound keyword split over lines)
/// move the row by the number of breaks they contain and leave the column at
/// the number of chars after the last one.
#[derive(Debug)]
pub struct Parser<'a> {
    sql: &'a str,
    statements: Vec<Statement<'a>>,
    initial_offset: usize,
}

impl<'a> Parser<'a> {
    /// Lex `sql` with the configured dialect. `initial_offset` is the column
    /// at which the SQL text starts in its host file.
    pub fn new(sql: &'a str, initial_offset: usize) -> Self {
        Self::with_dialect(sql, initial_offset, &*config().dialect())
    }

    pub fn with_dialect(sql: &'a str, initial_offset: usize, dialect: &dyn Dialect) -> Self {
        Self {
            sql,
            statements: tree::parse(sql, dialect),
            initial_offset,
        }
    }

    pub const fn sql(&self) -> &'a str {
        self.sql
    }

    pub const fn initial_offset(&self) -> usize {
        self.initial_offset
    }

    pub fn statements(&self) -> &[Statement<'a>] {
        &self.statements
    }

    /// Start a classification pass.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            statements: self.statements.iter(),
            current: None,
            row: 0,
            col: self.initial_offset,
        }
    }
}

impl<'p> IntoIterator for &'p Parser<'_> {
    type Item = Token<'p>;
    type IntoIter = Tokens<'p>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens()
    }
}

/// One forward-only classification pass, see [`Parser`].
#[derive(Debug)]
pub struct Tokens<'a> {
    statements: std::slice::Iter<'a, Statement<'a>>,
    current: Option<Flatten<'a>>,
    row: usize,
    col: usize,
}

impl<'a> Tokens<'a> {
    fn advance(&mut self, token: &Token<'a>) {
        if token.is_newline() {
            self.row += 1;
            self.col = 0;
            return;
        }
        match line_breaks(token.value()) {
            (0, len) => self.col += len,
            (breaks, tail) => {
                self.row += breaks;
                self.col = tail;
            }
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(raw) = self.current.as_mut().and_then(Iterator::next) {
                let token = Token::new(raw, self.row, self.col);
                self.advance(&token);
                return Some(token);
            }
            self.current = Some(self.statements.next()?.flatten());
        }
    }
}

impl FusedIterator for Tokens<'_> {}

/// Number of line breaks (`\n`, `\r\n` or `\r`) in `text`, and the number of
/// chars after the last one (after the start when there is none).
fn line_breaks(text: &str) -> (usize, usize) {
    let mut breaks = 0;
    let mut tail = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                breaks += 1;
                tail = 0;
            }
            '\n' => {
                breaks += 1;
                tail = 0;
            }
            _ => tail += 1,
        }
    }
    (breaks, tail)
}
