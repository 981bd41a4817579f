//! Classified token: a raw token plus the row / column it starts at.
//!
//! A `Token` is what style rules consume. It is immutable and cheap to copy;
//! every role predicate is a pure function of the wrapped [`RawToken`] and
//! never fails, answering `false` when the tree shape it looks for is absent.
//!
//! See sibling modules:
//! - `tree.rs`    for `RawToken` and the group tree it navigates.
//! - `keyword.rs` for the keyword table and the root keyword set.
//! - `parser.rs`  for the iterator that assigns positions.
use crate::sql::{
    keyword,
    token_type::TokenType,
    tree::{GroupKind, RawToken},
};
use derive_more::Display;

/// A token positioned in the host file.
///
/// `row` counts lines from the start of the SQL text; `col` counts chars from
/// the start of the line, except on the first line where it starts at the
/// offset the SQL had in its host file.
#[derive(Debug, Clone, Copy, Display)]
#[display("{}", raw.value())]
pub struct Token<'a> {
    raw: RawToken<'a>,
    row: usize,
    col: usize,
}

impl<'a> Token<'a> {
    pub const fn new(raw: RawToken<'a>, row: usize, col: usize) -> Self {
        Self { raw, row, col }
    }

    pub const fn row(&self) -> usize {
        self.row
    }

    pub const fn col(&self) -> usize {
        self.col
    }

    /// Convenience: `(row, col)`.
    pub const fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// The token's text, exactly as written.
    pub const fn value(&self) -> &'a str {
        self.raw.value()
    }

    pub const fn ttype(&self) -> TokenType {
        self.raw.ttype()
    }

    pub const fn raw(&self) -> &RawToken<'a> {
        &self.raw
    }

    pub const fn is_whitespace(&self) -> bool {
        self.raw.is_whitespace()
    }

    pub const fn is_keyword(&self) -> bool {
        self.raw.is_keyword()
    }

    /// A keyword that opens a clause (`SELECT`, `FROM`, `GROUP BY`, ...), as
    /// opposed to one used as an operator or inside an expression.
    pub fn is_root_keyword(&self) -> bool {
        self.is_keyword() && keyword::is_root_keyword(self.value())
    }

    /// The identifier of a function call whose name is also a reserved word,
    /// e.g. `count` in `count(x)`.
    ///
    /// The only name token whose grandparent is a `Function` group is the
    /// function's own identifier; arguments sit one parenthesis deeper. Names
    /// the keyword table does not know are left to [`Token::is_name`].
    pub fn is_function_name(&self) -> bool {
        self.ttype() == TokenType::Name
            && self.raw.within(GroupKind::Function)
            && self
                .raw
                .parent()
                .and_then(|parent| parent.parent())
                .is_some_and(|grandparent| grandparent.kind() == GroupKind::Function)
            && keyword::lookup(self.value()) == TokenType::Keyword
    }

    pub fn is_name(&self) -> bool {
        self.ttype() == TokenType::Name && !self.is_keyword()
    }

    pub fn is_punctuation(&self) -> bool {
        self.ttype() == TokenType::Punctuation
    }

    pub fn is_comparison(&self) -> bool {
        self.ttype() == TokenType::Comparison
    }

    pub fn is_newline(&self) -> bool {
        self.ttype() == TokenType::Newline
    }
}
