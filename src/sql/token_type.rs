//! Type tags attached to every lexeme.
//!
//! The tags follow the token families style rules care about rather than the
//! tokenizer's own token enum: one tag per family, with the keyword and
//! whitespace families spanning several tags. Family membership is answered by
//! [`TokenType::is_keyword`] and [`TokenType::is_whitespace`]; everything else
//! compares tags for exact equality.
//!
//! See `keyword.rs` for the table that assigns keyword tags to words and
//! `lexer.rs` for how tokenizer output is mapped onto these tags.

use derive_more::Display;

/// Classification of a single lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenType {
    /// Space or tab. Runs of blanks are one token per character.
    Whitespace,
    /// `\n`, `\r\n` or `\r`.
    #[display("Whitespace.Newline")]
    Newline,
    /// `-- ...`, including the line break that ends it.
    #[display("Comment.Single")]
    CommentSingle,
    /// `/* ... */`.
    #[display("Comment.Multiline")]
    CommentMulti,
    /// Generic reserved word (`WHERE`, `COUNT`, `GROUP BY`, ...).
    Keyword,
    /// Data manipulation verb (`SELECT`, `INSERT`, ...).
    #[display("Keyword.DML")]
    KeywordDml,
    /// Data definition verb (`CREATE`, `ALTER`, ...).
    #[display("Keyword.DDL")]
    KeywordDdl,
    /// `WITH`.
    #[display("Keyword.CTE")]
    KeywordCte,
    /// Identifier: table, column, alias or function name.
    Name,
    /// Built-in type name (`INT`, `VARCHAR`, ...).
    #[display("Name.Builtin")]
    NameBuiltin,
    /// Quoted identifier.
    Symbol,
    /// String literal.
    #[display("String.Single")]
    StringSingle,
    #[display("Number.Integer")]
    NumberInteger,
    #[display("Number.Float")]
    NumberFloat,
    /// `, ; ( ) . : :: [ ]`
    Punctuation,
    /// Comparison operator, symbolic or `LIKE` / `ILIKE`.
    #[display("Operator.Comparison")]
    Comparison,
    Operator,
    /// `*`
    Wildcard,
    /// Bind parameter (`?`, `$1`, `:name`).
    Placeholder,
    /// Text the tokenizer could not make sense of.
    Error,
}

impl TokenType {
    /// True for every keyword tag, generic or specialised.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenType::Keyword | TokenType::KeywordDml | TokenType::KeywordDdl | TokenType::KeywordCte
        )
    }

    /// True for blanks and line breaks. Comments are not whitespace.
    pub const fn is_whitespace(self) -> bool {
        matches!(self, TokenType::Whitespace | TokenType::Newline)
    }
}
