//! Lenient SQL tokenization and position tracking.
//!
//! This module turns a SQL string lifted out of a host source file into a
//! stream of positioned, classified tokens. It never rejects input: text the
//! lexer cannot make sense of comes out as an error token and the positions
//! of everything around it stay exact.
//!
//! Modules:
//! - `token_type` : Fine-grained lexical tags (`Keyword.DML`, `Name.Builtin`, ...).
//! - `keyword`    : Keyword table, compound keywords and the root keyword set.
//! - `lexer`      : Lossless lexer on top of `sqlparser`'s tokenizer.
//! - `tree`       : Statement splitting and the Parenthesis / Identifier / Function groups.
//! - `token`      : Positioned token and its role predicates.
//! - `parser`     : The `Parser` and its positioning iterator.
//!
//! Public Re-exports:
//! You can `use crate::sql::{Parser, Token, TokenType};` directly, or pull
//! everything via the `prelude` submodule.
//!
//! Example:
//! ```rust
//! use sqlstyle::sql::prelude::*;
//! use sqlparser::dialect::GenericDialect;
//!
//! let parser = Parser::with_dialect("SELECT a\nFROM t", 4, &GenericDialect {});
//! let from = parser.tokens().find(|t| t.value() == "FROM").unwrap();
//! assert!(from.is_root_keyword());
//! assert_eq!(from.position(), (1, 0));
//! ```
//!
//! NOTE: grouping is shallow on purpose. Only the structure the role
//! predicates look at is built; this is not a SQL parser.

pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod token_type;
pub mod tree;

#[cfg(test)]
mod parser_tests;

pub use keyword::ROOT_KEYWORDS;
pub use parser::{Parser, Tokens};
pub use token::Token;
pub use token_type::TokenType;
pub use tree::{Group, GroupKind, RawToken, Statement};

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use sqlstyle::sql::prelude::*;`
pub mod prelude {
    pub use super::{GroupKind, Parser, ROOT_KEYWORDS, Token, TokenType};
}
