//! Reserved-word table and the root keyword set.
//!
//! [`lookup`] answers, for any word and independent of where it appears, which
//! [`TokenType`] the word has on its own: one of the keyword tags, a built-in
//! type name, a comparison word, or [`TokenType::Name`] when the word is not
//! reserved. The lexer consults it for bare words, and the classifier consults
//! it again to spot function identifiers that collide with reserved words.
//!
//! [`ROOT_KEYWORDS`] holds the clause-anchoring keywords style rules align
//! and indent on. Its membership is part of the contract with those rules;
//! change the two together.
//!
//! Both tables are built on first use and never mutated.

use crate::sql::token_type::TokenType;
use itertools::Itertools as _;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const DML: &[&str] = &["SELECT", "INSERT", "UPDATE", "DELETE", "UPSERT", "MERGE"];

const DDL: &[&str] = &["CREATE", "ALTER", "DROP", "TRUNCATE", "RENAME"];

const CTE: &[&str] = &["WITH"];

const GENERIC: &[&str] = &[
    // Clauses
    "FROM", "WHERE", "GROUP", "ORDER", "BY", "HAVING", "LIMIT", "OFFSET", "FETCH", "RETURNING",
    "INTO", "VALUES", "SET", "DISTINCT", "ALL", "UNION", "INTERSECT", "EXCEPT", "WINDOW",
    // Joins
    "JOIN", "INNER", "OUTER", "LEFT", "RIGHT", "FULL", "CROSS", "NATURAL", "ON", "USING",
    // Expressions
    "AND", "OR", "NOT", "IN", "IS", "NULL", "BETWEEN", "EXISTS", "ANY", "SOME", "CASE", "WHEN",
    "THEN", "ELSE", "END", "AS", "ASC", "DESC", "NULLS", "FIRST", "LAST", "TRUE", "FALSE",
    "OVER", "PARTITION", "ROWS", "RANGE", "PRECEDING", "FOLLOWING", "UNBOUNDED", "CURRENT",
    "ROW", "FILTER", "WITHIN", "RECURSIVE", "LATERAL",
    // Functions spelled as reserved words
    "COUNT", "SUM", "AVG", "MIN", "MAX", "COALESCE", "NULLIF", "CAST", "CONVERT", "EXTRACT",
    "SUBSTRING", "TRIM", "UPPER", "LOWER", "LENGTH", "ABS", "ROUND", "FLOOR", "CEIL", "REPLACE",
    "POSITION", "OVERLAY", "NOW", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "ROW_NUMBER", "RANK", "DENSE_RANK", "LAG", "LEAD", "FIRST_VALUE", "LAST_VALUE",
    "GREATEST", "LEAST",
    // Definitions
    "TABLE", "VIEW", "INDEX", "SCHEMA", "DATABASE", "SEQUENCE", "FUNCTION", "TRIGGER",
    "PRIMARY", "KEY", "FOREIGN", "REFERENCES", "UNIQUE", "CHECK", "DEFAULT", "CONSTRAINT",
    "CASCADE", "RESTRICT", "IF", "TEMPORARY", "COLUMN", "ADD",
    // Transactions and access
    "BEGIN", "COMMIT", "ROLLBACK", "SAVEPOINT", "GRANT", "REVOKE", "CONFLICT", "DO", "NOTHING",
];

const BUILTIN: &[&str] = &[
    "INT", "INTEGER", "SMALLINT", "BIGINT", "SERIAL", "BIGSERIAL", "REAL", "DOUBLE", "FLOAT",
    "NUMERIC", "DECIMAL", "CHAR", "VARCHAR", "TEXT", "BOOLEAN", "BOOL", "DATE", "TIME",
    "TIMESTAMP", "INTERVAL", "UUID", "JSON", "JSONB", "BYTEA", "BLOB",
];

const COMPARISON: &[&str] = &["LIKE", "ILIKE"];

/// Words that are keywords wherever they appear, even where the lexer would
/// otherwise read a name (before `(` or next to `.`).
pub const ALWAYS_KEYWORDS: &[&str] = &["CASE", "IN", "VALUES", "USING", "FROM", "AS"];

/// Keyword sequences lexed as one token, longest first so the lexer can take
/// the first match.
pub const COMPOUND_KEYWORDS: &[&[&str]] = &[
    &["LEFT", "OUTER", "JOIN"],
    &["RIGHT", "OUTER", "JOIN"],
    &["FULL", "OUTER", "JOIN"],
    &["LEFT", "INNER", "JOIN"],
    &["RIGHT", "INNER", "JOIN"],
    &["GROUP", "BY"],
    &["ORDER", "BY"],
    &["UNION", "ALL"],
    &["LEFT", "JOIN"],
    &["RIGHT", "JOIN"],
    &["FULL", "JOIN"],
    &["INNER", "JOIN"],
    &["OUTER", "JOIN"],
    &["CROSS", "JOIN"],
    &["NATURAL", "JOIN"],
];

/// Negated pattern matches, lexed as one comparison token.
pub const COMPOUND_COMPARISONS: &[&[&str]] = &[&["NOT", "LIKE"], &["NOT", "ILIKE"]];

/// Clause-anchoring keywords, uppercase, compound ones single-spaced.
pub static ROOT_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "SELECT",
        "FROM",
        "WHERE",
        "GROUP BY",
        "ORDER BY",
        "HAVING",
        "LIMIT",
        "OFFSET",
        "UNION",
        "UNION ALL",
        "INTERSECT",
        "EXCEPT",
        "JOIN",
        "INNER JOIN",
        "LEFT JOIN",
        "LEFT OUTER JOIN",
        "RIGHT JOIN",
        "RIGHT OUTER JOIN",
        "FULL JOIN",
        "FULL OUTER JOIN",
        "CROSS JOIN",
        "NATURAL JOIN",
        "ON",
        "INSERT",
        "VALUES",
        "UPDATE",
        "SET",
        "DELETE",
        "RETURNING",
        "WITH",
    ])
});

static KEYWORDS: LazyLock<HashMap<&'static str, TokenType>> = LazyLock::new(|| {
    [
        (DML, TokenType::KeywordDml),
        (DDL, TokenType::KeywordDdl),
        (CTE, TokenType::KeywordCte),
        (GENERIC, TokenType::Keyword),
        (BUILTIN, TokenType::NameBuiltin),
        (COMPARISON, TokenType::Comparison),
    ]
    .into_iter()
    .flat_map(|(words, tt)| words.iter().map(move |w| (*w, tt)))
    .collect()
});

/// Context-free classification of a single word. Case-insensitive; anything
/// not in the table is a [`TokenType::Name`].
pub fn lookup(word: &str) -> TokenType {
    KEYWORDS
        .get(word.to_uppercase().as_str())
        .copied()
        .unwrap_or(TokenType::Name)
}

/// Uppercase `value` and collapse interior whitespace, so a compound keyword
/// written across several blanks or lines compares equal to its table form.
pub fn normalize(value: &str) -> String {
    value.split_whitespace().map(str::to_uppercase).join(" ")
}

/// Whether `value` is in [`ROOT_KEYWORDS`]. Does not check that the token
/// carrying `value` is a keyword.
pub fn is_root_keyword(value: &str) -> bool {
    ROOT_KEYWORDS.contains(normalize(value).as_str())
}
