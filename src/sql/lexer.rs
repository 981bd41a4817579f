use crate::sql::keyword::{self, ALWAYS_KEYWORDS, COMPOUND_COMPARISONS, COMPOUND_KEYWORDS};
use crate::sql::token_type::TokenType;
use crate::*;
use sqlparser::dialect::Dialect;
use sqlparser::tokenizer::{Location, Token as SqlToken, TokenWithSpan, Tokenizer, Whitespace};
use std::iter::Peekable;
use std::str::CharIndices;

/// A typed slice of the source text.
///
/// Invariants:
/// - `value` is non-empty and equals `sql[start..end()]`
/// - lexemes returned by [`lex`] are contiguous and cover the whole input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub ttype: TokenType,
    pub value: &'a str,
    pub start: usize,
}

impl<'a> Lexeme<'a> {
    pub const fn new(ttype: TokenType, value: &'a str, start: usize) -> Self {
        Self {
            ttype,
            value,
            start,
        }
    }

    /// Byte offset one past the last byte of this lexeme.
    pub const fn end(&self) -> usize {
        self.start + self.value.len()
    }
}

/// Strict tokenization step. Appends everything `sqlparser` manages to lex to
/// `buf`; on failure `buf` keeps the tokens that preceded the error.
pub fn scan(sql: &str, dialect: &dyn Dialect, buf: &mut Vec<TokenWithSpan>) -> Result {
    Tokenizer::new(dialect, sql).tokenize_with_location_into_buf(buf)?;
    Ok(())
}

/// Lenient SQL lexer producing a flat, lossless stream of [`Lexeme`]s.
///
/// Behavior:
/// - Character-level lexing is `sqlparser`'s; each token is mapped back to its
///   exact source slice through the tokenizer's line / column spans.
/// - Blanks are one lexeme per character, each line break is its own
///   [`TokenType::Newline`] lexeme.
/// - Bare words are typed by position first (a word before `(`, or next to
///   `.`, is a name) and by [`keyword::lookup`] otherwise.
/// - Multi-word keywords such as `GROUP BY` or `LEFT OUTER JOIN` are merged
///   into one lexeme spanning the blanks between the words. `NOT LIKE` and
///   `NOT ILIKE` merge the same way into one comparison.
///
/// Guarantees:
/// - Never fails. Text the tokenizer rejects (an unterminated string, quoted
///   identifier or block comment) becomes a single [`TokenType::Error`]
///   lexeme running to the end of the input.
/// - Concatenating the values gives back `sql`.
pub fn lex<'a>(sql: &'a str, dialect: &dyn Dialect) -> Vec<Lexeme<'a>> {
    let mut tokens = Vec::new();
    if let Err(err) = scan(sql, dialect, &mut tokens) {
        warn!("Recovering from tokenizer failure: {err}");
    }

    let mut offsets = Offsets::new(sql);
    let mut spanned = Vec::with_capacity(tokens.len());
    for TokenWithSpan { token, span, .. } in &tokens {
        let start = offsets.byte_at(span.start);
        let end = offsets.byte_at(span.end);
        if start < end && !matches!(token, SqlToken::EOF) {
            spanned.push((token, start, end));
        }
    }

    let mut out = Vec::with_capacity(spanned.len() + 1);
    let mut cursor = 0;
    for (i, &(_, start, end)) in spanned.iter().enumerate() {
        if start > cursor {
            out.push(Lexeme::new(TokenType::Error, &sql[cursor..start], cursor));
        }
        let ttype = token_type(&spanned, i, &sql[start..end]);
        if !extends_comment(sql, &mut out, ttype, start, end) {
            out.push(Lexeme::new(ttype, &sql[start..end], start));
        }
        cursor = cursor.max(end);
    }
    if cursor < sql.len() {
        out.push(Lexeme::new(TokenType::Error, &sql[cursor..], cursor));
    }

    merge_compounds(sql, out)
}

type Spanned<'t> = (&'t SqlToken, usize, usize);

/// Some dialects end a `--` comment at a bare `\r`, leaving the `\n` of a
/// CRLF pair as a newline of its own. Folds that `\n` back into the comment
/// so the pair counts as one line break.
fn extends_comment<'a>(
    sql: &'a str,
    out: &mut [Lexeme<'a>],
    ttype: TokenType,
    start: usize,
    end: usize,
) -> bool {
    let Some(last) = out.last_mut() else {
        return false;
    };
    let split_crlf = ttype == TokenType::Newline
        && &sql[start..end] == "\n"
        && last.ttype == TokenType::CommentSingle
        && last.value.ends_with('\r')
        && last.end() == start;
    if split_crlf {
        last.value = &sql[last.start..end];
    }
    split_crlf
}

fn token_type(spanned: &[Spanned<'_>], i: usize, text: &str) -> TokenType {
    let (token, _, _) = spanned[i];
    match token {
        SqlToken::Word(word) if word.quote_style.is_some() => TokenType::Symbol,
        SqlToken::Word(_) => word_type(spanned, i, text),
        SqlToken::Number(..) if text.contains(['.', 'e', 'E']) => TokenType::NumberFloat,
        SqlToken::Number(..) => TokenType::NumberInteger,
        SqlToken::SingleQuotedString(_)
        | SqlToken::NationalStringLiteral(_)
        | SqlToken::EscapedStringLiteral(_)
        | SqlToken::HexStringLiteral(_)
        | SqlToken::DollarQuotedString(_) => TokenType::StringSingle,
        SqlToken::DoubleQuotedString(_) => TokenType::Symbol,
        SqlToken::Whitespace(Whitespace::Newline) => TokenType::Newline,
        SqlToken::Whitespace(Whitespace::SingleLineComment { .. }) => TokenType::CommentSingle,
        SqlToken::Whitespace(Whitespace::MultiLineComment(_)) => TokenType::CommentMulti,
        SqlToken::Whitespace(_) => TokenType::Whitespace,
        SqlToken::Eq
        | SqlToken::DoubleEq
        | SqlToken::Neq
        | SqlToken::Lt
        | SqlToken::Gt
        | SqlToken::LtEq
        | SqlToken::GtEq
        | SqlToken::Spaceship => TokenType::Comparison,
        SqlToken::Comma
        | SqlToken::SemiColon
        | SqlToken::LParen
        | SqlToken::RParen
        | SqlToken::Period
        | SqlToken::Colon
        | SqlToken::DoubleColon
        | SqlToken::LBracket
        | SqlToken::RBracket => TokenType::Punctuation,
        SqlToken::Mul => TokenType::Wildcard,
        SqlToken::Placeholder(_) => TokenType::Placeholder,
        SqlToken::Char(_) => TokenType::Error,
        _ => TokenType::Operator,
    }
}

/// Type of an unquoted word, from its neighbours and then the keyword table.
fn word_type(spanned: &[Spanned<'_>], i: usize, text: &str) -> TokenType {
    let upper = text.to_uppercase();
    if ALWAYS_KEYWORDS.contains(&upper.as_str()) {
        return keyword::lookup(&upper);
    }

    let prev = i.checked_sub(1).and_then(|p| spanned.get(p)).map(|s| s.0);
    let next = spanned.get(i + 1).map(|s| s.0);
    let next_significant = spanned[i + 1..].iter().map(|s| s.0).find(|t| {
        !matches!(
            t,
            SqlToken::Whitespace(Whitespace::Space | Whitespace::Tab | Whitespace::Newline)
        )
    });

    let qualifier = matches!(next_significant, Some(SqlToken::Period));
    let qualified = matches!(prev, Some(SqlToken::Period));
    let called = matches!(next, Some(SqlToken::LParen));
    if qualifier || qualified || called {
        TokenType::Name
    } else {
        keyword::lookup(&upper)
    }
}

fn merge_compounds<'a>(sql: &'a str, lexemes: Vec<Lexeme<'a>>) -> Vec<Lexeme<'a>> {
    let mut out = Vec::with_capacity(lexemes.len());
    let mut i = 0;
    while i < lexemes.len() {
        let merged = compound_at(&lexemes, i, COMPOUND_KEYWORDS)
            .map(|last| (TokenType::Keyword, last))
            .or_else(|| {
                compound_at(&lexemes, i, COMPOUND_COMPARISONS)
                    .map(|last| (TokenType::Comparison, last))
            });
        match merged {
            Some((ttype, last)) => {
                let start = lexemes[i].start;
                let end = lexemes[last].end();
                out.push(Lexeme::new(ttype, &sql[start..end], start));
                i = last + 1;
            }
            None => {
                out.push(lexemes[i]);
                i += 1;
            }
        }
    }
    out
}

/// Index of the last word of the first sequence in `table` starting at `i`,
/// if any. Only blanks and line breaks may separate the words.
fn compound_at(lexemes: &[Lexeme<'_>], i: usize, table: &[&[&str]]) -> Option<usize> {
    table.iter().find_map(|words| {
        let mut j = i;
        for (n, word) in words.iter().enumerate() {
            if n > 0 {
                j += 1;
                while lexemes.get(j).is_some_and(|l| l.ttype.is_whitespace()) {
                    j += 1;
                }
            }
            let lexeme = lexemes.get(j)?;
            let is_word = lexeme.ttype.is_keyword() || lexeme.ttype == TokenType::Comparison;
            if !is_word || !lexeme.value.eq_ignore_ascii_case(word) {
                return None;
            }
        }
        Some(j)
    })
}

/// Single forward walk over the source converting the tokenizer's 1-based
/// line / column locations into byte offsets. Columns count chars, and only
/// `\n` starts a new line, matching how `sqlparser` tracks locations.
struct Offsets<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
    line: u64,
    column: u64,
    byte: usize,
}

impl<'a> Offsets<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            chars: sql.char_indices().peekable(),
            len: sql.len(),
            line: 1,
            column: 1,
            byte: 0,
        }
    }

    /// Byte offset of `location`. Locations must be requested in
    /// non-decreasing order; an earlier one yields the current offset.
    fn byte_at(&mut self, location: Location) -> usize {
        while (self.line, self.column) < (location.line, location.column) {
            let Some((idx, c)) = self.chars.next() else {
                self.byte = self.len;
                break;
            };
            self.byte = idx + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.byte
    }
}
