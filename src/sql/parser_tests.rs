#![cfg(test)]
use crate::config::dialect_named;
use crate::sql::{Parser, Statement, Token};
use crate::testing::*;
use itertools::Itertools as _;
use sqlparser::dialect::{Dialect, GenericDialect, PostgreSqlDialect};

/// Inputs exercising statements, line endings, comments, literals and
/// malformed text.
const SAMPLES: &[&str] = &[
    "",
    "SELECT 1",
    "SELECT a FROM b\nWHERE a=1",
    "SELECT foo(x), count(*)\n  FROM t\n WHERE t.id <> 3;",
    "SELECT 1;\nSELECT 2; SELECT 3",
    "select a,\r\n       b\r\n  from t\r\n order by a",
    "SELECT a -- pick a\nFROM t /* block\ncomment */ WHERE b LIKE 'x%'",
    "SELECT 1 -- c\r\nFROM t WHERE a NOT LIKE 'b'\r\n",
    "SELECT 'multi\nline', \"Quoted Col\" FROM t",
    "SELECT * FROM a LEFT OUTER\n  JOIN b ON a.id = b.id GROUP BY a.x",
    "INSERT INTO t (a, b) VALUES (1, 'é'), (2, 'ü');",
    "UPDATE t SET a = max(b) WHERE c IN (SELECT d FROM e)",
    "SELECT (a FROM b)) WHERE",
    "SELECT 'unterminated\nFROM t",
    "SELECT /* unterminated\nFROM t",
    "\n\n  \n",
];

fn pass<'p>(parser: &'p Parser<'_>) -> Vec<Token<'p>> {
    parser.tokens().collect()
}

fn parser(sql: &str, offset: usize) -> Parser<'_> {
    parser_in(sql, offset, &GenericDialect {})
}

fn parser_in<'a>(sql: &'a str, offset: usize, dialect: &dyn Dialect) -> Parser<'a> {
    init_tracing();
    Parser::with_dialect(sql, offset, dialect)
}

/// Every predicate of a token, for comparing passes.
fn snapshot(t: &Token<'_>) -> (String, usize, usize, [bool; 8]) {
    (
        t.value().to_string(),
        t.row(),
        t.col(),
        [
            t.is_whitespace(),
            t.is_keyword(),
            t.is_root_keyword(),
            t.is_function_name(),
            t.is_name(),
            t.is_punctuation(),
            t.is_comparison(),
            t.is_newline(),
        ],
    )
}

/// Row and char column of byte `offset` in `sql`.
fn location(sql: &str, offset: usize) -> (usize, usize) {
    let prefix = sql[..offset].replace("\r\n", "\n").replace('\r', "\n");
    let row = prefix.matches('\n').count();
    let line = prefix.rsplit('\n').next().unwrap_or_default();
    (row, line.chars().count())
}

fn find<'a>(tokens: &[Token<'a>], value: &str) -> Token<'a> {
    *tokens
        .iter()
        .find(|t| t.value() == value)
        .unwrap_or_else(|| panic!("no token {value:?} in {tokens:?}"))
}

mod properties {
    use super::*;

    #[rstest]
    fn tokens_follow_raw_tokens(#[values(0, 4)] offset: usize) {
        for sql in SAMPLES {
            let parser = parser(sql, offset);
            let raw = parser
                .statements()
                .iter()
                .flat_map(Statement::flatten)
                .map(|r| (r.ttype(), r.value()))
                .collect::<Vec<_>>();
            let classified = pass(&parser)
                .iter()
                .map(|t| (t.ttype(), t.value()))
                .collect::<Vec<_>>();
            assert_eq!(classified, raw, "{sql:?}");
            assert_eq!(classified.iter().map(|(_, v)| *v).join(""), *sql);
        }
    }

    #[rstest]
    fn first_token_sits_at_the_offset(#[values(0, 1, 12)] offset: usize) {
        for sql in SAMPLES.iter().filter(|s| !s.is_empty()) {
            let parser = parser(sql, offset);
            let first = parser.tokens().next().expect("non-empty input has tokens");
            assert_eq!(first.position(), (0, offset), "{sql:?}");
        }
    }

    #[rstest]
    fn newline_moves_to_start_of_next_row(#[values(0, 4)] offset: usize) {
        for sql in SAMPLES {
            let parser = parser(sql, offset);
            for (prev, next) in pass(&parser).iter().tuple_windows() {
                if prev.is_newline() {
                    assert_eq!(next.position(), (prev.row() + 1, 0), "after {prev:?} in {sql:?}");
                }
            }
        }
    }

    #[rstest]
    fn columns_advance_by_char_length(#[values(0, 4)] offset: usize) {
        for sql in SAMPLES {
            let parser = parser(sql, offset);
            for (prev, next) in pass(&parser).iter().tuple_windows() {
                let single_line = !prev.value().contains(['\n', '\r']);
                if !prev.is_newline() && single_line {
                    assert_eq!(next.row(), prev.row(), "after {prev:?} in {sql:?}");
                }
                if !prev.is_newline() && next.row() == prev.row() {
                    assert_eq!(
                        next.col(),
                        prev.col() + prev.value().chars().count(),
                        "after {prev:?} in {sql:?}"
                    );
                }
            }
        }
    }

    #[rstest]
    fn positions_match_the_source_text(#[values("generic", "postgresql", "mysql")] dialect: &str) {
        let dialect = dialect_named(dialect).expect("known dialect");
        for sql in SAMPLES {
            let parser = parser_in(sql, 0, &*dialect);
            for t in pass(&parser) {
                assert_eq!(
                    t.position(),
                    location(sql, t.raw().offset()),
                    "{t:?} in {sql:?}"
                );
            }
        }
    }

    #[rstest]
    fn positions_are_unique_and_ordered(#[values(0, 4)] offset: usize) {
        for sql in SAMPLES {
            let parser = parser(sql, offset);
            for (prev, next) in pass(&parser).iter().tuple_windows() {
                assert!(next.row() >= prev.row(), "row went back in {sql:?}");
                assert!(
                    next.position() > prev.position(),
                    "{prev:?} and {next:?} overlap in {sql:?}"
                );
            }
        }
    }

    #[test]
    fn predicate_implications() {
        for sql in SAMPLES {
            let parser = parser(sql, 0);
            for t in pass(&parser) {
                if t.is_root_keyword() {
                    assert!(t.is_keyword(), "{t:?}");
                }
                if t.is_name() {
                    assert!(!t.is_keyword(), "{t:?}");
                }
                if t.is_newline() {
                    assert!(t.is_whitespace(), "{t:?}");
                }
            }
        }
    }

    #[rstest]
    fn passes_are_deterministic(#[values(0, 7)] offset: usize) {
        for sql in SAMPLES {
            let first = parser(sql, offset);
            let second = parser(sql, offset);
            let a = pass(&first).iter().map(snapshot).collect::<Vec<_>>();
            let b = pass(&second).iter().map(snapshot).collect::<Vec<_>>();
            let again = (&first).into_iter().map(|t| snapshot(&t)).collect::<Vec<_>>();
            assert_eq!(a, b, "{sql:?}");
            assert_eq!(a, again, "{sql:?}");
        }
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn clause_keywords_names_and_comparisons() {
        let parser = parser("SELECT a FROM b\nWHERE a=1", 4);
        let tokens = pass(&parser);

        let select = find(&tokens, "SELECT");
        assert_eq!(select.position(), (0, 4));
        assert!(select.is_root_keyword());

        let a = find(&tokens, "a");
        assert_eq!(a.position(), (0, 11));
        assert!(a.is_name());

        let from = find(&tokens, "FROM");
        assert_eq!(from.position(), (0, 13));
        assert!(from.is_root_keyword());

        let newline = find(&tokens, "\n");
        assert!(newline.is_newline());
        assert_eq!(newline.position(), (0, 19));

        let r#where = find(&tokens, "WHERE");
        assert_eq!(r#where.position(), (1, 0));
        assert!(r#where.is_root_keyword());

        let eq = find(&tokens, "=");
        assert!(eq.is_comparison());
        assert_eq!(eq.position(), (1, 7));
    }

    #[test]
    fn function_head_versus_argument() {
        let parser = parser("SELECT count(x) FROM t", 0);
        let tokens = pass(&parser);
        assert!(find(&tokens, "count").is_function_name());
        assert!(!find(&tokens, "x").is_function_name());
        assert!(find(&tokens, "x").is_name());
    }

    #[test]
    fn unreserved_function_head_is_a_plain_name() {
        let parser = parser("SELECT foo(x) FROM t", 0);
        let tokens = pass(&parser);
        let foo = find(&tokens, "foo");
        assert!(foo.is_name());
        assert!(!foo.is_function_name());
        assert!(!find(&tokens, "x").is_function_name());
    }

    #[rstest]
    #[case("SELECT count FROM t", "count")]
    #[case("SELECT t.max FROM t", "max")]
    #[case("SELECT max FROM t WHERE f(max) > 1", "max")]
    fn reserved_word_outside_a_call_head(#[case] sql: &str, #[case] value: &str) {
        let parser = parser(sql, 0);
        let tokens = pass(&parser);
        for t in tokens.iter().filter(|t| t.value() == value) {
            assert!(!t.is_function_name(), "{t:?} in {sql:?}");
        }
    }

    #[test]
    fn counting_continues_across_statements() {
        let parser = parser("SELECT 1;\nSELECT 2; SELECT 3", 2);
        let tokens = pass(&parser);
        let selects = tokens
            .iter()
            .filter(|t| t.value() == "SELECT")
            .map(Token::position)
            .collect::<Vec<_>>();
        assert_eq!(selects, vec![(0, 2), (1, 0), (1, 10)]);
        assert_eq!(parser.statements().len(), 3);
    }

    #[test]
    fn comment_line_break_moves_to_next_row() {
        let parser = parser("SELECT a -- pick a\nFROM t", 4);
        let tokens = pass(&parser);
        assert_eq!(find(&tokens, "-- pick a\n").position(), (0, 13));
        assert_eq!(find(&tokens, "FROM").position(), (1, 0));
        assert_eq!(find(&tokens, "t").position(), (1, 5));
    }

    #[test]
    fn multi_line_literal_moves_rows() {
        let parser = parser("SELECT 'a\nb', c", 0);
        let tokens = pass(&parser);
        assert_eq!(find(&tokens, "'a\nb'").position(), (0, 7));
        assert_eq!(find(&tokens, ",").position(), (1, 2));
        assert_eq!(find(&tokens, "c").position(), (1, 4));
    }

    #[test]
    fn compound_keyword_across_lines() {
        let parser = parser("SELECT a FROM t GROUP\n    BY a", 0);
        let tokens = pass(&parser);
        let group_by = find(&tokens, "GROUP\n    BY");
        assert!(group_by.is_root_keyword());
        assert_eq!(group_by.position(), (0, 16));
        let last = tokens.last().expect("tokens");
        assert_eq!((last.value(), last.position()), ("a", (1, 7)));
    }

    #[test]
    fn carriage_return_line_feed_is_one_newline() {
        let parser = parser("SELECT a\r\nFROM t", 0);
        let tokens = pass(&parser);
        let newline = find(&tokens, "\r\n");
        assert!(newline.is_newline());
        assert_eq!(find(&tokens, "FROM").position(), (1, 0));
    }

    #[test]
    fn crlf_after_comment_is_one_line_break_in_postgres() {
        let parser = parser_in("SELECT 1 -- c\r\nFROM t", 0, &PostgreSqlDialect {});
        let tokens = pass(&parser);
        assert_eq!(find(&tokens, "-- c\r\n").position(), (0, 9));
        assert_eq!(find(&tokens, "FROM").position(), (1, 0));
        assert_eq!(find(&tokens, "t").position(), (1, 5));
    }

    #[test]
    fn negated_like_is_one_comparison() {
        let parser = parser("SELECT a FROM t WHERE a NOT LIKE 'x%'", 0);
        let tokens = pass(&parser);
        let not_like = find(&tokens, "NOT LIKE");
        assert!(not_like.is_comparison());
        assert!(!not_like.is_keyword());
        assert_eq!(not_like.position(), (0, 24));
    }

    #[test]
    fn malformed_text_still_yields_positioned_tokens() {
        let parser = parser("SELECT 'oops\nFROM t", 3);
        let tokens = pass(&parser);
        let values = tokens.iter().map(Token::value).collect::<Vec<_>>();
        assert_eq!(values, ["SELECT", " ", "'oops\nFROM t"]);
        assert_eq!(tokens[2].position(), (0, 10));
        assert!(tokens.iter().all(|t| !t.is_name() && !t.is_function_name()));
    }
}
