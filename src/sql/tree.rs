//! Statement splitting and the group tree built over lexemes.
//!
//! Each statement is a small tree: the statement itself is the root group,
//! leaves are lexemes, and the groups in between are the few structures token
//! classification needs to look at:
//!
//! - `Parenthesis` : a matched `(` ... `)` pair and everything between.
//! - `Identifier`  : a name, optionally qualified (`schema.table.column`).
//! - `Function`    : an identifier directly followed by a parenthesis, i.e.
//!   `Function[Identifier[name], Parenthesis[...]]`.
//!
//! Nodes live in one arena per statement, in document pre-order, and refer to
//! their parent by index. Walking up never needs an owning back-link, and the
//! leaves in arena order are the statement's tokens in source order.

use crate::sql::lexer::{self, Lexeme};
use crate::sql::token_type::TokenType;
use crate::*;
use derive_more::Display;
use itertools::Itertools as _;
use sqlparser::dialect::Dialect;
use std::collections::VecDeque;
use std::fmt;

pub type NodeId = usize;

/// Kinds of group a token can sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GroupKind {
    Statement,
    Parenthesis,
    Identifier,
    Function,
}

#[derive(Debug, Clone, Copy)]
enum NodeKind<'a> {
    Leaf(Lexeme<'a>),
    Group(GroupKind),
}

#[derive(Debug, Clone)]
struct Node<'a> {
    kind: NodeKind<'a>,
    parent: Option<NodeId>,
}

/// One top-level SQL command.
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    nodes: Vec<Node<'a>>,
}

/// Lex `sql` and split it into statements.
///
/// A `;` ends a statement. Blanks, line breaks and `--` comments right after
/// it still belong to that statement; the next token of any other kind opens
/// the following one. Empty input has no statements.
pub fn parse<'a>(sql: &'a str, dialect: &dyn Dialect) -> Vec<Statement<'a>> {
    let statements = split(lexer::lex(sql, dialect))
        .into_iter()
        .map(Statement::build)
        .collect::<Vec<_>>();
    trace!("Parsed {} statement(s) from {} bytes", statements.len(), sql.len());
    statements
}

fn split(lexemes: Vec<Lexeme<'_>>) -> Vec<Vec<Lexeme<'_>>> {
    let mut statements = Vec::new();
    let mut current = Vec::new();
    let mut terminated = false;
    for lexeme in lexemes {
        let trailing = lexeme.ttype.is_whitespace() || lexeme.ttype == TokenType::CommentSingle;
        if terminated && !trailing {
            statements.push(std::mem::take(&mut current));
            terminated = false;
        }
        if lexeme.ttype == TokenType::Punctuation && lexeme.value == ";" {
            terminated = true;
        }
        current.push(lexeme);
    }
    if !current.is_empty() {
        statements.push(current);
    }
    statements
}

/// Owned tree used while grouping, flattened into the arena afterwards.
enum Tree<'a> {
    Leaf(Lexeme<'a>),
    Group(GroupKind, Vec<Tree<'a>>),
}

impl<'a> Tree<'a> {
    fn leaf(&self) -> Option<&Lexeme<'a>> {
        match self {
            Tree::Leaf(lexeme) => Some(lexeme),
            Tree::Group(..) => None,
        }
    }

    fn ttype(&self) -> Option<TokenType> {
        self.leaf().map(|l| l.ttype)
    }

    fn is_punctuation(&self, value: &str) -> bool {
        self.leaf()
            .is_some_and(|l| l.ttype == TokenType::Punctuation && l.value == value)
    }

    /// Can start an identifier.
    fn is_name(&self) -> bool {
        matches!(self.ttype(), Some(TokenType::Name | TokenType::Symbol))
    }

    /// Can follow a `.` inside an identifier.
    fn is_name_part(&self) -> bool {
        matches!(
            self.ttype(),
            Some(TokenType::Name | TokenType::Symbol | TokenType::Wildcard)
        )
    }

    fn is_whitespace(&self) -> bool {
        self.ttype().is_some_and(TokenType::is_whitespace)
    }

    fn is_parenthesis(&self) -> bool {
        matches!(self, Tree::Group(GroupKind::Parenthesis, _))
    }
}

/// Fold matched brackets into `Parenthesis` groups. Brackets without a
/// partner stay in place as plain tokens.
fn group_parentheses(lexemes: Vec<Lexeme<'_>>) -> Vec<Tree<'_>> {
    fn push<'a>(open: &mut [Vec<Tree<'a>>], root: &mut Vec<Tree<'a>>, tree: Tree<'a>) {
        match open.last_mut() {
            Some(group) => group.push(tree),
            None => root.push(tree),
        }
    }

    let mut root = Vec::new();
    let mut open: Vec<Vec<Tree<'_>>> = Vec::new();
    for lexeme in lexemes {
        let leaf = Tree::Leaf(lexeme);
        if leaf.is_punctuation("(") {
            open.push(vec![leaf]);
            continue;
        }
        let closes = leaf.is_punctuation(")");
        push(&mut open, &mut root, leaf);
        if closes {
            if let Some(group) = open.pop() {
                push(&mut open, &mut root, Tree::Group(GroupKind::Parenthesis, group));
            }
        }
    }
    // Unclosed brackets: every pending level started after the one below it,
    // so appending them in order keeps document order.
    root.extend(open.into_iter().flatten());
    root
}

/// `CREATE ... TABLE` without `AS` at this level: the parenthesis after the
/// table name is a column list, not a call.
fn is_create_table(items: &[Tree<'_>]) -> bool {
    let has = |word: &str| {
        items
            .iter()
            .filter_map(Tree::leaf)
            .any(|l| l.ttype.is_keyword() && l.value.eq_ignore_ascii_case(word))
    };
    has("CREATE") && has("TABLE") && !has("AS")
}

/// Wrap names in `Identifier` groups and identifiers followed by a
/// parenthesis in `Function` groups, innermost levels first.
fn group_identifiers(children: Vec<Tree<'_>>) -> Vec<Tree<'_>> {
    let items = children
        .into_iter()
        .map(|child| match child {
            Tree::Group(kind, inner) => Tree::Group(kind, group_identifiers(inner)),
            leaf => leaf,
        })
        .collect::<Vec<_>>();
    let calls_allowed = !is_create_table(&items);

    let mut out = Vec::with_capacity(items.len());
    let mut rest = VecDeque::from(items);
    while let Some(tree) = rest.pop_front() {
        if !tree.is_name() {
            out.push(tree);
            continue;
        }

        let mut parts = vec![tree];
        while rest.front().is_some_and(|t| t.is_punctuation("."))
            && rest.get(1).is_some_and(Tree::is_name_part)
        {
            parts.extend(rest.drain(..2));
        }
        let callable =
            calls_allowed && parts.last().and_then(Tree::ttype) == Some(TokenType::Name);
        let identifier = Tree::Group(GroupKind::Identifier, parts);

        match rest.iter().position(|t| !t.is_whitespace()) {
            Some(n) if callable && rest[n].is_parenthesis() => {
                let mut function = vec![identifier];
                function.extend(rest.drain(..=n));
                out.push(Tree::Group(GroupKind::Function, function));
            }
            _ => out.push(identifier),
        }
    }
    out
}

impl<'a> Statement<'a> {
    fn build(lexemes: Vec<Lexeme<'a>>) -> Self {
        let children = group_identifiers(group_parentheses(lexemes));
        let mut nodes = Vec::new();
        Self::push(&mut nodes, Tree::Group(GroupKind::Statement, children), None);
        Self { nodes }
    }

    fn push(nodes: &mut Vec<Node<'a>>, tree: Tree<'a>, parent: Option<NodeId>) {
        let id = nodes.len();
        match tree {
            Tree::Leaf(lexeme) => nodes.push(Node {
                kind: NodeKind::Leaf(lexeme),
                parent,
            }),
            Tree::Group(kind, children) => {
                nodes.push(Node {
                    kind: NodeKind::Group(kind),
                    parent,
                });
                for child in children {
                    Self::push(nodes, child, Some(id));
                }
            }
        }
    }

    /// The statement's tokens, in source order.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten {
            statement: self,
            next: 0,
        }
    }

    fn group(&self, id: NodeId) -> Option<Group<'_>> {
        match self.nodes.get(id)?.kind {
            NodeKind::Group(kind) => Some(Group {
                statement: self,
                id,
                kind,
            }),
            NodeKind::Leaf(_) => None,
        }
    }

    fn parent_of(&self, id: NodeId) -> Option<Group<'_>> {
        self.group(self.nodes.get(id)?.parent?)
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten().map(|t| t.value()).join(""))
    }
}

/// Forward-only walk over a statement's leaves.
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    statement: &'a Statement<'a>,
    next: NodeId,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = RawToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.statement.nodes.get(self.next) {
            let id = self.next;
            self.next += 1;
            if let NodeKind::Leaf(lexeme) = node.kind {
                return Some(RawToken {
                    statement: self.statement,
                    id,
                    lexeme,
                });
            }
        }
        None
    }
}

/// A lexeme together with its place in the statement tree.
#[derive(Debug, Clone, Copy)]
pub struct RawToken<'a> {
    statement: &'a Statement<'a>,
    id: NodeId,
    lexeme: Lexeme<'a>,
}

impl<'a> RawToken<'a> {
    pub const fn ttype(&self) -> TokenType {
        self.lexeme.ttype
    }

    pub const fn value(&self) -> &'a str {
        self.lexeme.value
    }

    /// Byte offset of this token in the parsed text.
    pub const fn offset(&self) -> usize {
        self.lexeme.start
    }

    pub const fn is_whitespace(&self) -> bool {
        self.lexeme.ttype.is_whitespace()
    }

    pub const fn is_keyword(&self) -> bool {
        self.lexeme.ttype.is_keyword()
    }

    /// The group directly enclosing this token. Only `None` for a token
    /// outside any statement, which the parser never produces.
    pub fn parent(&self) -> Option<Group<'a>> {
        self.statement.parent_of(self.id)
    }

    /// Enclosing groups, innermost first, ending with the statement.
    pub fn ancestors(&self) -> impl Iterator<Item = Group<'a>> + use<'a> {
        std::iter::successors(self.parent(), Group::parent)
    }

    /// Whether any enclosing group is of `kind`.
    pub fn within(&self, kind: GroupKind) -> bool {
        self.ancestors().any(|g| g.kind() == kind)
    }
}

/// A group node of a statement tree.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    statement: &'a Statement<'a>,
    id: NodeId,
    kind: GroupKind,
}

impl<'a> Group<'a> {
    pub const fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The enclosing group; `None` for the statement itself.
    pub fn parent(&self) -> Option<Group<'a>> {
        self.statement.parent_of(self.id)
    }
}
