//! The query tree.
//!
//! A parsed query is a tree of [`QueryComponent`]s. Leaves are literals
//! (terms, phrases, wildcards); inner nodes are the boolean combinators. Every
//! node can be evaluated in two modes: positional, where postings keep their
//! positions, and positionless, where they do not.

use std::fmt;

use crate::error::Result;
use crate::index::posting::Posting;
use crate::query::boolean;
use crate::query::context::QueryContext;
use crate::query::phrase::PhraseLiteral;
use crate::query::term::TermLiteral;
use crate::query::wildcard::WildcardLiteral;

/// Whether evaluation keeps positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingsMode {
    Positional,
    Positionless,
}

/// A node of the query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryComponent {
    /// A single token, OR-ed over all its normalized terms.
    Term(TermLiteral),
    /// A quoted run of consecutive terms or wildcards.
    Phrase(PhraseLiteral),
    /// A token containing `*`.
    Wildcard(WildcardLiteral),
    /// Documents matching every child.
    And(Vec<QueryComponent>),
    /// Documents matching any child.
    Or(Vec<QueryComponent>),
    /// Documents matching `positive` but not `negative`.
    Not {
        positive: Box<QueryComponent>,
        negative: Box<QueryComponent>,
    },
}

impl QueryComponent {
    pub fn term<S: Into<String>>(text: S) -> Self {
        QueryComponent::Term(TermLiteral::new(text))
    }

    pub fn wildcard<S: Into<String>>(pattern: S) -> Self {
        QueryComponent::Wildcard(WildcardLiteral::new(pattern))
    }

    /// Build a phrase. Fails on an empty phrase or a non-literal sub-term.
    pub fn phrase(terms: Vec<QueryComponent>) -> Result<Self> {
        Ok(QueryComponent::Phrase(PhraseLiteral::new(terms)?))
    }

    pub fn and(children: Vec<QueryComponent>) -> Self {
        QueryComponent::And(children)
    }

    pub fn or(children: Vec<QueryComponent>) -> Self {
        QueryComponent::Or(children)
    }

    pub fn not(positive: QueryComponent, negative: QueryComponent) -> Self {
        QueryComponent::Not {
            positive: Box::new(positive),
            negative: Box::new(negative),
        }
    }

    /// Whether this node is a term or wildcard, the only kinds a phrase may hold.
    pub fn is_single_token(&self) -> bool {
        matches!(self, QueryComponent::Term(_) | QueryComponent::Wildcard(_))
    }

    /// Matching postings with positions.
    pub fn postings(&self, ctx: &QueryContext<'_>) -> Result<Vec<Posting>> {
        self.evaluate(ctx, PostingsMode::Positional)
    }

    /// Matching postings without positions.
    pub fn positionless_postings(&self, ctx: &QueryContext<'_>) -> Result<Vec<Posting>> {
        self.evaluate(ctx, PostingsMode::Positionless)
    }

    pub(crate) fn evaluate(&self, ctx: &QueryContext<'_>, mode: PostingsMode) -> Result<Vec<Posting>> {
        match self {
            QueryComponent::Term(term) => term.evaluate(ctx, mode),
            QueryComponent::Phrase(phrase) => phrase.evaluate(ctx, mode),
            QueryComponent::Wildcard(wildcard) => wildcard.evaluate(ctx, mode),
            QueryComponent::And(children) => boolean::evaluate_and(children, ctx, mode),
            QueryComponent::Or(children) => boolean::evaluate_or(children, ctx, mode),
            QueryComponent::Not { positive, negative } => {
                boolean::evaluate_not(positive, negative, ctx, mode)
            }
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, children: &[QueryComponent], separator: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{child}")?;
    }
    Ok(())
}

impl fmt::Display for QueryComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryComponent::Term(term) => write!(f, "{}", term.text()),
            QueryComponent::Wildcard(wildcard) => write!(f, "{}", wildcard.pattern()),
            QueryComponent::Phrase(phrase) => {
                f.write_str("\"")?;
                join(f, phrase.terms(), " ")?;
                f.write_str("\"")
            }
            QueryComponent::And(children) => {
                f.write_str("AND(")?;
                join(f, children, ", ")?;
                f.write_str(")")
            }
            QueryComponent::Or(children) => {
                f.write_str("OR(")?;
                join(f, children, ", ")?;
                f.write_str(")")
            }
            QueryComponent::Not { positive, negative } => {
                write!(f, "NOT({positive}, {negative})")
            }
        }
    }
}
