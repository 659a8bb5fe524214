//! Term literals.

use crate::error::Result;
use crate::index::posting::Posting;
use crate::query::component::PostingsMode;
use crate::query::context::QueryContext;
use crate::query::merge::merge_union;

/// One raw query token. It matches a document containing any of the terms
/// the context's normalizer produces for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermLiteral {
    text: String,
}

impl TermLiteral {
    pub fn new<S: Into<String>>(text: S) -> Self {
        TermLiteral { text: text.into() }
    }

    /// The raw token as written in the query.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The normalized index terms this literal stands for.
    pub fn terms(&self, ctx: &QueryContext<'_>) -> Vec<String> {
        ctx.normalizer().normalize(&self.text)
    }

    pub(crate) fn evaluate(&self, ctx: &QueryContext<'_>, mode: PostingsMode) -> Result<Vec<Posting>> {
        let mut result = Vec::new();
        for term in self.terms(ctx) {
            let postings = fetch(ctx, &term, mode)?;
            result = merge_union(&result, &postings);
        }
        Ok(result)
    }
}

/// Postings of one normalized term in the requested mode.
pub(crate) fn fetch(ctx: &QueryContext<'_>, term: &str, mode: PostingsMode) -> Result<Vec<Posting>> {
    match mode {
        PostingsMode::Positional => ctx.index().postings(term),
        PostingsMode::Positionless => ctx.index().positionless_postings(term),
    }
}
