//! Phrase literals.

use crate::error::{PilumError, Result};
use crate::index::posting::{Posting, strip_positions};
use crate::query::component::{PostingsMode, QueryComponent};
use crate::query::context::QueryContext;
use crate::query::merge::positional_intersect;

/// A quoted sequence of terms or wildcards that must occur at consecutive
/// positions.
///
/// Positional evaluation reports, for each matching document, the position
/// where each occurrence of the phrase starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseLiteral {
    terms: Vec<QueryComponent>,
}

impl PhraseLiteral {
    /// Create a phrase. Every sub-term must be a term or a wildcard.
    pub fn new(terms: Vec<QueryComponent>) -> Result<Self> {
        if terms.is_empty() {
            return Err(PilumError::bad_query("empty phrase"));
        }
        if let Some(bad) = terms.iter().find(|t| !t.is_single_token()) {
            return Err(PilumError::bad_query(format!(
                "phrase may only contain terms and wildcards, found {bad}"
            )));
        }
        Ok(PhraseLiteral { terms })
    }

    pub fn terms(&self) -> &[QueryComponent] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn evaluate(&self, ctx: &QueryContext<'_>, mode: PostingsMode) -> Result<Vec<Posting>> {
        if self.terms.len() == 1 {
            return self.terms[0].evaluate(ctx, mode);
        }

        if mode == PostingsMode::Positionless {
            if let Some(postings) = self.biword_postings(ctx)? {
                return Ok(postings);
            }
        }

        let mut running = self.terms[0].evaluate(ctx, PostingsMode::Positional)?;
        for next in &self.terms[1..] {
            if running.is_empty() {
                break;
            }
            let postings = next.evaluate(ctx, PostingsMode::Positional)?;
            running = positional_intersect(&running, &postings, 1);
        }

        // Positions now mark the last term of each occurrence.
        let span = (self.terms.len() - 1) as u32;
        let starts: Vec<Posting> = running
            .into_iter()
            .map(|p| {
                let positions = p.positions.iter().map(|pos| pos.saturating_sub(span)).collect();
                Posting::with_positions(p.doc_id, positions)
            })
            .collect();

        Ok(match mode {
            PostingsMode::Positional => starts,
            PostingsMode::Positionless => strip_positions(&starts),
        })
    }

    /// Two plain terms, each with a single normalized form, can be answered
    /// from the biword index when one is attached.
    fn biword_postings(&self, ctx: &QueryContext<'_>) -> Result<Option<Vec<Posting>>> {
        let Some(biwords) = ctx.biwords() else {
            return Ok(None);
        };
        let [QueryComponent::Term(first), QueryComponent::Term(second)] = self.terms.as_slice()
        else {
            return Ok(None);
        };

        match (first.terms(ctx).as_slice(), second.terms(ctx).as_slice()) {
            ([a], [b]) => Ok(Some(biwords.pair_postings(a, b)?)),
            _ => Ok(None),
        }
    }
}
