//! Boolean combinators over child components.

use crate::error::Result;
use crate::index::posting::Posting;
use crate::query::component::{PostingsMode, QueryComponent};
use crate::query::context::QueryContext;
use crate::query::merge::{difference, intersect, union};

/// Fold children with intersection, stopping as soon as the result is empty.
pub(crate) fn evaluate_and(
    children: &[QueryComponent],
    ctx: &QueryContext<'_>,
    mode: PostingsMode,
) -> Result<Vec<Posting>> {
    let Some((first, rest)) = children.split_first() else {
        return Ok(Vec::new());
    };

    let mut result = first.evaluate(ctx, mode)?;
    for child in rest {
        if result.is_empty() {
            break;
        }
        result = intersect(&result, &child.evaluate(ctx, mode)?);
    }
    Ok(result)
}

/// Fold children with union.
pub(crate) fn evaluate_or(
    children: &[QueryComponent],
    ctx: &QueryContext<'_>,
    mode: PostingsMode,
) -> Result<Vec<Posting>> {
    let mut result = Vec::new();
    for child in children {
        result = union(&result, &child.evaluate(ctx, mode)?);
    }
    Ok(result)
}

pub(crate) fn evaluate_not(
    positive: &QueryComponent,
    negative: &QueryComponent,
    ctx: &QueryContext<'_>,
    mode: PostingsMode,
) -> Result<Vec<Posting>> {
    let included = positive.evaluate(ctx, mode)?;
    if included.is_empty() {
        return Ok(included);
    }
    let excluded = negative.evaluate(ctx, mode)?;
    Ok(difference(&included, &excluded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::{Normalizer, StemmingNormalizer};
    use crate::index::PositionalInvertedIndex;
    use crate::index::posting::doc_ids;

    fn index(normalizer: &StemmingNormalizer) -> PositionalInvertedIndex {
        let docs = [
            "los angeles west",
            "la west coast",
            "la east",
            "new york east",
        ];
        let mut index = PositionalInvertedIndex::new();
        for (doc_id, text) in docs.iter().enumerate() {
            for (i, token) in text.split_whitespace().enumerate() {
                for term in normalizer.normalize(token) {
                    index.add_term(&term, doc_id as u32, i as u32 + 1).unwrap();
                }
            }
        }
        index
    }

    #[test]
    fn test_and() {
        let normalizer = StemmingNormalizer::new();
        let index = index(&normalizer);
        let ctx = QueryContext::new(&index, &normalizer);

        let query = QueryComponent::and(vec![QueryComponent::term("la"), QueryComponent::term("west")]);
        assert_eq!(doc_ids(&query.postings(&ctx).unwrap()), vec![1]);

        let empty = QueryComponent::and(vec![QueryComponent::term("zebra"), QueryComponent::term("west")]);
        assert!(empty.postings(&ctx).unwrap().is_empty());
        assert!(QueryComponent::and(vec![]).postings(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_or() {
        let normalizer = StemmingNormalizer::new();
        let index = index(&normalizer);
        let ctx = QueryContext::new(&index, &normalizer);

        let query = QueryComponent::or(vec![QueryComponent::term("york"), QueryComponent::term("la")]);
        assert_eq!(doc_ids(&query.postings(&ctx).unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_not() {
        let normalizer = StemmingNormalizer::new();
        let index = index(&normalizer);
        let ctx = QueryContext::new(&index, &normalizer);

        let query = QueryComponent::not(QueryComponent::term("east"), QueryComponent::term("la"));
        assert_eq!(doc_ids(&query.postings(&ctx).unwrap()), vec![3]);
    }

    #[test]
    fn test_positionless_mode_propagates() {
        let normalizer = StemmingNormalizer::new();
        let index = index(&normalizer);
        let ctx = QueryContext::new(&index, &normalizer);

        let query = QueryComponent::or(vec![
            QueryComponent::and(vec![QueryComponent::term("la"), QueryComponent::term("east")]),
            QueryComponent::term("angeles"),
        ]);
        let postings = query.positionless_postings(&ctx).unwrap();
        assert_eq!(doc_ids(&postings), vec![0, 2]);
        assert!(postings.iter().all(|p| !p.has_positions()));
    }
}
