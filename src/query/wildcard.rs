//! Wildcard literals.
//!
//! A pattern such as `wash*` or `col*r` is first normalized with the context's
//! wildcard normalizer, then resolved against the k-gram index into the raw
//! tokens it matches. Those tokens go through the index normalizer (so
//! `washing` and `washed` both become `wash`), and the postings of the
//! resulting distinct terms are merged.

use std::collections::BTreeSet;

use log::debug;

use crate::error::{PilumError, Result};
use crate::index::kgram::{WILDCARD, matches_wildcard};
use crate::index::posting::Posting;
use crate::query::component::PostingsMode;
use crate::query::context::QueryContext;
use crate::query::merge::merge_union;
use crate::query::term::fetch;

/// A query token containing at least one `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardLiteral {
    pattern: String,
}

impl WildcardLiteral {
    pub fn new<S: Into<String>>(pattern: S) -> Self {
        WildcardLiteral {
            pattern: pattern.into(),
        }
    }

    /// The pattern as written in the query.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Index terms the pattern expands to, sorted and distinct.
    pub fn terms(&self, ctx: &QueryContext<'_>) -> Result<Vec<String>> {
        let kgrams = ctx.kgrams().ok_or_else(|| {
            PilumError::index(format!(
                "wildcard '{}' needs a k-gram index, but none is attached",
                self.pattern
            ))
        })?;

        let pattern = ctx
            .wildcard_normalizer()
            .normalize(&self.pattern)
            .into_iter()
            .next()
            .unwrap_or_default();
        if !pattern.chars().any(|c| c != WILDCARD) {
            return Ok(Vec::new());
        }

        let mut terms = BTreeSet::new();
        for key in kgrams.resolve(&pattern) {
            for form in matching_forms(&pattern, &key) {
                terms.extend(ctx.normalizer().normalize(&form));
            }
        }
        debug!("wildcard '{pattern}' expands to {} terms", terms.len());
        Ok(terms.into_iter().collect())
    }

    pub(crate) fn evaluate(&self, ctx: &QueryContext<'_>, mode: PostingsMode) -> Result<Vec<Posting>> {
        let mut result = Vec::new();
        for term in self.terms(ctx)? {
            let postings = fetch(ctx, &term, mode)?;
            result = merge_union(&result, &postings);
        }
        Ok(result)
    }
}

const HYPHEN: char = '-';

/// Forms of a resolved k-gram key that match the pattern on their own.
///
/// The index normalizer turns a hyphenated token into its joined form and
/// each part, so a key like `washing-machine` stands for `washingmachine`,
/// `washing` and `machine`. Only the forms the pattern matches are kept; the
/// joined form is compared against the pattern with its hyphens removed.
fn matching_forms(pattern: &str, key: &str) -> Vec<String> {
    if !key.contains(HYPHEN) {
        return vec![key.to_string()];
    }

    let mut forms = Vec::new();
    let joined: String = key.chars().filter(|&c| c != HYPHEN).collect();
    let joined_pattern: String = pattern.chars().filter(|&c| c != HYPHEN).collect();
    if matches_wildcard(&joined_pattern, &joined) {
        forms.push(joined);
    }
    forms.extend(
        key.split(HYPHEN)
            .filter(|part| !part.is_empty() && matches_wildcard(pattern, part))
            .map(str::to_string),
    );
    forms
}
