//! K-gram index for wildcard resolution.
//!
//! Every raw token (in its minimal, unstemmed form) is wrapped in boundary
//! markers (`$token$`), split on `*`, and cut into all character substrings of
//! length `k`; fragments no longer than `k` map to themselves. The index maps
//! each token to its set of grams and also tracks the global set of grams seen.
//!
//! Wildcard resolution is two-phase:
//!
//! 1. [`KGramIndex::candidates`]: a token is a candidate when its gram set
//!    contains every gram generated from the pattern. This never misses a match
//!    but lets false positives through.
//! 2. [`matches_wildcard`]: the literal pieces between `*` must occur in order,
//!    anchored at the start and end unless the pattern starts or ends with `*`.
//!
//! # Examples
//!
//! ```
//! use pilum::index::kgram::KGramIndex;
//!
//! let mut kgrams = KGramIndex::new(2);
//! kgrams.add_term("washing");
//! kgrams.add_term("washington");
//! kgrams.add_term("swash");
//!
//! assert_eq!(kgrams.resolve("wash*"), vec!["washing", "washington"]);
//! assert_eq!(kgrams.resolve("*ash"), vec!["swash"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

/// Marker wrapped around every token before grams are generated.
pub const BOUNDARY: char = '$';

/// Wildcard character.
pub const WILDCARD: char = '*';

/// Default gram length.
pub const DEFAULT_K: usize = 2;

/// Mapping from token to the set of k-grams generated from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KGramIndex {
    k: usize,
    term_grams: BTreeMap<String, BTreeSet<String>>,
    all_grams: BTreeSet<String>,
}

impl Default for KGramIndex {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

impl KGramIndex {
    /// Create an empty index generating grams of length `k` (at least 1).
    pub fn new(k: usize) -> Self {
        KGramIndex {
            k: k.max(1),
            term_grams: BTreeMap::new(),
            all_grams: BTreeSet::new(),
        }
    }

    /// Rebuild an index from its persisted parts.
    pub fn from_parts(
        k: usize,
        term_grams: BTreeMap<String, BTreeSet<String>>,
        all_grams: BTreeSet<String>,
    ) -> Self {
        KGramIndex {
            k: k.max(1),
            term_grams,
            all_grams,
        }
    }

    /// Gram length.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Generate the grams of a token for gram length `k`.
    pub fn generate_grams(k: usize, token: &str) -> BTreeSet<String> {
        let wrapped = format!("{BOUNDARY}{token}{BOUNDARY}");
        let mut grams = BTreeSet::new();

        for fragment in wrapped.split(WILDCARD) {
            let chars: Vec<char> = fragment.chars().collect();
            if chars.is_empty() {
                continue;
            }
            if chars.len() <= k {
                grams.insert(fragment.to_string());
            } else {
                for window in chars.windows(k) {
                    grams.insert(window.iter().collect());
                }
            }
        }
        grams
    }

    /// Add a token. Adding the same token twice has no further effect.
    pub fn add_term(&mut self, token: &str) {
        if token.is_empty() || self.term_grams.contains_key(token) {
            return;
        }
        let grams = Self::generate_grams(self.k, token);
        self.all_grams.extend(grams.iter().cloned());
        self.term_grams.insert(token.to_string(), grams);
    }

    /// Grams generated for a token, if it was added.
    pub fn grams(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.term_grams.get(token)
    }

    /// Every token with its gram set, in ascending token order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.term_grams.iter()
    }

    /// Every token, in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.term_grams.keys().map(String::as_str)
    }

    /// Every distinct gram seen so far.
    pub fn distinct_grams(&self) -> &BTreeSet<String> {
        &self.all_grams
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.term_grams.len()
    }

    /// Whether no token has been added.
    pub fn is_empty(&self) -> bool {
        self.term_grams.is_empty()
    }

    /// Grams a pattern requires, built from a throwaway index over the pattern.
    /// Fragments made only of the boundary marker carry no information and are dropped.
    fn pattern_grams(&self, pattern: &str) -> Vec<String> {
        let mut scratch = KGramIndex::new(self.k);
        scratch.add_term(pattern);
        scratch
            .all_grams
            .into_iter()
            .filter(|gram| gram.chars().any(|c| c != BOUNDARY))
            .collect()
    }

    /// Phase one: tokens whose gram set covers every gram of the pattern.
    ///
    /// A pattern gram shorter than `k` (a short fragment between two `*`) is
    /// covered when any gram of the token contains it.
    pub fn candidates(&self, pattern: &str) -> Vec<String> {
        let required = self.pattern_grams(pattern);

        self.term_grams
            .iter()
            .filter(|(_, grams)| {
                required.iter().all(|needed| {
                    if needed.chars().count() >= self.k {
                        grams.contains(needed)
                    } else {
                        grams.iter().any(|gram| gram.contains(needed.as_str()))
                    }
                })
            })
            .map(|(term, _)| term.clone())
            .collect()
    }

    /// Both phases: tokens that really match the wildcard pattern, ascending.
    pub fn resolve(&self, pattern: &str) -> Vec<String> {
        let candidates = self.candidates(pattern);
        let candidate_count = candidates.len();
        let matches: Vec<String> = candidates
            .into_iter()
            .filter(|term| matches_wildcard(pattern, term))
            .collect();
        debug!(
            "wildcard '{pattern}': {candidate_count} k-gram candidates, {} verified",
            matches.len()
        );
        matches
    }
}

/// Phase two: check that the literal pieces of `pattern` occur in `term` in
/// order, without overlapping. The first piece must be a prefix unless the
/// pattern starts with `*`; the last must be a suffix unless it ends with `*`.
pub fn matches_wildcard(pattern: &str, term: &str) -> bool {
    if !pattern.contains(WILDCARD) {
        return pattern == term;
    }

    let pieces: Vec<&str> = pattern.split(WILDCARD).collect();
    let last = pieces.len() - 1;
    let mut cursor = 0;

    for (i, piece) in pieces.iter().enumerate() {
        if piece.is_empty() {
            continue;
        }
        if i == 0 {
            if !term.starts_with(piece) {
                return false;
            }
            cursor = piece.len();
        } else if i == last {
            if term.len() < cursor + piece.len() || !term.ends_with(piece) {
                return false;
            }
            cursor = term.len();
        } else {
            match term[cursor..].find(piece) {
                Some(offset) => cursor += offset + piece.len(),
                None => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(grams: &[&str]) -> BTreeSet<String> {
        grams.iter().map(|g| g.to_string()).collect()
    }

    fn sample(k: usize) -> KGramIndex {
        let mut index = KGramIndex::new(k);
        for term in [
            "washing",
            "washington",
            "wash",
            "swash",
            "washer",
            "castle",
            "west",
            "a",
        ] {
            index.add_term(term);
        }
        index
    }

    #[test]
    fn test_generate_bigrams() {
        assert_eq!(
            KGramIndex::generate_grams(2, "park"),
            set(&["$p", "pa", "ar", "rk", "k$"])
        );
        assert_eq!(KGramIndex::generate_grams(2, "a"), set(&["$a", "a$"]));
    }

    #[test]
    fn test_generate_trigrams() {
        assert_eq!(
            KGramIndex::generate_grams(3, "park"),
            set(&["$pa", "par", "ark", "rk$"])
        );
        // "$a$" is not longer than k, so it maps to itself.
        assert_eq!(KGramIndex::generate_grams(3, "a"), set(&["$a$"]));
    }

    #[test]
    fn test_generate_grams_splits_on_wildcard() {
        assert_eq!(
            KGramIndex::generate_grams(2, "wa*g"),
            set(&["$w", "wa", "g$"])
        );
        assert_eq!(
            KGramIndex::generate_grams(3, "red*"),
            set(&["$re", "red", "$"])
        );
    }

    #[test]
    fn test_add_term_tracks_distinct_grams() {
        let mut index = KGramIndex::new(2);
        index.add_term("ab");
        index.add_term("ba");
        index.add_term("ab");
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.distinct_grams(),
            &set(&["$a", "ab", "b$", "$b", "ba", "a$"])
        );
        assert_eq!(index.grams("ab"), Some(&set(&["$a", "ab", "b$"])));
        assert!(index.grams("zz").is_none());
    }

    #[test]
    fn test_candidates_superset_filter() {
        let index = sample(2);
        // "$w", "wa", "as", "sh" and "g$" are all in "washing"; "wash" lacks "g$".
        let candidates = index.candidates("wash*g");
        assert!(candidates.contains(&"washing".to_string()));
        assert!(!candidates.contains(&"wash".to_string()));
    }

    #[test]
    fn test_candidates_can_be_false_positives() {
        let mut index = KGramIndex::new(2);
        index.add_term("abcab");
        // "abc*bca" needs "a$", which "abcab" lacks.
        assert_eq!(index.candidates("abc*bca"), Vec::<String>::new());
        // Every bigram of "ab*bcab" appears, yet its pieces would overlap.
        assert_eq!(index.candidates("ab*bcab"), vec!["abcab"]);
        assert!(index.resolve("ab*bcab").is_empty());
    }

    #[test]
    fn test_resolve_prefix_suffix_infix() {
        let index = sample(2);
        assert_eq!(
            index.resolve("wash*"),
            vec!["wash", "washer", "washing", "washington"]
        );
        assert_eq!(index.resolve("*ash"), vec!["swash", "wash"]);
        assert_eq!(
            index.resolve("*ash*"),
            vec!["swash", "wash", "washer", "washing", "washington"]
        );
        assert_eq!(index.resolve("w*t"), vec!["west"]);
        assert_eq!(index.resolve("wash*ton"), vec!["washington"]);
    }

    #[test]
    fn test_resolve_with_trigrams() {
        let index = sample(3);
        assert_eq!(
            index.resolve("wash*"),
            vec!["wash", "washer", "washing", "washington"]
        );
        assert_eq!(index.resolve("*tle"), vec!["castle"]);
        assert_eq!(index.resolve("a*"), vec!["a"]);
    }

    #[test]
    fn test_resolve_short_inner_fragment() {
        let index = sample(3);
        // "s" is shorter than k and must appear inside some gram.
        assert_eq!(
            index.resolve("*s*"),
            vec!["castle", "swash", "wash", "washer", "washing", "washington", "west"]
        );
    }

    #[test]
    fn test_matches_wildcard() {
        assert!(matches_wildcard("wash*", "washing"));
        assert!(!matches_wildcard("wash*", "swash"));
        assert!(matches_wildcard("*ing", "washing"));
        assert!(!matches_wildcard("*ing", "ingot"));
        assert!(matches_wildcard("w*s*g", "washing"));
        assert!(!matches_wildcard("w*g*s", "washing"));
        // Pieces may not overlap.
        assert!(!matches_wildcard("ab*ab", "ab"));
        assert!(matches_wildcard("ab*ab", "abab"));
        assert!(matches_wildcard("*", "anything"));
        assert!(matches_wildcard("park", "park"));
        assert!(!matches_wildcard("park", "parks"));
    }
}
