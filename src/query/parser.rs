//! Query parser for converting boolean query strings into query trees.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{PilumError, Result};
use crate::index::kgram::WILDCARD;
use crate::query::component::QueryComponent;

const OR_SEPARATOR: char = '+';
const QUOTE: char = '"';

/// Parser for the boolean query syntax.
///
/// Supported syntax:
/// - Terms: `park`
/// - Implicit AND between whitespace-separated literals: `national park`
/// - OR between segments separated by `+`: `la + west`
/// - Phrases in double quotes: `"national park"`
/// - Wildcards anywhere in a term or phrase word: `wash*`, `col*r`
///
/// AND binds tighter than OR and there is no grouping. A single literal or a
/// single segment is returned without a wrapping `And`/`Or`.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryParser;

impl QueryParser {
    pub fn new() -> Self {
        QueryParser
    }

    /// Parse a query string into a query tree.
    pub fn parse(&self, query_str: &str) -> Result<QueryComponent> {
        if query_str.trim().is_empty() {
            return Err(PilumError::bad_query("empty query"));
        }
        QueryStringParser::new(query_str).parse()
    }
}

struct QueryStringParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> QueryStringParser<'a> {
    fn new(query_str: &'a str) -> Self {
        QueryStringParser {
            chars: query_str.chars().peekable(),
        }
    }

    fn parse(&mut self) -> Result<QueryComponent> {
        self.parse_or_expression()
    }

    fn parse_or_expression(&mut self) -> Result<QueryComponent> {
        let mut segments = vec![self.parse_and_expression()?];

        while self.chars.peek() == Some(&OR_SEPARATOR) {
            self.chars.next();
            segments.push(self.parse_and_expression()?);
        }

        Ok(unwrap_single(segments, QueryComponent::Or))
    }

    fn parse_and_expression(&mut self) -> Result<QueryComponent> {
        let mut literals = Vec::new();

        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None | Some(&OR_SEPARATOR) => break,
                Some(&QUOTE) => literals.push(self.parse_phrase()?),
                Some(_) => {
                    let word = self.consume_word();
                    literals.push(literal(&word)?);
                }
            }
        }

        if literals.is_empty() {
            return Err(PilumError::bad_query("empty OR segment"));
        }
        Ok(unwrap_single(literals, QueryComponent::And))
    }

    fn parse_phrase(&mut self) -> Result<QueryComponent> {
        // Opening quote
        self.chars.next();

        let mut phrase = String::new();
        let mut closed = false;
        for ch in self.chars.by_ref() {
            if ch == QUOTE {
                closed = true;
                break;
            }
            phrase.push(ch);
        }
        if !closed {
            return Err(PilumError::bad_query("unbalanced quote"));
        }

        let terms = phrase
            .split_whitespace()
            .map(literal)
            .collect::<Result<Vec<_>>>()?;
        QueryComponent::phrase(terms)
    }

    fn consume_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == OR_SEPARATOR || ch == QUOTE {
                break;
            }
            word.push(ch);
            self.chars.next();
        }
        word
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|ch| ch.is_whitespace()).is_some() {}
    }
}

/// A term, or a wildcard when the word holds `*`.
fn literal(word: &str) -> Result<QueryComponent> {
    if !word.contains(WILDCARD) {
        return Ok(QueryComponent::term(word));
    }
    if word.chars().all(|c| c == WILDCARD) {
        return Err(PilumError::bad_query(format!(
            "wildcard '{word}' has no literal characters"
        )));
    }
    Ok(QueryComponent::wildcard(word))
}

fn unwrap_single(
    mut children: Vec<QueryComponent>,
    combine: fn(Vec<QueryComponent>) -> QueryComponent,
) -> QueryComponent {
    if children.len() == 1 {
        children.remove(0)
    } else {
        combine(children)
    }
}
