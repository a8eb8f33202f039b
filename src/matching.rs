//! Match engine for suggestion candidates
//!
//! A search term is split into whitespace-separated words, every word is
//! escaped so it can be embedded in a regex, and the words are joined into a
//! single case-insensitive alternation. A candidate matches when any word
//! occurs anywhere in it (substring, not prefix or whole-word).
//!
//! Highlighting returns structured spans instead of markup so the rendering
//! layer never interprets candidate text.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, ResultExt};
use crate::markup::strip_tags;

/// One run of text in a highlighted candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub is_match: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: false,
        }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: true,
        }
    }
}

/// Compiled alternation of the words of a search term.
///
/// A term with no words (empty or whitespace only) yields a pattern that
/// never matches.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Option<Regex>,
}

impl Pattern {
    /// True when the search term had no words.
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// The regex source, or `None` for the empty pattern.
    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(haystack))
    }

    /// Split `haystack` into alternating plain/matched spans.
    /// Adjacent matches stay separate spans; empty text yields no spans.
    pub fn spans(&self, haystack: &str) -> Vec<Span> {
        let Some(re) = &self.regex else {
            return plain_spans(haystack);
        };

        let mut spans = Vec::new();
        let mut last = 0;
        for m in re.find_iter(haystack) {
            if m.start() > last {
                spans.push(Span::plain(&haystack[last..m.start()]));
            }
            spans.push(Span::matched(m.as_str()));
            last = m.end();
        }
        if last < haystack.len() {
            spans.push(Span::plain(&haystack[last..]));
        }
        spans
    }
}

fn plain_spans(text: &str) -> Vec<Span> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Span::plain(text)]
    }
}

/// Builds [`Pattern`]s. The size limit bounds the compiled program so a
/// pathological search term fails cleanly instead of exhausting memory.
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    size_limit: Option<usize>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = Some(bytes);
        self
    }

    /// Compile the alternation for `search_term`.
    pub fn build(&self, search_term: &str) -> Result<Pattern> {
        let alternation = words(search_term)
            .map(escape_word)
            .collect::<Vec<_>>()
            .join("|");

        if alternation.is_empty() {
            return Ok(Pattern { regex: None });
        }

        let mut builder = RegexBuilder::new(&format!("({})", alternation));
        builder.case_insensitive(true);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }
        let regex = builder.build()?;
        Ok(Pattern { regex: Some(regex) })
    }

    /// Whether `candidate` contains any word of `search_term`.
    /// Pattern errors are logged and count as no match.
    pub fn matches(&self, candidate: &str, search_term: &str) -> bool {
        self.build(search_term)
            .warn_on_err("Match pattern")
            .is_some_and(|pattern| pattern.is_match(candidate))
    }

    /// Strip markup from `candidate` and split it into matched/plain spans.
    ///
    /// Returns an empty vec when the pattern cannot be built. Callers must
    /// treat that as "nothing renderable", not as "no match".
    pub fn highlight(&self, candidate: &str, search_term: &str) -> Vec<Span> {
        self.build(search_term)
            .warn_on_err("Highlight pattern")
            .map(|pattern| pattern.spans(&strip_tags(candidate)))
            .unwrap_or_default()
    }
}

/// Words of a search term; whitespace runs of any length separate words.
pub fn words(search_term: &str) -> impl Iterator<Item = &str> {
    search_term.split_whitespace()
}

/// Escape every character that is not alphanumeric, `-` or `_`.
///
/// ASCII punctuation gets a backslash, except `<` and `>`. Non-ASCII characters have no meaning in
/// the regex syntax and are embedded as-is, since backslash-escaping them is
/// itself a syntax error.
pub fn escape_word(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len() * 2);
    for c in word.chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            escaped.push(c);
        } else if c == '<' || c == '>' {
            // `\<` and `\>` are word-boundary assertions; the bare chars are literal
            escaped.push(c);
        } else if c.is_ascii() {
            if c.is_ascii_punctuation() {
                escaped.push('\\');
                escaped.push(c);
            } else {
                // ASCII control characters
                escaped.push_str(&format!("\\x{{{:x}}}", c as u32));
            }
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Compile the alternation for `search_term` with default limits.
pub fn build_pattern(search_term: &str) -> Result<Pattern> {
    PatternBuilder::new().build(search_term)
}

/// Whether `candidate` contains any word of `search_term`, ignoring case.
pub fn matches(candidate: &str, search_term: &str) -> bool {
    PatternBuilder::new().matches(candidate, search_term)
}

/// Highlight the words of `search_term` inside `candidate`.
pub fn highlight(candidate: &str, search_term: &str) -> Vec<Span> {
    PatternBuilder::new().highlight(candidate, search_term)
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
