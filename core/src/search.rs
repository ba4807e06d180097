//! Find and replace.
//!
//! The diff engine itself only consumes resolved offset pairs ([`Match`]). How
//! a query becomes offsets is behind the [`Matcher`] trait so the pattern engine
//! can be swapped without touching the projection code. [`PatternMatcher`] is
//! the stock implementation: literal or regex queries, optionally
//! case-insensitive, on top of the `regex` crate.
//!
//! A malformed pattern is a caller problem, not an engine failure.
//! [`find_or_empty`] is the boundary that turns any [`SearchError`] into zero
//! matches, which is what the find UI shows as "No results".

use crate::{matches::Match, panel::PanelId};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Errors from compiling a query into a matcher.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("invalid search pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Find toggles exposed by the find widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FindOptions {
    pub case_sensitive: bool,
    pub use_regex: bool,
}

/// A pattern engine producing byte ranges of matches in a text.
pub trait Matcher {
    /// Non-overlapping matches in ascending order.
    fn find_ranges(&self, text: &str) -> Vec<Range<usize>>;
}

/// Literal or regex matcher compiled from a find query.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile `query` according to `options`.
    ///
    /// Literal queries are escaped, so `a.b` only matches `a.b`.
    pub fn new(query: &str, options: FindOptions) -> Result<Self, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let pattern = if options.use_regex {
            query.to_string()
        } else {
            regex::escape(query)
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|source| SearchError::InvalidPattern {
                pattern: query.to_string(),
                source,
            })?;

        Ok(Self { regex })
    }
}

impl Matcher for PatternMatcher {
    fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }
}

/// Run `matcher` over a panel's text.
///
/// Zero-width ranges (e.g. from `^` or `a*`) are dropped; a [`Match`] always
/// covers at least one byte.
pub fn find_matches(panel: PanelId, text: &str, matcher: &dyn Matcher) -> Vec<Match> {
    matcher
        .find_ranges(text)
        .into_iter()
        .filter(|range| range.end > range.start)
        .map(|range| Match {
            panel,
            start: range.start,
            end: range.end,
        })
        .collect()
}

/// Compile and run a query, mapping any query error to zero matches.
pub fn find_or_empty(query: &str, options: FindOptions, panel: PanelId, text: &str) -> Vec<Match> {
    match PatternMatcher::new(query, options) {
        Ok(matcher) => find_matches(panel, text, &matcher),
        Err(err) => {
            tracing::debug!(%err, "search query produced no matches");
            Vec::new()
        },
    }
}

/// Replace the text covered by `m` with `replacement`.
///
/// Returns `None` if the match no longer fits `text` (stale offsets after an
/// edit, or a range that splits a character).
pub fn replace_match(text: &str, m: &Match, replacement: &str) -> Option<String> {
    let before = text.get(..m.start)?;
    let after = text.get(m.end..)?;
    if m.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(before.len() + replacement.len() + after.len());
    out.push_str(before);
    out.push_str(replacement);
    out.push_str(after);
    Some(out)
}

/// Replace every match with `replacement`.
///
/// Matches are applied from the back so earlier offsets stay valid. Matches
/// that overlap an already-applied one, or do not fit the text, are skipped.
pub fn replace_all(text: &str, matches: &[Match], replacement: &str) -> String {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|m| std::cmp::Reverse(m.start));

    let mut out = text.to_string();
    let mut floor = text.len();
    let mut replaced = 0;
    for m in ordered {
        if m.end > floor {
            continue;
        }
        if let Some(next) = replace_match(&out, m, replacement) {
            out = next;
            floor = m.start;
            replaced += 1;
        }
    }

    tracing::debug!(replaced, total = matches.len(), "replaced matches");
    out
}

/// Navigation over the matches of one find query.
///
/// The first match is active as soon as there are any; selection wraps at both
/// ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindSession {
    matches: Vec<Match>,
    active: Option<usize>,
}

impl FindSession {
    pub fn new(matches: Vec<Match>) -> Self {
        let active = if matches.is_empty() { None } else { Some(0) };
        Self { matches, active }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Match> {
        self.active.and_then(|index| self.matches.get(index))
    }

    pub fn select_next(&mut self) -> Option<&Match> {
        let len = self.matches.len();
        self.active = self.active.map(|index| (index + 1) % len);
        self.active()
    }

    pub fn select_prev(&mut self) -> Option<&Match> {
        let len = self.matches.len();
        self.active = self.active.map(|index| (index + len - 1) % len);
        self.active()
    }

    /// `"i of n"` for the active match, or `"No results"`.
    pub fn status_label(&self) -> String {
        match self.active {
            Some(index) => format!("{} of {}", index + 1, self.matches.len()),
            None => "No results".to_string(),
        }
    }

    /// Replace the active match in `text`.
    pub fn replace_active(&self, text: &str, replacement: &str) -> Option<String> {
        replace_match(text, self.active()?, replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(query: &str, options: FindOptions, text: &str) -> Vec<Range<usize>> {
        find_or_empty(query, options, PanelId::nil(), text)
            .into_iter()
            .map(|m| m.range())
            .collect()
    }

    const CASE_SENSITIVE: FindOptions = FindOptions {
        case_sensitive: true,
        use_regex: false,
    };

    const REGEX: FindOptions = FindOptions {
        case_sensitive: true,
        use_regex: true,
    };

    #[test]
    fn literal_is_case_insensitive_by_default() {
        assert_eq!(
            find("hello", FindOptions::default(), "Hello HELLO hello"),
            vec![0..5, 6..11, 12..17]
        );
    }

    #[test]
    fn literal_case_sensitive() {
        assert_eq!(find("hello", CASE_SENSITIVE, "Hello hello"), vec![6..11]);
    }

    #[test]
    fn literal_escapes_metacharacters() {
        assert_eq!(find("a.b", CASE_SENSITIVE, "axb a.b"), vec![4..7]);
    }

    #[test]
    fn regex_mode() {
        assert_eq!(find(r"\d+", REGEX, "a1 b22 c333"), vec![1..2, 4..6, 8..11]);
    }

    #[test]
    fn invalid_regex_is_no_results() {
        assert!(find("[", REGEX, "[abc]").is_empty());
        assert!(matches!(
            PatternMatcher::new("[", REGEX),
            Err(SearchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn empty_query_is_no_results() {
        assert!(find("", FindOptions::default(), "abc").is_empty());
        assert!(matches!(
            PatternMatcher::new("", FindOptions::default()),
            Err(SearchError::EmptyQuery)
        ));
    }

    #[test]
    fn zero_width_matches_are_dropped() {
        assert!(find("^", REGEX, "abc\ndef").is_empty());
        assert_eq!(find("a*", REGEX, "baab"), vec![1..3]);
    }

    #[test]
    fn custom_matcher_is_accepted() {
        struct EveryOther;
        impl Matcher for EveryOther {
            fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
                (0..text.len()).step_by(2).map(|i| i..i + 1).collect()
            }
        }

        let matches = find_matches(PanelId::nil(), "abcd", &EveryOther);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].start, 2);
    }

    #[test]
    fn session_navigation_wraps() {
        let matches = find_or_empty("o", CASE_SENSITIVE, PanelId::nil(), "foo boo");
        let mut session = FindSession::new(matches);
        assert_eq!(session.status_label(), "1 of 4");
        assert_eq!(session.select_next().map(|m| m.start), Some(2));
        session.select_next();
        session.select_next();
        assert_eq!(session.status_label(), "4 of 4");
        assert_eq!(session.select_next().map(|m| m.start), Some(1));
        assert_eq!(session.select_prev().map(|m| m.start), Some(6));
    }

    #[test]
    fn empty_session() {
        let mut session = FindSession::new(Vec::new());
        assert_eq!(session.status_label(), "No results");
        assert!(session.select_next().is_none());
        assert!(session.select_prev().is_none());
        assert!(session.replace_active("abc", "x").is_none());
    }

    #[test]
    fn replace_active_then_all() {
        let text = "Greeter(\"World\");\nGreeter(\"Universe\");";
        let matches = find_or_empty("Greeter", CASE_SENSITIVE, PanelId::nil(), text);
        let session = FindSession::new(matches.clone());

        let once = session.replace_active(text, "Welcome").unwrap();
        assert_eq!(once, "Welcome(\"World\");\nGreeter(\"Universe\");");

        let all = replace_all(text, &matches, "Welcome");
        assert!(!all.contains("Greeter"));
        assert_eq!(all, "Welcome(\"World\");\nWelcome(\"Universe\");");
    }

    #[test]
    fn replace_rejects_stale_offsets() {
        let m = Match {
            panel: PanelId::nil(),
            start: 2,
            end: 10,
        };
        assert!(replace_match("abc", &m, "x").is_none());
        assert_eq!(replace_all("abc", &[m], "x"), "abc");
    }

    #[test]
    fn replace_all_skips_overlaps() {
        let at = |start, end| Match {
            panel: PanelId::nil(),
            start,
            end,
        };
        assert_eq!(replace_all("abcdef", &[at(0, 3), at(2, 4)], "X"), "abXef");
    }
}
