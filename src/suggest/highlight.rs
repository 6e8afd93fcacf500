//! Query match highlighting for suggestion names

use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A run of characters that either matched the query or did not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

pub struct MatchHighlighter {
    matcher: SkimMatcherV2,
}

impl fmt::Debug for MatchHighlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchHighlighter").finish_non_exhaustive()
    }
}

impl Default for MatchHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchHighlighter {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Split `name` into matched and unmatched runs for `query`
    ///
    /// Names the query does not match come back as a single unmatched run.
    pub fn segments(&self, name: &str, query: &str) -> Vec<Segment> {
        let query = query.trim();
        if name.is_empty() {
            return Vec::new();
        }

        let indices = if query.is_empty() {
            Vec::new()
        } else {
            self.matcher
                .fuzzy_indices(name, query)
                .map(|(_, indices)| indices)
                .unwrap_or_default()
        };

        let mut segments: Vec<Segment> = Vec::new();
        let mut next_match = indices.iter().peekable();

        for (i, ch) in name.chars().enumerate() {
            let matched = next_match.next_if(|&&idx| idx == i).is_some();
            match segments.last_mut() {
                Some(last) if last.matched == matched => last.text.push(ch),
                _ => segments.push(Segment {
                    text: ch.to_string(),
                    matched,
                }),
            }
        }

        segments
    }
}
