//! Pattern matching logic.
//!
//! # Responsibilities
//! - Match pattern segments against request path segments
//! - Capture `:name` and `*name` values into fresh [`Params`]
//! - Tell a trailing-slash-only mismatch apart from a real match
//!
//! # Design Decisions
//! - Literal matching is case-sensitive
//! - No regex, one pass over the segments
//! - Pure: no state survives a call

use crate::routing::params::Params;
use crate::routing::path::RequestPath;
use crate::routing::pattern::{Pattern, Segment};

/// Result of matching one pattern against one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    NoMatch,
    /// The path matches except for its trailing slash.
    TrailingSlash {
        /// The request path rewritten to the pattern's slash form.
        redirect_to: String,
    },
    Matched(Params),
}

impl PathMatch {
    /// True for both a full match and a trailing-slash-only match.
    pub fn is_structural(&self) -> bool {
        !matches!(self, PathMatch::NoMatch)
    }
}

/// Match `path` against `pattern`.
pub fn match_path(pattern: &Pattern, path: &RequestPath) -> PathMatch {
    let mut params = Params::new();
    let mut remaining = path.segments();

    for segment in pattern.segments() {
        match segment {
            Segment::Literal(literal) => match remaining.next() {
                Some(s) if s == literal => {}
                _ => return PathMatch::NoMatch,
            },
            Segment::Capture(name) => match remaining.next() {
                Some(s) => params.push(name.as_str(), s),
                None => return PathMatch::NoMatch,
            },
            Segment::CatchAll(name) => {
                let rest = remaining.by_ref().collect::<Vec<_>>().join("/");
                params.push(name.as_str(), rest);
            }
        }
    }

    if remaining.next().is_some() {
        return PathMatch::NoMatch;
    }

    if path.has_trailing_slash() == pattern.has_trailing_slash() {
        PathMatch::Matched(params)
    } else {
        PathMatch::TrailingSlash {
            redirect_to: path.with_trailing_slash(pattern.has_trailing_slash()),
        }
    }
}

impl Pattern {
    /// Shorthand for [`match_path`].
    pub fn matches(&self, path: &RequestPath) -> PathMatch {
        match_path(self, path)
    }
}
