//! Route pattern grammar.
//!
//! ```text
//! /articles/:id        literal + single-segment capture
//! /static/*filepath    literal + catch-all (must be last)
//! /users/              trailing slash is significant
//! ```

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::routing::path::clean_path;

/// Reasons a route pattern is rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty route pattern")]
    Empty,

    #[error("pattern {pattern:?}: wildcard marker without a name")]
    UnnamedWildcard { pattern: String },

    #[error("pattern {pattern:?}: catch-all `*{name}` must be the final segment")]
    CatchAllNotLast { pattern: String, name: String },

    #[error("pattern {pattern:?}: `:` and `*` may only begin a segment")]
    MisplacedMarker { pattern: String },

    #[error("pattern {pattern:?}: capture name `{name}` is used more than once")]
    DuplicateCapture { pattern: String, name: String },
}

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// `:name`, matches exactly one path segment.
    Capture(String),
    /// `*name`, matches the rest of the path.
    CatchAll(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => f.write_str(s),
            Segment::Capture(name) => write!(f, ":{}", name),
            Segment::CatchAll(name) => write!(f, "*{}", name),
        }
    }
}

/// A parsed, normalized route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    normalized: String,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl Pattern {
    /// Parse and validate a raw pattern.
    ///
    /// A missing leading slash is added and `//`, `.` and `..` are cleaned
    /// away. A trailing slash is kept.
    ///
    /// ```
    /// use tiny_router::routing::pattern::{Pattern, Segment};
    ///
    /// let pattern = Pattern::parse("articles/:id").unwrap();
    /// assert_eq!(pattern.as_str(), "/articles/:id");
    /// assert_eq!(pattern.segments()[1], Segment::Capture("id".into()));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        validate_raw(raw)?;

        let cleaned = clean_path(raw);
        let trailing_slash = cleaned.len() > 1 && cleaned.ends_with('/');

        let mut segments = Vec::new();
        for piece in cleaned.split('/').filter(|s| !s.is_empty()) {
            segments.push(parse_segment(piece, &cleaned)?);
        }

        Self::from_parts(segments, trailing_slash)
    }

    /// Mount `child` under `prefix`.
    ///
    /// The trailing slash of the result follows the child, so mounting `/`
    /// yields the bare prefix.
    pub fn join(prefix: &Pattern, child: &Pattern) -> Result<Self, PatternError> {
        let segments = prefix
            .segments
            .iter()
            .chain(child.segments.iter())
            .cloned()
            .collect::<Vec<_>>();

        Self::from_parts(segments, child.trailing_slash)
    }

    fn from_parts(segments: Vec<Segment>, trailing_slash: bool) -> Result<Self, PatternError> {
        let trailing_slash = trailing_slash && !segments.is_empty();
        let normalized = render(&segments, trailing_slash);

        let mut seen = HashSet::new();
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Literal(_) => {}
                Segment::Capture(name) | Segment::CatchAll(name) => {
                    if !seen.insert(name.as_str()) {
                        return Err(PatternError::DuplicateCapture {
                            pattern: normalized,
                            name: name.clone(),
                        });
                    }
                }
            }

            if let Segment::CatchAll(name) = segment {
                if i + 1 != segments.len() || trailing_slash {
                    return Err(PatternError::CatchAllNotLast {
                        pattern: normalized,
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            normalized,
            segments,
            trailing_slash,
        })
    }

    /// Normalized textual form, e.g. `/articles/:id`.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Names of all captures, in pattern order.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Capture(name) | Segment::CatchAll(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Check markers, catch-all position and capture names on the pattern as
/// written, before `.` and `..` can remove anything.
fn validate_raw(raw: &str) -> Result<(), PatternError> {
    let pieces = raw.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();
    let mut seen = HashSet::new();

    for (i, piece) in pieces.iter().enumerate() {
        let segment = parse_segment(piece, raw)?;
        if let Segment::Capture(name) | Segment::CatchAll(name) = &segment {
            if !seen.insert(name.clone()) {
                return Err(PatternError::DuplicateCapture {
                    pattern: raw.to_string(),
                    name: name.clone(),
                });
            }
        }
        if let Segment::CatchAll(name) = segment {
            if i + 1 != pieces.len() {
                return Err(PatternError::CatchAllNotLast {
                    pattern: raw.to_string(),
                    name,
                });
            }
        }
    }
    Ok(())
}

fn parse_segment(piece: &str, pattern: &str) -> Result<Segment, PatternError> {
    let mut chars = piece.chars();
    let marker = chars.next();
    let name = chars.as_str();

    match marker {
        Some(':') | Some('*') => {
            if name.is_empty() {
                return Err(PatternError::UnnamedWildcard {
                    pattern: pattern.to_string(),
                });
            }
            if name.contains([':', '*']) {
                return Err(PatternError::MisplacedMarker {
                    pattern: pattern.to_string(),
                });
            }
            if marker == Some(':') {
                Ok(Segment::Capture(name.to_string()))
            } else {
                Ok(Segment::CatchAll(name.to_string()))
            }
        }
        _ if piece.contains([':', '*']) => Err(PatternError::MisplacedMarker {
            pattern: pattern.to_string(),
        }),
        _ => Ok(Segment::Literal(piece.to_string())),
    }
}

fn render(segments: &[Segment], trailing_slash: bool) -> String {
    let mut out = String::from("/");
    let body = segments
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("/");
    out.push_str(&body);
    if trailing_slash {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_and_captures() {
        let pattern = Pattern::parse("/movie/:id/genre/*rest").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("movie".into()),
                Segment::Capture("id".into()),
                Segment::Literal("genre".into()),
                Segment::CatchAll("rest".into()),
            ]
        );
        assert_eq!(pattern.capture_names().collect::<Vec<_>>(), vec!["id", "rest"]);
        assert!(!pattern.has_trailing_slash());
    }

    #[test]
    fn test_normalization() {
        assert_eq!(Pattern::parse("articles").unwrap().as_str(), "/articles");
        assert_eq!(Pattern::parse("/a//b/../c").unwrap().as_str(), "/a/c");

        let slashed = Pattern::parse("/users/").unwrap();
        assert_eq!(slashed.as_str(), "/users/");
        assert!(slashed.has_trailing_slash());

        let root = Pattern::parse("/").unwrap();
        assert_eq!(root.as_str(), "/");
        assert!(root.segments().is_empty());
        assert!(!root.has_trailing_slash());
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(
            Pattern::parse("/articles/:id").unwrap(),
            Pattern::parse("/articles/:id").unwrap()
        );
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        assert_eq!(Pattern::parse(""), Err(PatternError::Empty));

        assert!(matches!(
            Pattern::parse("/articles/:"),
            Err(PatternError::UnnamedWildcard { .. })
        ));
        assert!(matches!(
            Pattern::parse("/articles/:/x"),
            Err(PatternError::UnnamedWildcard { .. })
        ));
        assert!(matches!(
            Pattern::parse("/articles/*/x"),
            Err(PatternError::UnnamedWildcard { .. })
        ));
        assert!(matches!(
            Pattern::parse("/files/*path/edit"),
            Err(PatternError::CatchAllNotLast { .. })
        ));
        assert!(matches!(
            Pattern::parse("/files/*path/"),
            Err(PatternError::CatchAllNotLast { .. })
        ));
        assert!(matches!(
            Pattern::parse("/files/:id*rest"),
            Err(PatternError::MisplacedMarker { .. })
        ));
        assert!(matches!(
            Pattern::parse("/v:version"),
            Err(PatternError::MisplacedMarker { .. })
        ));
        assert_eq!(
            Pattern::parse("/users/:id/posts/:id"),
            Err(PatternError::DuplicateCapture {
                pattern: "/users/:id/posts/:id".into(),
                name: "id".into(),
            })
        );
    }

    #[test]
    fn test_dot_segments_do_not_hide_malformed_markers() {
        assert!(matches!(
            Pattern::parse("/articles/:/.."),
            Err(PatternError::UnnamedWildcard { .. })
        ));
        assert!(matches!(
            Pattern::parse("/files/*/.."),
            Err(PatternError::UnnamedWildcard { .. })
        ));
        assert!(matches!(
            Pattern::parse("/files/*all/x/.."),
            Err(PatternError::CatchAllNotLast { .. })
        ));
        assert!(matches!(
            Pattern::parse("/files/*all/../edit"),
            Err(PatternError::CatchAllNotLast { .. })
        ));
        assert_eq!(
            Pattern::parse("/users/:id/../:id"),
            Err(PatternError::DuplicateCapture {
                pattern: "/users/:id/../:id".into(),
                name: "id".into(),
            })
        );

        assert_eq!(Pattern::parse("/a/:id/../b").unwrap().as_str(), "/a/b");
    }

    #[test]
    fn test_join() {
        let prefix = Pattern::parse("/api/").unwrap();
        let child = Pattern::parse("user/:id").unwrap();
        let joined = Pattern::join(&prefix, &child).unwrap();
        assert_eq!(joined.as_str(), "/api/user/:id");

        let root = Pattern::parse("/").unwrap();
        let mounted = Pattern::join(&Pattern::parse("/articles/:articlesId").unwrap(), &root).unwrap();
        assert_eq!(mounted.as_str(), "/articles/:articlesId");
    }

    #[test]
    fn test_join_revalidates() {
        let prefix = Pattern::parse("/users/:id").unwrap();
        let child = Pattern::parse("/posts/:id").unwrap();
        assert!(matches!(
            Pattern::join(&prefix, &child),
            Err(PatternError::DuplicateCapture { .. })
        ));

        let prefix = Pattern::parse("/files/*path").unwrap();
        let child = Pattern::parse("/edit").unwrap();
        assert!(matches!(
            Pattern::join(&prefix, &child),
            Err(PatternError::CatchAllNotLast { .. })
        ));
    }
}
