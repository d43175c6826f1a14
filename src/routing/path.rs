//! Path normalization shared by route patterns and request paths.
//!
//! # Responsibilities
//! - Collapse repeated slashes, `.` and `..` elements
//! - Force a leading slash
//! - Keep a single trailing slash as information for the matcher
//!
//! # Design Decisions
//! - `..` never climbs above the root
//! - Request paths are percent-decoded before cleaning

use std::borrow::Cow;

/// Clean a slash-separated path the way a filesystem path cleaner would,
/// keeping one trailing slash if the input had one.
///
/// ```
/// use tiny_router::routing::path::clean_path;
///
/// assert_eq!(clean_path("articles"), "/articles");
/// assert_eq!(clean_path("/a//b/./c/../d/"), "/a/b/d/");
/// ```
pub fn clean_path(p: &str) -> String {
    if p.is_empty() {
        return "/".to_string();
    }

    let mut stack: Vec<&str> = Vec::new();
    for element in p.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    let mut cleaned = String::with_capacity(p.len() + 1);
    cleaned.push('/');
    cleaned.push_str(&stack.join("/"));

    if p.ends_with('/') && cleaned != "/" {
        cleaned.push('/');
    }
    cleaned
}

/// Percent-encode each segment of a decoded path, keeping the slashes.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment))
        .collect::<Vec<_>>()
        .join("/")
}

/// A request path prepared for matching.
///
/// Built once per request and then matched against every candidate route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    /// Cleaned path with the trailing slash removed (root stays `/`).
    stripped: String,
    /// Whether a trailing slash was removed.
    trailing_slash: bool,
}

impl RequestPath {
    /// Decode, clean and strip a raw request path.
    pub fn new(raw: &str) -> Self {
        let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
        let cleaned = clean_path(&decoded);

        if cleaned.len() > 1 && cleaned.ends_with('/') {
            Self {
                stripped: cleaned[..cleaned.len() - 1].to_string(),
                trailing_slash: true,
            }
        } else {
            Self {
                stripped: cleaned,
                trailing_slash: false,
            }
        }
    }

    /// The cleaned path without its trailing slash.
    pub fn as_str(&self) -> &str {
        &self.stripped
    }

    /// Whether the original path ended with a slash.
    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Path segments after the leading slash. The root path has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.stripped[1..].split('/').filter(|s| !s.is_empty())
    }

    /// The path rendered with or without a trailing slash.
    pub fn with_trailing_slash(&self, slash: bool) -> String {
        if slash && self.stripped != "/" {
            format!("{}/", self.stripped)
        } else {
            self.stripped.clone()
        }
    }
}
