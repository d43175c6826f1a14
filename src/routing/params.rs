//! Captured path parameters.
//!
//! A fresh [`Params`] is built for every matched request and stored in that
//! request's extensions. Nothing about it outlives the request.

use axum::http::Request;

/// Parameters captured from the request path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value captured for `name`, if the matched pattern declares it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Parameter access on a dispatched request.
pub trait RequestParamsExt {
    /// All captured parameters, if the request went through a router.
    fn params(&self) -> Option<&Params>;

    /// Captured value for `name`, or `""` when absent.
    fn param(&self, name: &str) -> &str {
        self.params().and_then(|p| p.get(name)).unwrap_or("")
    }
}

impl<B> RequestParamsExt for Request<B> {
    fn params(&self) -> Option<&Params> {
        self.extensions().get::<Params>()
    }
}
