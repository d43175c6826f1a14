//! Responses the router produces on its own.
//!
//! # Responsibilities
//! - 404 when no route matches
//! - 405 with an `Allow` header when only the method differs
//! - 303 redirect for trailing-slash-only matches
//!
//! # Design Decisions
//! - Plain-text bodies, `nosniff` like any error page
//! - `Allow` preserves the order routes were registered in

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

pub const NOT_FOUND_BODY: &str = "404 page not found\n";
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed\n";

const NOSNIFF: (header::HeaderName, HeaderValue) = (
    header::X_CONTENT_TYPE_OPTIONS,
    HeaderValue::from_static("nosniff"),
);

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, [NOSNIFF], NOT_FOUND_BODY).into_response()
}

pub fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut res = (StatusCode::METHOD_NOT_ALLOWED, [NOSNIFF], METHOD_NOT_ALLOWED_BODY).into_response();
    if let Ok(value) = HeaderValue::from_str(&allow) {
        res.headers_mut().insert(header::ALLOW, value);
    }
    res
}

/// 303 See Other pointing at `location`. `location` must already be
/// percent-encoded.
pub fn see_other(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::warn!(location = %location, "Redirect target is not a valid header value");
            not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let res = not_found();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[test]
    fn test_allow_header() {
        let res = method_not_allowed(&[Method::GET, Method::PUT]);
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[header::ALLOW], "GET, PUT");
    }

    #[test]
    fn test_see_other() {
        let res = see_other("/articles?page=2");
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/articles?page=2");
    }
}
