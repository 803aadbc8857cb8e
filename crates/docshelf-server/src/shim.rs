//! Search-URL redirect shim.
//!
//! The documentation trees are generated by a search-enabled doc generator
//! whose search feature loads `search.html` with a `q` query parameter. The
//! hosting edge network strips the `.html` suffix from such requests, so
//! `/documentation/.../search?q=term` misses the static asset. This shim
//! detects that pattern and redirects back to the correct HTML file.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::server::ServerState;

/// Middleware that repairs suffix-stripped documentation search requests.
///
/// Anything that does not match the malformed-search pattern passes through
/// to normal routing untouched.
pub async fn search_redirect(
    State(state): State<Arc<ServerState>>,
    req: Request,
    next: Next,
) -> Response {
    let uri = req.uri();

    if let Some(target) = rewrite_target(uri.path(), uri.query(), &state.config.docs_prefix) {
        tracing::debug!("Redirecting search request to {}", target);
        return (StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, target)]).into_response();
    }

    next.run(req).await
}

/// Classify a request, returning the corrected URL if it needs the rewrite.
///
/// A request is rewritten only when all three hold: the path is under
/// `docs_prefix`, the query string carries a `q` parameter, and the path does
/// not already end in `.html`. The query string is preserved verbatim.
pub fn rewrite_target(path: &str, query: Option<&str>, docs_prefix: &str) -> Option<String> {
    let prefix = docs_prefix.trim_end_matches('/');

    if !path.starts_with(prefix) || !path[prefix.len()..].starts_with('/') {
        return None;
    }

    // Never double-suffix an already-correct request
    if path.ends_with(".html") {
        return None;
    }

    let query = query?;
    if !has_query_param(query, "q") {
        return None;
    }

    Some(format!("{}.html?{}", path, query))
}

/// Check whether a raw query string contains the named parameter.
fn has_query_param(query: &str, name: &str) -> bool {
    query
        .split('&')
        .any(|pair| pair.split('=').next() == Some(name))
}
