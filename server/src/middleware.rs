//! Path normalization ahead of routing.

use axum::extract::Request;
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Redirects any path ending in `/` (other than the root itself) to the
/// fully trimmed path with a 308, keeping the query string intact.
pub async fn trim_trailing_slash(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if path != "/" && path.ends_with('/') {
        return Redirect::permanent(&trimmed(req.uri())).into_response();
    }
    next.run(req).await
}

fn trimmed(uri: &Uri) -> String {
    let path = uri.path().trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };
    match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}
