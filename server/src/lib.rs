//! REST API for a todo-list application: lists and the entries that
//! belong to them, CRUD against a pluggable document store.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod store;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::store::Db;

/// Builds the full router over the given store handle. CORS is outermost
/// so even the slash-trim redirects carry its headers.
pub fn app(db: Db) -> Router {
    Router::new()
        .merge(routes::lists::router())
        .merge(routes::entries::router())
        .layer(axum::middleware::from_fn(middleware::trim_trailing_slash))
        .layer(CorsLayer::permissive())
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db)).await
}
