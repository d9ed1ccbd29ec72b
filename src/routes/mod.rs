//! API route handlers.
//!
//! - `contributors`: distinct contributor logins for a repository
//!   (GET /api/v1/{owner}/{repo}/contributors)
//!
//! Requests that match no route fall through to `unknown_route` and surface
//! as 404 through the error boundary.

pub mod contributors;

use axum::http::Uri;
use axum::Router;

use crate::error::AppError;
use crate::resolver::SharedResolver;

pub fn create_router(resolver: SharedResolver) -> Router {
    Router::new()
        .merge(contributors::routes(resolver))
        .fallback(unknown_route)
}

async fn unknown_route(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
