use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::error::Result;
use crate::resolver::{ContributorQuery, SharedResolver};

pub fn routes(resolver: SharedResolver) -> Router {
    Router::new()
        .route("/api/v1/{owner}/{repo}/contributors", get(get_contributors))
        .with_state(resolver)
}

async fn get_contributors(
    State(resolver): State<SharedResolver>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Response> {
    let outcome = resolver.contributors(ContributorQuery { owner, repo }).await?;

    Ok(match outcome {
        Ok(logins) => (StatusCode::OK, Json(logins)).into_response(),
        Err(failure) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": failure.to_string() }))).into_response()
        }
    })
}
