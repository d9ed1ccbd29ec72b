//! The contributor-resolution seam between the HTTP layer and GitHub.
//!
//! Handlers depend on the `ContributorResolver` trait rather than on the
//! concrete GitHub client, so tests can swap in a stub. The resolver reports
//! ordinary failures (unknown repository, empty history, bad payload) as
//! `Failure` values inside `Outcome`; only faults outside that taxonomy
//! (transport errors) travel through the outer `AppError` channel.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::Result;

/// Owner/repo pair extracted from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorQuery {
    pub owner: String,
    pub repo: String,
}

/// Ordinary, user-visible failure modes of contributor resolution.
///
/// The `Display` strings are the messages returned to API callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error("Owner is required")]
    OwnerRequired,

    #[error("Repository is required")]
    RepositoryRequired,

    #[error("Repository '{owner}/{repo}' not found")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("Error fetching contributors: {0}")]
    UpstreamStatus(String),

    #[error("No commits found")]
    NoCommits,

    #[error("Error deserialising response: {0}")]
    Deserialise(String),
}

/// Distinct contributor logins on success, a `Failure` otherwise.
pub type Outcome = std::result::Result<Vec<String>, Failure>;

#[async_trait]
pub trait ContributorResolver: Send + Sync {
    async fn contributors(&self, query: ContributorQuery) -> Result<Outcome>;
}

pub type SharedResolver = Arc<dyn ContributorResolver>;
