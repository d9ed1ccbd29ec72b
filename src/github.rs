//! GitHub-backed implementation of the contributor resolver.
//!
//! Queries the commits API (`/repos/{owner}/{repo}/commits?per_page=100`,
//! first page only, no retries) and derives the distinct contributor logins
//! from the author and committer of each commit.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::models::Commit;
use crate::resolver::{ContributorQuery, ContributorResolver, Failure, Outcome};

/// GitHub rejects requests without a User-Agent.
pub const USER_AGENT: &str = concat!("gh-contributors/", env!("CARGO_PKG_VERSION"));

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const COMMITS_PER_PAGE: &str = "100";

pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    /// Build a client with the default headers GitHub expects. The token, if
    /// given, is sent as a bearer Authorization header on every request.
    pub fn new(base_url: impl Into<String>, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AppError::InvalidArgument(format!("API token: {e}")))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ContributorResolver for GithubClient {
    async fn contributors(&self, query: ContributorQuery) -> Result<Outcome> {
        if query.owner.is_empty() {
            return Ok(Err(Failure::OwnerRequired));
        }
        if query.repo.is_empty() {
            return Ok(Err(Failure::RepositoryRequired));
        }

        let url = format!("{}/repos/{}/{}/commits", self.base_url, query.owner, query.repo);
        info!(%url, "fetching commits from GitHub");

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", COMMITS_PER_PAGE)])
            .send()
            .await?;

        let status = response.status();
        info!(%status, %url, "received response from GitHub");

        if status == StatusCode::NOT_FOUND {
            warn!(owner = %query.owner, repo = %query.repo, "repository not found upstream");
            return Ok(Err(Failure::RepositoryNotFound {
                owner: query.owner,
                repo: query.repo,
            }));
        }

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_else(|| status.as_str());
            warn!(%status, "commits request failed upstream");
            return Ok(Err(Failure::UpstreamStatus(reason.to_string())));
        }

        let body = response.text().await?;
        if body.is_empty() {
            warn!(owner = %query.owner, repo = %query.repo, "empty commits response");
            return Ok(Err(Failure::NoCommits));
        }

        let commits: Vec<Commit> = match serde_json::from_str(&body) {
            Ok(commits) => commits,
            Err(e) => {
                error!(error = %e, owner = %query.owner, repo = %query.repo, "failed to deserialise commits response");
                return Ok(Err(Failure::Deserialise(e.to_string())));
            }
        };

        if commits.is_empty() {
            warn!(owner = %query.owner, repo = %query.repo, "no commits in response");
            return Ok(Err(Failure::NoCommits));
        }

        let contributors = distinct_logins(&commits);
        info!(count = contributors.len(), "found distinct contributors");
        Ok(Ok(contributors))
    }
}

/// Collect author and committer logins in first-seen order, skipping commits
/// with no linked account and empty login strings.
fn distinct_logins(commits: &[Commit]) -> Vec<String> {
    let mut logins: Vec<String> = Vec::new();

    for commit in commits {
        for actor in [commit.author.as_ref(), commit.committer.as_ref()] {
            if let Some(login) = actor.and_then(|a| a.login.as_deref()) {
                if !login.is_empty() && !logins.iter().any(|l| l == login) {
                    logins.push(login.to_string());
                }
            }
        }
    }

    logins
}
