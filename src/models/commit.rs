use serde::Deserialize;

/// One element of the GitHub commits listing. Only the fields the service
/// reads are modelled; the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct Commit {
    pub author: Option<CommitActor>,
    pub committer: Option<CommitActor>,
}

/// GitHub account attached to a commit. Absent for commits whose author or
/// committer email is not linked to an account.
#[derive(Debug, Deserialize)]
pub struct CommitActor {
    pub login: Option<String>,
}
