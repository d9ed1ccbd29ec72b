//! Upstream payload shapes.
//!
//! - `commit`: Commit, CommitActor as returned by the GitHub commits API

pub mod commit;

pub use commit::*;
