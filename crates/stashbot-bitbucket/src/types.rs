//! Bitbucket Server API wire types.
//!
//! These types model only the subset of the REST v1.0 payloads that the
//! client consumes; unknown server fields are ignored on deserialization.

use serde::{Deserialize, Serialize};

// =============================================================================
// Responses
// =============================================================================

/// One page of the pull-request list endpoint.
///
/// Bitbucket pages its list responses; only the page the server returned is
/// represented here (the client never follows `nextPageStart`).
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPage {
    #[serde(default)]
    pub values: Vec<PullRequest>,
}

/// A pull request as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: u64,
    pub from_ref: Ref,
    pub author: Participant,
    #[serde(default)]
    pub reviewers: Vec<Participant>,
}

/// A branch reference on a pull request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ref {
    pub display_id: String,
}

/// An author or reviewer entry wrapping the underlying user.
#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    pub user: UserRef,
}

/// Bitbucket user reference.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub name: String,
}

/// The only field consumed from a comment-creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreated {
    pub id: u64,
}

// =============================================================================
// Request bodies
// =============================================================================

/// Body for creating a pull-request comment.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Body for creating a task anchored to a comment.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub anchor: TaskAnchor,
    pub text: String,
}

/// Task anchor. The anchor type is always the literal `COMMENT`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskAnchor {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl TaskAnchor {
    /// Anchor a task to the given comment.
    pub fn comment(id: u64) -> Self {
        Self {
            id,
            kind: "COMMENT",
        }
    }
}
