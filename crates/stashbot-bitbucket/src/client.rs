//! Bitbucket Server API client implementation.

use std::collections::HashMap;

use stashbot_core::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse, Result};
use tracing::debug;

use crate::types::{
    CommentCreated, CreateCommentRequest, CreateTaskRequest, PullRequestPage, TaskAnchor,
};
use crate::API_PREFIX;

/// Bitbucket Server API client.
///
/// Holds only its construction-time configuration; no state is carried
/// across calls, so sharing one instance between tasks is safe.
pub struct BitbucketClient<E> {
    executor: E,
    base_url: String,
    token: String,
}

impl<E: HttpExecutor> BitbucketClient<E> {
    /// Create a new client for the given server URL and bearer token.
    pub fn new(executor: E, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            executor,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Get the REST v1.0 URL for a given endpoint.
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, endpoint)
    }

    /// Build and execute a request against the REST API.
    ///
    /// Attaches the bearer token on every call; a JSON body is attached
    /// only when one is supplied, so GET requests go out body-less.
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(method, self.api_url(endpoint))
            .header("Authorization", format!("Bearer {}", self.token));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.executor.execute(request).await
    }

    /// Fetch the first page of pull requests for a repository.
    async fn list_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<PullRequestPage> {
        let endpoint = format!(
            "/projects/{}/repos/{}/pull-requests",
            project_key, repository_slug
        );
        let response = self.request(HttpMethod::Get, &endpoint, None).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Find the id of the first pull request whose source branch matches
    /// `branch_name`, or `None` when no pull request matches.
    ///
    /// Only the first page returned by the server is scanned; paging is
    /// not followed.
    pub async fn find_pull_request_id_by_branch(
        &self,
        branch_name: &str,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<u64>> {
        debug!(branch = branch_name, "Searching pull request by source branch");

        let page = self.list_pull_requests(project_key, repository_slug).await?;
        Ok(page
            .values
            .iter()
            .find(|pr| pr.from_ref.display_id == branch_name)
            .map(|pr| pr.id))
    }

    /// Map pull-request ids to source branch names for every open pull
    /// request whose author, or at least one reviewer, is in
    /// `user_whitelist`.
    ///
    /// An empty whitelist yields an empty map. Only the first page
    /// returned by the server is scanned; paging is not followed.
    pub async fn find_branches_with_open_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
        user_whitelist: &[String],
    ) -> Result<HashMap<u64, String>> {
        let page = self.list_pull_requests(project_key, repository_slug).await?;

        let mut branches = HashMap::new();
        for pull_request in &page.values {
            let is_reviewer = pull_request
                .reviewers
                .iter()
                .any(|reviewer| user_whitelist.contains(&reviewer.user.name));

            if !is_reviewer && !user_whitelist.contains(&pull_request.author.user.name) {
                continue;
            }

            branches.insert(
                pull_request.id,
                pull_request.from_ref.display_id.clone(),
            );
        }
        Ok(branches)
    }

    /// Post a comment on a pull request and return the new comment id.
    pub async fn create_comment(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        message: &str,
    ) -> Result<u64> {
        let endpoint = format!(
            "/projects/{}/repos/{}/pull-requests/{}/comments",
            project_key, repository_slug, pull_request_id
        );
        let body = serde_json::to_value(CreateCommentRequest {
            text: message.to_string(),
        })?;

        let response = self.request(HttpMethod::Post, &endpoint, Some(body)).await?;
        let created: CommentCreated = serde_json::from_str(&response.body)?;
        Ok(created.id)
    }

    /// Create a review task anchored to an existing comment.
    ///
    /// The response body is not inspected; a successful call is the only
    /// outcome of interest.
    pub async fn create_task_for_comment(&self, comment_id: u64, message: &str) -> Result<()> {
        let body = serde_json::to_value(CreateTaskRequest {
            anchor: TaskAnchor::comment(comment_id),
            text: message.to_string(),
        })?;

        self.request(HttpMethod::Post, "/tasks", Some(body)).await?;
        Ok(())
    }
}
