//! API client for the issue portal backend.

mod error;
mod types;

pub use error::*;
pub use types::*;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Client for the portal's REST API. All calls carry the bearer token when one is configured.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// List every issue, in server order.
    pub async fn list_issues(&self) -> ApiResult<Vec<Issue>> {
        let url = format!("{}/api/v1/all-issues", self.base_url);
        debug!(%url, "Listing issues");
        let response = self.authorized(self.client.get(&url)).send().await?;
        let body: ListIssuesResponse = check(response).await?.json().await?;
        Ok(body.into_issues())
    }

    /// Ask the backend to move an issue to a new status.
    pub async fn update_status(&self, id: &str, status: Status) -> ApiResult<()> {
        let url = format!("{}/api/v1/admin/issue/{}/status", self.base_url, id);
        debug!(%url, %status, "Updating issue status");
        let request = self
            .client
            .put(&url)
            .json(&StatusUpdateRequest { status });
        let response = self.authorized(request).send().await?;
        check(response).await?;
        Ok(())
    }

    /// Delete an issue.
    pub async fn delete_issue(&self, id: &str) -> ApiResult<()> {
        let url = format!("{}/api/v1/issue/admin/{}", self.base_url, id);
        debug!(%url, "Deleting issue");
        let response = self.authorized(self.client.delete(&url)).send().await?;
        check(response).await?;
        Ok(())
    }

    /// Submit a citizen report as a multipart form.
    pub async fn create_issue(&self, issue: &NewIssue) -> ApiResult<CreateIssueResponse> {
        if self.token.is_none() {
            return Err(ApiError::NotLoggedIn);
        }

        let url = format!("{}/api/v1/citizen/create-issue", self.base_url);
        let mut form = Form::new()
            .text("title", issue.title.clone())
            .text("description", issue.description.clone())
            .text("issueType", issue.issue_type.clone())
            .text("location", serde_json::to_string(&issue.location)?);

        if let Some(path) = &issue.attachment {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            form = form.part("files", Part::bytes(bytes).file_name(file_name));
        }

        debug!(%url, title = %issue.title, "Creating issue");
        let response = self.authorized(self.client.post(&url)).multipart(form).send().await?;
        let text = check(response).await?.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }
}

/// Map a non-2xx response onto the error taxonomy.
async fn check(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);

    Err(match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    })
}
