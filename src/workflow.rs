//! Administrator status changes and deletion.
//!
//! Any status may be set from any other. The local collection only changes after the
//! backend acknowledges a change; failures are returned to the caller untouched.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, ApiResult, Issue, Status};

/// Backend operations the workflow needs.
#[async_trait]
pub trait IssueBackend: Send + Sync {
    async fn update_status(&self, id: &str, status: Status) -> ApiResult<()>;
    async fn delete_issue(&self, id: &str) -> ApiResult<()>;
}

#[async_trait]
impl IssueBackend for ApiClient {
    async fn update_status(&self, id: &str, status: Status) -> ApiResult<()> {
        ApiClient::update_status(self, id, status).await
    }

    async fn delete_issue(&self, id: &str) -> ApiResult<()> {
        ApiClient::delete_issue(self, id).await
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("issue {0} is not in the current list")]
    UnknownIssue(String),
}

/// Answer to the "delete this issue?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Confirmation was declined; nothing was sent
    Cancelled,
}

/// Presentation category for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Neutral,
    Warning,
    Info,
    Success,
    Danger,
}

impl Status {
    /// Fixed one-to-one mapping used for badges and colours.
    pub fn tone(self) -> StatusTone {
        match self {
            Status::Reported => StatusTone::Neutral,
            Status::Pending => StatusTone::Warning,
            Status::InProgress => StatusTone::Info,
            Status::Resolved => StatusTone::Success,
            Status::Rejected => StatusTone::Danger,
        }
    }
}

pub struct StatusWorkflow<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: IssueBackend + ?Sized> StatusWorkflow<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Send one status update; on success the matching local issue is updated in place.
    pub async fn apply_status(
        &self,
        issues: &mut [Issue],
        id: &str,
        status: Status,
    ) -> Result<(), WorkflowError> {
        let Some(index) = issues.iter().position(|issue| issue.id == id) else {
            return Err(WorkflowError::UnknownIssue(id.to_string()));
        };

        if let Err(e) = self.backend.update_status(id, status).await {
            warn!(%id, %status, %e, "Status update failed");
            return Err(e.into());
        }

        info!(%id, %status, "Status updated");
        issues[index].status = status;
        Ok(())
    }

    /// Delete an issue once the user has confirmed; the local copy goes only after the
    /// backend acknowledges.
    pub async fn delete_issue(
        &self,
        issues: &mut Vec<Issue>,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, WorkflowError> {
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }
        if !issues.iter().any(|issue| issue.id == id) {
            return Err(WorkflowError::UnknownIssue(id.to_string()));
        }

        if let Err(e) = self.backend.delete_issue(id).await {
            warn!(%id, %e, "Delete failed");
            return Err(e.into());
        }

        info!(%id, "Issue deleted");
        issues.retain(|issue| issue.id != id);
        Ok(DeleteOutcome::Deleted)
    }
}
