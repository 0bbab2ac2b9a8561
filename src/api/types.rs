//! API types matching the portal's REST contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Status
// =============================================================================

/// Lifecycle state of an issue. Owned by the backend; the client only proposes changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Status {
    #[default]
    Reported,
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl Status {
    /// Every status, in the order the filter menu lists them.
    pub const ALL: [Status; 5] = [
        Status::Resolved,
        Status::InProgress,
        Status::Pending,
        Status::Rejected,
        Status::Reported,
    ];

    /// Statuses an administrator can pick from the update menu.
    pub const ADMIN_CHOICES: [Status; 4] = [
        Status::Resolved,
        Status::InProgress,
        Status::Rejected,
        Status::Pending,
    ];

    /// Wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Reported => "Reported",
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
            Status::Rejected => "Rejected",
        }
    }

    /// Parse a wire label. Unrecognized labels are treated as `Reported`.
    pub fn parse(label: &str) -> Self {
        match label {
            "Pending" => Status::Pending,
            "In Progress" => Status::InProgress,
            "Resolved" => Status::Resolved,
            "Rejected" => Status::Rejected,
            _ => Status::Reported,
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        Status::parse(&label)
    }
}

impl From<Status> for &'static str {
    fn from(status: Status) -> Self {
        status.as_str()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Issue type
// =============================================================================

/// Category a citizen picks when reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    RoadInfrastructure,
    WasteManagement,
    EnvironmentalIssues,
    UtilitiesInfrastructure,
    PublicSafety,
    Other,
}

impl IssueType {
    pub const ALL: [IssueType; 6] = [
        IssueType::RoadInfrastructure,
        IssueType::WasteManagement,
        IssueType::EnvironmentalIssues,
        IssueType::UtilitiesInfrastructure,
        IssueType::PublicSafety,
        IssueType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IssueType::RoadInfrastructure => "Road Infrastructure",
            IssueType::WasteManagement => "Waste Management",
            IssueType::EnvironmentalIssues => "Environmental Issues",
            IssueType::UtilitiesInfrastructure => "Utilities & Infrastructure",
            IssueType::PublicSafety => "Public Safety",
            IssueType::Other => "Other",
        }
    }

    /// Classify a wire label. Custom "Other – ..." labels and unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .unwrap_or(IssueType::Other)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Issues
// =============================================================================

/// A point on the map with its human-readable address.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Raw type label as stored by the backend (may carry a custom "Other" description).
    #[serde(rename = "type", default)]
    pub issue_type: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub reported_by: String,
    /// Timestamp as sent; usually RFC 3339 but not guaranteed
    #[serde(default)]
    pub reported_at: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Status,
}

impl Issue {
    pub fn kind(&self) -> IssueType {
        IssueType::from_label(&self.issue_type)
    }
}

// =============================================================================
// Requests / responses
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ListIssuesResponse {
    #[serde(default)]
    pub issues: Option<Vec<Issue>>,
}

impl ListIssuesResponse {
    /// Issues in server order; a missing or null list is empty.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateRequest {
    pub status: Status,
}

/// Error payload returned by the backend on rejected requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIssueResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub issue: Option<Issue>,
}

/// A validated citizen report, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    /// Final type label, e.g. "Public Safety" or "Other – Graffiti".
    pub issue_type: String,
    pub location: Location,
    pub attachment: Option<PathBuf>,
}
