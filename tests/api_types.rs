//! Tests for API type deserialization.
//!
//! These tests ensure our Rust types correctly deserialize the JSON
//! returned by the portal backend.

use civic_tui::api::{IssueType, ListIssuesResponse, Location, Status, StatusUpdateRequest};
use pretty_assertions::assert_eq;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}.json", name))
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

#[test]
fn test_list_issues_null_is_empty() {
    let json = load_fixture("list_issues_empty");
    let response: ListIssuesResponse =
        serde_json::from_str(&json).expect("Failed to deserialize empty list response");

    assert!(response.into_issues().is_empty());
}

#[test]
fn test_list_issues_missing_key_is_empty() {
    let response: ListIssuesResponse = serde_json::from_str("{}").unwrap();
    assert!(response.into_issues().is_empty());
}

#[test]
fn test_list_issues() {
    let json = load_fixture("list_issues");
    let response: ListIssuesResponse =
        serde_json::from_str(&json).expect("Failed to deserialize list response");
    let issues = response.into_issues();

    assert_eq!(issues.len(), 3);

    let issue = &issues[0];
    assert_eq!(issue.id, "65f1a2b3c4d5e6f7a8b9c0d1");
    assert_eq!(issue.title, "Pothole near bus stand");
    assert_eq!(issue.kind(), IssueType::RoadInfrastructure);
    assert_eq!(issue.status, Status::InProgress);
    assert_eq!(issue.location.address, "Bus Stand Road, Amravati, Maharashtra");
    assert_eq!(issue.reported_by, "65f0000000000000000000aa");
    assert!(issue.reported_at.is_some());
    assert!(issue.image.is_some());
}

#[test]
fn test_plain_id_alias() {
    let issues: Vec<_> = serde_json::from_str::<ListIssuesResponse>(&load_fixture("list_issues"))
        .unwrap()
        .into_issues();

    assert_eq!(issues[1].id, "65f1a2b3c4d5e6f7a8b9c0d2");
    assert_eq!(issues[1].issue_type, "Other – Market waste");
    assert_eq!(issues[1].kind(), IssueType::Other);
    assert_eq!(issues[1].image, None);
}

#[test]
fn test_unknown_status_and_missing_fields() {
    let issues = serde_json::from_str::<ListIssuesResponse>(&load_fixture("list_issues"))
        .unwrap()
        .into_issues();
    let issue = &issues[2];

    assert_eq!(issue.status, Status::Reported);
    assert_eq!(issue.location.address, "");
    assert_eq!(issue.reported_at, None);
}

#[test]
fn test_non_iso_reported_at_keeps_the_list() {
    let json = load_fixture("list_issues_local_dates");
    let issues = serde_json::from_str::<ListIssuesResponse>(&json)
        .expect("Failed to deserialize list with local date strings")
        .into_issues();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].reported_at.as_deref(), Some("5/3/2024, 10:15:00 AM"));
    assert_eq!(issues[1].reported_at.as_deref(), Some("2024-03-07T09:00:00Z"));
}

#[test]
fn test_status_serializes_to_wire_label() {
    let body = serde_json::to_value(StatusUpdateRequest {
        status: Status::InProgress,
    })
    .unwrap();
    assert_eq!(body, serde_json::json!({ "status": "In Progress" }));
}

#[test]
fn test_location_serializes_for_multipart() {
    let location = Location {
        latitude: 20.5,
        longitude: 77.25,
        address: "Camp Road".to_string(),
    };
    let json: serde_json::Value = serde_json::to_value(&location).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "latitude": 20.5, "longitude": 77.25, "address": "Camp Road" })
    );
}
