//! Domain-client behavior over a scripted transport: local validation keeps
//! bad input off the wire, and typed methods decode real-shaped payloads.

mod common;

use serde_json::json;

use common::{executor, fast_retry, FakeTransport, RecordingSleep};
use tridesk::domain::calendar::{CalendarClient, EventPatch, EventTime, NewEvent};
use tridesk::domain::coda::CodaClient;
use tridesk::domain::github::{GitHubClient, IssueFilter, IssueState, NewIssue};
use tridesk::error::SdkError;

fn coda(transport: FakeTransport) -> CodaClient<FakeTransport, RecordingSleep> {
    CodaClient::with_executor(
        executor(transport, RecordingSleep::new(), fast_retry()),
        "https://coda.test/apis/v1",
    )
}

fn github(transport: FakeTransport) -> GitHubClient<FakeTransport, RecordingSleep> {
    GitHubClient::with_executor(
        executor(transport, RecordingSleep::new(), fast_retry()),
        "https://github.test",
    )
}

fn calendar(transport: FakeTransport) -> CalendarClient<FakeTransport, RecordingSleep> {
    CalendarClient::with_executor(
        executor(transport, RecordingSleep::new(), fast_retry()),
        "https://calendar.test/v3",
    )
}

// ─── Validation short-circuits ───────────────────────────────────────────────

#[tokio::test]
async fn test_empty_doc_id_never_reaches_the_wire() {
    let transport = FakeTransport::new();
    let client = coda(transport.clone());

    let err = client.get_doc("   ").await.unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_empty_row_id_never_reaches_the_wire() {
    let transport = FakeTransport::new();
    let client = coda(transport.clone());

    let err = client
        .update_row("doc_1", "grid-1", "", serde_json::Map::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_per_page_out_of_bounds_is_rejected_locally() {
    let transport = FakeTransport::new();
    let client = github(transport.clone());

    assert!(matches!(
        client.repositories(None, 0, 1).await.unwrap_err(),
        SdkError::Validation(_)
    ));
    assert!(matches!(
        client.repositories(None, 101, 1).await.unwrap_err(),
        SdkError::Validation(_)
    ));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_empty_issue_title_is_rejected_locally() {
    let transport = FakeTransport::new();
    let client = github(transport.clone());

    let err = client
        .create_issue("octocat", "hello-world", &NewIssue::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_empty_event_patch_is_rejected_locally() {
    let transport = FakeTransport::new();
    let client = calendar(transport.clone());

    let err = client
        .update_event("primary", "evt_1", EventPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(transport.calls(), 0);
}

// ─── Coda end-to-end over fakes ──────────────────────────────────────────────

#[tokio::test]
async fn test_coda_list_docs_decodes_items() {
    let transport = FakeTransport::new().respond(
        200,
        r#"{
            "items": [
                {"id": "AbCDeFGH", "name": "Project Tracker", "owner": "alice@example.com"},
                {"id": "iJkLmNoP", "name": "Meeting Notes", "owner": "bob@example.com"}
            ]
        }"#,
    );
    let client = coda(transport.clone());

    let docs = client.list_docs(Some(25)).await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, "AbCDeFGH");
    assert_eq!(docs[1].owner, "bob@example.com");
    assert!(transport.urls()[0].ends_with("/docs?limit=25"));
}

#[tokio::test]
async fn test_coda_insert_row_sends_cells_and_decodes_receipt() {
    let transport = FakeTransport::new().respond(
        202,
        r#"{"requestId": "mutate:abc123", "addedRowIds": ["i-newrow1"]}"#,
    );
    let client = coda(transport.clone());

    let mut values = serde_json::Map::new();
    values.insert("c-name".to_string(), json!("Widget"));
    let receipt = client.insert_row("AbCDeFGH", "grid-1", values).await.unwrap();

    assert_eq!(receipt.request_id, "mutate:abc123");
    assert_eq!(receipt.added_row_ids, vec!["i-newrow1"]);
}

// ─── GitHub end-to-end over fakes ────────────────────────────────────────────

#[tokio::test]
async fn test_github_issues_filter_appears_in_query() {
    let transport = FakeTransport::new().respond(
        200,
        r#"[
            {
                "id": 1,
                "number": 42,
                "title": "Flaky test on CI",
                "state": "closed",
                "user": {"login": "octocat"},
                "labels": [{"name": "bug"}, {"name": "ci"}],
                "html_url": "https://github.com/octocat/hello-world/issues/42"
            }
        ]"#,
    );
    let client = github(transport.clone());

    let issues = client
        .issues("octocat", "hello-world", IssueFilter::Closed, 50)
        .await
        .unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].state, IssueState::Closed);
    assert_eq!(issues[0].labels, vec!["bug", "ci"]);
    assert!(transport.urls()[0].contains("state=closed"));
    assert!(transport.urls()[0].contains("per_page=50"));
}

#[tokio::test]
async fn test_github_repositories_for_owner_and_self() {
    let transport = FakeTransport::new()
        .respond(200, "[]")
        .respond(200, "[]");
    let client = github(transport.clone());

    client.repositories(Some("octocat"), 30, 1).await.unwrap();
    client.repositories(None, 30, 2).await.unwrap();

    let urls = transport.urls();
    assert!(urls[0].contains("/users/octocat/repos"));
    assert!(urls[1].contains("/user/repos"));
    assert!(urls[1].contains("page=2"));
}

// ─── Calendar end-to-end over fakes ──────────────────────────────────────────

#[tokio::test]
async fn test_calendar_list_events_builds_window_query() {
    let transport = FakeTransport::new().respond(
        200,
        r#"{
            "items": [
                {
                    "id": "evt_1",
                    "summary": "Standup",
                    "start": {"dateTime": "2024-03-01T10:00:00Z"},
                    "end": {"dateTime": "2024-03-01T10:15:00Z"}
                }
            ]
        }"#,
    );
    let client = calendar(transport.clone());

    let events = client.list_events("primary", None, None, 25).await.unwrap();

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0].start, EventTime::Moment(_)));
    let url = &transport.urls()[0];
    assert!(url.contains("/calendars/primary/events?"));
    assert!(url.contains("singleEvents=true"));
    assert!(url.contains("orderBy=startTime"));
    assert!(url.contains("maxResults=25"));
}

#[tokio::test]
async fn test_calendar_id_is_url_encoded() {
    let transport = FakeTransport::new().respond(
        200,
        r#"{"id": "team@example.com", "summary": "Team"}"#,
    );
    let client = calendar(transport.clone());

    client.get_calendar("team@example.com").await.unwrap();

    assert!(transport.urls()[0].ends_with("/calendars/team%40example.com"));
}

#[tokio::test]
async fn test_calendar_create_event_defaults_times() {
    let transport = FakeTransport::new().respond(
        200,
        r#"{
            "id": "evt_new",
            "summary": "Planning",
            "start": {"dateTime": "2024-03-01T10:00:00Z"},
            "end": {"dateTime": "2024-03-01T11:00:00Z"}
        }"#,
    );
    let client = calendar(transport.clone());

    let event = client
        .create_event(
            "primary",
            NewEvent {
                summary: "Planning".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(event.id, "evt_new");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_calendar_update_event_reads_then_writes() {
    let stored = r#"{
        "id": "evt_1",
        "summary": "Old title",
        "description": "Keep me",
        "start": {"dateTime": "2024-03-01T10:00:00Z"},
        "end": {"dateTime": "2024-03-01T11:00:00Z"}
    }"#;
    let updated = r#"{
        "id": "evt_1",
        "summary": "New title",
        "description": "Keep me",
        "start": {"dateTime": "2024-03-01T10:00:00Z"},
        "end": {"dateTime": "2024-03-01T11:00:00Z"}
    }"#;
    let transport = FakeTransport::new().respond(200, stored).respond(200, updated);
    let client = calendar(transport.clone());

    let event = client
        .update_event(
            "primary",
            "evt_1",
            EventPatch {
                summary: Some("New title".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // One GET to read the stored event, one PUT with the merge applied.
    assert_eq!(transport.calls(), 2);
    assert_eq!(event.summary.as_deref(), Some("New title"));
    assert_eq!(event.description.as_deref(), Some("Keep me"));
}

#[tokio::test]
async fn test_calendar_delete_event_accepts_empty_body() {
    let transport = FakeTransport::new().respond(204, "");
    let client = calendar(transport.clone());

    client.delete_event("primary", "evt_1").await.unwrap();

    assert_eq!(transport.calls(), 1);
}
