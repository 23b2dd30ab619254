//! API Integration Tests
//!
//! Run the full HTTP stack against the in-memory store. The PostgreSQL smoke test is
//! skipped unless `DATABASE_URL` is set.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, check_postgres_env, fixtures::*, test_config,
    TestServer,
};
use liveboard_core::{Actor, EventStatus, InteractionStatus, RecordView};
use reqwest::StatusCode;
use serde_json::json;

async fn create_event(server: &TestServer, admin: &str, body: &serde_json::Value) -> EventBody {
    let response = server.post_auth("/api/v1/events", admin, body).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn act(
    server: &TestServer,
    token: &str,
    event_id: &str,
    body: &serde_json::Value,
) -> reqwest::Response {
    server
        .post_auth(&format!("/api/v1/events/{event_id}/action"), token, body)
        .await
        .unwrap()
}

async fn status_of(server: &TestServer, token: &str, event_id: &str) -> EventStatus {
    let response = server
        .get_auth(&format!("/api/v1/events/{event_id}/status"), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

fn confirmed(status: &EventStatus) -> Vec<&RecordView> {
    status
        .records
        .iter()
        .filter(|r| r.status == Some(InteractionStatus::Success))
        .collect()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"], "healthy");
}

// ============================================================================
// Identity Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/users/@me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_forged_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .get_auth("/api/v1/users/@me", "not.a.token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_sync_profile_then_read_it_back() {
    let server = TestServer::start().await.unwrap();
    let actor = Actor::new("U-profile", "Alice", Some("https://img/a.png".to_string()));
    let token = server.token_for(&actor);

    // Unknown until synced
    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_auth("/api/v1/users/@me", &token, &json!({}))
        .await
        .unwrap();
    let synced: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(synced.id, "U-profile");
    assert_eq!(synced.display_name, "Alice");
    assert_eq!(synced.picture_url.as_deref(), Some("https://img/a.png"));
    assert_eq!(synced.role, "user");

    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let fetched: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.display_name, "Alice");
}

#[tokio::test]
async fn test_sync_profile_keeps_admin_role() {
    let server = TestServer::start().await.unwrap();
    server.admin_token("U-admin");
    let token = server.token_for(&Actor::new("U-admin", "Renamed", None));

    let response = server
        .put_auth("/api/v1/users/@me", &token, &json!({}))
        .await
        .unwrap();
    let synced: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(synced.display_name, "Renamed");
    assert_eq!(synced.role, "admin");
}

#[tokio::test]
async fn test_admin_list_grants_event_management() {
    let server = TestServer::start_with(&[("ADMIN_LIST", "U-boss")]).await.unwrap();
    let boss = server.token("U-boss");
    let plain = server.token("U-plain");

    // not yet synced, so no stored role
    let response = server
        .post_auth("/api/v1/events", &boss, &memo_event("Wall", 2))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    for token in [&boss, &plain] {
        let response = server
            .put_auth("/api/v1/users/@me", token, &json!({}))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let event = create_event(&server, &boss, &memo_event("Wall", 2)).await;
    assert_eq!(event.created_by, "U-boss");

    let response = server
        .post_auth("/api/v1/events", &plain, &memo_event("Wall", 2))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "ADMIN_REQUIRED");

    let response = server.get_auth("/api/v1/users/@me", &boss).await.unwrap();
    let me: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.role, "admin");
}

// ============================================================================
// Event Management Tests
// ============================================================================

#[tokio::test]
async fn test_event_management_requires_admin() {
    let server = TestServer::start().await.unwrap();
    let user = server.token("U-plain");

    let response = server
        .post_auth("/api/v1/events", &user, &lineup_event("Nope", 5, 0))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "ADMIN_REQUIRED");

    let response = server.get_auth("/api/v1/events", &user).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_create_get_list_and_archive_events() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let user = server.token("U-viewer");

    let first = create_event(&server, &admin, &vote_event("Lunch", &["Pizza", "Sushi"])).await;
    let second = create_event(&server, &admin, &memo_event("Wall", 2)).await;
    assert_eq!(first.kind, "VOTE");
    assert!(first.is_active);
    assert!(!first.is_archived);
    assert_eq!(first.created_by, "U-admin");

    // Anyone may read a single event
    let response = server
        .get_auth(&format!("/api/v1/events/{}", first.id), &user)
        .await
        .unwrap();
    let fetched: EventBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, "Lunch");

    let response = server
        .get_auth("/api/v1/events?limit=10", &admin)
        .await
        .unwrap();
    let listed: Vec<EventBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);

    let response = server
        .put_auth(
            &format!("/api/v1/events/{}/archive", first.id),
            &admin,
            &json!({ "isArchived": true }),
        )
        .await
        .unwrap();
    let archived: EventBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(archived.is_archived);

    let response = server
        .put_auth(
            &format!("/api/v1/events/{}", first.id),
            &admin,
            &json!({ "title": "Dinner" }),
        )
        .await
        .unwrap();
    let updated: EventBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Dinner");
    assert_eq!(updated.created_by, "U-admin");
}

#[tokio::test]
async fn test_invalid_event_config_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");

    let response = server
        .post_auth("/api/v1/events", &admin, &lineup_event("Empty", 0, 0))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let token = server.token("U1");

    let response = server.get_auth("/api/v1/events/12345", &token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_EVENT");

    let response = act(&server, &token, "12345", &lineup_action(1)).await;
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_malformed_event_id_is_bad_request() {
    let server = TestServer::start().await.unwrap();
    let token = server.token("U1");

    let response = server
        .get_auth("/api/v1/events/abc/status", &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Line-up Tests
// ============================================================================

#[tokio::test]
async fn test_lineup_waitlist_and_promotion() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &lineup_event("Bus", 1, 1)).await;

    let (a, b, c) = (server.token("A"), server.token("B"), server.token("C"));

    let first: ActionBody = assert_json(
        act(&server, &a, &event.id, &lineup_action(1)).await,
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(first.status.as_deref(), Some("SUCCESS"));

    let second: ActionBody = assert_json(
        act(&server, &b, &event.id, &lineup_action(1)).await,
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(second.status.as_deref(), Some("WAITLIST"));

    let code = assert_error(
        act(&server, &c, &event.id, &lineup_action(1)).await,
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "WAITLIST_FULL");

    let cancelled: ActionBody = assert_json(
        act(&server, &a, &event.id, &lineup_action(-1)).await,
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(cancelled.record_id, first.record_id);
    assert_eq!(cancelled.status.as_deref(), Some("CANCELLED"));
    assert_eq!(cancelled.promoted_record_id.as_deref(), Some(second.record_id.as_str()));

    let status = status_of(&server, &a, &event.id).await;
    let confirmed = confirmed(&status);
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].user_id, "B");
}

#[tokio::test]
async fn test_lineup_rejects_zero_count_and_missing_registration() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &lineup_event("Bus", 3, 0)).await;
    let token = server.token("A");

    let code = assert_error(
        act(&server, &token, &event.id, &lineup_action(0)).await,
        StatusCode::BAD_REQUEST,
    )
    .await
    .unwrap();
    assert_eq!(code, "INVALID_COUNT");

    let code = assert_error(
        act(&server, &token, &event.id, &lineup_action(-1)).await,
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "NO_ACTIVE_REGISTRATION");
}

#[tokio::test]
async fn test_closed_event_refuses_actions() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &lineup_event("Bus", 3, 0)).await;

    let response = server
        .put_auth(
            &format!("/api/v1/events/{}/status", event.id),
            &admin,
            &json!({ "isActive": false }),
        )
        .await
        .unwrap();
    let closed: EventBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!closed.is_active);

    let token = server.token("A");
    let code = assert_error(
        act(&server, &token, &event.id, &lineup_action(1)).await,
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "EVENT_NOT_ACTIVE");
}

#[tokio::test]
async fn test_parallel_registrations_never_overfill() {
    let server = TestServer::start_with(&[("ENGINE_TX_MAX_ATTEMPTS", "50")])
        .await
        .unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &lineup_event("Gym", 3, 0)).await;

    let tokens: Vec<String> = (0..20).map(|i| server.token(&format!("P{i}"))).collect();
    let action = lineup_action(1);
    let responses = join_all(
        tokens
            .iter()
            .map(|token| act(&server, token, &event.id, &action)),
    )
    .await;

    let mut accepted = 0;
    for response in responses {
        match response.status() {
            StatusCode::OK => accepted += 1,
            StatusCode::CONFLICT => {}
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(accepted, 3);

    let status = status_of(&server, &admin, &event.id).await;
    assert_eq!(confirmed(&status).len(), 3);
}

// ============================================================================
// Vote and Memo Tests
// ============================================================================

#[tokio::test]
async fn test_vote_is_replaced_not_duplicated() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &vote_event("Lunch", &["Pizza", "Sushi"])).await;
    let token = server.token("V");

    let first: ActionBody = assert_json(
        act(&server, &token, &event.id, &vote_action(&["Pizza"])).await,
        StatusCode::OK,
    )
    .await
    .unwrap();
    let second: ActionBody = assert_json(
        act(&server, &token, &event.id, &vote_action(&["Sushi"])).await,
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(first.record_id, second.record_id);

    let status = status_of(&server, &token, &event.id).await;
    assert_eq!(status.len(), 1);
    assert_eq!(status.records[0].selected_options, vec!["Sushi".to_string()]);
}

#[tokio::test]
async fn test_action_kind_must_match_event() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &vote_event("Lunch", &["Pizza"])).await;
    let token = server.token("V");

    let response = act(&server, &token, &event.id, &memo_action("hi")).await;
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = act(
        &server,
        &token,
        &event.id,
        &json!({ "type": "DANCE", "payload": {} }),
    )
    .await;
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_ACTION_TYPE");
}

#[tokio::test]
async fn test_memo_quota_edit_and_clap() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &memo_event("Wall", 1)).await;
    let (author, other) = (server.token("M1"), server.token("M2"));

    let posted: ActionBody = assert_json(
        act(&server, &author, &event.id, &memo_action("first")).await,
        StatusCode::OK,
    )
    .await
    .unwrap();

    let code = assert_error(
        act(&server, &author, &event.id, &memo_action("second")).await,
        StatusCode::CONFLICT,
    )
    .await
    .unwrap();
    assert_eq!(code, "MAX_COMMENTS_REACHED");

    let record_path = format!("/api/v1/events/{}/records/{}", event.id, posted.record_id);

    let code = assert_error(
        server
            .patch_auth(&format!("{record_path}/content"), &other, &json!({ "content": "hijack" }))
            .await
            .unwrap(),
        StatusCode::FORBIDDEN,
    )
    .await
    .unwrap();
    assert_eq!(code, "NOT_RECORD_OWNER");

    let edited: RecordView = assert_json(
        server
            .patch_auth(&format!("{record_path}/content"), &author, &json!({ "content": "edited" }))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(edited.content.as_deref(), Some("edited"));

    let clapped: RecordView = assert_json(
        server
            .post_empty_auth(&format!("{record_path}/clap"), &other)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(clapped.clap_count, 1);

    let status = status_of(&server, &author, &event.id).await;
    assert_eq!(status.records[0].content.as_deref(), Some("edited"));
    assert_eq!(status.records[0].clap_count, 1);
}

#[tokio::test]
async fn test_note_update_on_own_registration() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token("U-admin");
    let event = create_event(&server, &admin, &lineup_event("Bus", 3, 0)).await;
    let token = server.token("N");

    let registered: ActionBody = assert_json(
        act(&server, &token, &event.id, &lineup_action(1)).await,
        StatusCode::OK,
    )
    .await
    .unwrap();

    let path = format!(
        "/api/v1/events/{}/records/{}/note",
        event.id, registered.record_id
    );
    let updated: RecordView = assert_json(
        server
            .patch_auth(&path, &token, &json!({ "note": "window seat" }))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(updated.note.as_deref(), Some("window seat"));
    assert_eq!(updated.status, Some(InteractionStatus::Success));
}

// ============================================================================
// PostgreSQL Smoke Test
// ============================================================================

#[tokio::test]
async fn test_postgres_backend_is_ready() {
    if !check_postgres_env() {
        return;
    }
    let url = std::env::var("DATABASE_URL").unwrap();

    let config =
        test_config(&[("STORAGE_BACKEND", "postgres"), ("DATABASE_URL", url.as_str())]).unwrap();
    let state = liveboard_api::create_app_state(config).await.unwrap();
    state
        .service_context()
        .event_repo()
        .health_check()
        .await
        .unwrap();
}
