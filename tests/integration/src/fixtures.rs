//! Request bodies and response shapes used by the integration tests

use serde::Deserialize;
use serde_json::{json, Value};

/// Body for creating a line-up event
pub fn lineup_event(title: &str, max_participants: i32, waitlist_limit: i32) -> Value {
    json!({
        "type": "LINEUP",
        "title": title,
        "config": {
            "maxParticipants": max_participants,
            "waitlistLimit": waitlist_limit,
            "maxCountPerUser": 1
        }
    })
}

/// Body for creating a vote event
pub fn vote_event(title: &str, options: &[&str]) -> Value {
    json!({
        "type": "VOTE",
        "title": title,
        "config": { "options": options, "maxVotes": 1 }
    })
}

/// Body for creating a memo wall
pub fn memo_event(title: &str, max_comments_per_user: i32) -> Value {
    json!({
        "type": "MEMO",
        "title": title,
        "config": { "maxCommentsPerUser": max_comments_per_user, "allowReaction": true }
    })
}

/// Line-up registration (`count > 0`) or cancellation (`count < 0`)
pub fn lineup_action(count: i32) -> Value {
    json!({ "type": "LINEUP", "payload": { "count": count } })
}

/// Ballot with the given options
pub fn vote_action(options: &[&str]) -> Value {
    json!({ "type": "VOTE", "payload": { "selectedOptions": options } })
}

/// Memo with the given text
pub fn memo_action(content: &str) -> Value {
    json!({ "type": "MEMO", "payload": { "content": content } })
}

/// Event as returned by the management endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub created_by: String,
}

/// Result of an accepted action
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBody {
    pub record_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Option<String>,
    pub promoted_record_id: Option<String>,
}

/// Profile as returned by `/users/@me`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: String,
    pub display_name: String,
    pub picture_url: Option<String>,
    pub role: String,
}
