//! Message routes.

use axum::extract::{Path, Query, State};
use axum::Json;
use database::message::DEFAULT_MESSAGE_LIMIT;
use database::models::{Message, MessageKind, MessageWithAuthor, NewMessage, User};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validate::{self, FieldError};

/// Upper bound on how many messages one request may fetch.
const MAX_MESSAGE_LIMIT: i64 = 100;

/// Author fields embedded in message and thread payloads.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl From<User> for AuthorInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image_url: user.profile_image_url,
        }
    }
}

/// A message as returned to clients. `author` is `None` for AI messages.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub channel_id: i64,
    pub content: String,
    pub message_type: String,
    pub metadata: Option<String>,
    pub is_ai: bool,
    pub ai_prompt: Option<String>,
    pub created_at: String,
    pub author: Option<AuthorInfo>,
}

impl MessageResponse {
    pub fn from_message(message: Message, author: Option<AuthorInfo>) -> Self {
        Self {
            id: message.id,
            channel_id: message.channel_id,
            content: message.content,
            message_type: message.message_type,
            metadata: message.metadata,
            is_ai: message.is_ai,
            ai_prompt: message.ai_prompt,
            created_at: message.created_at,
            author,
        }
    }
}

impl From<MessageWithAuthor> for MessageResponse {
    fn from(m: MessageWithAuthor) -> Self {
        let author = match (m.author_id, m.author_email) {
            (Some(id), Some(email)) => Some(AuthorInfo {
                id,
                email,
                first_name: m.author_first_name,
                last_name: m.author_last_name,
                profile_image_url: m.author_image_url,
            }),
            _ => None,
        };
        Self {
            id: m.id,
            channel_id: m.channel_id,
            content: m.content,
            message_type: m.message_type,
            metadata: m.metadata,
            is_ai: m.is_ai,
            ai_prompt: m.ai_prompt,
            created_at: m.created_at,
            author,
        }
    }
}

/// Query parameters for listing messages.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Request to post a message.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub content: String,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

fn effective_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_MESSAGE_LIMIT)
        .clamp(1, MAX_MESSAGE_LIMIT)
}

/// Reorder a newest-first page into chronological order.
fn chronological(mut messages: Vec<MessageWithAuthor>) -> Vec<MessageWithAuthor> {
    messages.reverse();
    messages
}

/// List the most recent messages of a channel in chronological order.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(channel_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MessageResponse>>> {
    let channel = database::channel::get_channel(state.db.pool(), channel_id).await?;
    let limit = effective_limit(query.limit);
    let page = database::message::get_channel_messages(state.db.pool(), channel.id, limit).await?;
    Ok(Json(
        chronological(page).into_iter().map(Into::into).collect(),
    ))
}

/// Post a message to a channel as the current user.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(channel_id): Path<i64>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<Json<MessageResponse>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "content", &req.content, validate::MAX_CONTENT_LENGTH);
    validate::finish(errors)?;

    let kind = match &req.message_type {
        Some(value) => MessageKind::from_str(value).ok_or_else(|| {
            ApiError::Validation(vec![FieldError::new(
                "messageType",
                "must be one of: text, article, quiz",
            )])
        })?,
        None => MessageKind::Text,
    };

    let channel = database::channel::get_channel(state.db.pool(), channel_id).await?;
    let message = database::message::create_message(
        state.db.pool(),
        &NewMessage {
            channel_id: channel.id,
            author_id: Some(user.id),
            content: req.content,
            message_type: kind.as_str().to_string(),
            metadata: req.metadata.map(|v| v.to_string()),
            is_ai: false,
            ai_prompt: None,
        },
    )
    .await?;

    Ok(Json(MessageResponse::from_message(
        message,
        Some(user.into()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: i64, created_at: &str) -> MessageWithAuthor {
        MessageWithAuthor {
            id,
            channel_id: 1,
            author_id: Some(1),
            content: format!("message {id}"),
            message_type: "text".to_string(),
            metadata: None,
            is_ai: false,
            ai_prompt: None,
            created_at: created_at.to_string(),
            author_email: Some("alice@example.com".to_string()),
            author_first_name: None,
            author_last_name: None,
            author_image_url: None,
        }
    }

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None), DEFAULT_MESSAGE_LIMIT);
        assert_eq!(effective_limit(Some(20)), 20);
        assert_eq!(effective_limit(Some(0)), 1);
        assert_eq!(effective_limit(Some(-5)), 1);
        assert_eq!(effective_limit(Some(10_000)), MAX_MESSAGE_LIMIT);
    }

    #[test]
    fn test_chronological_reverses_page() {
        let page = vec![
            sample(3, "2024-01-01 10:02:00"),
            sample(2, "2024-01-01 10:01:00"),
            sample(1, "2024-01-01 10:00:00"),
        ];

        let ordered = chronological(page);
        let ids: Vec<i64> = ordered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_ai_message_has_no_author() {
        let mut message = sample(1, "2024-01-01 10:00:00");
        message.author_id = None;
        message.author_email = None;
        message.is_ai = true;

        let response = MessageResponse::from(message);
        assert!(response.author.is_none());
        assert!(response.is_ai);
    }
}
