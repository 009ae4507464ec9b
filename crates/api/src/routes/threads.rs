//! Thread reply routes.

use axum::extract::{Path, State};
use axum::Json;
use database::models::{NewThread, Thread, ThreadWithAuthor};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::error::Result;
use crate::routes::messages::AuthorInfo;
use crate::state::AppState;
use crate::validate;

/// A thread reply as returned to clients. `author` is `None` for AI replies.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub id: i64,
    pub message_id: i64,
    pub content: String,
    pub is_ai: bool,
    pub note_type: Option<String>,
    pub rich_text: bool,
    pub created_at: String,
    pub author: Option<AuthorInfo>,
}

impl ThreadResponse {
    pub fn from_thread(thread: Thread, author: Option<AuthorInfo>) -> Self {
        Self {
            id: thread.id,
            message_id: thread.message_id,
            content: thread.content,
            is_ai: thread.is_ai,
            note_type: thread.note_type,
            rich_text: thread.rich_text,
            created_at: thread.created_at,
            author,
        }
    }
}

impl From<ThreadWithAuthor> for ThreadResponse {
    fn from(t: ThreadWithAuthor) -> Self {
        let author = match (t.author_id, t.author_email) {
            (Some(id), Some(email)) => Some(AuthorInfo {
                id,
                email,
                first_name: t.author_first_name,
                last_name: t.author_last_name,
                profile_image_url: t.author_image_url,
            }),
            _ => None,
        };
        Self {
            id: t.id,
            message_id: t.message_id,
            content: t.content,
            is_ai: t.is_ai,
            note_type: t.note_type,
            rich_text: t.rich_text,
            created_at: t.created_at,
            author,
        }
    }
}

/// Request to reply in a message's thread.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    pub content: String,
    #[serde(default)]
    pub note_type: Option<String>,
    #[serde(default)]
    pub rich_text: Option<bool>,
}

/// List a message's thread replies in chronological order.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(message_id): Path<i64>,
) -> Result<Json<Vec<ThreadResponse>>> {
    let message = database::message::get_message(state.db.pool(), message_id).await?;
    let threads = database::thread::get_message_threads(state.db.pool(), message.id).await?;
    Ok(Json(threads.into_iter().map(Into::into).collect()))
}

/// Reply in a message's thread as the current user.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<i64>,
    Json(req): Json<CreateThreadRequest>,
) -> Result<Json<ThreadResponse>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "content", &req.content, validate::MAX_CONTENT_LENGTH);
    validate::finish(errors)?;

    let message = database::message::get_message(state.db.pool(), message_id).await?;
    let thread = database::thread::create_thread(
        state.db.pool(),
        &NewThread {
            message_id: message.id,
            author_id: Some(user.id),
            content: req.content,
            is_ai: false,
            note_type: req.note_type,
            rich_text: req.rich_text.unwrap_or(false),
        },
    )
    .await?;

    Ok(Json(ThreadResponse::from_thread(thread, Some(user.into()))))
}
