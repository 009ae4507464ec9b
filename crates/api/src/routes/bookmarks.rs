//! Bookmark routes.

use axum::extract::{Path, State};
use axum::Json;
use database::models::{Bookmark, BookmarkedMessage};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::error::Result;
use crate::state::AppState;

/// A bookmark record as returned to clients.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: i64,
    pub user_id: i64,
    pub message_id: i64,
    pub created_at: String,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(b: Bookmark) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            message_id: b.message_id,
            created_at: b.created_at,
        }
    }
}

/// A bookmarked message with its channel name.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedMessageResponse {
    pub bookmark_id: i64,
    pub bookmarked_at: String,
    pub message_id: i64,
    pub channel_id: i64,
    pub channel_name: String,
    pub author_id: Option<i64>,
    pub content: String,
    pub message_type: String,
    pub metadata: Option<String>,
    pub is_ai: bool,
    pub ai_prompt: Option<String>,
    pub created_at: String,
}

impl From<BookmarkedMessage> for BookmarkedMessageResponse {
    fn from(b: BookmarkedMessage) -> Self {
        Self {
            bookmark_id: b.bookmark_id,
            bookmarked_at: b.bookmarked_at,
            message_id: b.message_id,
            channel_id: b.channel_id,
            channel_name: b.channel_name,
            author_id: b.author_id,
            content: b.content,
            message_type: b.message_type,
            metadata: b.metadata,
            is_ai: b.is_ai,
            ai_prompt: b.ai_prompt,
            created_at: b.created_at,
        }
    }
}

/// Bookmark a message for the current user.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<i64>,
) -> Result<Json<BookmarkResponse>> {
    let message = database::message::get_message(state.db.pool(), message_id).await?;
    let bookmark = database::bookmark::create_bookmark(state.db.pool(), user.id, message.id).await?;
    Ok(Json(bookmark.into()))
}

/// Remove a bookmark. Succeeds whether or not the bookmark existed.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    database::bookmark::remove_bookmark(state.db.pool(), user.id, message_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// List the current user's bookmarks, most recently saved first.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<BookmarkedMessageResponse>>> {
    let bookmarks = database::bookmark::get_user_bookmarks(state.db.pool(), user.id).await?;
    Ok(Json(bookmarks.into_iter().map(Into::into).collect()))
}
