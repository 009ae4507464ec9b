//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user with local credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Server-assigned identifier.
    pub id: i64,
    /// Unique login email.
    pub email: String,
    /// bcrypt hash of the password. Never expose in API responses.
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    /// Pending password-reset token, if one was requested.
    pub reset_token: Option<String>,
    /// Expiry of the reset token; always set when the token is.
    pub reset_token_expires: Option<String>,
    pub created_at: String,
}

/// Parameters for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Partial profile update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// An authenticated session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Opaque bearer token, primary key.
    pub token: String,
    pub user_id: i64,
    pub expires_at: String,
    pub created_at: String,
}

/// A top-level container of channels, owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: String,
}

/// Parameters for creating a workspace.
#[derive(Debug, Clone)]
pub struct NewWorkspace {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// A workspace row joined with its membership count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WorkspaceWithMembers {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: String,
    /// Count of distinct membership rows for this workspace.
    pub member_count: i64,
}

/// A workspace membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WorkspaceMember {
    pub id: i64,
    pub workspace_id: i64,
    pub user_id: i64,
    /// "member" or "admin".
    pub role: String,
    pub joined_at: String,
}

/// A membership row joined with the member's user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MemberWithUser {
    pub id: i64,
    pub workspace_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// A topic channel inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: i64,
    /// "subject" or "general".
    pub channel_type: String,
    pub created_at: String,
}

/// Parameters for creating a channel.
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: i64,
    pub channel_type: String,
}

/// A post in a channel. `author_id` is NULL for AI-authored messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub channel_id: i64,
    pub author_id: Option<i64>,
    /// Plain text, or a JSON-encoded payload for article/quiz messages.
    pub content: String,
    /// "text", "article", "quiz", or "image".
    pub message_type: String,
    /// Optional JSON metadata blob.
    pub metadata: Option<String>,
    pub is_ai: bool,
    /// The prompt that produced an AI message, if any.
    pub ai_prompt: Option<String>,
    pub created_at: String,
}

/// Parameters for inserting a message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub channel_id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub message_type: String,
    pub metadata: Option<String>,
    pub is_ai: bool,
    pub ai_prompt: Option<String>,
}

/// A message joined with its (nullable) author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MessageWithAuthor {
    pub id: i64,
    pub channel_id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub message_type: String,
    pub metadata: Option<String>,
    pub is_ai: bool,
    pub ai_prompt: Option<String>,
    pub created_at: String,
    pub author_email: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_image_url: Option<String>,
}

/// A reply attached to a message. The discussion is flat, not nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Thread {
    pub id: i64,
    pub message_id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub is_ai: bool,
    /// Optional note tag, e.g. "question" or "clarification".
    pub note_type: Option<String>,
    pub rich_text: bool,
    pub created_at: String,
}

/// Parameters for inserting a thread reply.
#[derive(Debug, Clone)]
pub struct NewThread {
    pub message_id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub is_ai: bool,
    pub note_type: Option<String>,
    pub rich_text: bool,
}

/// A thread reply joined with its (nullable) author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ThreadWithAuthor {
    pub id: i64,
    pub message_id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub is_ai: bool,
    pub note_type: Option<String>,
    pub rich_text: bool,
    pub created_at: String,
    pub author_email: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_image_url: Option<String>,
}

/// A user's bookmark on a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub message_id: i64,
    pub created_at: String,
}

/// A bookmark joined with the bookmarked message and its channel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookmarkedMessage {
    pub bookmark_id: i64,
    pub bookmarked_at: String,
    pub message_id: i64,
    pub channel_id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub message_type: String,
    pub metadata: Option<String>,
    pub is_ai: bool,
    pub ai_prompt: Option<String>,
    pub created_at: String,
    pub channel_name: String,
}

/// Per-user, per-channel study progress counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StudyProgress {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub topics_studied: i64,
    pub daily_goal: i64,
    pub last_activity: String,
    pub created_at: String,
}

/// Partial progress update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressUpdate {
    pub topics_studied: Option<i64>,
    pub daily_goal: Option<i64>,
}

/// A progress row joined with its channel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChannelProgress {
    pub channel_id: i64,
    pub channel_name: String,
    pub topics_studied: i64,
    pub daily_goal: i64,
    pub last_activity: String,
}

/// Membership roles within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Member,
    Admin,
}

impl MemberRole {
    /// Database representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Member => "member",
            MemberRole::Admin => "admin",
        }
    }

    /// Parse a role from its database or request representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "member" => Some(MemberRole::Member),
            "admin" => Some(MemberRole::Admin),
            _ => None,
        }
    }
}

/// Channel categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Subject,
    General,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Subject => "subject",
            ChannelKind::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "subject" => Some(ChannelKind::Subject),
            "general" => Some(ChannelKind::General),
            _ => None,
        }
    }
}

/// Message payload kinds. Article and quiz messages carry JSON-encoded
/// structured content; text and image messages carry plain content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Article,
    Quiz,
    Image,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Article => "article",
            MessageKind::Quiz => "quiz",
            MessageKind::Image => "image",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(MessageKind::Text),
            "article" => Some(MessageKind::Article),
            "quiz" => Some(MessageKind::Quiz),
            "image" => Some(MessageKind::Image),
            _ => None,
        }
    }
}
