//! Channel routes.

use axum::extract::{Path, State};
use axum::Json;
use database::models::{Channel, ChannelKind, NewChannel};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validate::{self, FieldError};

/// A channel as returned to clients.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: i64,
    pub channel_type: String,
    pub created_at: String,
}

impl From<Channel> for ChannelResponse {
    fn from(c: Channel) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            workspace_id: c.workspace_id,
            channel_type: c.channel_type,
            created_at: c.created_at,
        }
    }
}

/// Request to create a channel.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channel_type: Option<String>,
}

/// List the channels of a workspace, ordered by name.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<Vec<ChannelResponse>>> {
    let workspace = database::workspace::get_workspace(state.db.pool(), workspace_id).await?;
    let channels = database::channel::get_workspace_channels(state.db.pool(), workspace.id).await?;
    Ok(Json(channels.into_iter().map(Into::into).collect()))
}

/// Create a channel in a workspace.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(workspace_id): Path<i64>,
    Json(req): Json<CreateChannelRequest>,
) -> Result<Json<ChannelResponse>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "name", &req.name, validate::MAX_NAME_LENGTH);
    validate::finish(errors)?;

    let kind = match &req.channel_type {
        Some(value) => ChannelKind::from_str(value).ok_or_else(|| {
            ApiError::Validation(vec![FieldError::new(
                "channelType",
                "must be one of: subject, general",
            )])
        })?,
        None => ChannelKind::Subject,
    };

    let workspace = database::workspace::get_workspace(state.db.pool(), workspace_id).await?;
    let channel = database::channel::create_channel(
        state.db.pool(),
        &NewChannel {
            name: req.name.trim().to_string(),
            description: req.description,
            workspace_id: workspace.id,
            channel_type: kind.as_str().to_string(),
        },
    )
    .await?;
    info!(channel_id = channel.id, workspace_id, "Channel created");

    Ok(Json(channel.into()))
}
