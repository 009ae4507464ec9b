//! Channel operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Channel, NewChannel};

/// Create a channel in a workspace.
pub async fn create_channel(pool: &SqlitePool, params: &NewChannel) -> Result<Channel> {
    let channel = sqlx::query_as::<_, Channel>(
        r#"
        INSERT INTO channels (workspace_id, name, description, channel_type)
        VALUES (?, ?, ?, ?)
        RETURNING id, workspace_id, name, description, channel_type, created_at
        "#,
    )
    .bind(params.workspace_id)
    .bind(&params.name)
    .bind(&params.description)
    .bind(&params.channel_type)
    .fetch_one(pool)
    .await?;

    tracing::debug!(channel_id = channel.id, workspace_id = channel.workspace_id, "Channel created");

    Ok(channel)
}

/// Get a channel by ID.
pub async fn get_channel(pool: &SqlitePool, id: i64) -> Result<Channel> {
    sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, workspace_id, name, description, channel_type, created_at
        FROM channels
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Channel",
        id: id.to_string(),
    })
}

/// List the channels of a workspace, ordered by name.
pub async fn get_workspace_channels(pool: &SqlitePool, workspace_id: i64) -> Result<Vec<Channel>> {
    let channels = sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, workspace_id, name, description, channel_type, created_at
        FROM channels
        WHERE workspace_id = ?
        ORDER BY name, id
        "#,
    )
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;

    Ok(channels)
}
