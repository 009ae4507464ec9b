//! Session token storage.

use std::time::Duration;

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Session, User};

/// Create a session for a user with the given time-to-live.
pub async fn create_session(
    pool: &SqlitePool,
    token: &str,
    user_id: i64,
    ttl: Duration,
) -> Result<Session> {
    let modifier = format!("+{} seconds", ttl.as_secs());
    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (token, user_id, expires_at)
        VALUES (?, ?, datetime('now', ?))
        RETURNING token, user_id, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(modifier)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Resolve a session token to its user. Expired sessions resolve to `None`.
pub async fn get_session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.email, u.password_hash, u.first_name, u.last_name,
               u.profile_image_url, u.reset_token, u.reset_token_expires, u.created_at
        FROM users u
        INNER JOIN sessions s ON s.user_id = u.id
        WHERE s.token = ? AND s.expires_at > datetime('now')
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a session (logout).
///
/// Returns true if a session was deleted, false if none existed.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE token = ?
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove all expired sessions, returning the number deleted.
pub async fn delete_expired_sessions(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE expires_at <= datetime('now')
        "#,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
