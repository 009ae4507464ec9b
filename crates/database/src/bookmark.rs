//! Bookmark operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Bookmark, BookmarkedMessage};

/// Bookmark a message for a user.
pub async fn create_bookmark(
    pool: &SqlitePool,
    user_id: i64,
    message_id: i64,
) -> Result<Bookmark> {
    sqlx::query_as::<_, Bookmark>(
        r#"
        INSERT INTO bookmarks (user_id, message_id)
        VALUES (?, ?)
        RETURNING id, user_id, message_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(message_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        DatabaseError::insert_conflict(e, "Bookmark", format!("{}/{}", user_id, message_id))
    })
}

/// Remove a user's bookmark on a message.
///
/// Returns whether a bookmark existed; removing an absent bookmark is
/// not an error.
pub async fn remove_bookmark(pool: &SqlitePool, user_id: i64, message_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookmarks
        WHERE user_id = ? AND message_id = ?
        "#,
    )
    .bind(user_id)
    .bind(message_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List a user's bookmarks, most recently saved first, with the
/// bookmarked message and its channel name.
pub async fn get_user_bookmarks(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<BookmarkedMessage>> {
    let bookmarks = sqlx::query_as::<_, BookmarkedMessage>(
        r#"
        SELECT b.id AS bookmark_id,
               b.created_at AS bookmarked_at,
               m.id AS message_id, m.channel_id, m.author_id, m.content,
               m.message_type, m.metadata, m.is_ai, m.ai_prompt, m.created_at,
               c.name AS channel_name
        FROM bookmarks b
        INNER JOIN messages m ON m.id = b.message_id
        INNER JOIN channels c ON c.id = m.channel_id
        WHERE b.user_id = ?
        ORDER BY b.created_at DESC, b.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(bookmarks)
}

/// Check whether a user has bookmarked a message.
pub async fn is_bookmarked(pool: &SqlitePool, user_id: i64, message_id: i64) -> Result<bool> {
    let row = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT 1
        FROM bookmarks
        WHERE user_id = ? AND message_id = ?
        "#,
    )
    .bind(user_id)
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewChannel, NewMessage, NewUser, NewWorkspace};
    use crate::{channel, message, user, workspace, Database};

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seed_message(db: &Database, content: &str) -> (i64, i64) {
        let author = match user::get_user_by_email(db.pool(), "reader@example.com")
            .await
            .unwrap()
        {
            Some(existing) => existing,
            None => user::create_user(
                db.pool(),
                &NewUser {
                    email: "reader@example.com".to_string(),
                    password_hash: "hash".to_string(),
                    first_name: None,
                    last_name: None,
                    profile_image_url: None,
                },
            )
            .await
            .unwrap(),
        };
        let ws = workspace::create_workspace(
            db.pool(),
            &NewWorkspace {
                name: "Study".to_string(),
                description: None,
                owner_id: author.id,
            },
        )
        .await
        .unwrap();
        let ch = channel::create_channel(
            db.pool(),
            &NewChannel {
                workspace_id: ws.id,
                name: "history".to_string(),
                description: None,
                channel_type: "subject".to_string(),
            },
        )
        .await
        .unwrap();
        let msg = message::create_message(
            db.pool(),
            &NewMessage {
                channel_id: ch.id,
                author_id: Some(author.id),
                content: content.to_string(),
                message_type: "text".to_string(),
                metadata: None,
                is_ai: false,
                ai_prompt: None,
            },
        )
        .await
        .unwrap();
        (msg.id, author.id)
    }

    #[tokio::test]
    async fn test_bookmark_round_trip() {
        let db = test_db().await;
        let (message_id, user_id) = seed_message(&db, "The Treaty of Westphalia").await;

        create_bookmark(db.pool(), user_id, message_id).await.unwrap();
        assert!(is_bookmarked(db.pool(), user_id, message_id).await.unwrap());

        let saved = get_user_bookmarks(db.pool(), user_id).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].message_id, message_id);
        assert_eq!(saved[0].content, "The Treaty of Westphalia");
        assert_eq!(saved[0].channel_name, "history");
    }

    #[tokio::test]
    async fn test_duplicate_bookmark_rejected() {
        let db = test_db().await;
        let (message_id, user_id) = seed_message(&db, "note").await;

        create_bookmark(db.pool(), user_id, message_id).await.unwrap();
        let duplicate = create_bookmark(db.pool(), user_id, message_id).await;
        assert!(matches!(
            duplicate,
            Err(DatabaseError::AlreadyExists { entity: "Bookmark", .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let db = test_db().await;
        let (message_id, user_id) = seed_message(&db, "note").await;

        create_bookmark(db.pool(), user_id, message_id).await.unwrap();
        assert!(remove_bookmark(db.pool(), user_id, message_id).await.unwrap());
        assert!(!remove_bookmark(db.pool(), user_id, message_id).await.unwrap());
        assert!(!is_bookmarked(db.pool(), user_id, message_id).await.unwrap());
    }
}
