//! Message operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Message, MessageWithAuthor, NewMessage};

/// Default page size for channel history.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 50;

/// Append a message to a channel.
///
/// AI-authored messages carry a NULL `author_id` together with `is_ai`
/// and the prompt that produced them.
pub async fn create_message(pool: &SqlitePool, params: &NewMessage) -> Result<Message> {
    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (channel_id, author_id, content, message_type, metadata, is_ai, ai_prompt)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, channel_id, author_id, content, message_type, metadata, is_ai, ai_prompt, created_at
        "#,
    )
    .bind(params.channel_id)
    .bind(params.author_id)
    .bind(&params.content)
    .bind(&params.message_type)
    .bind(&params.metadata)
    .bind(params.is_ai)
    .bind(&params.ai_prompt)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Get a message by ID.
pub async fn get_message(pool: &SqlitePool, id: i64) -> Result<Message> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, channel_id, author_id, content, message_type, metadata, is_ai, ai_prompt, created_at
        FROM messages
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Message",
        id: id.to_string(),
    })
}

/// Fetch the most recent messages of a channel, newest first.
///
/// Author columns come from a LEFT JOIN so AI messages (NULL author)
/// still appear, with all author fields None.
pub async fn get_channel_messages(
    pool: &SqlitePool,
    channel_id: i64,
    limit: i64,
) -> Result<Vec<MessageWithAuthor>> {
    let messages = sqlx::query_as::<_, MessageWithAuthor>(
        r#"
        SELECT m.id, m.channel_id, m.author_id, m.content, m.message_type,
               m.metadata, m.is_ai, m.ai_prompt, m.created_at,
               u.email AS author_email,
               u.first_name AS author_first_name,
               u.last_name AS author_last_name,
               u.profile_image_url AS author_image_url
        FROM messages m
        LEFT JOIN users u ON u.id = m.author_id
        WHERE m.channel_id = ?
        ORDER BY m.created_at DESC, m.id DESC
        LIMIT ?
        "#,
    )
    .bind(channel_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewChannel, NewUser, NewWorkspace};
    use crate::{channel, user, workspace, Database};

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seed_channel(db: &Database) -> (i64, i64) {
        let author = user::create_user(
            db.pool(),
            &NewUser {
                email: "author@example.com".to_string(),
                password_hash: "hash".to_string(),
                first_name: Some("Ada".to_string()),
                last_name: None,
                profile_image_url: None,
            },
        )
        .await
        .unwrap();
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
                name: "algebra".to_string(),
                description: None,
                channel_type: "subject".to_string(),
            },
        )
        .await
        .unwrap();
        (ch.id, author.id)
    }

    fn text_message(channel_id: i64, author_id: i64, content: &str) -> NewMessage {
        NewMessage {
            channel_id,
            author_id: Some(author_id),
            content: content.to_string(),
            message_type: "text".to_string(),
            metadata: None,
            is_ai: false,
            ai_prompt: None,
        }
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_limited() {
        let db = test_db().await;
        let (channel_id, author_id) = seed_channel(&db).await;

        for i in 1..=5 {
            create_message(db.pool(), &text_message(channel_id, author_id, &format!("m{}", i)))
                .await
                .unwrap();
        }

        let page = get_channel_messages(db.pool(), channel_id, 3).await.unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].content, "m5");
        assert_eq!(page[1].content, "m4");
        assert_eq!(page[2].content, "m3");
        assert_eq!(page[0].author_email.as_deref(), Some("author@example.com"));
    }

    #[tokio::test]
    async fn test_ai_message_has_no_author() {
        let db = test_db().await;
        let (channel_id, _) = seed_channel(&db).await;

        let created = create_message(
            db.pool(),
            &NewMessage {
                channel_id,
                author_id: None,
                content: "{\"title\":\"Fractions\"}".to_string(),
                message_type: "ai_article".to_string(),
                metadata: None,
                is_ai: true,
                ai_prompt: Some("fractions".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(created.is_ai);
        assert_eq!(created.author_id, None);

        let page = get_channel_messages(db.pool(), channel_id, DEFAULT_MESSAGE_LIMIT)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert!(page[0].is_ai);
        assert_eq!(page[0].author_email, None);
    }

    #[tokio::test]
    async fn test_get_message_not_found() {
        let db = test_db().await;
        let missing = get_message(db.pool(), 999).await;
        assert!(matches!(
            missing,
            Err(DatabaseError::NotFound { entity: "Message", .. })
        ));
    }
}
