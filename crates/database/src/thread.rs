//! Thread reply operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{NewThread, Thread, ThreadWithAuthor};

/// Append a reply to a message's thread.
pub async fn create_thread(pool: &SqlitePool, params: &NewThread) -> Result<Thread> {
    let thread = sqlx::query_as::<_, Thread>(
        r#"
        INSERT INTO threads (message_id, author_id, content, is_ai, note_type, rich_text)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, message_id, author_id, content, is_ai, note_type, rich_text, created_at
        "#,
    )
    .bind(params.message_id)
    .bind(params.author_id)
    .bind(&params.content)
    .bind(params.is_ai)
    .bind(&params.note_type)
    .bind(params.rich_text)
    .fetch_one(pool)
    .await?;

    Ok(thread)
}

/// List a message's thread replies in chronological order.
pub async fn get_message_threads(
    pool: &SqlitePool,
    message_id: i64,
) -> Result<Vec<ThreadWithAuthor>> {
    let threads = sqlx::query_as::<_, ThreadWithAuthor>(
        r#"
        SELECT t.id, t.message_id, t.author_id, t.content, t.is_ai,
               t.note_type, t.rich_text, t.created_at,
               u.email AS author_email,
               u.first_name AS author_first_name,
               u.last_name AS author_last_name,
               u.profile_image_url AS author_image_url
        FROM threads t
        LEFT JOIN users u ON u.id = t.author_id
        WHERE t.message_id = ?
        ORDER BY t.created_at, t.id
        "#,
    )
    .bind(message_id)
    .fetch_all(pool)
    .await?;

    Ok(threads)
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

    async fn seed_message(db: &Database) -> (i64, i64) {
        let author = user::create_user(
            db.pool(),
            &NewUser {
                email: "author@example.com".to_string(),
                password_hash: "hash".to_string(),
                first_name: None,
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
        let msg = message::create_message(
            db.pool(),
            &NewMessage {
                channel_id: ch.id,
                author_id: Some(author.id),
                content: "What is a group?".to_string(),
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
    async fn test_replies_are_chronological() {
        let db = test_db().await;
        let (message_id, author_id) = seed_message(&db).await;

        for content in ["first", "second", "third"] {
            create_thread(
                db.pool(),
                &NewThread {
                    message_id,
                    author_id: Some(author_id),
                    content: content.to_string(),
                    is_ai: false,
                    note_type: None,
                    rich_text: false,
                },
            )
            .await
            .unwrap();
        }

        let replies = get_message_threads(db.pool(), message_id).await.unwrap();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0].content, "first");
        assert_eq!(replies[1].content, "second");
        assert_eq!(replies[2].content, "third");
    }

    #[tokio::test]
    async fn test_ai_reply_joins_without_author() {
        let db = test_db().await;
        let (message_id, _) = seed_message(&db).await;

        create_thread(
            db.pool(),
            &NewThread {
                message_id,
                author_id: None,
                content: "A group is a set with an associative operation.".to_string(),
                is_ai: true,
                note_type: None,
                rich_text: false,
            },
        )
        .await
        .unwrap();

        let replies = get_message_threads(db.pool(), message_id).await.unwrap();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].is_ai);
        assert_eq!(replies[0].author_email, None);
    }
}
