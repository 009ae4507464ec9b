//! Study progress operations.
//!
//! Progress is one row per (user, channel), written with upserts so
//! concurrent updates never race a separate existence check.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{ChannelProgress, ProgressUpdate, StudyProgress};

/// Get a user's progress in a channel, if any has been recorded.
pub async fn get_progress(
    pool: &SqlitePool,
    user_id: i64,
    channel_id: i64,
) -> Result<Option<StudyProgress>> {
    let progress = sqlx::query_as::<_, StudyProgress>(
        r#"
        SELECT id, user_id, channel_id, topics_studied, daily_goal, last_activity, created_at
        FROM study_progress
        WHERE user_id = ? AND channel_id = ?
        "#,
    )
    .bind(user_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(progress)
}

/// Create or update a user's progress row in one statement.
///
/// `None` fields in the update keep their current value on an existing
/// row and fall back to the defaults (0 studied, goal of 5) on a fresh
/// one. `last_activity` is always bumped.
pub async fn upsert_progress(
    pool: &SqlitePool,
    user_id: i64,
    channel_id: i64,
    update: &ProgressUpdate,
) -> Result<StudyProgress> {
    let progress = sqlx::query_as::<_, StudyProgress>(
        r#"
        INSERT INTO study_progress (user_id, channel_id, topics_studied, daily_goal, last_activity)
        VALUES (?, ?, COALESCE(?, 0), COALESCE(?, 5), datetime('now'))
        ON CONFLICT(user_id, channel_id) DO UPDATE SET
            topics_studied = COALESCE(?, study_progress.topics_studied),
            daily_goal = COALESCE(?, study_progress.daily_goal),
            last_activity = datetime('now')
        RETURNING id, user_id, channel_id, topics_studied, daily_goal, last_activity, created_at
        "#,
    )
    .bind(user_id)
    .bind(channel_id)
    .bind(update.topics_studied)
    .bind(update.daily_goal)
    .bind(update.topics_studied)
    .bind(update.daily_goal)
    .fetch_one(pool)
    .await?;

    Ok(progress)
}

/// Bump the studied-topics counter for a channel by one, seeding the
/// row on first use.
pub async fn record_topic_studied(
    pool: &SqlitePool,
    user_id: i64,
    channel_id: i64,
) -> Result<StudyProgress> {
    let progress = sqlx::query_as::<_, StudyProgress>(
        r#"
        INSERT INTO study_progress (user_id, channel_id, topics_studied, last_activity)
        VALUES (?, ?, 1, datetime('now'))
        ON CONFLICT(user_id, channel_id) DO UPDATE SET
            topics_studied = study_progress.topics_studied + 1,
            last_activity = datetime('now')
        RETURNING id, user_id, channel_id, topics_studied, daily_goal, last_activity, created_at
        "#,
    )
    .bind(user_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await?;

    Ok(progress)
}

/// List a user's progress across all channels, joined with channel
/// names, ordered by channel name.
pub async fn get_user_daily_progress(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<ChannelProgress>> {
    let rows = sqlx::query_as::<_, ChannelProgress>(
        r#"
        SELECT sp.channel_id, c.name AS channel_name,
               sp.topics_studied, sp.daily_goal, sp.last_activity
        FROM study_progress sp
        INNER JOIN channels c ON c.id = sp.channel_id
        WHERE sp.user_id = ?
        ORDER BY c.name, sp.channel_id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
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

    async fn seed_channels(db: &Database, names: &[&str]) -> (i64, Vec<i64>) {
        let owner = user::create_user(
            db.pool(),
            &NewUser {
                email: "learner@example.com".to_string(),
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
                owner_id: owner.id,
            },
        )
        .await
        .unwrap();
        let mut channel_ids = Vec::new();
        for name in names {
            let ch = channel::create_channel(
                db.pool(),
                &NewChannel {
                    workspace_id: ws.id,
                    name: name.to_string(),
                    description: None,
                    channel_type: "subject".to_string(),
                },
            )
            .await
            .unwrap();
            channel_ids.push(ch.id);
        }
        (owner.id, channel_ids)
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates_same_row() {
        let db = test_db().await;
        let (user_id, channels) = seed_channels(&db, &["algebra"]).await;
        let channel_id = channels[0];

        let first = upsert_progress(
            db.pool(),
            user_id,
            channel_id,
            &ProgressUpdate {
                topics_studied: Some(1),
                daily_goal: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(first.topics_studied, 1);
        assert_eq!(first.daily_goal, 5);

        let second = upsert_progress(
            db.pool(),
            user_id,
            channel_id,
            &ProgressUpdate {
                topics_studied: Some(2),
                daily_goal: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.topics_studied, 2);

        let rows = get_user_daily_progress(db.pool(), user_id).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let db = test_db().await;
        let (user_id, channels) = seed_channels(&db, &["algebra"]).await;
        let channel_id = channels[0];

        upsert_progress(
            db.pool(),
            user_id,
            channel_id,
            &ProgressUpdate {
                topics_studied: Some(3),
                daily_goal: Some(10),
            },
        )
        .await
        .unwrap();

        let updated = upsert_progress(
            db.pool(),
            user_id,
            channel_id,
            &ProgressUpdate {
                topics_studied: None,
                daily_goal: Some(7),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.topics_studied, 3);
        assert_eq!(updated.daily_goal, 7);
    }

    #[tokio::test]
    async fn test_record_topic_studied_increments() {
        let db = test_db().await;
        let (user_id, channels) = seed_channels(&db, &["algebra"]).await;
        let channel_id = channels[0];

        assert!(get_progress(db.pool(), user_id, channel_id)
            .await
            .unwrap()
            .is_none());

        let first = record_topic_studied(db.pool(), user_id, channel_id)
            .await
            .unwrap();
        assert_eq!(first.topics_studied, 1);
        assert_eq!(first.daily_goal, 5);

        let second = record_topic_studied(db.pool(), user_id, channel_id)
            .await
            .unwrap();
        assert_eq!(second.topics_studied, 2);
    }

    #[tokio::test]
    async fn test_daily_progress_ordered_by_channel_name() {
        let db = test_db().await;
        let (user_id, channels) = seed_channels(&db, &["biology", "algebra"]).await;

        for channel_id in &channels {
            record_topic_studied(db.pool(), user_id, *channel_id)
                .await
                .unwrap();
        }

        let rows = get_user_daily_progress(db.pool(), user_id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].channel_name, "algebra");
        assert_eq!(rows[1].channel_name, "biology");
    }
}
