//! User CRUD and credential operations.

use std::time::Duration;

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, ProfileUpdate, User};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, \
     profile_image_url, reset_token, reset_token_expires, created_at";

/// Create a new user, returning the persisted row.
pub async fn create_user(pool: &SqlitePool, new_user: &NewUser) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password_hash, first_name, last_name, profile_image_url)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#,
    ))
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.profile_image_url)
    .fetch_one(pool)
    .await
    .map_err(|e| DatabaseError::insert_conflict(e, "User", new_user.email.clone()))
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE id = ?
        "#,
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Look up a user by email. Returns `None` when no account exists, so the
/// caller can treat unknown email and bad password identically.
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE email = ?
        "#,
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Apply a partial profile update, returning the updated row.
pub async fn update_profile(pool: &SqlitePool, id: i64, update: &ProfileUpdate) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name),
            profile_image_url = COALESCE(?, profile_image_url)
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#,
    ))
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.profile_image_url)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Store a password-reset token with the given time-to-live.
pub async fn set_reset_token(
    pool: &SqlitePool,
    user_id: i64,
    token: &str,
    ttl: Duration,
) -> Result<()> {
    let modifier = format!("+{} seconds", ttl.as_secs());
    let result = sqlx::query(
        r#"
        UPDATE users
        SET reset_token = ?, reset_token_expires = datetime('now', ?)
        WHERE id = ?
        "#,
    )
    .bind(token)
    .bind(modifier)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id.to_string(),
        });
    }

    Ok(())
}

/// Find the user holding an unexpired reset token.
pub async fn get_user_by_reset_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE reset_token = ? AND reset_token_expires > datetime('now')
        "#,
    ))
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Replace a user's password hash and clear any pending reset token.
pub async fn update_password(pool: &SqlitePool, user_id: i64, password_hash: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = ?, reset_token = NULL, reset_token_expires = NULL
        WHERE id = ?
        "#,
    )
    .bind(password_hash)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seed_user(db: &Database, email: &str) -> User {
        create_user(
            db.pool(),
            &NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                first_name: None,
                last_name: None,
                profile_image_url: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let db = test_db().await;
        let user = seed_user(&db, "carol@example.com").await;

        let updated = update_profile(
            db.pool(),
            user.id,
            &ProfileUpdate {
                first_name: Some("Carol".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Carol"));

        // A second partial update must not clear the first field.
        let updated = update_profile(
            db.pool(),
            user.id,
            &ProfileUpdate {
                last_name: Some("Shaw".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Carol"));
        assert_eq!(updated.last_name.as_deref(), Some("Shaw"));
    }

    #[tokio::test]
    async fn test_reset_token_flow() {
        let db = test_db().await;
        let user = seed_user(&db, "dave@example.com").await;

        set_reset_token(db.pool(), user.id, "tok-123", Duration::from_secs(3600))
            .await
            .unwrap();

        let found = get_user_by_reset_token(db.pool(), "tok-123").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));

        let missing = get_user_by_reset_token(db.pool(), "tok-999").await.unwrap();
        assert!(missing.is_none());

        update_password(db.pool(), user.id, "new-hash").await.unwrap();

        // Consuming the reset clears the token.
        let cleared = get_user_by_reset_token(db.pool(), "tok-123").await.unwrap();
        assert!(cleared.is_none());
        let user = get_user(db.pool(), user.id).await.unwrap();
        assert_eq!(user.password_hash, "new-hash");
        assert!(user.reset_token.is_none());
        assert!(user.reset_token_expires.is_none());
    }

    #[tokio::test]
    async fn test_expired_reset_token_is_invisible() {
        let db = test_db().await;
        let user = seed_user(&db, "erin@example.com").await;

        // Zero TTL expires immediately.
        set_reset_token(db.pool(), user.id, "tok-expired", Duration::from_secs(0))
            .await
            .unwrap();

        let found = get_user_by_reset_token(db.pool(), "tok-expired")
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
