//! Workspace and membership operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{
    MemberRole, MemberWithUser, NewWorkspace, Workspace, WorkspaceMember, WorkspaceWithMembers,
};

/// Create a workspace, returning the persisted row.
///
/// The owner's admin membership row is inserted in the same transaction,
/// so a workspace is never observable without its owner as a member.
pub async fn create_workspace(pool: &SqlitePool, params: &NewWorkspace) -> Result<Workspace> {
    let mut tx = pool.begin().await?;

    let workspace = sqlx::query_as::<_, Workspace>(
        r#"
        INSERT INTO workspaces (name, description, owner_id)
        VALUES (?, ?, ?)
        RETURNING id, name, description, owner_id, created_at
        "#,
    )
    .bind(&params.name)
    .bind(&params.description)
    .bind(params.owner_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO workspace_members (workspace_id, user_id, role)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(workspace.id)
    .bind(params.owner_id)
    .bind(MemberRole::Admin.as_str())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(workspace_id = workspace.id, owner_id = params.owner_id, "Workspace created");

    Ok(workspace)
}

/// Get a workspace by ID.
pub async fn get_workspace(pool: &SqlitePool, id: i64) -> Result<Workspace> {
    sqlx::query_as::<_, Workspace>(
        r#"
        SELECT id, name, description, owner_id, created_at
        FROM workspaces
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Workspace",
        id: id.to_string(),
    })
}

/// List the workspaces a user belongs to, each with its member count.
///
/// One grouped query; the `mine` join filters to the user's workspaces
/// while `members` is re-joined to count every membership row.
pub async fn get_user_workspaces(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<WorkspaceWithMembers>> {
    let workspaces = sqlx::query_as::<_, WorkspaceWithMembers>(
        r#"
        SELECT w.id, w.name, w.description, w.owner_id, w.created_at,
               COUNT(DISTINCT members.user_id) AS member_count
        FROM workspaces w
        INNER JOIN workspace_members mine
            ON mine.workspace_id = w.id AND mine.user_id = ?
        INNER JOIN workspace_members members
            ON members.workspace_id = w.id
        GROUP BY w.id
        ORDER BY w.created_at, w.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(workspaces)
}

/// Add a member to a workspace.
pub async fn add_member(
    pool: &SqlitePool,
    workspace_id: i64,
    user_id: i64,
    role: MemberRole,
) -> Result<WorkspaceMember> {
    sqlx::query_as::<_, WorkspaceMember>(
        r#"
        INSERT INTO workspace_members (workspace_id, user_id, role)
        VALUES (?, ?, ?)
        RETURNING id, workspace_id, user_id, role, joined_at
        "#,
    )
    .bind(workspace_id)
    .bind(user_id)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        DatabaseError::insert_conflict(e, "Membership", format!("{}/{}", workspace_id, user_id))
    })
}

/// List the members of a workspace with their user records.
pub async fn get_members(pool: &SqlitePool, workspace_id: i64) -> Result<Vec<MemberWithUser>> {
    let members = sqlx::query_as::<_, MemberWithUser>(
        r#"
        SELECT wm.id, wm.workspace_id, wm.user_id, wm.role, wm.joined_at,
               u.email, u.first_name, u.last_name, u.profile_image_url
        FROM workspace_members wm
        INNER JOIN users u ON u.id = wm.user_id
        WHERE wm.workspace_id = ?
        ORDER BY wm.joined_at, wm.id
        "#,
    )
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

/// Check whether a user is a member of a workspace.
pub async fn is_member(pool: &SqlitePool, workspace_id: i64, user_id: i64) -> Result<bool> {
    let row = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT 1
        FROM workspace_members
        WHERE workspace_id = ? AND user_id = ?
        "#,
    )
    .bind(workspace_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, NewWorkspace};
    use crate::{user, Database};

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seed_user(db: &Database, email: &str) -> i64 {
        user::create_user(
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
        .id
    }

    async fn seed_workspace(db: &Database, name: &str, owner_id: i64) -> Workspace {
        create_workspace(
            db.pool(),
            &NewWorkspace {
                name: name.to_string(),
                description: None,
                owner_id,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_grants_owner_admin_membership() {
        let db = test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;

        let workspace = seed_workspace(&db, "Physics 101", owner).await;

        let members = get_members(db.pool(), workspace.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, owner);
        assert_eq!(members[0].role, "admin");
    }

    #[tokio::test]
    async fn test_member_count_counts_all_members() {
        let db = test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let friend = seed_user(&db, "friend@example.com").await;

        let shared = seed_workspace(&db, "Shared", owner).await;
        let solo = seed_workspace(&db, "Solo", owner).await;
        add_member(db.pool(), shared.id, friend, MemberRole::Member)
            .await
            .unwrap();

        let listed = get_user_workspaces(db.pool(), owner).await.unwrap();
        assert_eq!(listed.len(), 2);
        let shared_row = listed.iter().find(|w| w.id == shared.id).unwrap();
        let solo_row = listed.iter().find(|w| w.id == solo.id).unwrap();
        assert_eq!(shared_row.member_count, 2);
        assert_eq!(solo_row.member_count, 1);

        // The friend only sees the shared workspace.
        let friend_view = get_user_workspaces(db.pool(), friend).await.unwrap();
        assert_eq!(friend_view.len(), 1);
        assert_eq!(friend_view[0].id, shared.id);
        assert_eq!(friend_view[0].member_count, 2);
    }

    #[tokio::test]
    async fn test_duplicate_membership_rejected() {
        let db = test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let workspace = seed_workspace(&db, "Maths", owner).await;

        let duplicate = add_member(db.pool(), workspace.id, owner, MemberRole::Member).await;
        assert!(matches!(
            duplicate,
            Err(DatabaseError::AlreadyExists { entity: "Membership", .. })
        ));
    }

    #[tokio::test]
    async fn test_is_member() {
        let db = test_db().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let outsider = seed_user(&db, "outsider@example.com").await;
        let workspace = seed_workspace(&db, "Chemistry", owner).await;

        assert!(is_member(db.pool(), workspace.id, owner).await.unwrap());
        assert!(!is_member(db.pool(), workspace.id, outsider).await.unwrap());
    }
}
