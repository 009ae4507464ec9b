//! Workspace and membership routes.

use axum::extract::{Path, State};
use axum::Json;
use database::models::{MemberRole, MemberWithUser, NewWorkspace, WorkspaceWithMembers};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validate::{self, FieldError};

/// A workspace with its member count.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub member_count: i64,
    pub created_at: String,
}

impl From<WorkspaceWithMembers> for WorkspaceResponse {
    fn from(w: WorkspaceWithMembers) -> Self {
        Self {
            id: w.id,
            name: w.name,
            description: w.description,
            owner_id: w.owner_id,
            member_count: w.member_count,
            created_at: w.created_at,
        }
    }
}

/// Request to create a workspace.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A workspace member joined with their user profile.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
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

impl From<MemberWithUser> for MemberResponse {
    fn from(m: MemberWithUser) -> Self {
        Self {
            id: m.id,
            workspace_id: m.workspace_id,
            user_id: m.user_id,
            role: m.role,
            joined_at: m.joined_at,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            profile_image_url: m.profile_image_url,
        }
    }
}

/// Request to add a member to a workspace.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: i64,
    #[serde(default)]
    pub role: Option<String>,
}

/// List the workspaces the current user belongs to.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<WorkspaceResponse>>> {
    let workspaces = database::workspace::get_user_workspaces(state.db.pool(), user.id).await?;
    Ok(Json(workspaces.into_iter().map(Into::into).collect()))
}

/// Create a workspace owned by the current user.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateWorkspaceRequest>,
) -> Result<Json<WorkspaceResponse>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "name", &req.name, validate::MAX_NAME_LENGTH);
    validate::finish(errors)?;

    let workspace = database::workspace::create_workspace(
        state.db.pool(),
        &NewWorkspace {
            name: req.name.trim().to_string(),
            description: req.description,
            owner_id: user.id,
        },
    )
    .await?;
    info!(workspace_id = workspace.id, owner_id = user.id, "Workspace created");

    Ok(Json(WorkspaceResponse {
        id: workspace.id,
        name: workspace.name,
        description: workspace.description,
        owner_id: workspace.owner_id,
        member_count: 1,
        created_at: workspace.created_at,
    }))
}

/// List the members of a workspace the current user belongs to.
///
/// Non-members get a 404 rather than a 403, so the route does not
/// reveal which workspace ids exist.
pub async fn list_members(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<Vec<MemberResponse>>> {
    if !database::workspace::is_member(state.db.pool(), workspace_id, user.id).await? {
        return Err(ApiError::NotFound("Workspace"));
    }

    let members = database::workspace::get_members(state.db.pool(), workspace_id).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Add a user to a workspace the current user belongs to.
pub async fn add_member(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<i64>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<MemberResponse>> {
    if !database::workspace::is_member(state.db.pool(), workspace_id, user.id).await? {
        return Err(ApiError::NotFound("Workspace"));
    }

    let role = match &req.role {
        Some(value) => MemberRole::from_str(value).ok_or_else(|| {
            ApiError::Validation(vec![FieldError::new(
                "role",
                "must be one of: admin, member",
            )])
        })?,
        None => MemberRole::Member,
    };

    let target = database::user::get_user(state.db.pool(), req.user_id).await?;
    let member =
        database::workspace::add_member(state.db.pool(), workspace_id, target.id, role).await?;
    info!(
        workspace_id,
        user_id = target.id,
        role = %member.role,
        "Member added"
    );

    Ok(Json(MemberResponse {
        id: member.id,
        workspace_id: member.workspace_id,
        user_id: member.user_id,
        role: member.role,
        joined_at: member.joined_at,
        email: target.email,
        first_name: target.first_name,
        last_name: target.last_name,
        profile_image_url: target.profile_image_url,
    }))
}
