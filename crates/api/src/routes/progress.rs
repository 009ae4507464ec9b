//! Study progress routes.

use axum::extract::{Path, State};
use axum::Json;
use database::models::{ChannelProgress, ProgressUpdate, StudyProgress};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validate::FieldError;

/// Progress in one channel as returned to clients.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgressResponse {
    pub id: i64,
    pub channel_id: i64,
    pub topics_studied: i64,
    pub daily_goal: i64,
    pub last_activity: String,
    pub created_at: String,
}

impl From<StudyProgress> for StudyProgressResponse {
    fn from(p: StudyProgress) -> Self {
        Self {
            id: p.id,
            channel_id: p.channel_id,
            topics_studied: p.topics_studied,
            daily_goal: p.daily_goal,
            last_activity: p.last_activity,
            created_at: p.created_at,
        }
    }
}

/// Progress joined with its channel name, for the overview listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProgressResponse {
    pub channel_id: i64,
    pub channel_name: String,
    pub topics_studied: i64,
    pub daily_goal: i64,
    pub last_activity: String,
}

impl From<ChannelProgress> for ChannelProgressResponse {
    fn from(p: ChannelProgress) -> Self {
        Self {
            channel_id: p.channel_id,
            channel_name: p.channel_name,
            topics_studied: p.topics_studied,
            daily_goal: p.daily_goal,
            last_activity: p.last_activity,
        }
    }
}

/// Request to set progress counters for a channel.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgressRequest {
    pub channel_id: i64,
    #[serde(default)]
    pub topics_studied: Option<i64>,
    #[serde(default)]
    pub daily_goal: Option<i64>,
}

/// List the current user's progress across all channels.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ChannelProgressResponse>>> {
    let progress = database::study_progress::get_user_daily_progress(state.db.pool(), user.id).await?;
    Ok(Json(progress.into_iter().map(Into::into).collect()))
}

/// Fetch progress for one channel. `null` when nothing is recorded yet.
pub async fn get_one(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(channel_id): Path<i64>,
) -> Result<Json<Option<StudyProgressResponse>>> {
    let progress =
        database::study_progress::get_progress(state.db.pool(), user.id, channel_id).await?;
    Ok(Json(progress.map(Into::into)))
}

/// Create or update progress counters for a channel.
///
/// Omitted fields keep their stored value; on first contact they take
/// the defaults (zero topics, goal of five).
pub async fn upsert(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpsertProgressRequest>,
) -> Result<Json<StudyProgressResponse>> {
    let mut errors = Vec::new();
    if matches!(req.topics_studied, Some(n) if n < 0) {
        errors.push(FieldError::new("topicsStudied", "must not be negative"));
    }
    if matches!(req.daily_goal, Some(n) if n < 1) {
        errors.push(FieldError::new("dailyGoal", "must be at least 1"));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let channel = database::channel::get_channel(state.db.pool(), req.channel_id).await?;
    let progress = database::study_progress::upsert_progress(
        state.db.pool(),
        user.id,
        channel.id,
        &ProgressUpdate {
            topics_studied: req.topics_studied,
            daily_goal: req.daily_goal,
        },
    )
    .await?;

    Ok(Json(progress.into()))
}

/// Count one more topic studied in a channel.
pub async fn record_studied(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(channel_id): Path<i64>,
) -> Result<Json<StudyProgressResponse>> {
    let channel = database::channel::get_channel(state.db.pool(), channel_id).await?;
    let progress =
        database::study_progress::record_topic_studied(state.db.pool(), user.id, channel.id).await?;
    Ok(Json(progress.into()))
}
