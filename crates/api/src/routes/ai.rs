//! AI content generation routes.
//!
//! Generated articles and quizzes are persisted as channel messages so
//! they show up in history like any other post; study plans and term
//! definitions are returned without being stored.

use axum::extract::State;
use axum::Json;
use database::models::{MessageKind, NewMessage, NewThread};
use serde::{Deserialize, Serialize};
use tracing::info;
use tutor_core::{Article, Quiz, StudyPlan, ThreadContext};

use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::routes::messages::MessageResponse;
use crate::routes::threads::ThreadResponse;
use crate::state::AppState;
use crate::validate;

const DEFAULT_QUESTION_COUNT: usize = 5;
const MAX_QUESTION_COUNT: usize = 10;

/// Request to generate an article into a channel.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateArticleRequest {
    pub channel_id: i64,
    pub topic: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Request to generate a quiz into a channel.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub channel_id: i64,
    pub topic: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub question_count: Option<usize>,
}

/// Request to generate an AI reply in a message's thread.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponseRequest {
    pub message_id: i64,
    pub question: String,
}

/// Request to generate a study plan.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStudyPlanRequest {
    pub subject: String,
    pub goals: String,
    pub timeframe: String,
}

/// Request to define a term.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDefinitionRequest {
    pub term: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// An article together with the message it was stored as.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMessageResponse {
    pub message: MessageResponse,
    pub article: Article,
}

/// A quiz together with the message it was stored as.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizMessageResponse {
    pub message: MessageResponse,
    pub quiz: Quiz,
}

/// A term definition.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionResponse {
    pub term: String,
    pub definition: String,
}

fn subject_or_channel(subject: Option<String>, channel_name: &str) -> String {
    subject
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| channel_name.to_string())
}

fn clamp_question_count(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_QUESTION_COUNT)
        .clamp(1, MAX_QUESTION_COUNT)
}

/// Generate an article and store it as an AI message in the channel.
pub async fn generate_article(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<GenerateArticleRequest>,
) -> Result<Json<ArticleMessageResponse>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "topic", &req.topic, validate::MAX_NAME_LENGTH);
    validate::finish(errors)?;

    let channel = database::channel::get_channel(state.db.pool(), req.channel_id).await?;
    let subject = subject_or_channel(req.subject, &channel.name);
    info!(channel_id = channel.id, topic = %req.topic, "Generating article");

    let article = state.tutor.generate_article(req.topic.trim(), &subject).await?;
    let content = serde_json::to_string(&article)
        .map_err(|e| ApiError::Internal(format!("failed to serialize article: {e}")))?;

    let message = database::message::create_message(
        state.db.pool(),
        &NewMessage {
            channel_id: channel.id,
            author_id: None,
            content,
            message_type: MessageKind::Article.as_str().to_string(),
            metadata: None,
            is_ai: true,
            ai_prompt: Some(req.topic.trim().to_string()),
        },
    )
    .await?;

    Ok(Json(ArticleMessageResponse {
        message: MessageResponse::from_message(message, None),
        article,
    }))
}

/// Generate a quiz and store it as an AI message in the channel.
pub async fn generate_quiz(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<GenerateQuizRequest>,
) -> Result<Json<QuizMessageResponse>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "topic", &req.topic, validate::MAX_NAME_LENGTH);
    validate::finish(errors)?;

    let channel = database::channel::get_channel(state.db.pool(), req.channel_id).await?;
    let subject = subject_or_channel(req.subject, &channel.name);
    let question_count = clamp_question_count(req.question_count);
    info!(
        channel_id = channel.id,
        topic = %req.topic,
        question_count,
        "Generating quiz"
    );

    let quiz = state
        .tutor
        .generate_quiz(req.topic.trim(), &subject, question_count)
        .await?;
    let content = serde_json::to_string(&quiz)
        .map_err(|e| ApiError::Internal(format!("failed to serialize quiz: {e}")))?;

    let message = database::message::create_message(
        state.db.pool(),
        &NewMessage {
            channel_id: channel.id,
            author_id: None,
            content,
            message_type: MessageKind::Quiz.as_str().to_string(),
            metadata: None,
            is_ai: true,
            ai_prompt: Some(req.topic.trim().to_string()),
        },
    )
    .await?;

    Ok(Json(QuizMessageResponse {
        message: MessageResponse::from_message(message, None),
        quiz,
    }))
}

/// Generate an AI reply in a message's thread and store it.
pub async fn thread_response(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<ThreadResponseRequest>,
) -> Result<Json<ThreadResponse>> {
    let mut errors = Vec::new();
    validate::check_text(
        &mut errors,
        "question",
        &req.question,
        validate::MAX_CONTENT_LENGTH,
    );
    validate::finish(errors)?;

    let parent = database::message::get_message(state.db.pool(), req.message_id).await?;
    let channel = database::channel::get_channel(state.db.pool(), parent.channel_id).await?;
    info!(message_id = parent.id, "Generating thread reply");

    let context = ThreadContext {
        parent_content: parent.content.clone(),
        subject: Some(channel.name),
    };
    let reply = state
        .tutor
        .generate_thread_reply(req.question.trim(), &context)
        .await?;

    let thread = database::thread::create_thread(
        state.db.pool(),
        &NewThread {
            message_id: parent.id,
            author_id: None,
            content: reply,
            is_ai: true,
            note_type: None,
            rich_text: false,
        },
    )
    .await?;

    Ok(Json(ThreadResponse::from_thread(thread, None)))
}

/// Generate a study plan. The plan is returned directly, not stored.
pub async fn generate_study_plan(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<GenerateStudyPlanRequest>,
) -> Result<Json<StudyPlan>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "subject", &req.subject, validate::MAX_NAME_LENGTH);
    validate::check_text(&mut errors, "goals", &req.goals, validate::MAX_CONTENT_LENGTH);
    validate::check_text(&mut errors, "timeframe", &req.timeframe, validate::MAX_NAME_LENGTH);
    validate::finish(errors)?;

    info!(subject = %req.subject, "Generating study plan");
    let plan = state
        .tutor
        .generate_study_plan(req.subject.trim(), req.goals.trim(), req.timeframe.trim())
        .await?;

    Ok(Json(plan))
}

/// Define a term. Always succeeds; provider failures fall back to a
/// canned definition inside the tutor.
pub async fn term_definition(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<TermDefinitionRequest>,
) -> Result<Json<DefinitionResponse>> {
    let mut errors = Vec::new();
    validate::check_text(&mut errors, "term", &req.term, validate::MAX_NAME_LENGTH);
    validate::finish(errors)?;

    let term = req.term.trim().to_string();
    let definition = state
        .tutor
        .term_definition(&term, req.subject.as_deref())
        .await;

    Ok(Json(DefinitionResponse { term, definition }))
}
