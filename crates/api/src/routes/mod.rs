//! Route handlers for the StudyHub API.

pub mod ai;
pub mod auth;
pub mod bookmarks;
pub mod channels;
pub mod health;
pub mod messages;
pub mod progress;
pub mod threads;
pub mod workspaces;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Auth and profile
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/profile", put(auth::update_profile))
        // Workspaces and membership
        .route("/api/workspaces", get(workspaces::list).post(workspaces::create))
        .route(
            "/api/workspaces/:id/members",
            get(workspaces::list_members).post(workspaces::add_member),
        )
        // Channels
        .route(
            "/api/workspaces/:id/channels",
            get(channels::list).post(channels::create),
        )
        // Messages and threads
        .route(
            "/api/channels/:id/messages",
            get(messages::list).post(messages::create),
        )
        .route(
            "/api/messages/:id/threads",
            get(threads::list).post(threads::create),
        )
        // Bookmarks
        .route(
            "/api/messages/:id/bookmark",
            post(bookmarks::create).delete(bookmarks::remove),
        )
        .route("/api/bookmarks", get(bookmarks::list))
        // Study progress
        .route(
            "/api/study-progress",
            get(progress::list).post(progress::upsert),
        )
        .route("/api/study-progress/:channel_id", get(progress::get_one))
        .route(
            "/api/study-progress/:channel_id/studied",
            post(progress::record_studied),
        )
        // AI generation
        .route("/api/ai/generate-article", post(ai::generate_article))
        .route("/api/ai/generate-quiz", post(ai::generate_quiz))
        .route("/api/ai/thread-response", post(ai::thread_response))
        .route("/api/ai/generate-study-plan", post(ai::generate_study_plan))
        .route("/api/ai/term-definition", post(ai::term_definition))
}
