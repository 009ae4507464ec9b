//! StudyHub HTTP API server.
//!
//! Serves the REST API for workspaces, channels, messages, threads,
//! bookmarks, study progress and AI content generation.

mod auth;
mod config;
mod error;
mod routes;
mod state;
mod validate;

use std::sync::Arc;

use database::Database;
use demo_tutor::DemoTutor;
use openai_tutor::{OpenAiTutor, OpenAiTutorConfig};
use tracing::info;
use tutor_core::Tutor;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting StudyHub API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Pick a tutor: OpenAI when a key is configured, canned demo otherwise
    let tutor: Arc<dyn Tutor> = match config.openai_api_key {
        Some(_) => Arc::new(OpenAiTutor::new(OpenAiTutorConfig::from_env()?)?),
        None => {
            info!("OPENAI_API_KEY not set, using demo tutor");
            Arc::new(DemoTutor::new())
        }
    };
    info!(tutor = tutor.name(), "Tutor ready");

    // Build application state
    let state = AppState::new(db, tutor, config.session_ttl());

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "StudyHub API server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
