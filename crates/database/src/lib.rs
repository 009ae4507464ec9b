//! SQLite persistence layer for StudyHub.
//!
//! This crate is the sole point of contact with the persistent store. It
//! provides async operations over users, sessions, workspaces, channels,
//! messages, threads, bookmarks, and study progress using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{models::NewUser, user, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:studyhub.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let new_user = NewUser {
//!         email: "ada@example.com".to_string(),
//!         password_hash: "$2b$12$...".to_string(),
//!         first_name: Some("Ada".to_string()),
//!         last_name: None,
//!         profile_image_url: None,
//!     };
//!     let user = user::create_user(db.pool(), &new_user).await?;
//!     println!("created user {}", user.id);
//!
//!     Ok(())
//! }
//! ```

pub mod bookmark;
pub mod channel;
pub mod error;
pub mod message;
pub mod models;
pub mod session;
pub mod study_progress;
pub mod thread;
pub mod user;
pub mod workspace;

pub use error::{DatabaseError, Result};
pub use models::{
    Bookmark, BookmarkedMessage, Channel, ChannelKind, ChannelProgress, MemberRole,
    MemberWithUser, Message, MessageKind, MessageWithAuthor, Session, StudyProgress, Thread,
    ThreadWithAuthor, User, Workspace, WorkspaceMember, WorkspaceWithMembers,
};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size. High enough that a burst of concurrent requests
    /// does not queue on connection acquisition.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist,
    /// or `sqlite::memory:` for an in-memory database.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    ///
    /// Tests against `sqlite::memory:` should use a pool size of 1, since
    /// every new in-memory connection starts with an empty schema.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// Call once after connecting to bring the schema up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
