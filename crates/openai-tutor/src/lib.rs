//! OpenAI-backed tutor implementation.
//!
//! This crate provides a `Tutor` implementation that calls an
//! OpenAI-compatible chat-completions endpoint. Structured payloads
//! (articles, quizzes, study plans) are requested as JSON, with the
//! required shape embedded in the prompt, and parsed from the first
//! completion choice.
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_tutor::{OpenAiTutor, Tutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tutor = OpenAiTutor::from_env()?;
//!     let article = tutor.generate_article("photosynthesis", "Biology").await?;
//!     println!("{}", article.title);
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod prompts;
mod tutor;

pub use config::OpenAiTutorConfig;
pub use tutor::OpenAiTutor;

// Re-export tutor-core types for convenience
pub use tutor_core::{async_trait, Article, Quiz, StudyPlan, ThreadContext, Tutor, TutorError};
