//! Core trait and content types for tutor implementations.
//!
//! This crate provides the shared interface for all tutor implementations
//! in the StudyHub backend. It defines:
//!
//! - [`Tutor`] - The trait that all tutor implementations must implement
//! - [`Article`] / [`Quiz`] / [`StudyPlan`] - Structured study content
//! - [`ThreadContext`] - Discussion context passed to thread replies
//! - [`TutorError`] - Error types for tutor operations
//!
//! # Example
//!
//! ```rust
//! use tutor_core::{async_trait, Article, Quiz, StudyPlan, ThreadContext, Tutor, TutorError};
//!
//! struct FlatTutor;
//!
//! #[async_trait]
//! impl Tutor for FlatTutor {
//!     async fn generate_article(&self, topic: &str, _subject: &str) -> Result<Article, TutorError> {
//!         Err(TutorError::Configuration(format!("no article source for {topic}")))
//!     }
//!
//!     async fn generate_quiz(&self, topic: &str, _subject: &str, _question_count: usize) -> Result<Quiz, TutorError> {
//!         Err(TutorError::Configuration(format!("no quiz source for {topic}")))
//!     }
//!
//!     async fn generate_thread_reply(&self, question: &str, _context: &ThreadContext) -> Result<String, TutorError> {
//!         Ok(format!("Good question: {question}"))
//!     }
//!
//!     async fn term_definition(&self, term: &str, _subject: Option<&str>) -> String {
//!         format!("{term}: a term worth looking up.")
//!     }
//!
//!     async fn generate_study_plan(&self, subject: &str, _goals: &str, _timeframe: &str) -> Result<StudyPlan, TutorError> {
//!         Err(TutorError::Configuration(format!("no plan source for {subject}")))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FlatTutor"
//!     }
//! }
//! ```

mod content;
mod error;
mod trait_def;

pub use content::{Article, ArticleSection, Quiz, QuizQuestion, StudyPlan, StudyWeek};
pub use error::TutorError;
pub use trait_def::{ThreadContext, Tutor};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
