//! The Tutor trait definition.

use async_trait::async_trait;

use crate::content::{Article, Quiz, StudyPlan};
use crate::error::TutorError;

/// Discussion context for generating a thread reply.
#[derive(Debug, Clone)]
pub struct ThreadContext {
    /// Content of the message the thread hangs off.
    pub parent_content: String,
    /// Subject of the surrounding channel, when known.
    pub subject: Option<String>,
}

/// A trait for generating study content.
///
/// Implementations range from deterministic demo content to live
/// completion APIs. The trait is object-safe and is used behind
/// `Arc<dyn Tutor>`; the implementation is chosen once at startup.
#[async_trait]
pub trait Tutor: Send + Sync {
    /// Generate a structured study article about a topic.
    async fn generate_article(&self, topic: &str, subject: &str) -> Result<Article, TutorError>;

    /// Generate a multiple-choice quiz with roughly `question_count`
    /// questions.
    async fn generate_quiz(
        &self,
        topic: &str,
        subject: &str,
        question_count: usize,
    ) -> Result<Quiz, TutorError>;

    /// Answer a question asked in a message thread.
    async fn generate_thread_reply(
        &self,
        question: &str,
        context: &ThreadContext,
    ) -> Result<String, TutorError>;

    /// Define a term in one or two sentences.
    ///
    /// This never fails: implementations fall back to a placeholder
    /// sentence naming the term when generation is unavailable.
    async fn term_definition(&self, term: &str, subject: Option<&str>) -> String;

    /// Generate a multi-week study plan for a subject.
    async fn generate_study_plan(
        &self,
        subject: &str,
        goals: &str,
        timeframe: &str,
    ) -> Result<StudyPlan, TutorError>;

    /// Get a human-readable name for this tutor implementation.
    fn name(&self) -> &str;
}
