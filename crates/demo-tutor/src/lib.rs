//! Deterministic demo tutor for StudyHub.
//!
//! This crate provides a `Tutor` implementation that needs no network
//! and no API key. Content is assembled from canned templates; the
//! template choice is keyed by a stable hash of the topic, so the same
//! topic always yields the same article or quiz. A short artificial
//! delay simulates generation latency and can be turned off for tests.
//!
//! For live AI generation, use the `openai-tutor` crate instead.
//!
//! # Example
//!
//! ```rust
//! use demo_tutor::DemoTutor;
//! use tutor_core::Tutor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tutor_core::TutorError> {
//!     let tutor = DemoTutor::instant();
//!
//!     let quiz = tutor.generate_quiz("fractions", "Mathematics", 3).await?;
//!     println!("{} ({} questions)", quiz.title, quiz.questions.len());
//!     Ok(())
//! }
//! ```

mod catalog;
mod tutor;

pub use tutor::DemoTutor;

// Re-export the trait so binaries can depend on this crate alone
pub use tutor_core::{Tutor, TutorError};
