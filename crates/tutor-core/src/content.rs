//! Structured study content produced by tutors.
//!
//! These types are the wire format consumed by the web client and the
//! storage format kept in message content, so serialization must
//! round-trip losslessly. All field names serialize in camelCase.

use serde::{Deserialize, Serialize};

/// A generated study article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    /// Introductory prose shown above the sections.
    pub content: String,
    pub sections: Vec<ArticleSection>,
    pub difficulty: String,
    /// Estimated reading time in minutes.
    pub estimated_read_time: u32,
    pub follow_up_questions: Vec<String>,
}

/// One titled section of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSection {
    pub title: String,
    pub content: String,
    /// One of "definition", "explanation", "example" or "formula".
    pub section_type: String,
}

/// A generated multiple-choice quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuizQuestion>,
    pub difficulty: String,
    /// Estimated completion time in minutes.
    pub estimated_time: u32,
}

/// One question of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
    pub difficulty: String,
}

/// A generated multi-week study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub title: String,
    pub subject: String,
    pub duration_weeks: u32,
    pub weeks: Vec<StudyWeek>,
    pub tips: Vec<String>,
}

/// One week of a study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyWeek {
    /// 1-based week number.
    pub week: u32,
    pub focus: String,
    pub topics: Vec<String>,
    pub goals: Vec<String>,
}
