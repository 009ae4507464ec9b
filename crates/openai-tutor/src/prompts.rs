//! Prompt templates for study content generation.
//!
//! Structured payloads embed the required JSON shape in the prompt;
//! field names must match the serde wire names in tutor-core exactly,
//! since the model's output is parsed straight into those types.

use tutor_core::ThreadContext;

pub(crate) const SYSTEM_PROMPT: &str = "You are a patient, encouraging study tutor. \
    Respond with exactly what is asked for. When JSON is requested, output only the \
    JSON document, with no surrounding prose and no markdown fences.";

// Response size caps per payload kind.
pub(crate) const ARTICLE_MAX_TOKENS: u32 = 2048;
pub(crate) const QUIZ_MAX_TOKENS: u32 = 1536;
pub(crate) const PLAN_MAX_TOKENS: u32 = 2048;
pub(crate) const THREAD_MAX_TOKENS: u32 = 512;
pub(crate) const DEFINITION_MAX_TOKENS: u32 = 256;

pub(crate) fn article_prompt(topic: &str, subject: &str) -> String {
    format!(
        r#"Write a study article about "{topic}" for a student of {subject}.

Respond with a single JSON object in exactly this shape:
{{
  "title": string,
  "content": string (short introduction),
  "sections": [{{"title": string, "content": string, "sectionType": "definition" | "explanation" | "example" | "formula"}}],
  "difficulty": "beginner" | "intermediate" | "advanced",
  "estimatedReadTime": number (minutes),
  "followUpQuestions": [string]
}}

Use 3 to 5 sections and 3 follow-up questions."#
    )
}

pub(crate) fn quiz_prompt(topic: &str, subject: &str, question_count: usize) -> String {
    format!(
        r#"Create a multiple-choice quiz about "{topic}" for a student of {subject}, with exactly {question_count} questions.

Respond with a single JSON object in exactly this shape:
{{
  "title": string,
  "description": string,
  "questions": [{{"question": string, "options": [string] (4 options), "correctAnswer": number (zero-based index into options), "explanation": string, "difficulty": "beginner" | "intermediate" | "advanced"}}],
  "difficulty": "beginner" | "intermediate" | "advanced",
  "estimatedTime": number (minutes)
}}"#
    )
}

pub(crate) fn thread_prompt(question: &str, context: &ThreadContext) -> String {
    let subject = context
        .subject
        .as_deref()
        .unwrap_or("the subject under discussion");
    format!(
        r#"A student is discussing this message in a {subject} study channel:

"{parent}"

They ask: "{question}"

Reply in plain text with a clear, encouraging answer of at most three short paragraphs. Do not use JSON."#,
        parent = context.parent_content,
    )
}

pub(crate) fn definition_prompt(term: &str, subject: Option<&str>) -> String {
    match subject {
        Some(subject) => format!(
            "Define \"{term}\" as used in {subject}, in one or two plain sentences \
             suitable for a study glossary. Respond with the definition only."
        ),
        None => format!(
            "Define \"{term}\" in one or two plain sentences suitable for a study \
             glossary. Respond with the definition only."
        ),
    }
}

pub(crate) fn study_plan_prompt(subject: &str, goals: &str, timeframe: &str) -> String {
    format!(
        r#"Create a study plan for {subject} over {timeframe}. The student's goals: {goals}.

Respond with a single JSON object in exactly this shape:
{{
  "title": string,
  "subject": string,
  "durationWeeks": number,
  "weeks": [{{"week": number (1-based), "focus": string, "topics": [string], "goals": [string]}}],
  "tips": [string]
}}"#
    )
}
