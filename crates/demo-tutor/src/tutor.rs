//! The demo tutor implementation.

use std::time::Duration;

use tokio::time::sleep;
use tutor_core::{
    async_trait, Article, ArticleSection, Quiz, QuizQuestion, StudyPlan, StudyWeek, ThreadContext,
    Tutor, TutorError,
};

use crate::catalog;

/// A tutor that assembles canned study content locally.
///
/// Selection is keyed by a stable hash of the topic, so repeated
/// requests for the same topic return identical payloads.
pub struct DemoTutor {
    delay: Duration,
}

impl DemoTutor {
    /// Delay applied before each response, to feel like generation.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(400);

    /// Create a demo tutor with the default artificial delay.
    pub fn new() -> Self {
        Self::with_delay(Self::DEFAULT_DELAY)
    }

    /// Create a demo tutor with a specific artificial delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a demo tutor that responds immediately. Intended for tests.
    pub fn instant() -> Self {
        Self::with_delay(Duration::ZERO)
    }
}

impl Default for DemoTutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate text for quoting inside generated prose.
fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// Extract a week count from a free-form timeframe ("6 weeks", "2 months").
fn parse_weeks(timeframe: &str) -> Option<u32> {
    let lowered = timeframe.to_lowercase();
    let number = lowered
        .split_whitespace()
        .find_map(|token| token.parse::<u32>().ok())?;
    if lowered.contains("month") {
        Some(number.saturating_mul(4))
    } else {
        Some(number)
    }
}

#[async_trait]
impl Tutor for DemoTutor {
    async fn generate_article(&self, topic: &str, subject: &str) -> Result<Article, TutorError> {
        sleep(self.delay).await;
        let seed = catalog::topic_seed(topic);
        let difficulty = catalog::pick(&catalog::DIFFICULTIES, seed, 0).to_string();

        let sections = vec![
            ArticleSection {
                title: format!("What is {topic}?"),
                content: format!(
                    "{topic} is a central idea in {subject}. Before going further, \
                     make sure you can state it in your own words."
                ),
                section_type: "definition".to_string(),
            },
            ArticleSection {
                title: format!("How {topic} works"),
                content: format!(
                    "Work through the mechanics of {topic} step by step, starting \
                     from the simplest case you can write down."
                ),
                section_type: "explanation".to_string(),
            },
            ArticleSection {
                title: format!("{topic} in practice"),
                content: format!(
                    "Pick one exercise from your {subject} material and apply \
                     {topic} end to end without looking at the solution."
                ),
                section_type: "example".to_string(),
            },
        ];

        Ok(Article {
            title: format!("Understanding {topic}"),
            content: format!("A short introduction to {topic} for {subject} learners."),
            sections,
            difficulty,
            estimated_read_time: 4 + (seed % 5) as u32,
            follow_up_questions: vec![
                format!("How does {topic} connect to other ideas in {subject}?"),
                format!("Where is {topic} used outside the classroom?"),
                format!("What is a natural next topic after {topic}?"),
            ],
        })
    }

    async fn generate_quiz(
        &self,
        topic: &str,
        subject: &str,
        question_count: usize,
    ) -> Result<Quiz, TutorError> {
        sleep(self.delay).await;
        let seed = catalog::topic_seed(topic);
        let difficulty = catalog::pick(&catalog::DIFFICULTIES, seed, 0).to_string();
        let count = question_count.max(1);

        let questions = (0..count as u64)
            .map(|i| {
                let options = vec![
                    format!("The standard definition of {topic}"),
                    format!("A common misconception about {topic}"),
                    format!("An unrelated idea from {subject}"),
                    format!("A special case of {topic}"),
                ];
                QuizQuestion {
                    question: catalog::pick(&catalog::QUESTION_STEMS, seed, i).replace("{}", topic),
                    correct_answer: (seed.wrapping_add(i) % options.len() as u64) as usize,
                    options,
                    explanation: catalog::pick(&catalog::EXPLANATIONS, seed, i).replace("{}", topic),
                    difficulty: difficulty.clone(),
                }
            })
            .collect();

        Ok(Quiz {
            title: format!("{subject} Quiz: {topic}"),
            description: format!("Check your understanding of {topic}."),
            questions,
            difficulty,
            estimated_time: 2 * count as u32,
        })
    }

    async fn generate_thread_reply(
        &self,
        question: &str,
        context: &ThreadContext,
    ) -> Result<String, TutorError> {
        sleep(self.delay).await;
        let subject = context.subject.as_deref().unwrap_or("this subject");
        let parent = snippet(&context.parent_content, 80);
        Ok(format!(
            "Good question about {subject}. Start from the original message: \"{parent}\". \
             For \"{question}\", break it into the smallest claim you can check, verify that \
             claim against your notes, and build back up from there."
        ))
    }

    async fn term_definition(&self, term: &str, subject: Option<&str>) -> String {
        sleep(self.delay).await;
        match subject {
            Some(subject) => format!(
                "{term}: a key term in {subject}. Review your course notes for the precise \
                 definition and one worked example."
            ),
            None => format!(
                "{term}: a term worth pinning down precisely. Review your notes for the \
                 formal definition and one worked example."
            ),
        }
    }

    async fn generate_study_plan(
        &self,
        subject: &str,
        goals: &str,
        timeframe: &str,
    ) -> Result<StudyPlan, TutorError> {
        sleep(self.delay).await;
        let seed = catalog::topic_seed(subject);
        let duration_weeks = parse_weeks(timeframe).unwrap_or(4).clamp(1, 12);

        let weeks = (1..=duration_weeks)
            .map(|week| StudyWeek {
                week,
                focus: catalog::pick(&catalog::WEEK_FOCUSES, seed, week as u64)
                    .replace("{}", subject),
                topics: vec![
                    format!("Core {subject} material for week {week}"),
                    format!("One past exercise set on {subject}"),
                ],
                goals: vec![format!(
                    "Finish the week able to explain this week's {subject} material unaided."
                )],
            })
            .collect();

        Ok(StudyPlan {
            title: format!("{duration_weeks}-week plan for {subject}"),
            subject: subject.to_string(),
            duration_weeks,
            weeks,
            tips: vec![
                catalog::pick(&catalog::TIPS, seed, 0).to_string(),
                catalog::pick(&catalog::TIPS, seed, 1).to_string(),
                format!("Revisit your goal regularly: {goals}."),
            ],
        })
    }

    fn name(&self) -> &str {
        "DemoTutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_quiz_title_embeds_subject_and_topic() {
        let tutor = DemoTutor::instant();
        let quiz = tutor
            .generate_quiz("fractions", "Mathematics", 3)
            .await
            .unwrap();

        assert!(quiz.title.contains("Mathematics"));
        assert!(quiz.title.contains("fractions"));
        assert_eq!(quiz.questions.len(), 3);
        for question in &quiz.questions {
            assert!(!question.options.is_empty());
            assert!(question.correct_answer < question.options.len());
        }
    }

    #[tokio::test]
    async fn test_same_topic_is_deterministic() {
        let tutor = DemoTutor::instant();
        let first = tutor.generate_article("osmosis", "Biology").await.unwrap();
        let second = tutor.generate_article("osmosis", "Biology").await.unwrap();
        assert_eq!(first, second);

        let quiz_a = tutor.generate_quiz("osmosis", "Biology", 5).await.unwrap();
        let quiz_b = tutor.generate_quiz("osmosis", "Biology", 5).await.unwrap();
        assert_eq!(quiz_a, quiz_b);
    }

    #[tokio::test]
    async fn test_delay_is_honored() {
        let tutor = DemoTutor::with_delay(Duration::from_millis(100));

        let start = Instant::now();
        tutor.term_definition("entropy", None).await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_term_definition_mentions_term() {
        let tutor = DemoTutor::instant();
        let definition = tutor.term_definition("entropy", Some("Physics")).await;
        assert!(!definition.is_empty());
        assert!(definition.contains("entropy"));
        assert!(definition.contains("Physics"));
    }

    #[tokio::test]
    async fn test_study_plan_matches_timeframe() {
        let tutor = DemoTutor::instant();
        let plan = tutor
            .generate_study_plan("Spanish", "hold a conversation", "6 weeks")
            .await
            .unwrap();

        assert_eq!(plan.duration_weeks, 6);
        assert_eq!(plan.weeks.len(), 6);
        for (i, week) in plan.weeks.iter().enumerate() {
            assert_eq!(week.week, i as u32 + 1);
        }

        let months = tutor
            .generate_study_plan("Spanish", "hold a conversation", "2 months")
            .await
            .unwrap();
        assert_eq!(months.duration_weeks, 8);
    }

    #[tokio::test]
    async fn test_thread_reply_quotes_question() {
        let tutor = DemoTutor::instant();
        let context = ThreadContext {
            parent_content: "Newton's second law relates force and acceleration.".to_string(),
            subject: Some("Physics".to_string()),
        };
        let reply = tutor
            .generate_thread_reply("Does mass matter here?", &context)
            .await
            .unwrap();
        assert!(reply.contains("Does mass matter here?"));
        assert!(reply.contains("Physics"));
    }

    #[test]
    fn test_name() {
        assert_eq!(DemoTutor::instant().name(), "DemoTutor");
    }
}
