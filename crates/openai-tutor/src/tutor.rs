//! OpenAiTutor implementation over a chat-completions API.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};
use tutor_core::{async_trait, Article, Quiz, StudyPlan, ThreadContext, Tutor, TutorError};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::OpenAiTutorConfig;
use crate::prompts;

/// A tutor implementation backed by an OpenAI-compatible
/// chat-completions API.
///
/// Each generation is a single request; there is no retry and no
/// conversation state. Structured payloads are parsed from the first
/// choice's content after stripping any markdown fence.
pub struct OpenAiTutor {
    client: Client,
    config: OpenAiTutorConfig,
}

impl OpenAiTutor {
    /// Create a new OpenAiTutor with the given configuration.
    pub fn new(config: OpenAiTutorConfig) -> Result<Self, TutorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                TutorError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("OpenAiTutor initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create an OpenAiTutor from environment variables.
    ///
    /// See [`OpenAiTutorConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, TutorError> {
        let config = OpenAiTutorConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiTutorConfig {
        &self.config
    }

    /// Run one chat completion and return the first choice's content.
    async fn chat_completion(&self, prompt: String, max_tokens: u32) -> Result<String, TutorError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            max_tokens: Some(max_tokens),
            temperature: self.config.temperature,
        };

        debug!("Sending request to chat API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| TutorError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(TutorError::Api {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(TutorError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TutorError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| TutorError::InvalidResponse("completion had no content".to_string()))
    }

    /// Request a JSON payload and parse it into `T`.
    async fn json_completion<T: serde::de::DeserializeOwned>(
        &self,
        prompt: String,
        max_tokens: u32,
    ) -> Result<T, TutorError> {
        let content = self.chat_completion(prompt, max_tokens).await?;
        let json = strip_code_fences(&content);
        serde_json::from_str(json)
            .map_err(|e| TutorError::InvalidResponse(format!("Failed to parse payload: {}", e)))
    }
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Placeholder returned when live definition generation fails.
fn fallback_definition(term: &str) -> String {
    format!(
        "{term}: no definition is available right now. Check your course \
         glossary and try again shortly."
    )
}

#[async_trait]
impl Tutor for OpenAiTutor {
    async fn generate_article(&self, topic: &str, subject: &str) -> Result<Article, TutorError> {
        self.json_completion(
            prompts::article_prompt(topic, subject),
            prompts::ARTICLE_MAX_TOKENS,
        )
        .await
    }

    async fn generate_quiz(
        &self,
        topic: &str,
        subject: &str,
        question_count: usize,
    ) -> Result<Quiz, TutorError> {
        self.json_completion(
            prompts::quiz_prompt(topic, subject, question_count),
            prompts::QUIZ_MAX_TOKENS,
        )
        .await
    }

    async fn generate_thread_reply(
        &self,
        question: &str,
        context: &ThreadContext,
    ) -> Result<String, TutorError> {
        let content = self
            .chat_completion(
                prompts::thread_prompt(question, context),
                prompts::THREAD_MAX_TOKENS,
            )
            .await?;
        Ok(content.trim().to_string())
    }

    async fn term_definition(&self, term: &str, subject: Option<&str>) -> String {
        let result = self
            .chat_completion(
                prompts::definition_prompt(term, subject),
                prompts::DEFINITION_MAX_TOKENS,
            )
            .await;

        match result {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                warn!("Definition generation failed for '{}': {}", term, e);
                fallback_definition(term)
            }
        }
    }

    async fn generate_study_plan(
        &self,
        subject: &str,
        goals: &str,
        timeframe: &str,
    ) -> Result<StudyPlan, TutorError> {
        self.json_completion(
            prompts::study_plan_prompt(subject, goals, timeframe),
            prompts::PLAN_MAX_TOKENS,
        )
        .await
    }

    fn name(&self) -> &str {
        "OpenAiTutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_plain() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_json_fence() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn test_fallback_definition_names_term() {
        let fallback = fallback_definition("entropy");
        assert!(!fallback.is_empty());
        assert!(fallback.starts_with("entropy:"));
    }

    #[test]
    fn test_tutor_name() {
        let config = OpenAiTutorConfig::builder().api_key("test-key").build();
        let tutor = OpenAiTutor::new(config).unwrap();
        assert_eq!(tutor.name(), "OpenAiTutor");
        assert_eq!(tutor.config().model, "gpt-4o-mini");
    }
}
