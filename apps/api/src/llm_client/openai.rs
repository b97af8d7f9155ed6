//! OpenAI provider — primary scoring strategy in the cascade.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{build_scoring_prompt, SCORING_SYSTEM};
use crate::llm_client::{LlmAssessment, ProviderError, ScoreProvider};
use crate::models::score::Engine;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 500;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl ScoreProvider for OpenAiProvider {
    fn engine(&self) -> Engine {
        Engine::Gpt
    }

    async fn invoke(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<LlmAssessment, ProviderError> {
        let prompt = build_scoring_prompt(resume_text, jd_text);
        let body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SCORING_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            temperature: 0.0,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Retryable(format!("request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Retryable(format!("{status}: {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Permanent(format!("{status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Permanent(format!("malformed response envelope: {e}")))?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .ok_or_else(|| ProviderError::Permanent("empty choices".to_string()))?;

        serde_json::from_str(content)
            .map_err(|e| ProviderError::Permanent(format!("schema validation failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serializes_json_object_format() {
        let body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            temperature: 0.0,
            max_tokens: MAX_TOKENS,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_chat_response_content_deserializes() {
        let raw = r#"{"choices":[{"message":{"content":"{\"overall_score\": 81}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let assessment: LlmAssessment =
            serde_json::from_str(&parsed.choices[0].message.content).unwrap();
        assert_eq!(assessment.overall_score, 81.0);
        assert!(assessment.candidate_name.is_none());
    }
}
