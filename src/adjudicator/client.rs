//! Language-Model Service Client
//!
//! Chat-completions client for the adjudication service. A missing
//! credential, connect error, non-success status, or unparseable reply all
//! degrade to `AiOutcome::Unavailable` - rule-only validation must keep
//! working without a configured key.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adjudicator::{prompt, Adjudicate, AiOutcome, AiVerdict};
use crate::config::EngineConfig;
use crate::document::Field;
use crate::rules::FieldRequirement;

pub struct OpenAiAdjudicator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// The JSON object the model is instructed to reply with.
#[derive(Deserialize)]
struct VerdictPayload {
    passed: bool,
    confidence: f64,
    suggested_text: Option<String>,
}

impl OpenAiAdjudicator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.ai_endpoint.clone(),
            model: config.ai_model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    async fn call_service(&self, user_prompt: String, api_key: &str) -> Result<AiVerdict, String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("HTTP error: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("service returned {}", response.status()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("response parse error: {e}"))?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| "empty choices in response".to_string())?;

        parse_verdict(content)
    }
}

#[async_trait]
impl Adjudicate for OpenAiAdjudicator {
    async fn adjudicate(&self, field: &Field, requirement: &FieldRequirement) -> AiOutcome {
        if !requirement.case_rule.ai_eligible() {
            return AiOutcome::unavailable("case rule not eligible for adjudication");
        }
        let Some(api_key) = self.api_key.as_deref() else {
            return AiOutcome::unavailable("no API key configured");
        };

        let user_prompt = prompt::render(requirement.case_rule, field.kind, &field.raw_text);
        match self.call_service(user_prompt, api_key).await {
            Ok(verdict) => {
                log::debug!(
                    "adjudicated {} #{}: passed={} confidence={:.2}",
                    field.kind,
                    field.occurrence_index,
                    verdict.passed,
                    verdict.confidence
                );
                AiOutcome::Delivered(verdict)
            }
            Err(reason) => {
                log::warn!(
                    "adjudication unavailable for {} #{}: {reason}",
                    field.kind,
                    field.occurrence_index
                );
                AiOutcome::Unavailable(reason)
            }
        }
    }
}

/// Parse the model's reply. Tolerates code fences some models insist on,
/// nothing else.
fn parse_verdict(content: &str) -> Result<AiVerdict, String> {
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let payload: VerdictPayload = serde_json::from_str(trimmed)
        .map_err(|e| format!("verdict parse error: {e} in {trimmed:?}"))?;

    Ok(AiVerdict {
        passed: payload.passed,
        confidence: payload.confidence.clamp(0.0, 1.0),
        suggested_text: payload
            .suggested_text
            .filter(|s| !s.trim().is_empty()),
    })
}
