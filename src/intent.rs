//! Turns a raw natural language query into a structured intent by calling an
//! external language service and recovering JSON from its untrusted output.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Homework,
    Performance,
    Quizzes,
    Unknown,
}

impl DataType {
    pub fn from_label(label: &str) -> Self {
        match label {
            "homework" => DataType::Homework,
            "performance" => DataType::Performance,
            "quizzes" => DataType::Quizzes,
            _ => DataType::Unknown,
        }
    }
}

/// Structured interpretation of one query. Absent fields stay absent here;
/// defaulting to the caller's scope happens in the access guard.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryIntent {
    pub data_type: DataType,
    pub grade: Option<i32>,
    pub class_label: Option<String>,
    pub region: Option<String>,
    pub time_period: Option<String>,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, PanelError>;
}

/// Connection settings for the language service. Built once at startup and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl ModelConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY must be set to reach the language service")?;

        Ok(Self {
            api_key,
            model: std::env::var("ADMIN_QUERY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            base_url: std::env::var("ADMIN_QUERY_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            max_tokens: 256,
            temperature: 0.3,
            timeout: Duration::from_secs(30),
        })
    }
}

pub struct HttpLanguageModel {
    client: reqwest::Client,
    config: ModelConfig,
}

impl HttpLanguageModel {
    pub fn new(config: ModelConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl LanguageModel for HttpLanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String, PanelError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| PanelError::UpstreamUnavailable {
                reason: err.to_string(),
            })?;

        let status = response.status();
        let payload: Value =
            response
                .json()
                .await
                .map_err(|err| PanelError::UpstreamUnavailable {
                    reason: err.to_string(),
                })?;

        if !status.is_success() {
            warn!(%status, "language service call failed");
            let reason = if status.as_u16() == 429
                || payload.to_string().contains("insufficient_quota")
            {
                "API quota exceeded".to_string()
            } else {
                format!("service returned {status}")
            };
            return Err(PanelError::UpstreamUnavailable { reason });
        }

        payload["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(|content| content.to_string())
            .ok_or_else(|| PanelError::UpstreamUnavailable {
                reason: "malformed service response".to_string(),
            })
    }
}

pub struct IntentExtractor<M> {
    model: M,
}

impl<M: LanguageModel> IntentExtractor<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub async fn extract(&self, query: &str) -> Result<QueryIntent, PanelError> {
        let prompt = extraction_prompt(query);
        let response = self.model.complete(&prompt).await?;
        debug!(bytes = response.len(), "language service responded");
        parse_intent(&response)
    }
}

fn extraction_prompt(query: &str) -> String {
    format!(
        r#"You are an AI assistant for an admin panel. Parse the following natural language query and extract:
1. The type of data requested (e.g., homework, performance, quizzes)
2. The grade (if mentioned, e.g., 8 or 9)
3. The class (if mentioned, e.g., A or B)
4. The region (if mentioned, e.g., North or South)
5. The time period (if mentioned, e.g., last week, next week)

Return a single JSON object with the keys data_type, grade, class, region, time_period.
Omit keys that are not mentioned. Output JSON only, no other text.

Query: {query}"#
    )
}

/// Recovers a structured intent from free-text model output. Missing keys
/// stay absent; they are never guessed here.
pub fn parse_intent(raw: &str) -> Result<QueryIntent, PanelError> {
    let cleaned = recover_json(raw);
    let value: Value = serde_json::from_str(cleaned.trim()).map_err(|err| {
        debug!(%err, "intent response did not parse as JSON");
        PanelError::InvalidIntentFormat {
            raw: raw.to_string(),
        }
    })?;

    let object = value
        .as_object()
        .ok_or_else(|| PanelError::InvalidIntentFormat {
            raw: raw.to_string(),
        })?;

    Ok(QueryIntent {
        data_type: object
            .get("data_type")
            .and_then(Value::as_str)
            .map(DataType::from_label)
            .unwrap_or(DataType::Unknown),
        grade: object.get("grade").and_then(lenient_int),
        class_label: string_field(object, "class"),
        region: string_field(object, "region"),
        time_period: string_field(object, "time_period"),
    })
}

/// Cuts the response down to the span from the first `{` to the last `}` to
/// tolerate surrounding prose. When no brace span exists, literal placeholder
/// tokens are stripped before the parse attempt.
fn recover_json(raw: &str) -> String {
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            return raw[start..=end].to_string();
        }
    }
    raw.replace("undefined", "").trim().to_string()
}

fn lenient_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn string_field(object: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
