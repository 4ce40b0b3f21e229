use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::{AdapterConfig, CompletionGateway, GatewayError};

const ENV_PREFIX: &str = "ANTHROPIC";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const DEFAULT_BASE: &str = "https://api.anthropic.com/v1/";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Completion gateway backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicGateway {
    config: AdapterConfig,
    client: reqwest::Client,
}

impl AnthropicGateway {
    /// Configure from `OUTFITTER_ANTHROPIC_*` variables.
    pub fn from_env() -> Result<Self, GatewayError> {
        let config =
            AdapterConfig::from_env(ENV_PREFIX, DEFAULT_MODEL, DEFAULT_BASE, DEFAULT_TIMEOUT_MS)?;
        Self::with_config(config)
    }

    pub fn with_config(config: AdapterConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Default model and timeout against an explicit endpoint.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GatewayError::Config(format!("invalid base url {base_url}: {e}")))?;
        Self::with_config(AdapterConfig {
            api_key: api_key.to_string(),
            base_url,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicBody<'a> {
    model: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    max_tokens: u32,
}

fn build_anthropic_body<'a>(model: &'a str, prompt: &'a str) -> AnthropicBody<'a> {
    AnthropicBody {
        model,
        messages: vec![AnthropicMessage {
            role: "user",
            content: prompt,
        }],
        max_tokens: MAX_TOKENS,
    }
}

/// Concatenate the text blocks of a Messages API response.
pub fn extract_anthropic_text(val: &Value) -> Option<String> {
    val.get("content")
        .and_then(|c| c.as_array())
        .and_then(|arr| {
            let buf: String = arr
                .iter()
                .filter_map(|item| item.get("text").and_then(|t| t.as_str()))
                .collect();
            if buf.is_empty() {
                None
            } else {
                Some(buf)
            }
        })
        .or_else(|| {
            val.get("content")
                .and_then(|c| c.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        })
}

#[async_trait]
impl CompletionGateway for AnthropicGateway {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        if self.config.api_key.is_empty() {
            return Err(GatewayError::MissingApiKey(format!(
                "OUTFITTER_{ENV_PREFIX}_API_KEY"
            )));
        }

        let url = self
            .config
            .base_url
            .join("messages")
            .unwrap_or_else(|_| self.config.base_url.clone());
        let body = build_anthropic_body(&self.config.model, prompt);

        debug!(
            target: "outfitter::llm",
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Requesting completion"
        );

        let resp = self
            .client
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let parsed: Value = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }));

        if !status.is_success() {
            let message = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("completion call failed")
                .to_string();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        extract_anthropic_text(&parsed).ok_or(GatewayError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_wraps_prompt_as_single_user_message() {
        let body = serde_json::to_value(build_anthropic_body("m", "pick an outfit")).unwrap();
        assert_eq!(body["model"], "m");
        assert_eq!(body["max_tokens"], MAX_TOKENS);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "pick an outfit");
    }

    #[test]
    fn extracts_and_joins_text_blocks() {
        let val = json!({
            "content": [
                {"type": "text", "text": "{\"ids\": "},
                {"type": "text", "text": "[]}"}
            ]
        });
        assert_eq!(extract_anthropic_text(&val).as_deref(), Some("{\"ids\": []}"));
    }

    #[test]
    fn extracts_plain_string_content() {
        let val = json!({ "content": "hello" });
        assert_eq!(extract_anthropic_text(&val).as_deref(), Some("hello"));
    }

    #[test]
    fn empty_content_yields_none() {
        assert!(extract_anthropic_text(&json!({ "content": [] })).is_none());
        assert!(extract_anthropic_text(&json!({ "raw": "oops" })).is_none());
    }

    #[tokio::test]
    async fn empty_api_key_fails_before_any_request() {
        let gateway = AnthropicGateway::with_base_url("", "http://127.0.0.1:9/").unwrap();
        let err = gateway.complete("hi").await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey(_)));
    }
}
