use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ReportError, ReportResult};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Configuration for the summarization model client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (from ANTHROPIC_API_KEY env var)
    pub api_key: String,
    /// Model to use
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Create config from environment variables
    pub fn from_env() -> ReportResult<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ReportError::config("ANTHROPIC_API_KEY environment variable not set"))?;

        Ok(Self {
            api_key,
            model: "claude-sonnet-4-20250514".to_string(),
            temperature: 0.1,
            max_tokens: 4096,
        })
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.1,
            max_tokens: 4096,
        }
    }
}

/// Tool definition attached to a structured-output request
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Anthropic messages API client
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Send a prompt that must answer through the given tool.
    ///
    /// Returns the tool input as raw JSON for the caller to interpret.
    /// `Ok(None)` means the API answered successfully but without a usable
    /// tool block; callers degrade rather than fail on it. A non-success
    /// HTTP response is an upstream failure.
    pub async fn send_with_tool(
        &self,
        system: &str,
        user: &str,
        tool: Tool,
    ) -> ReportResult<Option<serde_json::Value>> {
        let tool_name = tool.name.clone();
        let request = AnthropicToolRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
            tools: vec![tool],
            tool_choice: Some(ToolChoice {
                choice_type: "tool".to_string(),
                name: tool_name.clone(),
            }),
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ReportError::upstream("summarization", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::upstream(
                "summarization",
                format!("{status} - {body}"),
            ));
        }

        let response: AnthropicResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Unparseable summarization response body: {}", e);
                return Ok(None);
            }
        };

        for content in response.content {
            if content.content_type == "tool_use"
                && content.name.as_deref() == Some(tool_name.as_str())
            {
                if let Some(input) = content.input {
                    return Ok(Some(input));
                }
            }
        }

        warn!("No {} tool_use block in summarization response", tool_name);
        Ok(None)
    }
}

#[derive(Debug, Serialize)]
struct AnthropicToolRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}
