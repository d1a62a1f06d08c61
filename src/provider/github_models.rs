//! GitHub Models chat-completions client.
//!
//! Sends one prompt per survey submission and returns the first choice's
//! text. Timeouts are owned by the HTTP client; there is no retry.

use crate::models::{CategorySet, OpenResponses};
use crate::provider::error::InsightError;
use crate::provider::prompts::{build_insight_prompt, INSIGHT_SYSTEM_PROMPT};
use crate::provider::InsightProvider;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Configuration for the GitHub Models client.
#[derive(Debug, Clone)]
pub struct GitHubModelsConfig {
    pub endpoint: String,
    pub model_name: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for GitHubModelsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://models.github.ai/inference".to_string(),
            model_name: "openai/gpt-4o-mini".to_string(),
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 2000,
            timeout_seconds: 60,
        }
    }
}

impl From<&crate::config::ModelConfig> for GitHubModelsConfig {
    fn from(config: &crate::config::ModelConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model_name: config.name.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
            timeout_seconds: config.timeout_seconds,
        }
    }
}

/// Message in a chat-completions request.
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Insight provider backed by the GitHub Models inference API.
pub struct GitHubModelsClient {
    config: GitHubModelsConfig,
    http_client: reqwest::Client,
    token: Option<String>,
}

impl GitHubModelsClient {
    /// Create a client. A `None` token makes every request fail with
    /// [`InsightError::Authentication`] before touching the network.
    pub fn new(config: GitHubModelsConfig, token: Option<String>) -> Result<Self, InsightError> {
        info!(
            "Initializing GitHub Models client with model {} at {}",
            config.model_name, config.endpoint
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| InsightError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            token,
        })
    }

    /// Create a client whose token is read from the given environment variable.
    pub fn from_env(config: GitHubModelsConfig, token_env: &str) -> Result<Self, InsightError> {
        let token = std::env::var(token_env)
            .ok()
            .filter(|token| !token.trim().is_empty());

        if token.is_none() {
            warn!("{} is not set; remote insights will fall back to local analysis", token_env);
        }

        Self::new(config, token)
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    /// Send one prompt and return the first choice's text.
    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let token = self.token.as_deref().ok_or_else(|| {
            InsightError::Authentication("no GitHub token configured".to_string())
        })?;

        let request = ChatCompletionRequest {
            model: &self.config.model_name,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: INSIGHT_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            max_tokens: self.config.max_tokens,
        };

        debug!("Sending insight request to {}", self.chat_url());

        let response = self
            .http_client
            .post(self.chat_url())
            .bearer_auth(token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InsightError::Transport(format!(
                        "Request timed out after {}s",
                        self.config.timeout_seconds
                    ))
                } else if e.is_connect() {
                    InsightError::Transport(format!(
                        "Cannot connect to GitHub Models at {}",
                        self.config.endpoint
                    ))
                } else {
                    InsightError::Transport(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(InsightError::Authentication(format!(
                "GitHub Models rejected the token ({})",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Transport(format!(
                "GitHub Models API error {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| InsightError::Transport(format!("Failed to read response: {}", e)))?;

        let completion: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| InsightError::MalformedResponse(format!("invalid JSON body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                InsightError::MalformedResponse("response contained no insight text".to_string())
            })
    }
}

#[async_trait]
impl InsightProvider for GitHubModelsClient {
    fn name(&self) -> &str {
        &self.config.model_name
    }

    async fn get_insight(
        &self,
        categories: &CategorySet,
        responses: &OpenResponses,
    ) -> Result<String, InsightError> {
        let prompt = build_insight_prompt(categories, responses);
        let insight = self.complete(&prompt).await?;
        info!("Received {} characters of remote insight", insight.len());
        Ok(insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> GitHubModelsClient {
        let config = GitHubModelsConfig {
            endpoint: server.uri(),
            timeout_seconds: 5,
            ..GitHubModelsConfig::default()
        };
        GitHubModelsClient::new(config, token.map(String::from)).unwrap()
    }

    #[tokio::test]
    async fn test_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("x-github-api-version", GITHUB_API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "  Team is thriving.  " } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-token"));
        let insight = client
            .get_insight(&CategorySet::default(), &OpenResponses::new())
            .await
            .unwrap();

        assert_eq!(insight, "Team is thriving.");
        assert_eq!(client.name(), "openai/gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_missing_token_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client
            .get_insight(&CategorySet::default(), &OpenResponses::new())
            .await
            .unwrap_err();

        assert!(matches!(err, InsightError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("expired"))
            .get_insight(&CategorySet::default(), &OpenResponses::new())
            .await
            .unwrap_err();

        assert!(matches!(err, InsightError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("test-token"))
            .get_insight(&CategorySet::default(), &OpenResponses::new())
            .await
            .unwrap_err();

        match err {
            InsightError::Transport(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("overloaded"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-token"));

        let first = client
            .get_insight(&CategorySet::default(), &OpenResponses::new())
            .await
            .unwrap_err();
        assert!(matches!(first, InsightError::MalformedResponse(_)));

        let second = client
            .get_insight(&CategorySet::default(), &OpenResponses::new())
            .await
            .unwrap_err();
        assert!(matches!(second, InsightError::MalformedResponse(_)));
    }

    #[test]
    fn test_chat_url_strips_trailing_slash() {
        let config = GitHubModelsConfig {
            endpoint: "https://models.github.ai/inference/".to_string(),
            ..GitHubModelsConfig::default()
        };
        let client = GitHubModelsClient::new(config, None).unwrap();
        assert_eq!(
            client.chat_url(),
            "https://models.github.ai/inference/chat/completions"
        );
    }
}
