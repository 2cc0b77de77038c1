//! llama.cpp server client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use pdfrag_core::{Error, GenerationBackend, Result};

use crate::config::LlamaConfig;

/// Stop sequence keeping answers concise: truncate at the first blank line
const STOP_SEQUENCE: &str = "\n\n";

/// Which request/response shape the bound endpoint speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// llama.cpp native `/completion`: token budget field `n_predict`,
    /// answer in `content`
    Native,
    /// OpenAI-compatible `/v1/completions`: token budget field
    /// `max_tokens`, answer in `choices[0].text`
    OpenAi,
}

/// A generation endpoint bound by discovery
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: String,
    pub kind: EndpointKind,
}

#[derive(Serialize)]
struct NativeRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
    temperature: f32,
    top_p: f32,
    stop: [&'a str; 1],
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stop: [&'a str; 1],
}

#[derive(Deserialize)]
struct NativeResponse {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    #[serde(default)]
    text: String,
}

/// llama.cpp generation client
pub struct LlamaClient {
    config: LlamaConfig,
    client: Client,
}

impl LlamaClient {
    /// Create a new client from configuration
    pub fn new(config: LlamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LlamaConfig::from_env())
    }

    pub fn config(&self) -> &LlamaConfig {
        &self.config
    }

    /// Candidate endpoints in priority order: llama.cpp native first, then
    /// the OpenAI-compatible route
    pub fn candidates(&self) -> [Endpoint; 2] {
        [
            Endpoint {
                url: format!("{}/completion", self.config.base_url),
                kind: EndpointKind::Native,
            },
            Endpoint {
                url: format!("{}/v1/completions", self.config.base_url),
                kind: EndpointKind::OpenAi,
            },
        ]
    }

    /// Probe the candidates with a minimal trial request and bind the first
    /// one that answers with a success status
    ///
    /// This runs fresh on every generation call, so a server started
    /// mid-session is picked up automatically at the cost of one discovery
    /// round-trip per query.
    pub async fn discover_endpoint(&self) -> Option<Endpoint> {
        for endpoint in self.candidates() {
            let probe = self
                .client
                .post(&endpoint.url)
                .timeout(self.config.probe_timeout())
                .json(&json!({ "prompt": "test", "max_tokens": 1 }))
                .send()
                .await;

            match probe {
                Ok(response) if response.status().is_success() => return Some(endpoint),
                _ => continue,
            }
        }

        None
    }

    /// Assemble the generation prompt from question, retrieved context, and
    /// source attributions
    pub fn build_prompt(question: &str, context: &str, sources: &[String]) -> String {
        format!(
            "Context: {context}\n\nQuestion: {question}\n\n\
             Based on the provided context, please answer the question:\n\
             Sources: {}\nAnswer:",
            sources.join(", ")
        )
    }

    async fn send_request(&self, endpoint: &Endpoint, prompt: &str) -> Result<reqwest::Response> {
        let request = self
            .client
            .post(&endpoint.url)
            .timeout(self.config.request_timeout());

        let request = match endpoint.kind {
            EndpointKind::Native => request.json(&NativeRequest {
                prompt,
                n_predict: self.config.max_tokens,
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                stop: [STOP_SEQUENCE],
            }),
            EndpointKind::OpenAi => request.json(&OpenAiRequest {
                prompt,
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                stop: [STOP_SEQUENCE],
            }),
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(format!("generation request to {} timed out", endpoint.url))
            } else {
                Error::Connection(format!("error querying llama.cpp server: {}", e))
            }
        })?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "llama.cpp server returned status {}",
                response.status()
            )));
        }

        Ok(response)
    }

    async fn parse_answer(endpoint: &Endpoint, response: reqwest::Response) -> Result<String> {
        match endpoint.kind {
            EndpointKind::Native => {
                let body: NativeResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::Parse(format!("error parsing server response: {}", e)))?;
                Ok(body.content.trim().to_string())
            }
            EndpointKind::OpenAi => {
                let body: OpenAiResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::Parse(format!("error parsing server response: {}", e)))?;
                let choice = body.choices.into_iter().next().ok_or_else(|| {
                    Error::Parse("unexpected response format from llama.cpp server".to_string())
                })?;
                Ok(choice.text.trim().to_string())
            }
        }
    }
}

#[async_trait]
impl GenerationBackend for LlamaClient {
    async fn generate(&self, question: &str, context: &str, sources: &[String]) -> Result<String> {
        let Some(endpoint) = self.discover_endpoint().await else {
            return Err(Error::BackendUnavailable(format!(
                "could not connect to the llama.cpp server at {}. Verify the server is \
                 running; start it with: ./server --port 8000",
                self.config.base_url
            )));
        };

        let prompt = Self::build_prompt(question, context, sources);
        let response = self.send_request(&endpoint, &prompt).await?;
        Self::parse_answer(&endpoint, response).await
    }
}
