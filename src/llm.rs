//! Text-generation helper
//!
//! Used only to phrase evidence claims, never to make decisions. Every
//! failure path returns the caller-provided fallback, so the pipeline
//! always sees a non-empty claim string.
//!
//! The client is constructed once at startup and injected into crews as an
//! `Arc` — there is no process-wide singleton.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Reusable text generator (connection-pooled)
pub struct TextGenerator {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TextGenerator {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: GEMINI_ENDPOINT.to_string(),
        }
    }

    /// Generator that never reaches the network; used when no API key is
    /// configured and in tests. Every call returns the fallback.
    pub fn disabled() -> Self {
        Self::new(String::new())
    }

    /// Generate a claim sentence for a prompt. Always returns a non-empty
    /// string: any failure is absorbed and the fallback is returned.
    pub async fn generate(&self, prompt: &str, fallback: &str) -> String {
        if self.api_key.is_empty() {
            debug!("No API key configured, using fallback text");
            return fallback.to_string();
        }

        match self.call_api(prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Empty generation response, using fallback text");
                fallback.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Text generation failed, using fallback text");
                fallback.to_string()
            }
        }
    }

    async fn call_api(&self, prompt: &str) -> crate::Result<String> {
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: 256,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(crate::error::ResearchError::LlmError(format!(
                "generation API returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateResponse = response.json().await?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                crate::error::ResearchError::LlmError("no candidates in response".to_string())
            })
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
