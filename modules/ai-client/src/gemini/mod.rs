mod client;
pub(crate) mod types;

use anyhow::{anyhow, Result};
use tracing::warn;

use client::GeminiClient;
use types::GenerateContentRequest;

// =============================================================================
// Gemini Handle
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    model: String,
    base_url: Option<String>,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow!("GEMINI_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> GeminiClient {
        let client = GeminiClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    // =========================================================================
    // Convenience methods
    // =========================================================================

    /// One bounded text-generation exchange: system instruction plus a single
    /// user turn. Returns the first candidate's text.
    pub async fn generate_text(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<String> {
        let request = GenerateContentRequest::new()
            .system(system)
            .user(user)
            .temperature(temperature)
            .max_output_tokens(max_output_tokens);

        let response = self.client().generate_content(&self.model, &request).await?;

        if let Some(candidate) = response.candidates.first() {
            // A truncated answer loses whatever the model meant to end with.
            if candidate.finish_reason.as_deref() == Some("MAX_TOKENS") {
                warn!(model = %self.model, "Gemini response truncated at max output tokens");
            }
        }

        response
            .text()
            .ok_or_else(|| anyhow!("No response from Gemini"))
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate_text("You are a helpful assistant.", prompt, 0.0, 1024)
            .await
    }
}
