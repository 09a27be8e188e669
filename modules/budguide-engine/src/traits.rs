// Trait abstraction for the external text-generation call.
//
// TextGenerator is the only suspending boundary in a consultation. Putting
// it behind a trait keeps the reconciler deterministic under test: no
// network, no API key, `cargo test` in seconds (see `testing::MockGenerator`).

use anyhow::Result;
use async_trait::async_trait;

/// Bounded generation parameters for one consultation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_output_tokens: 1024,
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// One request/response exchange with the generation service.
    async fn generate(&self, system: &str, prompt: &str, params: GenerationParams)
        -> Result<String>;
}

#[async_trait]
impl TextGenerator for ai_client::Gemini {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String> {
        self.generate_text(system, prompt, params.temperature, params.max_output_tokens)
            .await
    }
}
