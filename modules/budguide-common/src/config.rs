use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // AI provider
    pub gemini_api_key: String,
    pub model: String,
    pub gemini_base_url: Option<String>,

    // Prompt knowledge override (optional TOML file path)
    pub knowledge_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: required_env("GEMINI_API_KEY"),
            model: env::var("BUDGUIDE_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),
            knowledge_path: env::var("BUDGUIDE_KNOWLEDGE_PATH").ok(),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
