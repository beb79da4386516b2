//! Clients for OpenAI-compatible APIs.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;
use tracing::warn;

/// Default timeout for API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client using the environment's `OPENAI_API_KEY`.
pub fn create_client() -> Client<OpenAIConfig> {
    build_client(OpenAIConfig::default(), Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a client for an OpenAI-compatible endpoint such as Groq.
pub fn create_compatible_client(base_url: &str, api_key: &str) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new()
        .with_api_base(base_url)
        .with_api_key(api_key);
    build_client(config, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

fn build_client(config: OpenAIConfig, timeout: Duration) -> Client<OpenAIConfig> {
    let client = Client::with_config(config);
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(http_client) => client.with_http_client(http_client),
        Err(e) => {
            warn!("Failed to configure HTTP timeout, using defaults: {}", e);
            client
        }
    }
}
