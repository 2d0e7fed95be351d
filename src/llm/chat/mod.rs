pub mod echo;
pub mod gemini;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use super::{ LlmConfig, LlmType };
use self::echo::EchoChatClient;
use self::gemini::GeminiChatClient;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub response: String,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} API key is required")]
    MissingApiKey(LlmType),

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("upstream provider returned {status}: {message}")]
    Provider {
        status: u16,
        message: String,
    },

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

/// Narrow seam over the text-generation provider.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends `prompt` unmodified and returns the provider's text output.
    async fn generate(&self, prompt: &str) -> Result<CompletionResponse, LlmError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Gemini => {
            let specific_client = GeminiChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::Echo => {
            let specific_client = EchoChatClient::from_config(config);
            Arc::new(specific_client)
        }
    };
    Ok(client)
}
