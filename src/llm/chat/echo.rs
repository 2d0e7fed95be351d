use async_trait::async_trait;
use log::debug;

use super::{ ChatClient, CompletionResponse, LlmError };
use crate::llm::LlmConfig;

/// Replies with the prompt itself. Lets the server run without credentials.
pub struct EchoChatClient {
    model: String,
}

impl EchoChatClient {
    pub fn new(model: Option<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| "echo".to_string()),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.completion_model.clone())
    }
}

#[async_trait]
impl ChatClient for EchoChatClient {
    async fn generate(&self, prompt: &str) -> Result<CompletionResponse, LlmError> {
        debug!("EchoChatClient::generate() → {} bytes", prompt.len());
        Ok(CompletionResponse { response: prompt.to_string() })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        None
    }
}
