use crate::llm::chat::ChatClient;
use crate::models::exchange::ExchangeResponse;

use log::{ debug, error, info };
use std::sync::Arc;

/// Result of one prompt → upstream → reply round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Reply(String),
    Failed(String),
}

impl ExchangeOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExchangeOutcome::Failed(_))
    }

    pub fn into_response(self) -> ExchangeResponse {
        match self {
            ExchangeOutcome::Reply(text) | ExchangeOutcome::Failed(text) => ExchangeResponse {
                response: text,
            },
        }
    }
}

/// Stateless mediator between the HTTP surface and the upstream provider.
#[derive(Clone)]
pub struct ExchangeService {
    chat_client: Arc<dyn ChatClient>,
}

impl ExchangeService {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn model(&self) -> String {
        self.chat_client.get_model()
    }

    /// Forwards `prompt` as-is and never fails: upstream errors come back as `Failed`.
    pub async fn exchange(&self, prompt: &str) -> ExchangeOutcome {
        debug!("Exchange prompt ({} bytes): {:?}", prompt.len(), prompt);

        match self.chat_client.generate(prompt).await {
            Ok(resp) => {
                info!("Upstream response: {}", resp.response);
                ExchangeOutcome::Reply(resp.response)
            }
            Err(e) => {
                error!("Upstream call failed: {}", e);
                ExchangeOutcome::Failed(format!("Error: {}", e))
            }
        }
    }
}
