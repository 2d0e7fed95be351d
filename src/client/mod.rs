use crate::models::chat::Message;
use crate::models::exchange::{ ExchangeRequest, ExchangeResponse };

use async_trait::async_trait;
use log::{ debug, warn };
use reqwest::Client as HttpClient;
use std::sync::atomic::{ AtomicBool, Ordering };
use std::sync::{ Arc, Mutex, MutexGuard };
use std::time::Duration;
use thiserror::Error;

pub const GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Sits above the server's default upstream timeout so its error text arrives first.
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to exchange service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("exchange service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("exchange service returned {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },
}

#[async_trait]
pub trait ExchangeApi: Send + Sync {
    async fn ask(&self, text: &str) -> Result<String, ClientError>;
}

/// Talks to `POST /api/content` on a running exchange server.
pub struct HttpExchangeClient {
    http: HttpClient,
    api_url: String,
    timeout: Duration,
}

impl HttpExchangeClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(api_url, DEFAULT_CLIENT_TIMEOUT)
    }

    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() { ClientError::Timeout(self.timeout) } else { ClientError::Http(e) }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl ExchangeApi for HttpExchangeClient {
    async fn ask(&self, text: &str) -> Result<String, ClientError> {
        let req = ExchangeRequest { prompt: text.to_string() };
        let resp = self.http
            .post(&self.api_url)
            .json(&req)
            .send().await
            .map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        // A strict-status server still sends the usual body with its 502.
        match serde_json::from_str::<ExchangeResponse>(&body) {
            Ok(parsed) => Ok(parsed.response),
            Err(e) => {
                debug!("Undecodable exchange body ({}): {}", e, body);
                Err(ClientError::Status { status: status.as_u16(), body })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Blank input, nothing was sent.
    Ignored,
    /// A previous submission is still outstanding.
    Busy,
    Replied(Message),
}

/// Owns one chat session: the ordered message list and the busy flag.
pub struct ChatController {
    api: Arc<dyn ExchangeApi>,
    messages: Mutex<Vec<Message>>,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChatController {
    pub fn new(api: Arc<dyn ExchangeApi>) -> Self {
        Self {
            api,
            messages: Mutex::new(vec![Message::assistant(GREETING)]),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock_messages().clone()
    }

    /// Sends `text` and appends the reply. At most one submission is in flight;
    /// a call made while busy is a no-op.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            debug!("Submission dropped, a request is already outstanding");
            return SubmitOutcome::Busy;
        }
        let _guard = BusyGuard(&self.busy);

        self.lock_messages().push(Message::user(text));

        let content = match self.api.ask(text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Exchange request failed: {}", e);
                format!("Error: {}", e)
            }
        };

        let reply = Message::assistant(content);
        self.lock_messages().push(reply.clone());
        SubmitOutcome::Replied(reply)
    }

    fn lock_messages(&self) -> MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
