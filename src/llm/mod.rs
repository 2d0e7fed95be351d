pub mod chat;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmType {
    Gemini,
    Echo,
}

impl fmt::Display for LlmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmType::Gemini => write!(f, "gemini"),
            LlmType::Echo => write!(f, "echo"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseLlmTypeError {
    message: String,
}

impl fmt::Display for ParseLlmTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseLlmTypeError {}
impl FromStr for LlmType {
    type Err = ParseLlmTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmType::Gemini),
            "echo" => Ok(LlmType::Echo),
            _ =>
                Err(ParseLlmTypeError {
                    message: format!("Invalid LLM type: '{}'", s),
                }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub llm_type: LlmType,
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_type: LlmType::Gemini,
            api_key: None,
            completion_model: None,
            base_url: None,
            timeout: None,
        }
    }
}

impl LlmConfig {
    /// Builds the upstream configuration from the server arguments.
    /// Empty strings and a zero timeout are treated as "not set".
    pub fn from_args(args: &crate::cli::Args) -> Result<Self, ParseLlmTypeError> {
        let llm_type = args.chat_llm_type.parse()?;
        let non_empty = |s: &str| {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        };

        Ok(Self {
            llm_type,
            api_key: non_empty(&args.chat_api_key),
            completion_model: non_empty(&args.chat_model),
            base_url: non_empty(&args.chat_base_url),
            timeout: Some(args.upstream_timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }
}
