use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Upstream Provider Args ---
    /// Type of LLM provider used to generate replies (gemini, echo)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "gemini")]
    pub chat_llm_type: String,

    /// API key for the upstream provider (Google AI Studio key for gemini)
    #[arg(long = "api-key", env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub chat_api_key: String,

    /// Model identifier sent with every generation request
    #[arg(long, env = "CHAT_MODEL", default_value = "gemini-3-flash-preview")]
    pub chat_model: String,

    /// Base URL of the Gemini REST API, without the /models/... suffix
    #[arg(
        long,
        env = "CHAT_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub chat_base_url: String,

    /// Upper bound in seconds for a single upstream call. 0 disables the timeout.
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "60")]
    pub upstream_timeout_secs: u64,

    // --- HTTP Server Args ---
    /// Interface the HTTP server binds to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Answer upstream failures with 502 instead of 200. The body shape is the same either way.
    #[arg(long, env = "STRICT_STATUS", default_value = "false")]
    pub strict_status: bool,
}

impl Args {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Arguments for the terminal chat front-end.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Terminal chat against a running exchange server", long_about = None)]
pub struct ChatArgs {
    /// Full URL of the exchange endpoint.
    #[arg(long, env = "API_URL", default_value = "http://127.0.0.1:3000/api/content")]
    pub api_url: String,

    /// Seconds to wait for the exchange server before giving up on a message.
    #[arg(long, env = "CLIENT_TIMEOUT_SECS", default_value = "90")]
    pub timeout_secs: u64,
}
