pub mod cli;
pub mod client;
pub mod exchange;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use exchange::ExchangeService;
use llm::LlmConfig;
use llm::chat::new_client as new_chat_client;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let chat_config = LlmConfig::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr());
    info!("Chat LLM Type: {}", chat_config.llm_type);
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("API Key Set: {}", chat_config.api_key.is_some());
    info!("Upstream Timeout: {:?}", chat_config.timeout);
    info!("Strict Status: {}", args.strict_status);
    info!("-------------------------");

    let chat_client = new_chat_client(&chat_config)?;
    let base_url = chat_client.get_base_url();
    info!(
        "Chat client configured: Type={}, Model={}, BaseURL={:?}",
        chat_config.llm_type,
        chat_client.get_model(),
        base_url.as_deref().unwrap_or("none")
    );

    let exchange = ExchangeService::new(chat_client);
    info!("Exchange service ready, model={}", exchange.model());
    let addr = args.server_addr();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, exchange, args);
    server.run().await?;

    Ok(())
}
