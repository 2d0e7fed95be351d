use chrono::Local;
use clap::Parser;
use dotenv::dotenv;
use gemini_exchange::cli::ChatArgs;
use gemini_exchange::client::{ ChatController, HttpExchangeClient, SubmitOutcome };
use gemini_exchange::models::chat::Message;
use log::info;
use std::error::Error;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{ AsyncBufReadExt, BufReader };

fn print_message(msg: &Message) {
    let time = msg.timestamp.with_timezone(&Local).format("%H:%M");
    println!("{} {}> {}", time, msg.role, msg.content);
}

fn prompt() {
    print!("you> ");
    std::io::stdout().flush().ok();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = ChatArgs::parse();

    let api = HttpExchangeClient::with_timeout(args.api_url, Duration::from_secs(args.timeout_secs))?;
    info!("Exchange endpoint: {}", api.api_url());
    let controller = ChatController::new(Arc::new(api));
    for msg in controller.messages() {
        print_message(&msg);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        match controller.submit(&line).await {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Busy => println!("(still waiting for the previous reply)"),
            SubmitOutcome::Replied(reply) => print_message(&reply),
        }
        prompt();
    }
    println!();

    Ok(())
}
