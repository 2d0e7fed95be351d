pub mod api;

use crate::cli::Args;
use crate::exchange::ExchangeService;
use std::error::Error;
use log::{ info, error };

pub struct Server {
    addr: String,
    exchange: ExchangeService,
    args: Args,
}

impl Server {
    pub fn new(
        addr: String,
        exchange: ExchangeService,
        args: Args,
    ) -> Self {
        Self {
            addr,
            exchange,
            args,
        }
    }

    /// Serves until Ctrl-C.
    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await
            .map_err(|e| format!("Failed to bind HTTP server to {}: {}. Try a different port.", self.addr, e))?;
        info!("app is listening on http://{}", listener.local_addr()?);

        let app = api::router(self.exchange.clone(), self.args.strict_status);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
