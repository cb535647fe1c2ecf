use bridge_server::{Config, Server, ServerState};
use bridge_server::utils::{load_dotenv, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env must load before configuration is read)
    load_dotenv();

    // 2. Load configuration and initialize logging
    let config = Config::from_env();
    setup_environment(&config);

    tracing::info!("MailChimp bridge starting...");

    // 3. Initialize server state (database + remote client + services)
    let state = ServerState::initialize(&config).await?;

    // 4. Start the HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
