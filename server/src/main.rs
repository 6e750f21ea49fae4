use sponsorhub_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, configuration, logging)
    let config = setup_environment()?;

    tracing::info!("SponsorHub server starting...");

    // 2. Server state
    let state = ServerState::initialize(&config).await;

    // 3. Bootstrap data
    sponsorhub_server::seed::ensure_bootstrap_admin(&state).await?;
    if config.is_development() {
        sponsorhub_server::seed::seed_demo_data(&state).await?;
    }

    // 4. HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
