use ctrlc::set_handler;
use tokio::net::TcpListener;

use jotter_server::models::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    jotter_server::init_tracing();

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    let config = ServerConfig::from_env()?;
    let binding_addr = config.bind_addr();
    let state = jotter_server::init(config).await?;
    let router = jotter_server::router(state);

    let listener = TcpListener::bind(&binding_addr).await?;
    tracing::info!("server running on {binding_addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
