//! fraggate-server binary: log-webhook gate service

use std::path::PathBuf;

use fraggate_core::GateConfig;
use fraggate_server::ServerBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config_path = args.get(1).map(PathBuf::from);
    let port: u16 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3000);

    let config = if let Some(path) = config_path {
        GateConfig::load(&path)?
    } else {
        GateConfig::from_env()
    };

    let server = ServerBuilder::new(config).port(port).build()?;

    tracing::info!("Webhook gate ready on port {}", port);
    server.run().await?;

    Ok(())
}
