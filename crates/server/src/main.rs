//! docshelf server binary.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    server::init_tracing(&config);

    server::start_server(config).await?;

    Ok(())
}
