mod config;
mod db;
mod entities;
mod error;
mod gateway;
mod menu;
mod models;
mod query;

use tokio::io::BufReader;

use crate::{config::Config, gateway::Gateway, menu::Menu};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let mut gateway = Gateway::open(&config).await?;

    Menu::new(&mut gateway, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .run()
        .await?;

    gateway.close().await?;
    tracing::info!("bye");
    Ok(())
}
