//! Server entry point.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ttt_server::{
    locales, router, AppConfig, AppState, Cli, Command, GameEngine, RandomFirstMover,
    SlackClient, SqliteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            host,
            port,
            database_url,
        } => serve(host, port, database_url).await,
    }
}

async fn serve(
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(database_url) = database_url {
        config = config.with_database_url(database_url);
    }

    // Verify the API token before accepting any commands.
    let slack = Arc::new(SlackClient::new(config.slack().api_token().clone()));
    slack.auth_test().await?;

    let store = Arc::new(SqliteStore::new(config.database_url().clone())?);
    let engine = Arc::new(GameEngine::new(
        store,
        slack,
        Arc::new(RandomFirstMover),
        ttt_core::DEFAULT_SIZE,
    ));

    let state = AppState {
        engine,
        command_token: config.slack().command_token().clone(),
        locale: locales::get(*config.locale()),
    };
    let app = router(state);

    let listener =
        tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(host = %config.host(), port = *config.port(), "Server ready");
    axum::serve(listener, app).await?;

    Ok(())
}
