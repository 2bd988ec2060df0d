//! Command-line interface.

use clap::{Parser, Subcommand};

/// Slack tic-tac-toe slash-command server.
#[derive(Parser, Debug)]
#[command(name = "ttt_server")]
#[command(about = "Slack slash-command server for channel tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind address, overriding IP_ADDRESS
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overriding PORT
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path, overriding DATABASE_URL
        #[arg(long)]
        database_url: Option<String>,
    },
}
