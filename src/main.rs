mod app;
mod bootstrap;
mod config;
mod docs;
mod routes;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

/// HTTP service for client records.
#[derive(Parser, Debug)]
#[command(name = "clientes", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bootstrap storage and serve HTTP (default).
    Serve,

    /// Write the OpenAPI document and exit.
    Docs {
        #[arg(short, long, default_value = "api.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    bootstrap::init_base().await;

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => bootstrap::run().await,
        Command::Docs { output } => docs::generate_docs(&output).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("fatal: {:?}", err);
            ExitCode::FAILURE
        }
    }
}
