//! Shift Planner CLI - credential tools.
//!
//! # Usage
//!
//! ```bash
//! # Issue a worker credential
//! planner-cli token issue --handle jsmith --name "John Smith" --role worker --id 7
//!
//! # Decode and verify a credential
//! planner-cli token inspect eyJhbGciOi...
//! ```
//!
//! # Commands
//!
//! - `token issue` - Mint a credential with the server's signing key
//! - `token inspect` - Verify a credential and print the identity as JSON
//!
//! Both read the key from `PLANNER_SIGNING_KEY` (or `SIGNKEY17`), loading a
//! `.env` file if present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "planner-cli")]
#[command(author, version, about = "Shift Planner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue and inspect credentials
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new credential
    Issue {
        /// Login handle
        #[arg(short = 'u', long)]
        handle: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`worker`, `admin`, or level `0`/`1`)
        #[arg(short, long, default_value = "worker")]
        role: String,

        /// User id (0 or higher)
        #[arg(short, long)]
        id: i64,
    },
    /// Verify a credential and print its identity
    Inspect {
        /// The credential to inspect
        credential: String,
    },
}

fn main() {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shift_planner_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Token { action } => match action {
            TokenAction::Issue {
                handle,
                name,
                role,
                id,
            } => commands::token::issue(&handle, &name, &role, id)?,
            TokenAction::Inspect { credential } => commands::token::inspect(&credential)?,
        },
    }
    Ok(())
}
