// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rqe` — CLI for an RQE rule-matching cluster.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod client_queries;
mod color;
mod commands;
mod exit_error;
mod output;
mod tls;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::client::{ClientError, RqeClient};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "rqe",
    about = "CLI for RQE",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    styles = color::styles(),
)]
struct Cli {
    /// RQE hostname or ip
    #[arg(long, global = true, default_value = "localhost")]
    host: String,

    /// RQE port
    #[arg(long, global = true, default_value_t = 8322)]
    port: u16,

    /// PEM bundle of CA certificates the server must chain to
    #[arg(long, global = true, env = "RQE_CA_CERT", value_name = "PATH")]
    ca_cert: Option<PathBuf>,

    /// Time budget for one exchange (connect, send, receive), in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    timeout_ms: u64,

    /// Disable colorized text
    #[arg(long, global = true)]
    no_color: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cluster commands
    #[command(visible_alias = "c")]
    Cluster {
        #[command(subcommand)]
        command: commands::cluster::ClusterCommand,
    },

    /// RQ commands
    #[command(name = "rq")]
    Rq {
        #[command(subcommand)]
        command: commands::rq::RqCommand,
    },

    /// Entry commands
    #[command(visible_alias = "e")]
    Entry {
        #[command(subcommand)]
        command: commands::entry::EntryCommand,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RQE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = RqeClient::new(
        cli.host,
        cli.port,
        cli.ca_cert,
        Duration::from_millis(cli.timeout_ms),
    );

    match cli.command {
        Command::Cluster { command } => commands::cluster::handle(command, &client, cli.format).await,
        Command::Rq { command } => commands::rq::handle(command, &client, cli.format).await,
        Command::Entry { command } => commands::entry::handle(command, &client, cli.format).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    if let Err(err) = run(cli).await {
        let code = if let Some(exit) = err.downcast_ref::<ExitError>() {
            eprintln!("{exit}");
            exit.code
        } else if let Some(client_err) = err.downcast_ref::<ClientError>() {
            eprintln!("{client_err}");
            client_err.exit_code()
        } else {
            eprintln!("{err:#}");
            1
        };
        std::process::exit(code);
    }
}
