// main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use fulfillment_ids::config::AppConfig;
use fulfillment_ids::id::{IdentifierResponseBuilder, SharedIdentifierBuilder};
use fulfillment_ids::logger::init_logger;
use fulfillment_ids::service;
use fulfillment_ids::shutdown;
use fulfillment_ids::sinks::spawn_stdout_sink;
use fulfillment_ids::types::{OutputFormat, Response};

#[derive(Parser, Debug)]
#[command(name = "fulfillment-ids", version, about = "Issue sequential fulfillment identifiers")]
struct Cli {
    /// Path to YAML config (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// First identifier to issue, overrides ids.start
    #[arg(long, global = true)]
    start: Option<u64>,

    /// Output format (json | text), overrides output.format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a fixed number of responses
    Issue {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,
    },
    /// Print one response per line read from stdin
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config, apply flag overrides
    let mut cfg = AppConfig::load_or_default(cli.config.as_deref())?;
    cfg.apply_overrides(cli.start, cli.format);

    // 2) Logger
    init_logger(&cfg.logging)?;

    // 3) Builder + sink
    let plain = IdentifierResponseBuilder::from_config(&cfg.ids);
    tracing::info!(
        start = plain.peek(),
        width = plain.width(),
        overflow = ?plain.overflow(),
        "identifier builder ready"
    );
    let builder = SharedIdentifierBuilder::from(plain);
    let (tx, rx) = mpsc::channel::<Response>(256);
    let sink = spawn_stdout_sink(rx, cfg.output.format);

    // 4) Run
    let outcome = match cli.command {
        Command::Issue { count } => service::issue(&builder, count, &tx).await,
        Command::Serve => {
            let stdin = BufReader::new(tokio::io::stdin());
            service::serve_lines(stdin, &builder, &tx, shutdown::ctrl_c()).await
        }
    };

    // 5) Close the channel and let the sink drain
    drop(tx);
    let written = sink.await??;
    tracing::info!(written, next = builder.peek(), "exiting");
    outcome.map(|_| ())
}
