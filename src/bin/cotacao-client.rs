use clap::Parser;
use cotacao::{
    logger,
    services::{
        fetcher::{
            quote_fetcher::{DEFAULT_ORIGIN_URL, QuoteFetcher},
            sink::{FileSink, TraitSink},
        },
        transport::ReqwestTransport,
    },
    utils::deadline::Deadline,
};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Fetches the current dollar bid from the quote service and saves it to a file.
#[derive(Parser)]
#[command(name = "cotacao-client")]
struct Cli {
    #[arg(short, long, default_value = DEFAULT_ORIGIN_URL)]
    url: String,

    #[arg(short, long, default_value = "cotacao.txt")]
    output: PathBuf,

    /// Budget for the whole request, body included
    #[arg(short, long, default_value_t = 300)]
    timeout_ms: u64,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    // Everything below, client setup included, runs against this deadline
    let deadline = Deadline::after(Duration::from_millis(cli.timeout_ms));

    if let Err(err) = logger::init_logger(&cli.log_level, "plain", true) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }

    let transport = match ReqwestTransport::new() {
        Ok(transport) => Arc::new(transport),
        Err(err) => {
            error!("Error: {}", err);
            process::exit(1);
        }
    };

    let fetcher = QuoteFetcher::new(transport, cli.url);
    let sink = FileSink::new(cli.output);

    match fetcher.fetch_and_save(&deadline, &sink).await {
        Ok(line) => info!(
            "request processed with output file: {} ({})",
            sink.location().display(),
            line
        ),
        Err(err) => {
            error!("Error: {}", err);
            process::exit(1);
        }
    }
}
