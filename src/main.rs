use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use histquote::api::yahoo::YahooChartClient;
use histquote::cli::{self, Args, RunError};
use histquote::config::ProviderConfig;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries only price lines and the fixed
    // usage message. Default filter is warn, override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Any parse failure, including too few arguments, is the fixed usage
    // message on stdout and exit 1. No network call happens before this.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            println!("Invalid arguments");
            process::exit(1);
        }
    };

    let config = ProviderConfig::from_env();
    let provider = match YahooChartClient::new(&config) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("Error fetching data: {}", err);
            process::exit(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match cli::run(&provider, &args, &mut stdout).await {
        Ok(()) => {}
        Err(RunError::Provider(err)) => {
            eprintln!("Error fetching data: {}", err);
            process::exit(2);
        }
        Err(RunError::Io(err)) => {
            eprintln!("Error writing output: {}", err);
            process::exit(2);
        }
    }
}
