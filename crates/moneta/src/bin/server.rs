//! Text-protocol currency server.
//!
//! Loads the currency table once at startup and serves `GET <query>`
//! lookups over persistent TCP connections. Test with netcat:
//!
//! ```text
//! $ nc localhost 4040
//! Connected...
//! Usage: GET <currency, country, or code>
//! GET "Costa Rica"
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use moneta::{CurrencyServer, MonetaError, WireProtocol};

/// Dataset file, resolved relative to the working directory.
const DATA_FILE: &str = "data.csv";

/// Global currency service (text protocol)
#[derive(Parser, Debug)]
#[command(name = "moneta-server")]
#[command(about = "Currency lookup service, text protocol")]
struct Args {
    /// Service endpoint (host:port)
    #[arg(short, long, default_value = "0.0.0.0:4040")]
    endpoint: String,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), MonetaError> {
    let table = moneta_data::load(DATA_FILE)?;
    tracing::info!(records = table.len(), "currency table loaded");

    let server = CurrencyServer::builder()
        .bind(&args.endpoint)
        .protocol(WireProtocol::Text)
        .build(table)
        .await?;
    server.run().await
}
