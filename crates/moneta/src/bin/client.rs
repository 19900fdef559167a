//! Interactive client for the JSON-protocol server.
//!
//! Reads one search term per line from the operator, sends it as
//! `{"Get": "<term>"}`, and prints the records that come back. The
//! wildcard `*` lists the whole table.

use std::io::Write as _;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing_subscriber::EnvFilter;

use moneta_data::Currency;
use moneta_protocol::{Codec, CurrencyRequest, JsonCodec, JsonReader, ProtocolError};

const CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Global currency service client
#[derive(Parser, Debug)]
#[command(name = "moneta-client")]
#[command(about = "Interactive client for the JSON currency service")]
struct Args {
    /// Service endpoint (host:port)
    #[arg(short, long, default_value = "localhost:4040")]
    endpoint: String,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let stream = match connect(&args.endpoint).await {
        Some(stream) => stream,
        None => {
            eprintln!("failed to connect to {}", args.endpoint);
            std::process::exit(1);
        }
    };
    println!("connected to currency service: {}", args.endpoint);

    if let Err(e) = repl(stream).await {
        eprintln!("connection lost: {e}");
        std::process::exit(1);
    }
}

/// Dials the endpoint, retrying a few times before giving up.
async fn connect(endpoint: &str) -> Option<TcpStream> {
    for attempt in 1..=CONNECT_ATTEMPTS {
        println!("creating connection socket to {endpoint}");
        match TcpStream::connect(endpoint).await {
            Ok(stream) => return Some(stream),
            Err(e) => {
                eprintln!("attempt {attempt}/{CONNECT_ATTEMPTS} failed: {e}");
                if attempt < CONNECT_ATTEMPTS {
                    println!("trying again in {CONNECT_RETRY_DELAY:?}");
                    tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                }
            }
        }
    }
    None
}

/// The prompt loop: one query per line, one response per query.
async fn repl(stream: TcpStream) -> std::io::Result<()> {
    let codec = JsonCodec;
    let (read, mut write) = stream.into_split();
    let mut responses = JsonReader::new(read);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("currency > ");
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            return Ok(()); // operator closed stdin
        };
        // One whitespace-delimited search term per prompt.
        let Some(param) = line.split_whitespace().next() else {
            println!("Usage: <search string or *>");
            continue;
        };

        let request = CurrencyRequest {
            get: param.to_string(),
        };
        let payload = match codec.encode(&request) {
            Ok(mut bytes) => {
                bytes.push(b'\n');
                bytes
            }
            Err(e) => {
                println!("failed to encode request: {e}");
                continue;
            }
        };
        write.write_all(&payload).await?;

        match responses.read_value::<Vec<Currency>>().await {
            Ok(Some(currencies)) if currencies.is_empty() => println!("nothing found"),
            Ok(Some(currencies)) => {
                for c in &currencies {
                    println!("{} {} {} {}", c.name, c.code, c.number, c.country);
                }
            }
            Ok(None) => {
                println!("server closed the connection");
                return Ok(());
            }
            Err(ProtocolError::Decode(e)) => {
                // The server answered with something that isn't a
                // result array — most likely an {"Error": ...} object.
                println!("failed to decode response: {e}");
            }
            Err(e) => {
                println!("failed to receive response: {e}");
                return Ok(());
            }
        }
    }
}
