//! TCP chat relay client.
//!
//! Connects to the relay server, sends typed lines and prints everything relayed back.
//! The first line sent is the display name (or `--name` when given).
//! Type `quit` to leave.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-client -- --host 127.0.0.1 --port 5555
//! cargo run --bin relay-client -- -p 5555 --name Alice
//! ```

use std::net::IpAddr;

use clap::Parser;

use relay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relay-client")]
#[command(about = "TCP chat relay client", long_about = None)]
struct Args {
    /// Server IP address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Server port
    #[arg(short = 'p', long, default_value = "5555", value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Display name sent on connect
    #[arg(short = 'n', long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    if let Err(e) = setup_logger(&[env!("CARGO_BIN_NAME"), "relay_client"], "info", None) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the client
    if let Err(e) = relay_client::run_client(args.host, args.port, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
