//! TCP chat relay server.
//!
//! Receives raw payloads from clients and relays them to all other connected clients.
//! The first payload of every connection is its display name.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-server
//! cargo run --bin relay-server -- --host 0.0.0.0 --port 5555 --log-file relay.log
//! ```

use std::{net::IpAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use relay_server::{
    infrastructure::registry::InMemorySessionRegistry,
    ui::Server,
    usecase::{
        BroadcastMessageUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
        ShutdownServerUseCase,
    },
};
use relay_shared::logger::setup_logger;

const LOG_TARGETS: [&str; 3] = [env!("CARGO_BIN_NAME"), "relay_server", "relay_shared"];

#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(about = "TCP chat relay server with broadcast support", long_about = None)]
struct Args {
    /// IP address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5555", value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// File receiving a copy of the server log
    #[arg(long, default_value = "server.log")]
    log_file: PathBuf,

    /// Log to stdout only
    #[arg(long)]
    no_log_file: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let log_file = (!args.no_log_file).then_some(args.log_file.as_path());
    if let Err(e) = setup_logger(&LOG_TARGETS, "debug", log_file) {
        eprintln!(
            "Cannot open log file '{}': {}. Logging to stdout only.",
            args.log_file.display(),
            e
        );
        if let Err(e) = setup_logger(&LOG_TARGETS, "debug", None) {
            eprintln!("Failed to initialize logging: {}", e);
        }
    }

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCases
    // 3. Server

    // 1. Create Registry (in-memory session collection)
    let registry = Arc::new(InMemorySessionRegistry::new());

    // 2. Create UseCases
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(registry.clone()));
    let broadcast_message_usecase = Arc::new(BroadcastMessageUseCase::new(registry.clone()));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(registry.clone()));
    let shutdown_server_usecase = Arc::new(ShutdownServerUseCase::new(registry.clone()));

    // 3. Create and run the server
    let server = Server::new(
        connect_session_usecase,
        broadcast_message_usecase,
        disconnect_session_usecase,
        shutdown_server_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
