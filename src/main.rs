//! bridge-engine CLI
//!
//! Serve the payment bridge over HTTP, or emit random traffic for load
//! scripts.
//!
//! # Usage
//!
//! ```bash
//! # Serve the HTTP API on the default bind address
//! bridge-engine serve
//!
//! # Bind elsewhere, with the reset endpoint disabled
//! bridge-engine serve --host 0.0.0.0 --port 8080 --locked
//!
//! # Emit a random payment batch as JSON
//! bridge-engine generate --count 50
//! ```

use bridge_engine::api::{self, AppState};
use bridge_engine::core::user::User;
use bridge_engine::engine::state::BridgeState;
use bridge_engine::simulation::traffic::{generate_traffic, TrafficConfig};
use std::net::SocketAddr;
use std::process;

fn print_usage() {
    eprintln!(
        r#"bridge-engine — cross-currency payment bridge simulator

USAGE:
    bridge-engine <COMMAND> [OPTIONS]

COMMANDS:
    serve       Run the HTTP API server
    generate    Emit a random payment batch as JSON
    help        Show this message

OPTIONS (serve):
    --host <ADDR>   Bind address (default: 127.0.0.1)
    --port <PORT>   Bind port (default: 3000)
    --locked        Disable the /reset endpoint

OPTIONS (generate):
    --count <N>     Number of requests (default: 100)

EXAMPLES:
    bridge-engine serve
    bridge-engine serve --host 0.0.0.0 --port 8080 --locked
    bridge-engine generate --count 50"#
    );
}

async fn cmd_serve(args: &[String]) {
    let mut host = "127.0.0.1".to_string();
    let mut port = 3000u16;
    let mut locked = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                i += 1;
                host = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--host requires an address");
                    process::exit(1);
                });
            }
            "--port" => {
                i += 1;
                port = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--port requires a number");
                    process::exit(1);
                });
            }
            "--locked" => locked = true,
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let addr: SocketAddr = format!("{host}:{port}").parse().unwrap_or_else(|e| {
        eprintln!("Invalid bind address '{host}:{port}': {e}");
        process::exit(1);
    });

    let state = AppState::new(BridgeState::seed(), locked);
    if let Err(e) = api::serve(addr, state).await {
        eprintln!("Server error: {}", e);
        process::exit(1);
    }
}

fn cmd_generate(args: &[String]) {
    let mut count = 100usize;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                i += 1;
                count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--count requires a number");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = TrafficConfig {
        request_count: count,
        ..Default::default()
    };
    let batch = generate_traffic(&config, &User::seed_roster());
    println!("{}", serde_json::to_string_pretty(&batch).unwrap());
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "serve" => cmd_serve(&args[2..]).await,
        "generate" => cmd_generate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        command => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
