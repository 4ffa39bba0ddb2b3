//! # Cart Replay
//!
//! Folds a JSON command log into a cart and prints the resulting snapshot.
//!
//! ## Usage
//! ```bash
//! # Replay with default pricing
//! cargo run -p swcart-session --bin cart-replay -- ./cart-log.json
//!
//! # Use a specific config file
//! cargo run -p swcart-session --bin cart-replay -- --config ./cart.toml ./cart-log.json
//! ```
//!
//! Non-numeric totals print as `null`.

use std::env;
use std::path::PathBuf;

use swcart_session::{init_tracing, read_command_log, CartConfig, CartSession};
use tracing::info;

fn print_help() {
    println!("swcart Command Log Replay");
    println!();
    println!("Usage: cart-replay [OPTIONS] <LOG.json>");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Cart config file (default: platform config dir)");
    println!("  -h, --help           Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut log_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => log_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let Some(log_path) = log_path else {
        print_help();
        return Err("missing command log path".into());
    };

    let config = CartConfig::load(config_path)?;
    let commands = read_command_log(&log_path)?;
    info!(path = ?log_path, commands = commands.len(), "Replaying command log");

    let session = CartSession::replay(&config, commands);
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);

    Ok(())
}
