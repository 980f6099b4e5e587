//! # Yetta Storefront Library
//!
//! Core library for the Yetta Bakery storefront shell.
//! `run()` is the entry point used by the binary.
//!
//! ## Module Organization
//! ```text
//! yetta_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── shell.rs        ◄─── Line parser and render loop
//! ├── menu.rs         ◄─── Today's specials
//! ├── state/
//! │   ├── mod.rs      ◄─── StorefrontState
//! │   ├── cart.rs     ◄─── Cart state + change events
//! │   ├── builder.rs  ◄─── Cake in progress
//! │   ├── auth.rs     ◄─── Logged-in session
//! │   ├── checkout.rs ◄─── Checkout orchestration
//! │   ├── account.rs  ◄─── Favorites cache
//! │   └── config.rs   ◄─── Store name, currency
//! ├── commands/       ◄─── One module per concern
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod menu;
pub mod shell;
pub mod state;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yetta_client::ClientConfig;

use error::ApiError;
use state::StorefrontState;

/// Process arguments.
#[derive(Debug, Parser)]
#[command(name = "yetta-storefront", version, about = "Yetta Bakery storefront shell")]
pub struct Args {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Runs the storefront shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN (RUST_LOG=yetta=debug for details)                  │
/// │                                                                         │
/// │  2. Load Config ──────────────────────────────────────────────────────► │
/// │     • defaults ◄── storefront.toml ◄── YETTA_* environment              │
/// │     • --config <path> must load, the default location falls back        │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • Restore the saved login (expired tokens are discarded)            │
/// │     • Empty cart, default cake                                          │
/// │                                                                         │
/// │  4. Shell Loop ───────────────────────────────────────────────────────► │
/// │     • until `quit` or end of input                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    let args = Args::parse();

    init_tracing();
    info!("Starting Yetta storefront");

    // An explicit path must load; the default location may be missing or stale.
    let config = match args.config {
        Some(path) => ClientConfig::load(Some(path))?,
        None => ClientConfig::load_or_default(None),
    };
    let state = StorefrontState::new(&config);

    let stdin = io::stdin();
    shell::run(&state, stdin.lock(), io::stdout()).await?;

    info!("Storefront shell closed");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=yetta=trace` - Show trace for yetta crates only
/// - Default: WARN, so the shell output stays readable
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
