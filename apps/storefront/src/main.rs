//! # Yetta Storefront Entry Point
//!
//! ```text
//! $ yetta-storefront --config ./storefront.toml
//! Welcome to Yetta Bakery. Type `help` for commands.
//! yetta>
//! ```
//!
//! Setup lives in `lib.rs` so it can be tested.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match yetta_storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("yetta-storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
