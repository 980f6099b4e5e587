//! # Commands Module
//!
//! Every action the shell can perform.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Add, remove, clear, view
//! ├── builder.rs  ◄─── Custom cake selections
//! ├── checkout.rs ◄─── Pay, confirm mpesa, status
//! ├── auth.rs     ◄─── Login, signup, password reset, logout
//! └── account.rs  ◄─── Order history, favorites
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  yetta> add seasonal-pie                                                │
//! │         │                                                               │
//! │         │ (clap parses the line)                                        │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(&state, "seasonal-pie")                    │
//! │      -> Result<CartResponse, ApiError>                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  shell renders the response (or the error message)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Responses are plain serializable structs so another front-end could
//! drive the same commands.

pub mod account;
pub mod auth;
pub mod builder;
pub mod cart;
pub mod checkout;
