//! # yetta-client: Bakery API Client
//!
//! Everything the storefront does over the network or on disk.
//!
//! ## Module Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          yetta-client                                   │
//! │                                                                         │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────────────────┐ │
//! │  │    config     │   │    session    │   │           api             │ │
//! │  │               │   │               │   │                           │ │
//! │  │ ClientConfig  │──►│ SessionStore  │   │ ApiClient                 │ │
//! │  │ TOML + env    │   │ AuthSession   │◄──│ auth, orders, favorites,  │ │
//! │  │               │   │ JWT `exp`     │   │ checkout                  │ │
//! │  └───────────────┘   └───────────────┘   │ CheckoutGateway (trait)   │ │
//! │                                          └───────────────────────────┘ │
//! │                                                                         │
//! │  error: ClientError (transport, API rejection, config, session)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod session;

pub use api::{ApiClient, CheckoutGateway};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{decode_claims, AuthSession, SessionStore, TokenClaims};
