#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # Order Manager Solana Utils

/// Error type.
pub mod error;

/// Cluster.
pub mod cluster;

/// Signer.
pub mod signer;

/// Wallet and commitment config.
pub mod config;

/// Program.
pub mod program;

/// Transaction builder.
pub mod transaction_builder;

/// RPC client extension.
#[cfg(client)]
pub mod client;

/// Utils.
pub mod utils;

pub use crate::error::Error;

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(anchor)]
pub use anchor_lang;
#[cfg(client)]
pub use solana_client;
pub use solana_sdk;
