//! Bridge between off-chain callers and the order-manager program.

/// Error type.
pub mod error;

/// Functions for constructing Program Derived Addresses.
pub mod pda;

/// Trade identifier.
pub mod trade_id;

/// Serializable transport types.
pub mod serde;

/// Client for the order-manager program.
pub mod client;


pub use client::{ops, Client, ClientOptions};
pub use error::Error;
pub use trade_id::TradeId;

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

pub use ordermgr_programs as programs;
pub use ordermgr_solana_utils as solana_utils;
