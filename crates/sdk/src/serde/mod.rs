/// Pubkey serialization.
pub mod string_pubkey;

/// Order serialization.
pub mod serde_order;

pub use serde_order::OrderData;
pub use string_pubkey::StringPubkey;
