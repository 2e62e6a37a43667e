/// Seed of the singleton [`ConfigState`](crate::ConfigState) account.
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed of [`OrderState`](crate::OrderState) accounts.
pub const ORDER_SEED: &[u8] = b"order";

/// Anchor reserves error codes below this offset.
pub const ERROR_CODE_OFFSET: u32 = 6000;
