/// Custom error codes returned by the order-manager program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::FromRepr)]
#[repr(u32)]
pub enum OrderManagerError {
    /// The signer is not the admin registered in the config account.
    Unauthorized = 6000,
    /// The order cannot move from its current status to the requested one.
    InvalidStatusTransition = 6001,
    /// The order account does not belong to the given trade id.
    TradeIdMismatch = 6002,
}

impl OrderManagerError {
    /// Get the numeric error code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Decode from a numeric error code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_repr(code)
    }

    /// Human readable message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized: signer is not the admin",
            Self::InvalidStatusTransition => "Invalid order status transition",
            Self::TradeIdMismatch => "Order account does not match the trade id",
        }
    }
}
