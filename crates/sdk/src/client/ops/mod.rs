/// Operations for order accounts.
pub mod order;

pub use order::{OrderReadOps, OrderTransitionOps};
