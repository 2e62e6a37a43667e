#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client bindings for the on-chain order-manager program.

use anchor_lang::prelude::*;

declare_id!("EHxoxzqUShPuJbcSVFvqAVizLJxUpENTKnMBUGKSgQkc");

/// Constants.
pub mod constants;

/// Account states.
pub mod states;

/// Instructions.
pub mod instruction;

/// Program error codes.
pub mod error;

pub use error::OrderManagerError;
pub use states::{ConfigState, OrderState, OrderStatus, PaymentMode};

pub use anchor_lang;
