use ordermgr_programs::{OrderState, OrderStatus, PaymentMode};
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::Pubkey;

use super::StringPubkey;

/// Transport representation of an [`OrderState`] account.
///
/// Amounts, the trade id and timestamps are decimal strings so that JSON
/// consumers do not lose precision.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    /// Address of the order account.
    pub public_key: StringPubkey,
    pub buyer: StringPubkey,
    pub seller: StringPubkey,
    pub mint: StringPubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub trade_id: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub order_amount: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub paid_amount: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub claimed_amount: u64,
    pub payment_mode: PaymentMode,
    pub advance_percentage: u8,
    pub status: OrderStatus,
    #[serde_as(as = "DisplayFromStr")]
    pub created_at: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub paid_at: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub shipped_at: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub confirmed_at: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub completed_at: i64,
}

impl OrderData {
    /// Project an order account.
    pub fn from_state(address: &Pubkey, order: &OrderState) -> Self {
        Self {
            public_key: (*address).into(),
            buyer: order.buyer.into(),
            seller: order.seller.into(),
            mint: order.mint.into(),
            trade_id: order.trade_id,
            order_amount: order.order_amount,
            paid_amount: order.paid_amount,
            claimed_amount: order.claimed_amount,
            payment_mode: order.payment_mode,
            advance_percentage: order.advance_percentage,
            status: order.status,
            created_at: order.created_at,
            paid_at: order.paid_at,
            shipped_at: order.shipped_at,
            confirmed_at: order.confirmed_at,
            completed_at: order.completed_at,
        }
    }
}
