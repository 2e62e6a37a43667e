use anchor_lang::prelude::*;

/// Lifecycle status of an order.
///
/// The variant order is the Borsh wire value and must match the program.
#[derive(
    AnchorSerialize,
    AnchorDeserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    /// Created by the buyer.
    Created,
    /// Accepted by both parties.
    Signed,
    /// Paid into escrow.
    Paid,
    /// Shipped by the seller.
    Shipped,
    /// Receipt confirmed by the buyer.
    Confirmed,
    /// Funds released.
    Completed,
}

/// How the buyer pays for an order.
#[derive(
    AnchorSerialize,
    AnchorDeserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentMode {
    /// The whole amount is paid up front.
    Full,
    /// `advance_percentage` is paid up front, the rest on delivery.
    Advance,
}

/// Order account, derived from [`ORDER_SEED`](crate::constants::ORDER_SEED) and the trade id.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct OrderState {
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub trade_id: u64,
    pub order_amount: u64,
    pub paid_amount: u64,
    pub claimed_amount: u64,
    pub payment_mode: PaymentMode,
    pub advance_percentage: u8,
    pub status: OrderStatus,
    pub created_at: i64,
    pub paid_at: i64,
    pub shipped_at: i64,
    pub confirmed_at: i64,
    pub completed_at: i64,
    pub bump: u8,
}

/// Global config account holding the registered admin.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct ConfigState {
    pub admin: Pubkey,
    pub bump: u8,
}

#[cfg(test)]
mod tests {
    use anchor_lang::{AccountDeserialize, AccountSerialize, Discriminator};

    use super::*;

    fn sample_order() -> OrderState {
        OrderState {
            buyer: Pubkey::new_unique(),
            seller: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            trade_id: 1001,
            order_amount: 25_000_000,
            paid_amount: 0,
            claimed_amount: 0,
            payment_mode: PaymentMode::Advance,
            advance_percentage: 30,
            status: OrderStatus::Signed,
            created_at: 1_700_000_000,
            paid_at: 0,
            shipped_at: 0,
            confirmed_at: 0,
            completed_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn account_discriminators() {
        assert_eq!(
            OrderState::DISCRIMINATOR,
            &[60, 123, 67, 162, 96, 43, 173, 225]
        );
        assert_eq!(
            ConfigState::DISCRIMINATOR,
            &[193, 77, 160, 128, 208, 254, 180, 135]
        );
    }

    #[test]
    fn order_state_layout() {
        let order = sample_order();
        let mut data = Vec::new();
        order.try_serialize(&mut data).unwrap();
        // discriminator + 3 pubkeys + 4 u64 + 3 u8 + 5 i64 + bump
        assert_eq!(data.len(), 8 + 3 * 32 + 4 * 8 + 3 + 5 * 8 + 1);
        assert_eq!(&data[..8], OrderState::DISCRIMINATOR);
        assert_eq!(&data[104..112], &1001u64.to_le_bytes());

        let decoded = OrderState::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn reject_foreign_discriminator() {
        let config = ConfigState {
            admin: Pubkey::new_unique(),
            bump: 254,
        };
        let mut data = Vec::new();
        config.try_serialize(&mut data).unwrap();
        assert!(OrderState::try_deserialize(&mut data.as_slice()).is_err());
    }

    #[test]
    fn status_names() {
        use strum::IntoEnumIterator;

        for (idx, status) in OrderStatus::iter().enumerate() {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
            let mut wire = Vec::new();
            AnchorSerialize::serialize(&status, &mut wire).unwrap();
            assert_eq!(wire, vec![idx as u8]);
        }
        assert_eq!(OrderStatus::iter().count(), 6);
        assert_eq!(OrderStatus::Shipped.to_string(), "Shipped");
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!("Signed".parse::<OrderStatus>().unwrap(), OrderStatus::Signed);
        assert!("Delivered".parse::<OrderStatus>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn status_serializes_as_symbol() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Shipped).unwrap(),
            r#""Shipped""#
        );
        assert_eq!(
            serde_json::to_string(&PaymentMode::Full).unwrap(),
            r#""Full""#
        );
    }
}
