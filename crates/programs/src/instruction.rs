use anchor_lang::{prelude::*, Discriminator, InstructionData};

use crate::OrderStatus;

/// Arguments of the admin-only `set_order_state` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetOrderState {
    pub trade_id: u64,
    pub new_status: OrderStatus,
}

impl Discriminator for SetOrderState {
    // sha256("global:set_order_state")[..8]
    const DISCRIMINATOR: &'static [u8] = &[188, 16, 224, 190, 154, 37, 240, 15];
}

impl InstructionData for SetOrderState {}

impl SetOrderState {
    /// Decode instruction data produced by [`InstructionData::data`].
    pub fn try_from_data(data: &[u8]) -> Option<Self> {
        let args = data.strip_prefix(Self::DISCRIMINATOR)?;
        Self::try_from_slice(args).ok()
    }
}

/// Accounts of [`SetOrderState`].
pub mod accounts {
    use super::*;

    /// Accounts for the `set_order_state` instruction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SetOrderState {
        /// The registered admin, also the fee payer.
        pub admin: Pubkey,
        pub order_state: Pubkey,
        pub config_state: Pubkey,
    }

    impl ToAccountMetas for SetOrderState {
        fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
            vec![
                AccountMeta::new(self.admin, true),
                AccountMeta::new(self.order_state, false),
                AccountMeta::new_readonly(self.config_state, false),
            ]
        }
    }
}
