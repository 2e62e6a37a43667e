use solana_sdk::pubkey::Pubkey;

#[allow(unused_imports)]
use ordermgr_programs::{ConfigState, OrderState};

use crate::trade_id::TradeId;

pub use ordermgr_programs::constants::{CONFIG_SEED, ORDER_SEED};

/// Find the PDA for the [`ConfigState`] account.
pub fn find_config_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id)
}

/// Find the PDA for the [`OrderState`] account of the given trade.
///
/// The trade id is encoded as 8 little-endian bytes.
pub fn find_order_address(trade_id: &TradeId, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ORDER_SEED, &trade_id.to_seed()], program_id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn program_id() -> Pubkey {
        ordermgr_programs::ID
    }

    fn order(trade_id: u64) -> (Pubkey, u8) {
        find_order_address(&trade_id.into(), &program_id())
    }

    #[test]
    fn config_address() {
        let (address, bump) = find_config_address(&program_id());
        assert_eq!(
            address.to_string(),
            "GSdZNSQxDdBHatEi9FhaMDd32pRpVvheQC3tmfwaeyML"
        );
        assert_eq!(bump, 255);
        assert_eq!(find_config_address(&program_id()), (address, bump));
    }

    #[test]
    fn order_addresses() {
        let cases = [
            (0, "F9dPYXXZ7XMniiL4WFJ8D5T2qmcx5iCHEithgL78tpCj", 255),
            (42, "5VLCe9yBACUnYx18rBKYzs2gG1KAcy4YRfvipqUYUvsx", 255),
            (43, "6KvXkjFnwQg8nbGx84tU3zHmuijeKtaTSMqmNBJcqs3f", 252),
            (1001, "HsxKH3b2Gn217apprmnuvoRTnE8G9w3MGAnE6uhxPgVd", 255),
            (
                u64::MAX,
                "Buv4B8b8PquHdc9XkBj4e4c5GfG4sRcZmtMPnrbMpsGF",
                254,
            ),
        ];
        for (trade_id, expected, expected_bump) in cases {
            let (address, bump) = order(trade_id);
            assert_eq!(address.to_string(), expected, "trade id {trade_id}");
            assert_eq!(bump, expected_bump, "trade id {trade_id}");
        }
    }

    #[test]
    fn order_address_is_little_endian() {
        let (address, _) = order(42);
        let (big_endian, _) =
            Pubkey::find_program_address(&[ORDER_SEED, &42u64.to_be_bytes()], &program_id());
        assert_eq!(
            big_endian.to_string(),
            "3rRx7TW4ALa2HCuqCb93bFL6D8AnJYAJ5Z2D6rNJwJbG"
        );
        assert_ne!(address, big_endian);

        let (narrow, _) =
            Pubkey::find_program_address(&[ORDER_SEED, &42u32.to_le_bytes()], &program_id());
        assert_ne!(address, narrow);
    }

    #[test]
    fn order_addresses_are_distinct() {
        let addresses = (0..64).map(|id| order(id).0).collect::<HashSet<_>>();
        assert_eq!(addresses.len(), 64);
        assert!(!addresses.contains(&find_config_address(&program_id()).0));
    }

    #[test]
    fn bump_recreates_address() {
        let trade_id = TradeId::new(43);
        let (address, bump) = find_order_address(&trade_id, &program_id());
        let recreated = Pubkey::create_program_address(
            &[ORDER_SEED, &trade_id.to_seed(), &[bump]],
            &program_id(),
        )
        .unwrap();
        assert_eq!(address, recreated);
    }
}
