/// Value with the slot it was observed at.
pub mod with_slot;

pub use self::with_slot::WithSlot;
