/// A value read from the ledger, together with the slot of the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithSlot<T> {
    slot: u64,
    value: T,
}

impl<T> WithSlot<T> {
    /// Wrap a value observed at `slot`.
    pub fn new(slot: u64, value: T) -> Self {
        Self { slot, value }
    }

    /// Get the slot of the read.
    pub fn slot(&self) -> u64 {
        self.slot
    }

    /// Get value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Drop the slot.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the slot.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithSlot<U> {
        let Self { slot, value } = self;
        WithSlot::new(slot, f(value))
    }

    /// Split into `(slot, value)`.
    pub fn split(self) -> (u64, T) {
        (self.slot, self.value)
    }
}

impl<T, E> WithSlot<Result<T, E>> {
    /// Turn a slot-tagged result into a result of a slot-tagged value.
    pub fn transpose(self) -> Result<WithSlot<T>, E> {
        let Self { slot, value } = self;
        value.map(|value| WithSlot::new(slot, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_transpose_keep_slot() {
        let read = WithSlot::new(42, "7");
        let parsed = read.map(|s| s.parse::<u64>()).transpose().unwrap();
        assert_eq!(parsed.split(), (42, 7));

        let failed = WithSlot::new(43, "x").map(|s| s.parse::<u64>()).transpose();
        assert!(failed.is_err());
    }
}
