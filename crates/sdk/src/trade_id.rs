use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Identifier of a trade, unique per order account.
///
/// Accepts any non-negative integer that fits in 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TradeId(u64);

impl TradeId {
    /// Create from a raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Seed bytes used for the order PDA.
    pub fn to_seed(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for TradeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<TradeId> for u64 {
    fn from(value: TradeId) -> Self {
        value.0
    }
}

impl FromStr for TradeId {
    type Err = Error;

    /// Only plain decimal digits are accepted; no sign, whitespace or exponent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::validation(format!(
                "trade id must be a non-negative integer, got `{s}`"
            )));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| Error::validation(format!("trade id `{s}` does not fit in 64 bits")))
    }
}

impl TryFrom<&str> for TradeId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for TradeId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

macro_rules! try_from_signed_or_wide {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for TradeId {
                type Error = Error;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    u64::try_from(value).map(Self).map_err(|_| {
                        Error::validation(format!("trade id out of range: {value}"))
                    })
                }
            }
        )*
    };
}

try_from_signed_or_wide!(i32, i64, u128, i128);

impl Serialize for TradeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = TradeId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative integer or a decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(TradeId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                TradeId::try_from(v).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}
