use std::{fmt, ops::Deref, str::FromStr};

use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::{ParsePubkeyError, Pubkey};

/// [`Pubkey`] that serializes as its base58 string.
#[serde_as]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StringPubkey(#[serde_as(as = "DisplayFromStr")] pub Pubkey);

impl From<Pubkey> for StringPubkey {
    fn from(value: Pubkey) -> Self {
        Self(value)
    }
}

impl From<StringPubkey> for Pubkey {
    fn from(value: StringPubkey) -> Self {
        value.0
    }
}

impl Deref for StringPubkey {
    type Target = Pubkey;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for StringPubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for StringPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::StringPubkey;

    #[test]
    fn string_pubkey() {
        const PUBKEY_STR: &str = r#""EHxoxzqUShPuJbcSVFvqAVizLJxUpENTKnMBUGKSgQkc""#;
        let pubkey: StringPubkey = serde_json::from_str(PUBKEY_STR).unwrap();
        assert_eq!(*pubkey, ordermgr_programs::ID);
        assert_eq!(serde_json::to_string(&pubkey).unwrap(), PUBKEY_STR);
    }

    #[test]
    fn reject_invalid_base58() {
        assert!(serde_json::from_str::<StringPubkey>(r#""not-a-pubkey""#).is_err());
    }
}
