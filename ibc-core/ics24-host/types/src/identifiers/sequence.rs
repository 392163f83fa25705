use core::str::FromStr;

use derive_more::{Display, From, Into};

use crate::error::IdentifierError;

/// Packet sequence number. Valid packets start at sequence 1.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub struct Sequence(u64);

impl Sequence {
    /// Gives the sequence number.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the sequence number is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Increments the sequence number by one.
    pub fn increment(&self) -> Sequence {
        Sequence(self.0 + 1)
    }

    /// Encodes the sequence number into a big endian byte slice.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }
}

impl FromStr for Sequence {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.parse::<u64>().map_err(|e| {
            IdentifierError::FailedToParse {
                value: s.to_string(),
                description: e.to_string(),
            }
        })?))
    }
}
