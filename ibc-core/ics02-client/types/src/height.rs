//! Defines the core `Height` type used throughout the library

use core::num::ParseIntError;
use core::str::FromStr;

use displaydoc::Display;

use crate::error::ClientError;

/// Height of a chain: the number of blocks since genesis, or since the last
/// revision (hard upgrade).
///
/// Heights order lexicographically by `(revision_number, revision_height)`,
/// so any height of a later revision is greater than every height of an
/// earlier one.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub struct Height {
    // field order drives the derived ordering
    revision_number: u64,
    revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Result<Self, ClientError> {
        if revision_height == 0 {
            return Err(ClientError::InvalidHeight);
        }

        Ok(Self {
            revision_number,
            revision_height,
        })
    }

    /// The first height of a revision.
    pub fn min(revision_number: u64) -> Self {
        Self {
            revision_number,
            revision_height: 1,
        }
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }

    /// Moves forward within the same revision.
    ///
    /// The revision height is capped at `u64::MAX`: past it, the result is
    /// the last height of the revision rather than a wrap into a lower one.
    pub fn add(&self, delta: u64) -> Height {
        Height {
            revision_number: self.revision_number,
            revision_height: self.revision_height.saturating_add(delta),
        }
    }

    pub fn increment(&self) -> Height {
        self.add(1)
    }

    /// Moves backward within the same revision; a revision never goes below
    /// height 1.
    pub fn sub(&self, delta: u64) -> Result<Height, ClientError> {
        if self.revision_height <= delta {
            return Err(ClientError::InvalidHeightResult);
        }

        Ok(Height {
            revision_number: self.revision_number,
            revision_height: self.revision_height - delta,
        })
    }

    pub fn decrement(&self) -> Result<Height, ClientError> {
        self.sub(1)
    }
}

impl core::fmt::Debug for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        f.debug_struct("Height")
            .field("revision", &self.revision_number)
            .field("height", &self.revision_height)
            .finish()
    }
}

impl core::fmt::Display for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

/// Encodes all errors related to parsing chain heights
#[derive(Debug, Display, PartialEq, Eq)]
pub enum HeightError {
    /// cannot convert into a `Height` type from string `{height}`
    HeightConversion {
        height: String,
        error: ParseIntError,
    },
    /// attempted to parse an invalid zero height
    ZeroHeight,
    /// the height(`{raw_height}`) is not valid format, this format must be used: \[revision_number\]-\[revision_height\]
    InvalidFormat { raw_height: String },
}

impl std::error::Error for HeightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            HeightError::HeightConversion { error: e, .. } => Some(e),
            HeightError::ZeroHeight | HeightError::InvalidFormat { .. } => None,
        }
    }
}

impl FromStr for Height {
    type Err = HeightError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (rev_number_str, rev_height_str) =
            value
                .split_once('-')
                .ok_or_else(|| HeightError::InvalidFormat {
                    raw_height: value.to_owned(),
                })?;

        let parse = |s: &str| {
            s.parse::<u64>()
                .map_err(|error| HeightError::HeightConversion {
                    height: value.to_owned(),
                    error,
                })
        };

        Height::new(parse(rev_number_str)?, parse(rev_height_str)?)
            .map_err(|_| HeightError::ZeroHeight)
    }
}
