//! Data type definition and utilities for the
//! version field of a channel end.

use core::convert::Infallible;
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use super::error::ChannelError;

/// The version field for a `ChannelEnd`.
///
/// This field is opaque to the core protocol and only negotiated between
/// the two applications. Empty strings are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Version(String);

impl Version {
    pub fn new(v: String) -> Self {
        Self(v)
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn verify_is_expected(&self, expected: Version) -> Result<(), ChannelError> {
        if self != &expected {
            return Err(ChannelError::UnsupportedVersion {
                expected,
                actual: self.clone(),
            });
        }
        Ok(())
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}
