use core::str::FromStr;

use derive_more::{Display, Into};

use crate::error::IdentifierError;
use crate::validate::validate_channel_identifier;

const CHANNEL_ID_PREFIX: &str = "channel";

/// Channel identifier of the form `channel-{counter}`.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Into,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub struct ChannelId(String);

impl ChannelId {
    /// Builds the identifier of the `counter`-th channel.
    ///
    /// ```
    /// # use ibc_tao_host_types::identifiers::ChannelId;
    /// let chan_id = ChannelId::new(27);
    /// assert_eq!(chan_id.to_string(), "channel-27");
    /// ```
    pub fn new(counter: u64) -> Self {
        Self(format!("{}-{}", Self::prefix(), counter))
    }

    pub fn prefix() -> &'static str {
        CHANNEL_ID_PREFIX
    }

    pub fn zero() -> Self {
        Self::new(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for ChannelId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_channel_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ChannelId {
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq(other)
    }
}
