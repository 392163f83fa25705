use core::str::FromStr;

use derive_more::{Display, Into};

use crate::error::IdentifierError;
use crate::validate::validate_connection_identifier;

const CONNECTION_ID_PREFIX: &str = "connection";

/// Connection identifier of the form `connection-{counter}`.
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
pub struct ConnectionId(String);

impl ConnectionId {
    /// Builds the identifier of the `counter`-th connection.
    ///
    /// ```
    /// # use ibc_tao_host_types::identifiers::ConnectionId;
    /// let conn_id = ConnectionId::new(11);
    /// assert_eq!(&conn_id, "connection-11");
    /// ```
    pub fn new(counter: u64) -> Self {
        Self(format!("{}-{}", Self::prefix(), counter))
    }

    pub fn prefix() -> &'static str {
        CONNECTION_ID_PREFIX
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

impl FromStr for ConnectionId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_connection_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl PartialEq<str> for ConnectionId {
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq(other)
    }
}
