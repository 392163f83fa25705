use core::str::FromStr;

use derive_more::{Display, Into};

use super::ClientType;
use crate::error::IdentifierError;
use crate::validate::{validate_client_identifier, validate_client_type};

/// Globally unique client identifier of the form `{client_type}-{counter}`.
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
pub struct ClientId(String);

impl ClientId {
    /// Builds a new client identifier from a client type and a counter.
    ///
    /// ```
    /// # use ibc_tao_host_types::identifiers::ClientId;
    /// let client_id = ClientId::new("07-tendermint", 4).unwrap();
    /// assert_eq!(client_id.as_str(), "07-tendermint-4");
    /// ```
    pub fn new(client_type: &str, counter: u64) -> Result<Self, IdentifierError> {
        let client_type = client_type.trim();
        validate_client_type(client_type).map(|()| Self::format(client_type, counter))
    }

    pub(super) fn format(client_type: &str, counter: u64) -> Self {
        Self(format!("{client_type}-{counter}"))
    }

    /// Recovers the client type this identifier was generated from, i.e.
    /// everything before the last dash.
    pub fn client_type(&self) -> Result<ClientType, IdentifierError> {
        let (client_type, _) =
            self.0
                .rsplit_once('-')
                .ok_or_else(|| IdentifierError::InvalidPrefix {
                    prefix: self.0.clone(),
                })?;
        ClientType::new(client_type)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for ClientId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_client_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl PartialEq<str> for ClientId {
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq(other)
    }
}
