//! Defines the `ClientType` format, the prefix of every client identifier.

use core::str::FromStr;

use derive_more::Display;

use super::ClientId;
use crate::error::IdentifierError;
use crate::validate::validate_client_type;

/// Client type of the BFT light client.
pub const TENDERMINT_CLIENT_TYPE: &str = "07-tendermint";

/// Client type of the loop-back client that tracks the host chain itself.
/// Clients of this type keep no consensus states.
pub const LOCALHOST_CLIENT_TYPE: &str = "09-localhost";

/// Type of the client, depending on the specific consensus algorithm.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub struct ClientType(String);

impl ClientType {
    /// Constructs a new `ClientType`, checking it can prefix a valid client
    /// identifier.
    pub fn new(client_type: &str) -> Result<Self, IdentifierError> {
        let client_type = client_type.trim();
        validate_client_type(client_type).map(|()| Self(client_type.into()))
    }

    pub fn tendermint() -> Self {
        Self(TENDERMINT_CLIENT_TYPE.to_string())
    }

    pub fn localhost() -> Self {
        Self(LOCALHOST_CLIENT_TYPE.to_string())
    }

    /// Whether this is the localhost sentinel type.
    pub fn is_localhost(&self) -> bool {
        self.0 == LOCALHOST_CLIENT_TYPE
    }

    /// Builds the identifier of the `counter`-th client, i.e. `{type}-{counter}`.
    pub fn build_client_id(&self, counter: u64) -> ClientId {
        ClientId::format(self.as_str(), counter)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClientType {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
