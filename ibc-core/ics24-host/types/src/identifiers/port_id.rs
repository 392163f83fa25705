use core::str::FromStr;

use derive_more::{Display, Into};

use crate::error::IdentifierError;
use crate::validate::validate_port_identifier;

const TRANSFER_PORT_ID: &str = "transfer";

/// Port identifier. A port is bound to exactly one application module.
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
pub struct PortId(String);

impl PortId {
    pub fn new(id: String) -> Result<Self, IdentifierError> {
        Self::from_str(&id)
    }

    /// The port conventionally used by the token transfer application.
    pub fn transfer() -> Self {
        Self(TRANSFER_PORT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for PortId {
    type Err = IdentifierError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        validate_port_identifier(id).map(|_| Self(id.to_string()))
    }
}

impl AsRef<str> for PortId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
