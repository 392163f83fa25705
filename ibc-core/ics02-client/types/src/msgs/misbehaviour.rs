//! Definition of domain type message `MsgSubmitMisbehaviour`.

use ibc_tao_host_types::identifiers::ClientId;
use ibc_tao_primitives::{Any, Signer};

use super::validate_signer;
use crate::error::ClientError;

/// A type of message that submits client misbehaviour proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgSubmitMisbehaviour {
    /// client unique identifier
    pub client_id: ClientId,
    /// misbehaviour used for freezing the light client
    pub misbehaviour: Any,
    /// signer address
    pub signer: Signer,
}

impl MsgSubmitMisbehaviour {
    pub fn validate_basic(&self) -> Result<(), ClientError> {
        if self.misbehaviour.value.is_empty() {
            return Err(ClientError::InvalidMisbehaviour {
                description: "empty misbehaviour evidence".to_string(),
            });
        }
        validate_signer(&self.signer)
    }
}
