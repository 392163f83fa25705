//! Definition of domain type message `MsgUpdateClient`.

use ibc_tao_host_types::identifiers::ClientId;
use ibc_tao_primitives::{Any, Signer};

use super::validate_signer;
use crate::error::ClientError;

/// Represents the message that triggers the update of an on-chain (IBC) client
/// with a new header.
///
/// A header that conflicts with what the client already recorded is itself
/// evidence of misbehaviour, so this message may end up freezing the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgUpdateClient {
    pub client_id: ClientId,
    pub client_message: Any,
    pub signer: Signer,
}

impl MsgUpdateClient {
    pub fn validate_basic(&self) -> Result<(), ClientError> {
        if self.client_message.value.is_empty() {
            return Err(ClientError::InvalidHeaderType(
                self.client_message.type_url.clone(),
            ));
        }
        validate_signer(&self.signer)
    }
}
