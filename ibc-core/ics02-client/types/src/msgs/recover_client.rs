//! Definition of domain type message `MsgRecoverClient`.

use ibc_tao_host_types::identifiers::ClientId;
use ibc_tao_primitives::Signer;

use super::validate_signer;
use crate::error::ClientError;

/// Defines the message used to recover a frozen or expired client.
///
/// A frozen or expired client can only be recovered by passing a governance
/// proposal, so this message is meant to be issued by the host's governance
/// module rather than submitted by relayers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgRecoverClient {
    /// Client identifier of the client to be updated if the proposal passes.
    pub subject_client_id: ClientId,
    /// Client identifier of the client that will replace the subject client
    /// if the proposal passes.
    pub substitute_client_id: ClientId,
    /// The address of the signer who serves as the authority for the IBC
    /// module.
    pub signer: Signer,
}

impl MsgRecoverClient {
    pub fn validate_basic(&self) -> Result<(), ClientError> {
        if self.subject_client_id == self.substitute_client_id {
            return Err(ClientError::InvalidClientState {
                description: "subject and substitute clients must differ".to_string(),
            });
        }
        validate_signer(&self.signer)
    }
}
