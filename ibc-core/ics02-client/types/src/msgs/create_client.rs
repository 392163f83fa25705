//! Definition of domain type message `MsgCreateClient`.

use ibc_tao_primitives::{Any, Signer};

use super::validate_signer;
use crate::error::ClientError;

/// A type of message that triggers the creation of a new on-chain (IBC) client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgCreateClient {
    pub client_state: Any,
    pub consensus_state: Any,
    pub signer: Signer,
}

impl MsgCreateClient {
    pub fn new(client_state: Any, consensus_state: Any, signer: Signer) -> Self {
        MsgCreateClient {
            client_state,
            consensus_state,
            signer,
        }
    }

    pub fn validate_basic(&self) -> Result<(), ClientError> {
        if self.client_state.type_url.is_empty() {
            return Err(ClientError::InvalidClientState {
                description: "missing client state type url".to_string(),
            });
        }
        validate_signer(&self.signer)
    }
}
