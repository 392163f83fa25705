use core::time::Duration;

use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::ClientId;
use ibc_tao_primitives::{Any, Signer};

use super::{validate_consensus_height, validate_signer};
use crate::connection::Counterparty;
use crate::error::ConnectionError;
use crate::version::Version;

/// Per our convention, this message is sent to chain B.
/// The handler will check proofs of chain A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenTry {
    /// ClientId on B that the connection is being opened for
    pub client_id_on_b: ClientId,
    /// ClientState of client tracking chain B on chain A
    pub client_state_of_b_on_a: Any,
    /// ClientId, ConnectionId and prefix of chain A
    pub counterparty: Counterparty,
    /// Versions supported by chain A
    pub versions_on_a: Vec<Version>,
    /// proof of ConnectionEnd stored on Chain A during ConnOpenInit
    pub proof_conn_end_on_a: CommitmentProofBytes,
    /// proof that chain A has stored ClientState of chain B on its client
    pub proof_client_state_of_b_on_a: CommitmentProofBytes,
    /// proof that chain A has stored ConsensusState of chain B on its client
    pub proof_consensus_state_of_b_on_a: CommitmentProofBytes,
    /// Height at which all proofs in this message were taken
    pub proofs_height_on_a: Height,
    /// height of latest header of chain A that updated the client on chain B
    pub consensus_height_of_b_on_a: Height,
    pub delay_period: Duration,
    pub signer: Signer,
}

impl MsgConnectionOpenTry {
    pub fn validate_basic(&self) -> Result<(), ConnectionError> {
        if self.counterparty.connection_id().is_none() {
            return Err(ConnectionError::InvalidCounterparty);
        }
        if self.versions_on_a.is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }
        validate_consensus_height(&self.consensus_height_of_b_on_a, &self.proofs_height_on_a)?;
        validate_signer(&self.signer)
    }
}
