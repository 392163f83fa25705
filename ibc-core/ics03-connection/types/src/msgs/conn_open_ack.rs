use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::ConnectionId;
use ibc_tao_primitives::{Any, Signer};

use super::{validate_consensus_height, validate_signer};
use crate::error::ConnectionError;
use crate::version::Version;

/// Per our convention, this message is sent to chain A.
/// The handler will check proofs of chain B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenAck {
    /// ConnectionId that chain A has chosen for it's ConnectionEnd
    pub conn_id_on_a: ConnectionId,
    /// ConnectionId that chain B has chosen for it's ConnectionEnd
    pub conn_id_on_b: ConnectionId,
    /// ClientState of client tracking chain A on chain B
    pub client_state_of_a_on_b: Any,
    /// proof of ConnectionEnd stored on Chain B during ConnOpenTry
    pub proof_conn_end_on_b: CommitmentProofBytes,
    /// proof of ClientState tracking chain A on chain B
    pub proof_client_state_of_a_on_b: CommitmentProofBytes,
    /// proof that chain B has stored ConsensusState of chain A on its client
    pub proof_consensus_state_of_a_on_b: CommitmentProofBytes,
    /// Height at which all proofs in this message were taken
    pub proofs_height_on_b: Height,
    /// height of latest header of chain A that updated the client on chain B
    pub consensus_height_of_a_on_b: Height,
    pub version: Version,
    pub signer: Signer,
}

impl MsgConnectionOpenAck {
    pub fn validate_basic(&self) -> Result<(), ConnectionError> {
        validate_consensus_height(&self.consensus_height_of_a_on_b, &self.proofs_height_on_b)?;
        validate_signer(&self.signer)
    }
}
