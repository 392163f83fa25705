use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::ConnectionId;
use ibc_tao_primitives::Signer;

use super::validate_signer;
use crate::error::ConnectionError;

/// Per our convention, this message is sent to chain B.
/// The handler will check proofs of chain A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenConfirm {
    /// ConnectionId that chain B has chosen for it's ConnectionEnd
    pub conn_id_on_b: ConnectionId,
    /// proof of ConnectionEnd stored on Chain A during ConnOpenAck
    pub proof_conn_end_on_a: CommitmentProofBytes,
    /// Height at which `proof_conn_end_on_a` in this message was taken
    pub proof_height_on_a: Height,
    pub signer: Signer,
}

impl MsgConnectionOpenConfirm {
    pub fn validate_basic(&self) -> Result<(), ConnectionError> {
        validate_signer(&self.signer)
    }
}
