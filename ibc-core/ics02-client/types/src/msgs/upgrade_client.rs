//! Definition of domain type msg `MsgUpgradeClient`.

use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::ClientId;
use ibc_tao_primitives::{Any, Signer};

use super::validate_signer;
use crate::error::ClientError;

/// A type of message that triggers the upgrade of an on-chain (IBC) client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgUpgradeClient {
    // client unique identifier
    pub client_id: ClientId,
    // Upgraded client state
    pub upgraded_client_state: Any,
    // Upgraded consensus state, only contains enough information
    // to serve as a basis of trust in update logic
    pub upgraded_consensus_state: Any,
    // proof that old chain committed to new client
    pub proof_upgrade_client: CommitmentProofBytes,
    // proof that old chain committed to new consensus state
    pub proof_upgrade_consensus_state: CommitmentProofBytes,
    // signer address
    pub signer: Signer,
}

impl MsgUpgradeClient {
    pub fn validate_basic(&self) -> Result<(), ClientError> {
        validate_signer(&self.signer)
    }
}
