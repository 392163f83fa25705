use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::{ChannelId, PortId};
use ibc_tao_primitives::Signer;

use super::validate_signer;
use crate::error::ChannelError;

/// Message definition for the fourth step in the channel open handshake (`ChanOpenConfirm`
/// datagram).
/// Per our convention, this message is sent to chain B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenConfirm {
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub proof_chan_end_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}

impl MsgChannelOpenConfirm {
    pub fn validate_basic(&self) -> Result<(), ChannelError> {
        validate_signer(&self.signer)
    }
}
