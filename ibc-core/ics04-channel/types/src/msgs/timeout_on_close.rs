use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::Sequence;
use ibc_tao_primitives::Signer;

use super::validate_packet_signer;
use crate::error::PacketError;
use crate::packet::Packet;

/// Message definition for packet timeout domain type.
///
/// Sent on chain A once the destination channel on chain B is closed; it
/// proves both the closed channel end and the absence of the packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeoutOnClose {
    pub packet: Packet,
    pub next_seq_recv_on_b: Sequence,
    pub proof_unreceived_on_b: CommitmentProofBytes,
    pub proof_close_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl MsgTimeoutOnClose {
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        self.packet.validate_basic()?;
        if self.next_seq_recv_on_b.is_zero() {
            return Err(PacketError::ZeroPacketSequence);
        }
        validate_packet_signer(&self.signer)
    }
}
