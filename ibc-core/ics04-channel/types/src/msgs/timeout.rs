use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::Sequence;
use ibc_tao_primitives::Signer;

use super::validate_packet_signer;
use crate::error::PacketError;
use crate::packet::Packet;

/// Message definition for packet timeout domain type,
/// which is sent on chain A and needs to prove that a previously sent packet was not received on chain B
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeout {
    pub packet: Packet,
    /// Next receive sequence of the destination channel. Only meaningful on
    /// ordered channels.
    pub next_seq_recv_on_b: Sequence,
    pub proof_unreceived_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl MsgTimeout {
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        self.packet.validate_basic()?;
        if self.next_seq_recv_on_b.is_zero() {
            return Err(PacketError::ZeroPacketSequence);
        }
        validate_packet_signer(&self.signer)
    }
}
