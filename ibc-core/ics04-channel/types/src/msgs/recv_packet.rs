use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_primitives::Signer;

use super::validate_packet_signer;
use crate::error::PacketError;
use crate::packet::Packet;

/// Message definition for the "packet receiving" datagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgRecvPacket {
    /// The packet to be received
    pub packet: Packet,
    /// Proof of packet commitment on the sending chain
    pub proof_commitment_on_a: CommitmentProofBytes,
    /// Height at which the commitment proof in this message were taken
    pub proof_height_on_a: Height,
    /// The signer of the message
    pub signer: Signer,
}

impl MsgRecvPacket {
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        self.packet.validate_basic()?;
        validate_packet_signer(&self.signer)
    }
}
