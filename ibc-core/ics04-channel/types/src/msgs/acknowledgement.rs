use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_primitives::Signer;

use super::validate_packet_signer;
use crate::acknowledgement::Acknowledgement;
use crate::error::PacketError;
use crate::packet::Packet;

/// Message definition for packet acknowledgements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    /// Proof of packet acknowledgement on the receiving chain
    pub proof_acked_on_b: CommitmentProofBytes,
    /// Height at which the commitment proof in this message was taken
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl MsgAcknowledgement {
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        self.packet.validate_basic()?;
        if self.acknowledgement.as_bytes().is_empty() {
            return Err(PacketError::EmptyAcknowledgement);
        }
        validate_packet_signer(&self.signer)
    }
}
