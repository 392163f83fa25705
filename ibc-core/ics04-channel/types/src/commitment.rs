//! Types and utilities related to packet commitments.

use sha2::Digest;

use super::acknowledgement::Acknowledgement;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Packet commitment
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct PacketCommitment(Vec<u8>);

impl PacketCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for PacketCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PacketCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Acknowledgement commitment to be stored
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct AcknowledgementCommitment(Vec<u8>);

impl AcknowledgementCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for AcknowledgementCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for AcknowledgementCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Compute the commitment for a packet.
///
/// An absent timeout height commits as `{revision_number: 0, revision_height: 0}`
/// and an absent timeout timestamp as `0`.
pub fn compute_packet_commitment(
    packet_data: &[u8],
    timeout_height: &TimeoutHeight,
    timeout_timestamp: &TimeoutTimestamp,
) -> PacketCommitment {
    let mut hash_input = [0; 8 * 3 + 32];

    hash_input[..8].copy_from_slice(&timeout_timestamp.nanoseconds().to_be_bytes());
    hash_input[8..16].copy_from_slice(&timeout_height.commitment_revision_number().to_be_bytes());
    hash_input[16..24].copy_from_slice(&timeout_height.commitment_revision_height().to_be_bytes());
    hash_input[24..].copy_from_slice(&hash(packet_data));

    hash(&hash_input).to_vec().into()
}

/// Compute the commitment for an acknowledgement.
pub fn compute_ack_commitment(ack: &Acknowledgement) -> AcknowledgementCommitment {
    hash(ack.as_ref()).to_vec().into()
}

/// Computing commitments with anything other than SHA256 breaks the proofs
/// relayers build against the provable store.
fn hash(data: &[u8]) -> [u8; 32] {
    sha2::Sha256::digest(data).into()
}
