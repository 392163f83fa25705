use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_tao_primitives::Signer;

use super::validate_signer;
use crate::channel::{verify_connection_hops_length, Order};
use crate::error::ChannelError;
use crate::Version;

/// Message definition for the second step in the channel open handshake (`ChanOpenTry` datagram).
/// Per our convention, this message is sent to chain B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenTry {
    pub port_id_on_b: PortId,
    pub connection_hops_on_b: Vec<ConnectionId>,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub version_supported_on_a: Version,
    pub proof_chan_end_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub ordering: Order,
    pub signer: Signer,
}

impl MsgChannelOpenTry {
    /// Only one connection hop is supported.
    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        verify_connection_hops_length(&self.connection_hops_on_b, 1)
    }

    pub fn validate_basic(&self) -> Result<(), ChannelError> {
        self.verify_connection_hops_length()?;
        validate_signer(&self.signer)
    }
}
