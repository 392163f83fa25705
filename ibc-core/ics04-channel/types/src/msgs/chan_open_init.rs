use ibc_tao_host_types::identifiers::{ConnectionId, PortId};
use ibc_tao_primitives::Signer;

use super::validate_signer;
use crate::channel::{verify_connection_hops_length, Order};
use crate::error::ChannelError;
use crate::Version;

/// Message definition for the first step in the channel open handshake (`ChanOpenInit` datagram).
/// Per our convention, this message is sent to chain A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenInit {
    pub port_id_on_a: PortId,
    pub connection_hops_on_a: Vec<ConnectionId>,
    pub port_id_on_b: PortId,
    pub ordering: Order,
    pub signer: Signer,
    /// Allow a relayer to specify a particular version by providing a non-empty version string
    pub version_proposal: Version,
}

impl MsgChannelOpenInit {
    /// Only one connection hop is supported.
    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        verify_connection_hops_length(&self.connection_hops_on_a, 1)
    }

    pub fn validate_basic(&self) -> Result<(), ChannelError> {
        self.verify_connection_hops_length()?;
        validate_signer(&self.signer)
    }
}
