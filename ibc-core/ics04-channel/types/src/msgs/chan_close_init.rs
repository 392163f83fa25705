use ibc_tao_host_types::identifiers::{ChannelId, PortId};
use ibc_tao_primitives::Signer;

use super::validate_signer;
use crate::error::ChannelError;

/// Message definition for the first step in the channel close handshake (`ChanCloseInit` datagram).
/// Per our convention, this message is sent to chain A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelCloseInit {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub signer: Signer,
}

impl MsgChannelCloseInit {
    pub fn validate_basic(&self) -> Result<(), ChannelError> {
        validate_signer(&self.signer)
    }
}
