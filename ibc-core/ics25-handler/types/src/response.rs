//! What a successfully handled message hands back to the caller.

use ibc_tao_host_types::identifiers::{ChannelId, ClientId, ConnectionId};

/// Outcome discriminator of a packet-class message.
///
/// `Noop` means the packet was already settled (received, acknowledged or
/// timed out) and the message had no effect. It is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResponseResultType {
    Noop,
    Success,
}

impl ResponseResultType {
    pub fn is_noop(&self) -> bool {
        *self == Self::Noop
    }
}

/// Typed response of every message the core executes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MsgResponse {
    /// The identifier of a freshly created client.
    Client(ClientId),
    /// The identifier of the connection end written by `OpenInit` or `OpenTry`.
    Connection(ConnectionId),
    /// The identifier of the channel end written by `OpenInit` or `OpenTry`.
    Channel(ChannelId),
    Packet(ResponseResultType),
    Empty,
}

impl MsgResponse {
    /// The packet outcome, if this responds to a packet-class message.
    pub fn packet_result(&self) -> Option<ResponseResultType> {
        match self {
            Self::Packet(result) => Some(*result),
            _ => None,
        }
    }
}
