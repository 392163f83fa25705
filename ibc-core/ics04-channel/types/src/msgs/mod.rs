//! Message definitions for all ICS4 domain types: channel open & close handshake datagrams, as well
//! as packets.

mod acknowledgement;
mod chan_close_confirm;
mod chan_close_init;
mod chan_open_ack;
mod chan_open_confirm;
mod chan_open_init;
mod chan_open_try;
mod recv_packet;
mod timeout;
mod timeout_on_close;

pub use acknowledgement::*;
pub use chan_close_confirm::*;
pub use chan_close_init::*;
pub use chan_open_ack::*;
pub use chan_open_confirm::*;
pub use chan_open_init::*;
pub use chan_open_try::*;
use ibc_tao_host_types::identifiers::*;
use ibc_tao_primitives::Signer;
pub use recv_packet::*;
pub use timeout::*;
pub use timeout_on_close::*;

use crate::error::{ChannelError, PacketError};

/// All channel messages
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ChannelMsg {
    OpenInit(MsgChannelOpenInit),
    OpenTry(MsgChannelOpenTry),
    OpenAck(MsgChannelOpenAck),
    OpenConfirm(MsgChannelOpenConfirm),
    CloseInit(MsgChannelCloseInit),
    CloseConfirm(MsgChannelCloseConfirm),
}

impl ChannelMsg {
    pub fn validate_basic(&self) -> Result<(), ChannelError> {
        match self {
            Self::OpenInit(msg) => msg.validate_basic(),
            Self::OpenTry(msg) => msg.validate_basic(),
            Self::OpenAck(msg) => msg.validate_basic(),
            Self::OpenConfirm(msg) => msg.validate_basic(),
            Self::CloseInit(msg) => msg.validate_basic(),
            Self::CloseConfirm(msg) => msg.validate_basic(),
        }
    }
}

/// All packet messages
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum PacketMsg {
    Recv(MsgRecvPacket),
    Ack(MsgAcknowledgement),
    Timeout(MsgTimeout),
    TimeoutOnClose(MsgTimeoutOnClose),
}

impl PacketMsg {
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        match self {
            Self::Recv(msg) => msg.validate_basic(),
            Self::Ack(msg) => msg.validate_basic(),
            Self::Timeout(msg) => msg.validate_basic(),
            Self::TimeoutOnClose(msg) => msg.validate_basic(),
        }
    }
}

pub fn channel_msg_to_port_id(msg: &ChannelMsg) -> &PortId {
    match msg {
        ChannelMsg::OpenInit(msg) => &msg.port_id_on_a,
        ChannelMsg::OpenTry(msg) => &msg.port_id_on_b,
        ChannelMsg::OpenAck(msg) => &msg.port_id_on_a,
        ChannelMsg::OpenConfirm(msg) => &msg.port_id_on_b,
        ChannelMsg::CloseInit(msg) => &msg.port_id_on_a,
        ChannelMsg::CloseConfirm(msg) => &msg.port_id_on_b,
    }
}

/// The local channel end a message acts on. `None` for the messages that
/// create the channel end.
pub fn channel_msg_to_channel_id(msg: &ChannelMsg) -> Option<&ChannelId> {
    match msg {
        ChannelMsg::OpenInit(_) | ChannelMsg::OpenTry(_) => None,
        ChannelMsg::OpenAck(msg) => Some(&msg.chan_id_on_a),
        ChannelMsg::OpenConfirm(msg) => Some(&msg.chan_id_on_b),
        ChannelMsg::CloseInit(msg) => Some(&msg.chan_id_on_a),
        ChannelMsg::CloseConfirm(msg) => Some(&msg.chan_id_on_b),
    }
}

pub fn packet_msg_to_port_id(msg: &PacketMsg) -> &PortId {
    match msg {
        PacketMsg::Recv(msg) => &msg.packet.port_id_on_b,
        PacketMsg::Ack(msg) => &msg.packet.port_id_on_a,
        PacketMsg::Timeout(msg) => &msg.packet.port_id_on_a,
        PacketMsg::TimeoutOnClose(msg) => &msg.packet.port_id_on_a,
    }
}

pub fn packet_msg_to_channel_id(msg: &PacketMsg) -> &ChannelId {
    match msg {
        PacketMsg::Recv(msg) => &msg.packet.chan_id_on_b,
        PacketMsg::Ack(msg) => &msg.packet.chan_id_on_a,
        PacketMsg::Timeout(msg) => &msg.packet.chan_id_on_a,
        PacketMsg::TimeoutOnClose(msg) => &msg.packet.chan_id_on_a,
    }
}

pub(crate) fn validate_signer(signer: &Signer) -> Result<(), ChannelError> {
    if signer.is_empty() {
        return Err(ChannelError::EmptySigner);
    }
    Ok(())
}

pub(crate) fn validate_packet_signer(signer: &Signer) -> Result<(), PacketError> {
    if signer.is_empty() {
        return Err(PacketError::EmptySigner);
    }
    Ok(())
}
