use ibc_tao_channel_types::msgs::{ChannelMsg, PacketMsg};
use ibc_tao_client_types::msgs::ClientMsg;
use ibc_tao_connection_types::msgs::ConnectionMsg;
use ibc_tao_primitives::Signer;

use crate::error::ContextError;

/// Enumeration of all messages that the local ICS26 module is capable of routing.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum MsgEnvelope {
    Client(ClientMsg),
    Connection(ConnectionMsg),
    Channel(ChannelMsg),
    Packet(PacketMsg),
}

impl MsgEnvelope {
    pub fn signer(&self) -> &Signer {
        match self {
            MsgEnvelope::Client(msg) => match msg {
                ClientMsg::CreateClient(msg) => &msg.signer,
                ClientMsg::UpdateClient(msg) => &msg.signer,
                ClientMsg::Misbehaviour(msg) => &msg.signer,
                ClientMsg::UpgradeClient(msg) => &msg.signer,
                ClientMsg::RecoverClient(msg) => &msg.signer,
            },
            MsgEnvelope::Connection(msg) => match msg {
                ConnectionMsg::OpenInit(msg) => &msg.signer,
                ConnectionMsg::OpenTry(msg) => &msg.signer,
                ConnectionMsg::OpenAck(msg) => &msg.signer,
                ConnectionMsg::OpenConfirm(msg) => &msg.signer,
            },
            MsgEnvelope::Channel(msg) => match msg {
                ChannelMsg::OpenInit(msg) => &msg.signer,
                ChannelMsg::OpenTry(msg) => &msg.signer,
                ChannelMsg::OpenAck(msg) => &msg.signer,
                ChannelMsg::OpenConfirm(msg) => &msg.signer,
                ChannelMsg::CloseInit(msg) => &msg.signer,
                ChannelMsg::CloseConfirm(msg) => &msg.signer,
            },
            MsgEnvelope::Packet(msg) => match msg {
                PacketMsg::Recv(msg) => &msg.signer,
                PacketMsg::Ack(msg) => &msg.signer,
                PacketMsg::Timeout(msg) => &msg.signer,
                PacketMsg::TimeoutOnClose(msg) => &msg.signer,
            },
        }
    }

    /// Stateless checks, run before any store access.
    pub fn validate_basic(&self) -> Result<(), ContextError> {
        match self {
            MsgEnvelope::Client(msg) => msg.validate_basic()?,
            MsgEnvelope::Connection(msg) => msg.validate_basic()?,
            MsgEnvelope::Channel(msg) => msg.validate_basic()?,
            MsgEnvelope::Packet(msg) => msg.validate_basic()?,
        }
        Ok(())
    }

    /// `RecvPacket`, `Acknowledgement`, `Timeout` and `TimeoutOnClose`.
    pub fn is_packet_msg(&self) -> bool {
        matches!(self, MsgEnvelope::Packet(_))
    }

    pub fn is_update_client(&self) -> bool {
        matches!(self, MsgEnvelope::Client(ClientMsg::UpdateClient(_)))
    }
}
