//! Packet lifecycle events. Packet data and acknowledgements are rendered as
//! hex so that arbitrary bytes never end up in event logs.

use ibc_tao_host_types::identifiers::ConnectionId;
use ibc_tao_primitives::{AbciEvent, EventAttribute};
use subtle_encoding::hex;

use super::CHANNEL_ORDERING_ATTRIBUTE_KEY;
use crate::acknowledgement::Acknowledgement;
use crate::channel::Order;
use crate::packet::Packet;

pub const SEND_PACKET_EVENT: &str = "send_packet";
pub const RECEIVE_PACKET_EVENT: &str = "recv_packet";
pub const WRITE_ACK_EVENT: &str = "write_acknowledgement";
pub const ACK_PACKET_EVENT: &str = "acknowledge_packet";
pub const TIMEOUT_EVENT: &str = "timeout_packet";

pub const PKT_DATA_HEX_ATTRIBUTE_KEY: &str = "packet_data_hex";
pub const PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY: &str = "packet_timeout_height";
pub const PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY: &str = "packet_timeout_timestamp";
pub const PKT_SEQ_ATTRIBUTE_KEY: &str = "packet_sequence";
pub const PKT_SRC_PORT_ATTRIBUTE_KEY: &str = "packet_src_port";
pub const PKT_SRC_CHANNEL_ATTRIBUTE_KEY: &str = "packet_src_channel";
pub const PKT_DST_PORT_ATTRIBUTE_KEY: &str = "packet_dst_port";
pub const PKT_DST_CHANNEL_ATTRIBUTE_KEY: &str = "packet_dst_channel";
pub const PKT_CONNECTION_ID_ATTRIBUTE_KEY: &str = "packet_connection";
pub const PKT_ACK_HEX_ATTRIBUTE_KEY: &str = "packet_ack_hex";

fn hex_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&hex::encode(bytes)).into_owned()
}

fn packet_attributes(packet: &Packet, with_data: bool) -> Vec<EventAttribute> {
    let mut attributes = Vec::with_capacity(11);
    if with_data {
        attributes.push((PKT_DATA_HEX_ATTRIBUTE_KEY, hex_string(&packet.data)).into());
    }
    attributes.extend([
        (
            PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY,
            packet.timeout_height_on_b.to_event_attribute_value(),
        )
            .into(),
        (
            PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY,
            packet.timeout_timestamp_on_b.nanoseconds().to_string(),
        )
            .into(),
        (PKT_SEQ_ATTRIBUTE_KEY, packet.seq_on_a.to_string()).into(),
        (PKT_SRC_PORT_ATTRIBUTE_KEY, packet.port_id_on_a.as_str()).into(),
        (PKT_SRC_CHANNEL_ATTRIBUTE_KEY, packet.chan_id_on_a.as_str()).into(),
        (PKT_DST_PORT_ATTRIBUTE_KEY, packet.port_id_on_b.as_str()).into(),
        (PKT_DST_CHANNEL_ATTRIBUTE_KEY, packet.chan_id_on_b.as_str()).into(),
    ]);
    attributes
}

macro_rules! packet_event {
    ($(#[$meta:meta])* $name:ident, $kind:expr, with_data: $with_data:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            packet: Packet,
            channel_ordering: Order,
            conn_id: ConnectionId,
        }

        impl $name {
            pub fn new(packet: Packet, channel_ordering: Order, conn_id: ConnectionId) -> Self {
                Self {
                    packet,
                    channel_ordering,
                    conn_id,
                }
            }

            pub fn packet(&self) -> &Packet {
                &self.packet
            }

            pub fn channel_ordering(&self) -> &Order {
                &self.channel_ordering
            }

            /// Connection of the chain that emitted the event.
            pub fn conn_id(&self) -> &ConnectionId {
                &self.conn_id
            }

            pub fn event_type(&self) -> &str {
                $kind
            }
        }

        impl From<$name> for AbciEvent {
            fn from(e: $name) -> Self {
                let mut attributes = packet_attributes(&e.packet, $with_data);
                attributes.push((CHANNEL_ORDERING_ATTRIBUTE_KEY, e.channel_ordering.as_str()).into());
                attributes.push((PKT_CONNECTION_ID_ATTRIBUTE_KEY, e.conn_id.as_str()).into());

                AbciEvent::new($kind, attributes)
            }
        }
    };
}

packet_event!(
    /// Emitted by the sending chain when a packet commitment is written.
    SendPacket,
    SEND_PACKET_EVENT,
    with_data: true
);
packet_event!(
    /// Emitted by the receiving chain for every processed `MsgRecvPacket`,
    /// including redundant ones.
    ReceivePacket,
    RECEIVE_PACKET_EVENT,
    with_data: true
);
packet_event!(AcknowledgePacket, ACK_PACKET_EVENT, with_data: false);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteAcknowledgement {
    packet: Packet,
    acknowledgement: Acknowledgement,
    conn_id_on_b: ConnectionId,
}

impl WriteAcknowledgement {
    pub fn new(packet: Packet, acknowledgement: Acknowledgement, conn_id_on_b: ConnectionId) -> Self {
        Self {
            packet,
            acknowledgement,
            conn_id_on_b,
        }
    }

    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn acknowledgement(&self) -> &Acknowledgement {
        &self.acknowledgement
    }

    pub fn conn_id_on_b(&self) -> &ConnectionId {
        &self.conn_id_on_b
    }

    pub fn event_type(&self) -> &str {
        WRITE_ACK_EVENT
    }
}

impl From<WriteAcknowledgement> for AbciEvent {
    fn from(e: WriteAcknowledgement) -> Self {
        let mut attributes = packet_attributes(&e.packet, true);
        attributes.push((PKT_ACK_HEX_ATTRIBUTE_KEY, hex_string(e.acknowledgement.as_bytes())).into());
        attributes.push((PKT_CONNECTION_ID_ATTRIBUTE_KEY, e.conn_id_on_b.as_str()).into());

        AbciEvent::new(WRITE_ACK_EVENT, attributes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeoutPacket {
    packet: Packet,
    channel_ordering: Order,
}

impl TimeoutPacket {
    pub fn new(packet: Packet, channel_ordering: Order) -> Self {
        Self {
            packet,
            channel_ordering,
        }
    }

    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn event_type(&self) -> &str {
        TIMEOUT_EVENT
    }
}

impl From<TimeoutPacket> for AbciEvent {
    fn from(e: TimeoutPacket) -> Self {
        let mut attributes = packet_attributes(&e.packet, false);
        attributes.push((CHANNEL_ORDERING_ATTRIBUTE_KEY, e.channel_ordering.as_str()).into());

        AbciEvent::new(TIMEOUT_EVENT, attributes)
    }
}
