//! Events emitted by the channel handshake and packet handlers.

mod packet;

use ibc_tao_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_tao_primitives::{AbciEvent, EventAttribute};

pub use self::packet::*;
use super::channel::Order;
use super::Version;

pub const CHANNEL_OPEN_INIT_EVENT: &str = "channel_open_init";
pub const CHANNEL_OPEN_TRY_EVENT: &str = "channel_open_try";
pub const CHANNEL_OPEN_ACK_EVENT: &str = "channel_open_ack";
pub const CHANNEL_OPEN_CONFIRM_EVENT: &str = "channel_open_confirm";
pub const CHANNEL_CLOSE_INIT_EVENT: &str = "channel_close_init";
pub const CHANNEL_CLOSE_CONFIRM_EVENT: &str = "channel_close_confirm";
pub const CHANNEL_CLOSED_EVENT: &str = "channel_close";

pub const PORT_ID_ATTRIBUTE_KEY: &str = "port_id";
pub const CHANNEL_ID_ATTRIBUTE_KEY: &str = "channel_id";
pub const COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY: &str = "counterparty_port_id";
pub const COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY: &str = "counterparty_channel_id";
pub const CONNECTION_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const VERSION_ATTRIBUTE_KEY: &str = "version";
pub const CHANNEL_ORDERING_ATTRIBUTE_KEY: &str = "channel_ordering";

fn channel_attributes(
    port_id: &PortId,
    chan_id: &ChannelId,
    counterparty_port_id: &PortId,
    counterparty_chan_id: Option<&ChannelId>,
    conn_id: &ConnectionId,
) -> Vec<EventAttribute> {
    vec![
        (PORT_ID_ATTRIBUTE_KEY, port_id.as_str()).into(),
        (CHANNEL_ID_ATTRIBUTE_KEY, chan_id.as_str()).into(),
        (COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY, counterparty_port_id.as_str()).into(),
        (
            COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY,
            counterparty_chan_id.map(ChannelId::as_str).unwrap_or_default(),
        )
            .into(),
        (CONNECTION_ID_ATTRIBUTE_KEY, conn_id.as_str()).into(),
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenInit {
    port_id_on_a: PortId,
    chan_id_on_a: ChannelId,
    port_id_on_b: PortId,
    conn_id_on_a: ConnectionId,
    version_on_a: Version,
}

impl OpenInit {
    pub fn new(
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        conn_id_on_a: ConnectionId,
        version_on_a: Version,
    ) -> Self {
        Self {
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b,
            conn_id_on_a,
            version_on_a,
        }
    }
    pub fn port_id_on_a(&self) -> &PortId {
        &self.port_id_on_a
    }
    pub fn chan_id_on_a(&self) -> &ChannelId {
        &self.chan_id_on_a
    }
    pub fn port_id_on_b(&self) -> &PortId {
        &self.port_id_on_b
    }
    pub fn conn_id_on_a(&self) -> &ConnectionId {
        &self.conn_id_on_a
    }
    pub fn version_on_a(&self) -> &Version {
        &self.version_on_a
    }

    pub fn event_type(&self) -> &str {
        CHANNEL_OPEN_INIT_EVENT
    }
}

impl From<OpenInit> for AbciEvent {
    fn from(o: OpenInit) -> Self {
        let mut attributes = channel_attributes(
            &o.port_id_on_a,
            &o.chan_id_on_a,
            &o.port_id_on_b,
            None,
            &o.conn_id_on_a,
        );
        attributes.push((VERSION_ATTRIBUTE_KEY, o.version_on_a.as_str()).into());

        AbciEvent::new(CHANNEL_OPEN_INIT_EVENT, attributes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTry {
    port_id_on_b: PortId,
    chan_id_on_b: ChannelId,
    port_id_on_a: PortId,
    chan_id_on_a: ChannelId,
    conn_id_on_b: ConnectionId,
    version_on_b: Version,
}

impl OpenTry {
    pub fn new(
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        conn_id_on_b: ConnectionId,
        version_on_b: Version,
    ) -> Self {
        Self {
            port_id_on_b,
            chan_id_on_b,
            port_id_on_a,
            chan_id_on_a,
            conn_id_on_b,
            version_on_b,
        }
    }
    pub fn port_id_on_b(&self) -> &PortId {
        &self.port_id_on_b
    }
    pub fn chan_id_on_b(&self) -> &ChannelId {
        &self.chan_id_on_b
    }
    pub fn port_id_on_a(&self) -> &PortId {
        &self.port_id_on_a
    }
    pub fn chan_id_on_a(&self) -> &ChannelId {
        &self.chan_id_on_a
    }
    pub fn conn_id_on_b(&self) -> &ConnectionId {
        &self.conn_id_on_b
    }
    pub fn version_on_b(&self) -> &Version {
        &self.version_on_b
    }

    pub fn event_type(&self) -> &str {
        CHANNEL_OPEN_TRY_EVENT
    }
}

impl From<OpenTry> for AbciEvent {
    fn from(o: OpenTry) -> Self {
        let mut attributes = channel_attributes(
            &o.port_id_on_b,
            &o.chan_id_on_b,
            &o.port_id_on_a,
            Some(&o.chan_id_on_a),
            &o.conn_id_on_b,
        );
        attributes.push((VERSION_ATTRIBUTE_KEY, o.version_on_b.as_str()).into());

        AbciEvent::new(CHANNEL_OPEN_TRY_EVENT, attributes)
    }
}

/// Generates the handshake events that carry both channel ends and the
/// local connection, and nothing else.
macro_rules! channel_event {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            port_id: PortId,
            chan_id: ChannelId,
            counterparty_port_id: PortId,
            counterparty_chan_id: ChannelId,
            conn_id: ConnectionId,
        }

        impl $name {
            pub fn new(
                port_id: PortId,
                chan_id: ChannelId,
                counterparty_port_id: PortId,
                counterparty_chan_id: ChannelId,
                conn_id: ConnectionId,
            ) -> Self {
                Self {
                    port_id,
                    chan_id,
                    counterparty_port_id,
                    counterparty_chan_id,
                    conn_id,
                }
            }

            /// Port of the channel end that emitted the event.
            pub fn port_id(&self) -> &PortId {
                &self.port_id
            }

            pub fn chan_id(&self) -> &ChannelId {
                &self.chan_id
            }

            pub fn counterparty_port_id(&self) -> &PortId {
                &self.counterparty_port_id
            }

            pub fn counterparty_chan_id(&self) -> &ChannelId {
                &self.counterparty_chan_id
            }

            pub fn conn_id(&self) -> &ConnectionId {
                &self.conn_id
            }

            pub fn event_type(&self) -> &str {
                $kind
            }
        }

        impl From<$name> for AbciEvent {
            fn from(e: $name) -> Self {
                AbciEvent::new(
                    $kind,
                    channel_attributes(
                        &e.port_id,
                        &e.chan_id,
                        &e.counterparty_port_id,
                        Some(&e.counterparty_chan_id),
                        &e.conn_id,
                    ),
                )
            }
        }
    };
}

channel_event!(
    /// Emitted when chain A opens its channel end.
    OpenAck,
    CHANNEL_OPEN_ACK_EVENT
);
channel_event!(
    /// Emitted when chain B opens its channel end.
    OpenConfirm,
    CHANNEL_OPEN_CONFIRM_EVENT
);
channel_event!(CloseInit, CHANNEL_CLOSE_INIT_EVENT);
channel_event!(CloseConfirm, CHANNEL_CLOSE_CONFIRM_EVENT);

/// Emitted when an ordered channel is closed because one of its packets timed
/// out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelClosed {
    port_id_on_a: PortId,
    chan_id_on_a: ChannelId,
    port_id_on_b: PortId,
    chan_id_on_b: Option<ChannelId>,
    conn_id_on_a: ConnectionId,
    channel_ordering: Order,
}

impl ChannelClosed {
    pub fn new(
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: Option<ChannelId>,
        conn_id_on_a: ConnectionId,
        channel_ordering: Order,
    ) -> Self {
        Self {
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b,
            chan_id_on_b,
            conn_id_on_a,
            channel_ordering,
        }
    }
    pub fn port_id_on_a(&self) -> &PortId {
        &self.port_id_on_a
    }
    pub fn chan_id_on_a(&self) -> &ChannelId {
        &self.chan_id_on_a
    }
    pub fn port_id_on_b(&self) -> &PortId {
        &self.port_id_on_b
    }
    pub fn chan_id_on_b(&self) -> Option<&ChannelId> {
        self.chan_id_on_b.as_ref()
    }
    pub fn conn_id_on_a(&self) -> &ConnectionId {
        &self.conn_id_on_a
    }
    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn event_type(&self) -> &str {
        CHANNEL_CLOSED_EVENT
    }
}

impl From<ChannelClosed> for AbciEvent {
    fn from(e: ChannelClosed) -> Self {
        let mut attributes = channel_attributes(
            &e.port_id_on_a,
            &e.chan_id_on_a,
            &e.port_id_on_b,
            e.chan_id_on_b.as_ref(),
            &e.conn_id_on_a,
        );
        attributes.push((CHANNEL_ORDERING_ATTRIBUTE_KEY, e.channel_ordering.as_str()).into());

        AbciEvent::new(CHANNEL_CLOSED_EVENT, attributes)
    }
}
