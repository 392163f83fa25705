//! Events emitted by the connection handshake handlers.

use ibc_tao_host_types::identifiers::{ClientId, ConnectionId};
use ibc_tao_primitives::{AbciEvent, EventAttribute};

pub const CONNECTION_OPEN_INIT_EVENT: &str = "connection_open_init";
pub const CONNECTION_OPEN_TRY_EVENT: &str = "connection_open_try";
pub const CONNECTION_OPEN_ACK_EVENT: &str = "connection_open_ack";
pub const CONNECTION_OPEN_CONFIRM_EVENT: &str = "connection_open_confirm";

pub const CONN_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";
pub const COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY: &str = "counterparty_connection_id";
pub const COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY: &str = "counterparty_client_id";

/// Attributes shared by every connection handshake event. The counterparty
/// connection id is unknown in `OpenInit`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Attributes {
    connection_id: ConnectionId,
    client_id: ClientId,
    counterparty_connection_id: Option<ConnectionId>,
    counterparty_client_id: ClientId,
}

impl From<Attributes> for Vec<EventAttribute> {
    fn from(a: Attributes) -> Self {
        vec![
            (CONN_ID_ATTRIBUTE_KEY, a.connection_id.as_str()).into(),
            (CLIENT_ID_ATTRIBUTE_KEY, a.client_id.as_str()).into(),
            (
                COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY,
                a.counterparty_connection_id
                    .as_ref()
                    .map(ConnectionId::as_str)
                    .unwrap_or_default(),
            )
                .into(),
            (
                COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY,
                a.counterparty_client_id.as_str(),
            )
                .into(),
        ]
    }
}

macro_rules! connection_event {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $conn_id:ident, $cp_conn_id:ident, $cp_conn_id_ty:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(Attributes);

        impl $name {
            pub fn new(
                $conn_id: ConnectionId,
                client_id: ClientId,
                $cp_conn_id: $cp_conn_id_ty,
                counterparty_client_id: ClientId,
            ) -> Self {
                Self(Attributes {
                    connection_id: $conn_id,
                    client_id,
                    counterparty_connection_id: $cp_conn_id.into(),
                    counterparty_client_id,
                })
            }

            pub fn connection_id(&self) -> &ConnectionId {
                &self.0.connection_id
            }

            pub fn client_id(&self) -> &ClientId {
                &self.0.client_id
            }

            pub fn counterparty_connection_id(&self) -> Option<&ConnectionId> {
                self.0.counterparty_connection_id.as_ref()
            }

            pub fn counterparty_client_id(&self) -> &ClientId {
                &self.0.counterparty_client_id
            }

            pub fn event_type(&self) -> &str {
                $kind
            }
        }

        impl From<$name> for AbciEvent {
            fn from(e: $name) -> Self {
                AbciEvent::new($kind, e.0.into())
            }
        }
    };
}

connection_event!(
    /// Emitted when chain A starts a handshake.
    OpenInit,
    CONNECTION_OPEN_INIT_EVENT,
    conn_id_on_a,
    conn_id_on_b,
    Option<ConnectionId>
);
connection_event!(
    /// Emitted when chain B answers chain A's `OpenInit`.
    OpenTry,
    CONNECTION_OPEN_TRY_EVENT,
    conn_id_on_b,
    conn_id_on_a,
    ConnectionId
);
connection_event!(
    /// Emitted when chain A opens its end.
    OpenAck,
    CONNECTION_OPEN_ACK_EVENT,
    conn_id_on_a,
    conn_id_on_b,
    ConnectionId
);
connection_event!(
    /// Emitted when chain B opens its end, completing the handshake.
    OpenConfirm,
    CONNECTION_OPEN_CONFIRM_EVENT,
    conn_id_on_b,
    conn_id_on_a,
    ConnectionId
);
