//! Events emitted by the client handlers.

use ibc_tao_host_types::identifiers::{ClientId, ClientType};
use ibc_tao_primitives::{AbciEvent, EventAttribute};
use subtle_encoding::hex;

use crate::height::Height;

/// Client event types
pub const CREATE_CLIENT_EVENT: &str = "create_client";
pub const UPDATE_CLIENT_EVENT: &str = "update_client";
pub const CLIENT_MISBEHAVIOUR_EVENT: &str = "client_misbehaviour";
pub const UPGRADE_CLIENT_EVENT: &str = "upgrade_client";
pub const RECOVER_CLIENT_EVENT: &str = "recover_client";

/// The content of the `key` field for the attribute containing the client identifier.
pub const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";

/// The content of the `key` field for the attribute containing the client type.
pub const CLIENT_TYPE_ATTRIBUTE_KEY: &str = "client_type";

/// The content of the `key` field for the attribute containing the height.
pub const CONSENSUS_HEIGHT_ATTRIBUTE_KEY: &str = "consensus_height";

/// The content of the `key` field for the header in update client event.
pub const HEADER_ATTRIBUTE_KEY: &str = "header";

pub const SUBJECT_CLIENT_ID_ATTRIBUTE_KEY: &str = "subject_client_id";
pub const SUBSTITUTE_CLIENT_ID_ATTRIBUTE_KEY: &str = "substitute_client_id";

fn client_id_attribute(client_id: &ClientId) -> EventAttribute {
    (CLIENT_ID_ATTRIBUTE_KEY, client_id.as_str()).into()
}

fn client_type_attribute(client_type: &ClientType) -> EventAttribute {
    (CLIENT_TYPE_ATTRIBUTE_KEY, client_type.as_str()).into()
}

fn consensus_height_attribute(height: &Height) -> EventAttribute {
    (CONSENSUS_HEIGHT_ATTRIBUTE_KEY, height.to_string()).into()
}

/// Raw headers are hex encoded so that events stay valid UTF-8.
fn header_attribute(header: &[u8]) -> EventAttribute {
    (
        HEADER_ATTRIBUTE_KEY,
        String::from_utf8_lossy(&hex::encode(header)).into_owned(),
    )
        .into()
}

/// CreateClient event signals the creation of a new on-chain client (IBC client).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateClient {
    client_id: ClientId,
    client_type: ClientType,
    consensus_height: Height,
}

impl CreateClient {
    pub fn new(client_id: ClientId, client_type: ClientType, consensus_height: Height) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_type(&self) -> &ClientType {
        &self.client_type
    }

    pub fn consensus_height(&self) -> &Height {
        &self.consensus_height
    }

    pub fn event_type(&self) -> &str {
        CREATE_CLIENT_EVENT
    }
}

impl From<CreateClient> for AbciEvent {
    fn from(c: CreateClient) -> Self {
        AbciEvent::new(
            CREATE_CLIENT_EVENT,
            vec![
                client_id_attribute(&c.client_id),
                client_type_attribute(&c.client_type),
                consensus_height_attribute(&c.consensus_height),
            ],
        )
    }
}

/// UpdateClient event signals a recent update of an on-chain client (IBC Client).
///
/// The header is kept as raw bytes and rendered as hex in the attributes, so
/// that non UTF-8 payloads never end up in event logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateClient {
    client_id: ClientId,
    client_type: ClientType,
    consensus_height: Height,
    header: Vec<u8>,
}

impl UpdateClient {
    pub fn new(
        client_id: ClientId,
        client_type: ClientType,
        consensus_height: Height,
        header: Vec<u8>,
    ) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
            header,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_type(&self) -> &ClientType {
        &self.client_type
    }

    pub fn consensus_height(&self) -> &Height {
        &self.consensus_height
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn event_type(&self) -> &str {
        UPDATE_CLIENT_EVENT
    }
}

impl From<UpdateClient> for AbciEvent {
    fn from(u: UpdateClient) -> Self {
        AbciEvent::new(
            UPDATE_CLIENT_EVENT,
            vec![
                client_id_attribute(&u.client_id),
                client_type_attribute(&u.client_type),
                consensus_height_attribute(&u.consensus_height),
                header_attribute(&u.header),
            ],
        )
    }
}

/// ClientMisbehaviour event signals the update of an on-chain client (IBC Client) with evidence of
/// misbehaviour, after which the client is frozen.
///
/// `header` holds the raw client message that exposed the misbehaviour: the
/// conflicting header on the update path, the evidence itself otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientMisbehaviour {
    client_id: ClientId,
    client_type: ClientType,
    consensus_height: Height,
    header: Vec<u8>,
}

impl ClientMisbehaviour {
    pub fn new(
        client_id: ClientId,
        client_type: ClientType,
        consensus_height: Height,
        header: Vec<u8>,
    ) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
            header,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_type(&self) -> &ClientType {
        &self.client_type
    }

    pub fn consensus_height(&self) -> &Height {
        &self.consensus_height
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn event_type(&self) -> &str {
        CLIENT_MISBEHAVIOUR_EVENT
    }
}

impl From<ClientMisbehaviour> for AbciEvent {
    fn from(c: ClientMisbehaviour) -> Self {
        AbciEvent::new(
            CLIENT_MISBEHAVIOUR_EVENT,
            vec![
                client_id_attribute(&c.client_id),
                client_type_attribute(&c.client_type),
                consensus_height_attribute(&c.consensus_height),
                header_attribute(&c.header),
            ],
        )
    }
}

/// Signals a recent upgrade of an on-chain client (IBC Client).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeClient {
    client_id: ClientId,
    client_type: ClientType,
    consensus_height: Height,
}

impl UpgradeClient {
    pub fn new(client_id: ClientId, client_type: ClientType, consensus_height: Height) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_type(&self) -> &ClientType {
        &self.client_type
    }

    pub fn consensus_height(&self) -> &Height {
        &self.consensus_height
    }

    pub fn event_type(&self) -> &str {
        UPGRADE_CLIENT_EVENT
    }
}

impl From<UpgradeClient> for AbciEvent {
    fn from(u: UpgradeClient) -> Self {
        AbciEvent::new(
            UPGRADE_CLIENT_EVENT,
            vec![
                client_id_attribute(&u.client_id),
                client_type_attribute(&u.client_type),
                consensus_height_attribute(&u.consensus_height),
            ],
        )
    }
}

/// Signals that a frozen or expired client was repaired by governance with
/// the state of a substitute client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverClient {
    subject_client_id: ClientId,
    substitute_client_id: ClientId,
    client_type: ClientType,
}

impl RecoverClient {
    pub fn new(
        subject_client_id: ClientId,
        substitute_client_id: ClientId,
        client_type: ClientType,
    ) -> Self {
        Self {
            subject_client_id,
            substitute_client_id,
            client_type,
        }
    }

    pub fn subject_client_id(&self) -> &ClientId {
        &self.subject_client_id
    }

    pub fn substitute_client_id(&self) -> &ClientId {
        &self.substitute_client_id
    }

    pub fn event_type(&self) -> &str {
        RECOVER_CLIENT_EVENT
    }
}

impl From<RecoverClient> for AbciEvent {
    fn from(r: RecoverClient) -> Self {
        AbciEvent::new(
            RECOVER_CLIENT_EVENT,
            vec![
                (SUBJECT_CLIENT_ID_ATTRIBUTE_KEY, r.subject_client_id.as_str()).into(),
                (
                    SUBSTITUTE_CLIENT_ID_ATTRIBUTE_KEY,
                    r.substitute_client_id.as_str(),
                )
                    .into(),
                client_type_attribute(&r.client_type),
            ],
        )
    }
}
