//! Module parameters consulted by the handlers.

use crate::identifiers::ClientType;

/// Host-governed switches of the protocol layer.
///
/// `inbound_enabled` gates packet reception; `outbound_enabled` gates the
/// connection and channel `OpenInit` steps. Acknowledgements and timeouts
/// settle already committed state and are never gated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub allowed_clients: Vec<ClientType>,
    pub inbound_enabled: bool,
    pub outbound_enabled: bool,
}

impl Params {
    pub fn new(
        allowed_clients: Vec<ClientType>,
        inbound_enabled: bool,
        outbound_enabled: bool,
    ) -> Self {
        Self {
            allowed_clients,
            inbound_enabled,
            outbound_enabled,
        }
    }

    pub fn is_allowed_client(&self, client_type: &ClientType) -> bool {
        self.allowed_clients.contains(client_type)
    }
}

/// Only the built-in localhost client is allowed. A host lists the light
/// clients it actually registers through [`Params::new`].
impl Default for Params {
    fn default() -> Self {
        Self {
            allowed_clients: vec![ClientType::localhost()],
            inbound_enabled: true,
            outbound_enabled: true,
        }
    }
}
