use displaydoc::Display;
use ibc_tao_host_types::error::ErrorKind;
use ibc_tao_host_types::identifiers::{ChannelId, PortId};

use crate::capability::CapabilityName;
use crate::module::ModuleId;

/// Error type for the router module.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum RouterError {
    /// missing module `{module_id}`
    MissingModule { module_id: ModuleId },
    /// unknown port `{port_id}`
    UnknownPort { port_id: PortId },
    /// no module owns channel (`{port_id}`, `{channel_id}`)
    UnknownChannel {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// capability `{name}` is already taken
    CapabilityTaken { name: CapabilityName },
    /// capability `{name}` not found
    CapabilityNotFound { name: CapabilityName },
    /// capability presented for `{name}` does not authenticate
    UnauthenticatedCapability { name: CapabilityName },
}

impl RouterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingModule { .. } | Self::UnknownPort { .. } | Self::UnknownChannel { .. } => {
                ErrorKind::NotFound
            }
            Self::CapabilityTaken { .. } => ErrorKind::InvalidState,
            Self::CapabilityNotFound { .. } | Self::UnauthenticatedCapability { .. } => {
                ErrorKind::CapabilityMissing
            }
        }
    }
}

impl std::error::Error for RouterError {}
