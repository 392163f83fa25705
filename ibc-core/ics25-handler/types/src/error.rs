//! Defines the context error type

use derive_more::From;
use displaydoc::Display;
use ibc_tao_channel_types::error::{ChannelError, PacketError};
use ibc_tao_client_types::error::ClientError;
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_host_types::error::ErrorKind;
use ibc_tao_router_types::error::RouterError;

/// Top-level error returned by the handlers and the host contexts.
#[derive(Debug, Display, From, PartialEq, Eq)]
pub enum ContextError {
    /// ICS02 Client error: {0}
    ClientError(ClientError),
    /// ICS03 Connection error: {0}
    ConnectionError(ConnectionError),
    /// ICS04 Channel error: {0}
    ChannelError(ChannelError),
    /// ICS04 Packet error: {0}
    PacketError(PacketError),
    /// ICS26 Routing error: {0}
    RouterError(RouterError),
}

impl ContextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientError(e) => e.kind(),
            Self::ConnectionError(e) => e.kind(),
            Self::ChannelError(e) => e.kind(),
            Self::PacketError(e) => e.kind(),
            Self::RouterError(e) => e.kind(),
        }
    }
}

impl From<ContextError> for ClientError {
    fn from(context_error: ContextError) -> Self {
        match context_error {
            ContextError::ClientError(e) => e,
            _ => ClientError::Other {
                description: context_error.to_string(),
            },
        }
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientError(e) => Some(e),
            Self::ConnectionError(e) => Some(e),
            Self::ChannelError(e) => Some(e),
            Self::PacketError(e) => Some(e),
            Self::RouterError(e) => Some(e),
        }
    }
}
