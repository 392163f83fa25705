//! Defines the main channel, port, and packet error types

use displaydoc::Display;
use ibc_tao_client_types::error::ClientError;
use ibc_tao_client_types::Height;
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_host_types::error::{ErrorKind, IdentifierError};
use ibc_tao_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_tao_primitives::{Timestamp, TimestampError};

use super::channel::Counterparty;
use super::timeout::TimeoutHeight;
use crate::commitment::PacketCommitment;
use crate::timeout::TimeoutTimestamp;
use crate::Version;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ChannelError {
    /// application module error: `{description}`
    AppModule { description: String },
    /// connection error: `{0}`
    Connection(ConnectionError),
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// invalid channel id: expected `{expected}`, actual `{actual}`
    InvalidChannelId { expected: String, actual: String },
    /// invalid channel state: expected `{expected}`, actual `{actual}`
    InvalidState { expected: String, actual: String },
    /// invalid channel order type: expected `{expected}`, actual `{actual}`
    InvalidOrderType { expected: String, actual: String },
    /// invalid connection hops length: expected `{expected}`, actual `{actual}`
    InvalidConnectionHopsLength { expected: u64, actual: u64 },
    /// invalid counterparty: expected `{expected}`, actual `{actual}`
    InvalidCounterparty {
        expected: Counterparty,
        actual: Counterparty,
    },
    /// connection `{connection_id}` is not open
    ConnectionNotOpen { connection_id: ConnectionId },
    /// missing counterparty channel id
    MissingCounterparty,
    /// unsupported version: expected `{expected}`, actual `{actual}`
    UnsupportedVersion { expected: Version, actual: Version },
    /// non-existent channel end: (`{port_id}`, `{channel_id}`)
    NonexistentChannel {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// failed proof verification: `{0}`
    FailedProofVerification(ClientError),
    /// outbound channel handshakes are disabled
    OutboundDisabled,
    /// empty signer
    EmptySigner,
    /// channel counter overflow error
    CounterOverflow,
}

impl ChannelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(e) => e.kind(),
            Self::FailedProofVerification(e) => e.kind(),
            Self::NonexistentChannel { .. } => ErrorKind::NotFound,
            Self::InvalidState { .. } | Self::ConnectionNotOpen { .. } => ErrorKind::InvalidState,
            Self::UnsupportedVersion { .. } => ErrorKind::VersionMismatch,
            Self::CounterOverflow => ErrorKind::Fatal,
            _ => ErrorKind::InvalidInput,
        }
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum PacketError {
    /// application module error: `{description}`
    AppModule { description: String },
    /// channel error: `{0}`
    Channel(ChannelError),
    /// insufficient packet timeout height: should have `{timeout_height}` > `{chain_height}`
    InsufficientPacketHeight {
        chain_height: Height,
        timeout_height: TimeoutHeight,
    },
    /// insufficient packet timestamp: should have `{timeout_timestamp}` > `{chain_timestamp}`
    InsufficientPacketTimestamp {
        chain_timestamp: Timestamp,
        timeout_timestamp: TimeoutTimestamp,
    },
    /// mismatched packet sequences: expected `{expected}`, actual `{actual}`
    MismatchedPacketSequences {
        expected: Sequence,
        actual: Sequence,
    },
    /// mismatched commitments for packet `{sequence}`: expected `{expected:?}`, actual `{actual:?}`
    MismatchedPacketCommitments {
        sequence: Sequence,
        expected: PacketCommitment,
        actual: PacketCommitment,
    },
    /// packet destination (`{port_id}`, `{channel_id}`) does not match the counterparty
    InvalidPacketCounterparty {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// missing next sequence for (`{port_id}`, `{channel_id}`)
    MissingNextSequence {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// missing timeout
    MissingTimeout,
    /// invalid timeout timestamp: `{0}`
    InvalidTimeoutTimestamp(TimestampError),
    /// invalid identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// empty acknowledgement not allowed
    EmptyAcknowledgement,
    /// empty acknowledgement status not allowed
    EmptyAcknowledgementStatus,
    /// invalid acknowledgement: `{description}`
    InvalidAcknowledgement { description: String },
    /// packet data bytes cannot be empty
    ZeroPacketData,
    /// packet acknowledgement for sequence `{0}` already exists
    DuplicateAcknowledgement(Sequence),
    /// packet sequence cannot be 0
    ZeroPacketSequence,
    /// packet timeout height `{timeout_height}` > chain height `{chain_height}` and timeout timestamp `{timeout_timestamp}` > chain timestamp `{chain_timestamp}`
    PacketTimeoutNotReached {
        timeout_height: TimeoutHeight,
        chain_height: Height,
        timeout_timestamp: TimeoutTimestamp,
        chain_timestamp: Timestamp,
    },
    /// failed packet verification for packet with sequence `{sequence}`: `{client_error}`
    FailedPacketVerification {
        sequence: Sequence,
        client_error: ClientError,
    },
    /// inbound packet relay is disabled
    InboundDisabled,
    /// empty signer
    EmptySigner,
}

impl PacketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Channel(e) => e.kind(),
            Self::FailedPacketVerification { client_error, .. } => client_error.kind(),
            Self::MissingNextSequence { .. } => ErrorKind::NotFound,
            Self::InsufficientPacketHeight { .. } | Self::InsufficientPacketTimestamp { .. } => {
                ErrorKind::TimeoutElapsed
            }
            Self::PacketTimeoutNotReached { .. } => ErrorKind::TimeoutNotElapsed,
            Self::MismatchedPacketSequences { .. } | Self::ZeroPacketSequence => {
                ErrorKind::SequenceViolation
            }
            Self::DuplicateAcknowledgement(_) => ErrorKind::InvalidState,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl From<IdentifierError> for ChannelError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidIdentifier(err)
    }
}

impl From<ConnectionError> for ChannelError {
    fn from(err: ConnectionError) -> Self {
        Self::Connection(err)
    }
}

impl From<ChannelError> for PacketError {
    fn from(err: ChannelError) -> Self {
        Self::Channel(err)
    }
}

impl From<IdentifierError> for PacketError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidIdentifier(err)
    }
}

impl From<TimestampError> for PacketError {
    fn from(err: TimestampError) -> Self {
        Self::InvalidTimeoutTimestamp(err)
    }
}

impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Channel(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::InvalidTimeoutTimestamp(e) => Some(e),
            Self::FailedPacketVerification {
                client_error: e, ..
            } => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Connection(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::FailedProofVerification(e) => Some(e),
            _ => None,
        }
    }
}
