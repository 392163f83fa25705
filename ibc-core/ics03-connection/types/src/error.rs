//! Defines the connection error type

use core::time::Duration;

use displaydoc::Display;
use ibc_tao_client_types::error::ClientError;
use ibc_tao_client_types::Height;
use ibc_tao_host_types::error::{ErrorKind, IdentifierError};
use ibc_tao_host_types::identifiers::{ClientId, ConnectionId};
use ibc_tao_primitives::{Timestamp, TimestampError};

use crate::version::Version;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConnectionError {
    /// client error: `{0}`
    Client(ClientError),
    /// invalid connection state: expected `{expected}`, actual `{actual}`
    InvalidState { expected: String, actual: String },
    /// connection `{connection_id}` not found
    ConnectionNotFound { connection_id: ConnectionId },
    /// consensus height claimed by the client on the other party is too advanced: `{target_height}` (host chain current height: `{current_height}`)
    InvalidConsensusHeight {
        target_height: Height,
        current_height: Height,
    },
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// empty supported versions
    EmptyVersions,
    /// single version must be negotiated on connection before opening channel
    InvalidVersionLength,
    /// version \"`{version}`\" not supported
    VersionNotSupported { version: Version },
    /// no common version
    NoCommonVersion,
    /// empty supported features
    EmptyFeatures,
    /// feature \"`{feature}`\" not supported
    FeatureNotSupported { feature: String },
    /// no common features
    NoCommonFeatures,
    /// delay period `{delay_period:?}` is too large
    InvalidDelayPeriod { delay_period: Duration },
    /// verifying connection state error: `{0}`
    VerifyConnectionState(ClientError),
    /// empty signer
    EmptySigner,
    /// invalid counterparty
    InvalidCounterparty,
    /// the consensus proof verification failed (height: `{height}`), client error: `{client_error}`
    ConsensusStateVerificationFailure {
        height: Height,
        client_error: ClientError,
    },
    /// the client state proof verification failed for client id `{client_id}`, client error: `{client_error}`
    ClientStateVerificationFailure {
        client_id: ClientId,
        client_error: ClientError,
    },
    /// invalid client state of the host chain on the counterparty: `{reason}`
    InvalidSelfClientState { reason: String },
    /// missing local consensus state at `{height}`
    MissingLocalConsensusState { height: Height },
    /// not enough blocks elapsed, current height `{current_host_height}` is still less than earliest acceptable height `{earliest_valid_height}`
    NotEnoughBlocksElapsed {
        current_host_height: Height,
        earliest_valid_height: Height,
    },
    /// not enough time elapsed, current timestamp `{current_host_time}` is still less than earliest acceptable timestamp `{earliest_valid_time}`
    NotEnoughTimeElapsed {
        current_host_time: Timestamp,
        earliest_valid_time: Timestamp,
    },
    /// timestamp overflowed error: `{0}`
    TimestampOverflow(TimestampError),
    /// outbound connection handshakes are disabled
    OutboundDisabled,
    /// connection counter overflow error
    CounterOverflow,
}

impl ConnectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Client(e) | Self::VerifyConnectionState(e) => e.kind(),
            Self::ConsensusStateVerificationFailure { client_error, .. }
            | Self::ClientStateVerificationFailure { client_error, .. } => client_error.kind(),
            Self::ConnectionNotFound { .. } | Self::MissingLocalConsensusState { .. } => {
                ErrorKind::NotFound
            }
            Self::InvalidState { .. }
            | Self::NotEnoughBlocksElapsed { .. }
            | Self::NotEnoughTimeElapsed { .. } => ErrorKind::InvalidState,
            Self::InvalidVersionLength
            | Self::VersionNotSupported { .. }
            | Self::NoCommonVersion
            | Self::FeatureNotSupported { .. }
            | Self::NoCommonFeatures => ErrorKind::VersionMismatch,
            Self::CounterOverflow => ErrorKind::Fatal,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl From<ClientError> for ConnectionError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}

impl From<IdentifierError> for ConnectionError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e)
    }
}

impl From<TimestampError> for ConnectionError {
    fn from(e: TimestampError) -> Self {
        Self::TimestampOverflow(e)
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Client(e)
            | Self::VerifyConnectionState(e)
            | Self::ConsensusStateVerificationFailure {
                client_error: e, ..
            }
            | Self::ClientStateVerificationFailure {
                client_error: e, ..
            } => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::TimestampOverflow(e) => Some(e),
            _ => None,
        }
    }
}
