//! Defines the client error type

use displaydoc::Display;
use ibc_tao_commitment_types::error::CommitmentError;
use ibc_tao_host_types::error::{ErrorKind, IdentifierError};
use ibc_tao_host_types::identifiers::{ClientId, ClientType};
use ibc_tao_primitives::{DecodingError, TimestampError};

use crate::height::Height;
use crate::Status;

/// Encodes all the possible client errors
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ClientError {
    /// upgrade client error: `{0}`
    Upgrade(UpgradeClientError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// invalid client identifier: `{0}`
    InvalidClientIdentifier(IdentifierError),
    /// client `{client_id}` not found
    ClientNotFound { client_id: ClientId },
    /// consensus state of client `{client_id}` not found at height `{height}`
    ConsensusStateNotFound { client_id: ClientId, height: Height },
    /// processed time and height of client `{client_id}` not found at height `{height}`
    UpdateMetaNotFound { client_id: ClientId, height: Height },
    /// client state already exists: `{0}`
    DuplicateClientState(ClientId),
    /// client `{client_id}` is not active; status: `{status}`
    ClientNotActive { client_id: ClientId, status: Status },
    /// client `{client_id}` is still active and cannot be recovered
    ClientNotInactive { client_id: ClientId, status: Status },
    /// client type `{client_type}` is not in the allowed list
    ClientTypeNotAllowed { client_type: ClientType },
    /// invalid client state: `{description}`
    InvalidClientState { description: String },
    /// invalid consensus state: `{description}`
    InvalidConsensusState { description: String },
    /// invalid header type: `{0}`
    InvalidHeaderType(String),
    /// invalid height; cannot be zero or negative
    InvalidHeight,
    /// height arithmetic leaves the current revision
    InvalidHeightResult,
    /// invalid proof height; expected `{actual}` <= `{latest}`
    InvalidProofHeight { actual: Height, latest: Height },
    /// invalid timestamp: `{0}`
    InvalidTimestamp(TimestampError),
    /// invalid misbehaviour: `{description}`
    InvalidMisbehaviour { description: String },
    /// mismatched client recovery states: subject `{subject}`, substitute `{substitute}`
    MismatchedClientRecoveryStates {
        subject: ClientType,
        substitute: ClientType,
    },
    /// client recovery heights not allowed: expected substitute client height `{substitute_height}` > subject client height `{subject_height}`
    NotAllowedClientRecoveryHeights {
        subject_height: Height,
        substitute_height: Height,
    },
    /// failed proof verification: `{0}`
    FailedProofVerification(CommitmentError),
    /// failed header verification: `{description}`
    FailedHeaderVerification { description: String },
    /// empty signer
    EmptySigner,
    /// other error: `{description}`
    Other { description: String },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Upgrade(e) => e.kind(),
            Self::FailedProofVerification(e) => e.kind(),
            Self::ClientNotFound { .. }
            | Self::ConsensusStateNotFound { .. }
            | Self::UpdateMetaNotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateClientState(_)
            | Self::ClientNotActive { .. }
            | Self::ClientNotInactive { .. } => ErrorKind::InvalidState,
            Self::InvalidMisbehaviour { .. } => ErrorKind::MisbehaviourInvalid,
            Self::FailedHeaderVerification { .. } => ErrorKind::ProofVerificationFailed,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl From<CommitmentError> for ClientError {
    fn from(e: CommitmentError) -> Self {
        Self::FailedProofVerification(e)
    }
}

impl From<DecodingError> for ClientError {
    fn from(e: DecodingError) -> Self {
        Self::Decoding(e)
    }
}

impl From<TimestampError> for ClientError {
    fn from(e: TimestampError) -> Self {
        Self::InvalidTimestamp(e)
    }
}

impl From<IdentifierError> for ClientError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidClientIdentifier(e)
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Upgrade(e) => Some(e),
            Self::FailedProofVerification(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::InvalidClientIdentifier(e) => Some(e),
            Self::InvalidTimestamp(e) => Some(e),
            _ => None,
        }
    }
}

/// Encodes all the possible upgrade client errors
#[derive(Debug, Display, PartialEq, Eq)]
pub enum UpgradeClientError {
    /// invalid proof for the upgraded client state: `{0}`
    InvalidUpgradeClientStateProof(CommitmentError),
    /// invalid proof for the upgraded consensus state: `{0}`
    InvalidUpgradeConsensusStateProof(CommitmentError),
    /// invalid upgraded client state: `{description}`
    InvalidUpgradedClientState { description: String },
    /// insufficient upgrade client height `{upgraded_height}`; must be greater than current client height `{client_height}`
    InsufficientUpgradeHeight {
        upgraded_height: Height,
        client_height: Height,
    },
}

impl UpgradeClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUpgradeClientStateProof(_)
            | Self::InvalidUpgradeConsensusStateProof(_) => ErrorKind::ProofVerificationFailed,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl From<UpgradeClientError> for ClientError {
    fn from(e: UpgradeClientError) -> Self {
        ClientError::Upgrade(e)
    }
}

impl std::error::Error for UpgradeClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::InvalidUpgradeClientStateProof(e)
            | Self::InvalidUpgradeConsensusStateProof(e) => Some(e),
            _ => None,
        }
    }
}
