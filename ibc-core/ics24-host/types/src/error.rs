//! Identifier errors and the error taxonomy shared by every component.

use derive_more::Display as DeriveDisplay;
use displaydoc::Display;

/// Errors that arise when parsing identifiers.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum IdentifierError {
    /// identifier `{id}` has invalid length; must be between [`{min}`,`{max}`]
    InvalidLength { id: String, min: u64, max: u64 },
    /// identifier `{id}` can only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
    /// invalid prefix: `{prefix}`
    InvalidPrefix { prefix: String },
    /// failed to parse `{value}`: `{description}`
    FailedToParse { value: String, description: String },
}

impl std::error::Error for IdentifierError {}

/// Broad classification of protocol errors, shared across the client,
/// connection, channel and routing layers.
///
/// Callers that need to react to a category of failure (for example "the
/// client is not usable") match on the kind instead of on concrete variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeriveDisplay)]
pub enum ErrorKind {
    /// A client, connection, channel, capability or stored value is missing.
    NotFound,
    /// The operation is not allowed from the current state.
    InvalidState,
    /// A counterparty proof was rejected.
    ProofVerificationFailed,
    /// No overlapping or acceptable version.
    VersionMismatch,
    /// Out-of-order or zero sequence.
    SequenceViolation,
    /// A timeout was claimed before it elapsed.
    TimeoutNotElapsed,
    /// A packet was received after its timeout elapsed.
    TimeoutElapsed,
    /// The caller does not own the required capability.
    CapabilityMissing,
    /// Misbehaviour evidence is malformed or insufficient.
    MisbehaviourInvalid,
    /// The message is malformed or a parameter disallows it.
    InvalidInput,
    /// State corruption or an unrecoverable host failure.
    Fatal,
}

impl From<&IdentifierError> for ErrorKind {
    fn from(_: &IdentifierError) -> Self {
        ErrorKind::InvalidInput
    }
}
