//! Defines the commitment error type

use displaydoc::Display;
use ibc_tao_host_types::error::ErrorKind;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum CommitmentError {
    /// empty commitment prefix
    EmptyCommitmentPrefix,
    /// empty merkle proof
    EmptyMerkleProof,
    /// empty merkle root
    EmptyMerkleRoot,
    /// empty verified value
    EmptyVerifiedValue,
    /// mismatch between the number of proofs with that of keys
    NumberOfKeysMismatch,
    /// invalid merkle proof
    InvalidMerkleProof,
    /// proof verification failed
    VerificationFailure,
}

impl CommitmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::VerificationFailure | Self::InvalidMerkleProof => {
                ErrorKind::ProofVerificationFailed
            }
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl std::error::Error for CommitmentError {}
