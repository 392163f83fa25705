//! Proofs over a full snapshot of the provable store of a mock host.
//!
//! A proof carries every provable entry of the store at some height together
//! with the store prefix; the commitment root of that height is the SHA-256
//! digest of the encoded snapshot. Proof sizes grow with the store, which is
//! fine for tests and keeps the verifier obviously correct.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use ibc_tao::commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_tao::commitment_types::error::CommitmentError;
use ibc_tao::commitment_types::merkle::MerklePath;
use ibc_tao::commitment_types::verifier::ProofVerifier;
use ibc_tao::primitives::ToVec;
use sha2::{Digest, Sha256};

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SnapshotProof {
    pub prefix: CommitmentPrefix,
    pub entries: BTreeMap<String, Vec<u8>>,
}

impl SnapshotProof {
    pub fn new(prefix: CommitmentPrefix, entries: BTreeMap<String, Vec<u8>>) -> Self {
        Self { prefix, entries }
    }

    pub fn root(&self) -> CommitmentRoot {
        CommitmentRoot::from_bytes(Sha256::digest(self.to_vec()).as_slice())
    }

    pub fn to_proof_bytes(&self) -> CommitmentProofBytes {
        CommitmentProofBytes::try_from(self.to_vec()).expect("an encoded snapshot is never empty")
    }

    pub fn decode(proof: &CommitmentProofBytes) -> Result<Self, CommitmentError> {
        Self::try_from_slice(proof.as_bytes()).map_err(|_| CommitmentError::InvalidMerkleProof)
    }
}

/// Checks [`SnapshotProof`]s against the root they hash to.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotVerifier;

impl SnapshotVerifier {
    /// Authenticates the snapshot and resolves the store key `path` names.
    fn open<'a>(
        &self,
        root: &CommitmentRoot,
        path: &'a MerklePath,
        proof: &CommitmentProofBytes,
    ) -> Result<(SnapshotProof, &'a str), CommitmentError> {
        if root.is_empty() {
            return Err(CommitmentError::EmptyMerkleRoot);
        }

        let snapshot = SnapshotProof::decode(proof)?;

        if snapshot.root() != *root {
            return Err(CommitmentError::VerificationFailure);
        }

        let [prefix, key] = path.key_path.as_slice() else {
            return Err(CommitmentError::NumberOfKeysMismatch);
        };

        if *prefix != format!("{:?}", snapshot.prefix) {
            return Err(CommitmentError::VerificationFailure);
        }

        Ok((snapshot, key.as_str()))
    }
}

impl ProofVerifier for SnapshotVerifier {
    fn verify_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: &[u8],
        proof: &CommitmentProofBytes,
    ) -> Result<(), CommitmentError> {
        if value.is_empty() {
            return Err(CommitmentError::EmptyVerifiedValue);
        }

        let (snapshot, key) = self.open(root, path, proof)?;

        match snapshot.entries.get(key) {
            Some(stored) if stored.as_slice() == value => Ok(()),
            _ => Err(CommitmentError::VerificationFailure),
        }
    }

    fn verify_non_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        proof: &CommitmentProofBytes,
    ) -> Result<(), CommitmentError> {
        let (snapshot, key) = self.open(root, path, proof)?;

        if snapshot.entries.contains_key(key) {
            return Err(CommitmentError::VerificationFailure);
        }

        Ok(())
    }
}
