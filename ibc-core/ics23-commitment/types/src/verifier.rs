//! The proof verification capability.
//!
//! Commitment trees and their proof formats belong to the host's store. The
//! protocol layer only needs a way to ask whether some proof bytes show that
//! a value is, or is not, present under a committed root.

use crate::commitment::{CommitmentProofBytes, CommitmentRoot};
use crate::error::CommitmentError;
use crate::merkle::MerklePath;

pub trait ProofVerifier {
    /// Checks that `value` is stored at `path` under `root`.
    fn verify_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: &[u8],
        proof: &CommitmentProofBytes,
    ) -> Result<(), CommitmentError>;

    /// Checks that nothing is stored at `path` under `root`.
    fn verify_non_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        proof: &CommitmentProofBytes,
    ) -> Result<(), CommitmentError>;
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for &V {
    fn verify_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: &[u8],
        proof: &CommitmentProofBytes,
    ) -> Result<(), CommitmentError> {
        (**self).verify_membership(root, path, value, proof)
    }

    fn verify_non_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        proof: &CommitmentProofBytes,
    ) -> Result<(), CommitmentError> {
        (**self).verify_non_membership(root, path, proof)
    }
}
