//! Merkle path utilities

use ibc_tao_host_types::path::Path;

use crate::commitment::CommitmentPrefix;

/// Key path of a value in a multi-level commitment tree, ordered from root
/// to leaf: the store prefix first, then the path within the store.
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct MerklePath {
    pub key_path: Vec<String>,
}

impl MerklePath {
    pub fn new(key_path: Vec<String>) -> Self {
        Self { key_path }
    }
}

pub fn apply_prefix(prefix: &CommitmentPrefix, mut path: Vec<String>) -> MerklePath {
    let mut key_path: Vec<String> = vec![format!("{prefix:?}")];
    key_path.append(&mut path);
    MerklePath { key_path }
}

/// Builds the full key path of a store path under the given prefix.
pub fn prefixed_path(prefix: &CommitmentPrefix, path: &Path) -> MerklePath {
    apply_prefix(prefix, vec![path.to_string()])
}
