//! The in-memory store of a mock host, on which the handlers run.

use std::collections::BTreeMap;

use core::time::Duration;

use borsh::BorshDeserialize;
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentPrefix;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::host::types::identifiers::{ClientId, Sequence};
use ibc_tao::host::types::params::Params;
use ibc_tao::host::types::path::{Path, CLIENT_PREFIX, CONSENSUS_STATE_PREFIX};
use ibc_tao::primitives::DecodingError;
use ibc_tao::router::types::capability::CapabilityTable;

use crate::hosts::{HostParams, MockHost};

pub const DEFAULT_BLOCK_TIME_SECS: u64 = 1;

/// Everything a mock host keeps: its chain of blocks, the IBC state and the
/// host bookkeeping around it.
///
/// Values live under their store path. Paths a counterparty can ask a proof
/// for go to the provable store, which every new block commits to; counters,
/// indices and update metadata stay in a private store.
#[derive(Clone, Debug)]
pub struct MockIbcStore {
    pub host: MockHost,
    pub commitment_prefix: CommitmentPrefix,
    pub params: Params,
    pub max_expected_time_per_block: Duration,
    provable: BTreeMap<String, Vec<u8>>,
    private: BTreeMap<String, Vec<u8>>,
    pub(crate) capabilities: CapabilityTable,
    pub(crate) app_store: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Emitted IBC events in order
    pub events: Vec<IbcEvent>,
    /// Logs of the IBC module
    pub logs: Vec<String>,
}

impl MockIbcStore {
    pub fn new(host_params: HostParams, params: Params) -> Self {
        let commitment_prefix = CommitmentPrefix::try_from(b"ibc".to_vec())
            .expect("never fails because the prefix is not empty");
        let block_time = host_params.block_time;

        Self {
            host: MockHost::build(host_params, &commitment_prefix),
            commitment_prefix,
            params,
            max_expected_time_per_block: block_time,
            provable: BTreeMap::new(),
            private: BTreeMap::new(),
            capabilities: CapabilityTable::new(),
            app_store: BTreeMap::new(),
            events: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn read(&self, path: &Path) -> Option<&[u8]> {
        let store = if path.is_provable() {
            &self.provable
        } else {
            &self.private
        };
        store.get(&path.to_string()).map(Vec::as_slice)
    }

    pub(crate) fn write(&mut self, path: Path, value: Vec<u8>) {
        let store = if path.is_provable() {
            &mut self.provable
        } else {
            &mut self.private
        };
        store.insert(path.to_string(), value);
    }

    pub(crate) fn remove(&mut self, path: &Path) {
        let store = if path.is_provable() {
            &mut self.provable
        } else {
            &mut self.private
        };
        store.remove(&path.to_string());
    }

    pub(crate) fn decode<T: BorshDeserialize>(&self, path: &Path) -> Result<Option<T>, ClientError> {
        self.read(path)
            .map(|bytes| {
                T::try_from_slice(bytes).map_err(|e| {
                    ClientError::Decoding(DecodingError::FailedToDecode {
                        description: format!("value at `{path}`: {e}"),
                    })
                })
            })
            .transpose()
    }

    pub(crate) fn counter(&self, path: impl Into<Path>) -> u64 {
        self.read(&path.into())
            .and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
            .map(u64::from_be_bytes)
            .unwrap_or_default()
    }

    /// Returns `None` when the counter would overflow.
    pub(crate) fn increase_counter(&mut self, path: impl Into<Path>) -> Option<()> {
        let path = path.into();
        let next = self.counter(path.clone()).checked_add(1)?;
        self.write(path, next.to_be_bytes().to_vec());
        Some(())
    }

    pub(crate) fn sequence(&self, path: impl Into<Path>) -> Option<Sequence> {
        self.read(&path.into())
            .and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
            .map(|bytes| Sequence::from(u64::from_be_bytes(bytes)))
    }

    /// Value the application wrote under `key`.
    pub fn app_value(&self, key: &[u8]) -> Option<&[u8]> {
        self.app_store.get(key).map(Vec::as_slice)
    }

    /// Heights at which a consensus state of `client_id` is stored.
    pub fn consensus_heights(&self, client_id: &ClientId) -> Vec<Height> {
        let prefix = format!("{CLIENT_PREFIX}/{client_id}/{CONSENSUS_STATE_PREFIX}/");

        self.provable
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter_map(|height| {
                let (revision_number, revision_height) = height.split_once('-')?;
                Height::new(revision_number.parse().ok()?, revision_height.parse().ok()?).ok()
            })
            .collect()
    }

    /// Seals the current provable store into a new block of the host.
    pub fn commit_block(&mut self, elapsed: Duration) {
        self.host.commit_block(
            self.commitment_prefix.clone(),
            self.provable.clone(),
            elapsed,
        );
    }

    pub fn host_height(&self) -> Height {
        self.host.latest_height()
    }
}
