use std::collections::BTreeMap;

use core::time::Duration;

use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentPrefix;
use ibc_tao::primitives::Timestamp;

use super::HostParams;
use crate::testapp::ibc::clients::mock::client_state::MockClientState;
use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use crate::testapp::ibc::clients::mock::header::MockHeader;
use crate::testapp::ibc::clients::mock::proof::SnapshotProof;

/// A committed block: its header and the provable store it commits to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockBlock {
    pub header: MockHeader,
    pub snapshot: SnapshotProof,
}

impl MockBlock {
    pub fn height(&self) -> Height {
        self.header.height
    }

    pub fn timestamp(&self) -> Timestamp {
        self.header.timestamp
    }

    pub fn consensus_state(&self) -> MockConsensusState {
        self.header.clone().into()
    }
}

/// The chain of blocks of a mock host. All heights use revision 0 and the
/// first block is at height 1.
#[derive(Clone, Debug)]
pub struct MockHost {
    pub chain_id: String,
    pub block_time: Duration,
    genesis_timestamp: Timestamp,
    history: Vec<MockBlock>,
}

impl MockHost {
    pub fn build(params: HostParams, prefix: &CommitmentPrefix) -> Self {
        let mut host = Self {
            chain_id: params.chain_id,
            block_time: params.block_time,
            genesis_timestamp: params.genesis_timestamp,
            history: Vec::new(),
        };

        for _ in 0..params.genesis_height.max(1) {
            host.commit_block(prefix.clone(), BTreeMap::new(), params.block_time);
        }

        host
    }

    pub fn latest_block(&self) -> &MockBlock {
        self.history
            .last()
            .expect("a host is built with at least one block")
    }

    pub fn latest_height(&self) -> Height {
        self.latest_block().height()
    }

    pub fn latest_timestamp(&self) -> Timestamp {
        self.latest_block().timestamp()
    }

    pub fn block_at(&self, height: &Height) -> Option<&MockBlock> {
        if height.revision_number() != 0 {
            return None;
        }

        let index = usize::try_from(height.revision_height().checked_sub(1)?).ok()?;
        self.history.get(index)
    }

    pub fn header_at(&self, height: &Height) -> Option<MockHeader> {
        self.block_at(height).map(|block| block.header.clone())
    }

    /// A client state of this chain that trusts it up to `height`.
    pub fn client_state_at(&self, height: Height) -> MockClientState {
        MockClientState::new(self.chain_id.clone(), height)
    }

    /// Seals the given provable entries into a new block, `elapsed` after
    /// the previous one.
    pub fn commit_block(
        &mut self,
        prefix: CommitmentPrefix,
        entries: BTreeMap<String, Vec<u8>>,
        elapsed: Duration,
    ) {
        let (height, timestamp) = match self.history.last() {
            None => (
                Height::new(0, 1).expect("never fails"),
                self.genesis_timestamp,
            ),
            Some(block) => (
                block.height().increment(),
                (block.timestamp() + elapsed).expect("host time does not overflow"),
            ),
        };

        let snapshot = SnapshotProof::new(prefix, entries);
        let header = MockHeader::new(self.chain_id.clone(), height, timestamp, snapshot.root());

        tracing::trace!(chain_id = %self.chain_id, %height, "committed block");

        self.history.push(MockBlock { header, snapshot });
    }
}
