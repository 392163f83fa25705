use borsh::{BorshDeserialize, BorshSerialize};
use ibc_tao::client::context::consensus_state::ConsensusState;
use ibc_tao::client::types::error::ClientError;
use ibc_tao::commitment_types::commitment::CommitmentRoot;
use ibc_tao::primitives::{Any, Timestamp};

use crate::testapp::ibc::clients::mock::header::MockHeader;

pub const MOCK_CONSENSUS_STATE_TYPE_URL: &str = "/ibc.mock.ConsensusState";

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MockConsensusState {
    pub root: CommitmentRoot,
    pub timestamp: Timestamp,
}

impl MockConsensusState {
    pub fn new(root: CommitmentRoot, timestamp: Timestamp) -> Self {
        Self { root, timestamp }
    }
}

impl From<MockHeader> for MockConsensusState {
    fn from(header: MockHeader) -> Self {
        Self {
            root: header.root,
            timestamp: header.timestamp,
        }
    }
}

impl TryFrom<Any> for MockConsensusState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        raw.decode(MOCK_CONSENSUS_STATE_TYPE_URL)
            .map_err(|e| ClientError::InvalidConsensusState {
                description: e.to_string(),
            })
    }
}

impl From<MockConsensusState> for Any {
    fn from(consensus_state: MockConsensusState) -> Self {
        Any::new(MOCK_CONSENSUS_STATE_TYPE_URL, &consensus_state)
    }
}

impl ConsensusState for MockConsensusState {
    fn root(&self) -> &CommitmentRoot {
        &self.root
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
