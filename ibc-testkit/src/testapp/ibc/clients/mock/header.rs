use core::fmt::{Display, Error as FmtError, Formatter};

use borsh::{BorshDeserialize, BorshSerialize};
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentRoot;
use ibc_tao::primitives::{Any, Timestamp};

pub const MOCK_HEADER_TYPE_URL: &str = "/ibc.mock.Header";

/// A block header of a mock host: the height and time of the block and the
/// root committing to the provable store as of that block.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MockHeader {
    pub chain_id: String,
    pub height: Height,
    pub timestamp: Timestamp,
    pub root: CommitmentRoot,
}

impl MockHeader {
    pub fn new(
        chain_id: impl Into<String>,
        height: Height,
        timestamp: Timestamp,
        root: CommitmentRoot,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            height,
            timestamp,
            root,
        }
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn with_timestamp(self, timestamp: Timestamp) -> Self {
        Self { timestamp, ..self }
    }

    pub fn with_root(self, root: CommitmentRoot) -> Self {
        Self { root, ..self }
    }
}

impl Display for MockHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "MockHeader {{ chain_id: {}, height: {}, timestamp: {} }}",
            self.chain_id, self.height, self.timestamp
        )
    }
}

impl TryFrom<Any> for MockHeader {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        Ok(raw.decode(MOCK_HEADER_TYPE_URL)?)
    }
}

impl From<MockHeader> for Any {
    fn from(header: MockHeader) -> Self {
        Any::new(MOCK_HEADER_TYPE_URL, &header)
    }
}
