use borsh::{BorshDeserialize, BorshSerialize};
use ibc_tao::client::types::error::ClientError;
use ibc_tao::host::types::identifiers::ClientId;
use ibc_tao::primitives::Any;

use crate::testapp::ibc::clients::mock::header::MockHeader;

pub const MOCK_MISBEHAVIOUR_TYPE_URL: &str = "/ibc.mock.Misbehavior";

/// Two conflicting headers for the same height.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Misbehaviour {
    pub client_id: ClientId,
    pub header1: MockHeader,
    pub header2: MockHeader,
}

impl TryFrom<Any> for Misbehaviour {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        raw.decode(MOCK_MISBEHAVIOUR_TYPE_URL)
            .map_err(|e| ClientError::InvalidMisbehaviour {
                description: e.to_string(),
            })
    }
}

impl From<Misbehaviour> for Any {
    fn from(misbehaviour: Misbehaviour) -> Self {
        Any::new(MOCK_MISBEHAVIOUR_TYPE_URL, &misbehaviour)
    }
}
