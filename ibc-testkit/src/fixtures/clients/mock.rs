use core::time::Duration;

use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentRoot;
use ibc_tao::host::types::identifiers::ClientId;
use ibc_tao::primitives::Timestamp;
use typed_builder::TypedBuilder;

use crate::context::MockContext;
use crate::testapp::ibc::clients::mock::client_state::{
    MockClientState, DEFAULT_TRUSTING_PERIOD,
};
use crate::testapp::ibc::clients::mock::header::MockHeader;
use crate::testapp::ibc::clients::mock::misbehaviour::Misbehaviour;

/// Configuration of a [`MockClientState`] tracking some chain.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = MockClientState))]
pub struct MockClientConfig {
    #[builder(default = String::from("mockgaia"), setter(into))]
    pub chain_id: String,
    #[builder(default = Height::new(0, 5).expect("never fails"))]
    pub latest_height: Height,
    #[builder(default = DEFAULT_TRUSTING_PERIOD)]
    pub trusting_period: Duration,
    #[builder(default, setter(strip_option))]
    pub frozen_height: Option<Height>,
}

impl From<MockClientConfig> for MockClientState {
    fn from(config: MockClientConfig) -> Self {
        let client_state = MockClientState::new(config.chain_id, config.latest_height)
            .with_trusting_period(config.trusting_period);

        match config.frozen_height {
            Some(height) => client_state.frozen_at(height),
            None => client_state,
        }
    }
}

/// The header `ctx` committed at `height`, with a different root: what a
/// byzantine validator set of the same chain could sign for that height.
pub fn dummy_forged_header(ctx: &MockContext, height: &Height) -> MockHeader {
    let header = ctx.header_at(height).expect("block exists");

    header.with_root(CommitmentRoot::from_bytes(b"forged"))
}

/// Two conflicting headers of `ctx` at `height`.
pub fn dummy_misbehaviour(ctx: &MockContext, client_id: &ClientId, height: &Height) -> Misbehaviour {
    Misbehaviour {
        client_id: client_id.clone(),
        header1: ctx.header_at(height).expect("block exists"),
        header2: dummy_forged_header(ctx, height),
    }
}

/// A header of `ctx` at `height` stamped at `timestamp` instead of the
/// block's own time.
pub fn dummy_header_at_time(ctx: &MockContext, height: &Height, timestamp: Timestamp) -> MockHeader {
    ctx.header_at(height)
        .expect("block exists")
        .with_timestamp(timestamp)
}
