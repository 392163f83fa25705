use core::time::Duration;

use ibc_tao::host::types::identifiers::ClientType;
use ibc_tao::host::types::params::Params;
use ibc_tao::primitives::Timestamp;
use typed_builder::TypedBuilder;

use crate::context::MockContext;
use crate::hosts::HostParams;
use crate::testapp::ibc::clients::mock::client_state::client_type as mock_client_type;
use crate::testapp::ibc::core::types::DEFAULT_BLOCK_TIME_SECS;
use crate::utils::year_2023;

/// Configuration of a [`MockContext`].
///
/// Two contexts built from the same configuration, apart from the chain
/// identifier, start at the same height and time.
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = MockContext))]
pub struct MockContextConfig {
    #[builder(default = String::from("mockgaia"), setter(into))]
    pub chain_id: String,

    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    pub block_time: Duration,

    /// Time of the first block.
    #[builder(default = year_2023())]
    pub genesis_timestamp: Timestamp,

    /// Revision height of the latest block once the context is built.
    #[builder(default = 5)]
    pub latest_height: u64,

    #[builder(default = mock_params())]
    pub params: Params,

    /// Whether the ping-pong module acknowledges received packets later,
    /// through `write_acknowledgement`.
    #[builder(default)]
    pub async_acks: bool,
}

impl MockContextConfig {
    pub fn host_params(&self) -> HostParams {
        HostParams::builder()
            .chain_id(self.chain_id.clone())
            .block_time(self.block_time)
            .genesis_timestamp(self.genesis_timestamp)
            .genesis_height(self.latest_height)
            .build()
    }
}

/// Parameters that accept the mock and localhost clients, with both packet
/// directions enabled.
pub fn mock_params() -> Params {
    Params::new(
        vec![mock_client_type(), ClientType::localhost()],
        true,
        true,
    )
}
