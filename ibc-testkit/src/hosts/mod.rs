use core::time::Duration;

use ibc_tao::primitives::Timestamp;
use typed_builder::TypedBuilder;

use crate::testapp::ibc::core::types::DEFAULT_BLOCK_TIME_SECS;
use crate::utils::year_2023;

pub mod mock;

pub use mock::{MockBlock, MockHost};

#[derive(Debug, TypedBuilder)]
pub struct HostParams {
    #[builder(default = String::from("mockgaia"), setter(into))]
    pub chain_id: String,
    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    pub block_time: Duration,
    #[builder(default = year_2023())]
    pub genesis_timestamp: Timestamp,
    /// Number of (empty) blocks the host starts with.
    #[builder(default = 5)]
    pub genesis_height: u64,
}
