use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::types::Height;
use ibc_tao::host::types::identifiers::{ChannelId, Sequence};
use typed_builder::TypedBuilder;

use crate::testapp::ibc::applications::ping_pong::{port_id, PING};

/// Configuration of a ping-pong [`Packet`] between the first channels of
/// two chains.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = Packet))]
pub struct PacketConfig {
    #[builder(default = Sequence::from(1))]
    pub seq_on_a: Sequence,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_a: ChannelId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_b: ChannelId,
    #[builder(default = PING.to_vec())]
    pub data: Vec<u8>,
    #[builder(default = TimeoutHeight::At(Height::new(0, 1000).expect("never fails")))]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default)]
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl From<PacketConfig> for Packet {
    fn from(config: PacketConfig) -> Self {
        Packet {
            seq_on_a: config.seq_on_a,
            port_id_on_a: port_id(),
            chan_id_on_a: config.chan_id_on_a,
            port_id_on_b: port_id(),
            chan_id_on_b: config.chan_id_on_b,
            data: config.data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}
