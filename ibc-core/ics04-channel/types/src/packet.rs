//! Defines the packet type
use ibc_tao_client_types::Height;
use ibc_tao_host_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_tao_primitives::Timestamp;

use crate::error::PacketError;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Packet receipt, used over unordered channels.
///
/// `None` is what a host reports when no receipt is stored; only `Ok` is
/// ever written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub enum Receipt {
    Ok,
    None,
}

impl Receipt {
    pub fn is_ok(&self) -> bool {
        matches!(self, Receipt::Ok)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Receipt::None)
    }
}

/// The packet type; this is what applications send to one another.
///
/// Each application defines the structure of the `data` field. The packet
/// itself is never stored; only its commitment, receipt and acknowledgement
/// are.
#[derive(Clone, Hash, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

struct PacketData<'a>(&'a [u8]);

impl core::fmt::Debug for PacketData<'_> {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(formatter, "{:?}", self.0)
    }
}

impl core::fmt::Debug for Packet {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        formatter
            .debug_struct("Packet")
            .field("sequence", &self.seq_on_a)
            .field("source_port", &self.port_id_on_a)
            .field("source_channel", &self.chan_id_on_a)
            .field("destination_port", &self.port_id_on_b)
            .field("destination_channel", &self.chan_id_on_b)
            .field("data", &PacketData(&self.data))
            .field("timeout_height", &self.timeout_height_on_b)
            .field("timeout_timestamp", &self.timeout_timestamp_on_b)
            .finish()
    }
}

impl Packet {
    /// Stateless checks: a non-zero sequence, non-empty data and at least one
    /// of the two timeouts set.
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        if self.seq_on_a.is_zero() {
            return Err(PacketError::ZeroPacketSequence);
        }

        if self.data.is_empty() {
            return Err(PacketError::ZeroPacketData);
        }

        if !self.timeout_height_on_b.is_set() && !self.timeout_timestamp_on_b.is_set() {
            return Err(PacketError::MissingTimeout);
        }

        Ok(())
    }

    /// Checks whether the packet is timed-out relative to the current state of
    /// the destination chain, given its timestamp `dst_chain_ts` and its height
    /// `dst_chain_height`.
    ///
    /// A timed-out packet is settled with a
    /// [`MsgTimeout`](crate::msgs::MsgTimeout) instead of being received.
    pub fn timed_out(&self, dst_chain_ts: &Timestamp, dst_chain_height: Height) -> bool {
        self.timeout_height_on_b.has_expired(dst_chain_height)
            || self.timeout_timestamp_on_b.has_expired(dst_chain_ts)
    }
}

/// Custom display output to omit the packet data
impl core::fmt::Display for Packet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}, tos:{}",
            self.seq_on_a,
            self.chan_id_on_a,
            self.port_id_on_a,
            self.chan_id_on_b,
            self.port_id_on_b,
            self.timeout_height_on_b,
            self.timeout_timestamp_on_b
        )
    }
}
