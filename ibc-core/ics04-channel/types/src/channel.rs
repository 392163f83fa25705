//! Implementation of IBC channels, as described in ICS-04.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_tao_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_tao_primitives::utils::PrettySlice;

use crate::error::ChannelError;
use crate::Version;

/// One end of a channel
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct ChannelEnd {
    pub state: State,
    pub ordering: Order,
    pub remote: Counterparty,
    pub connection_hops: Vec<ConnectionId>,
    pub version: Version,
}

impl Display for ChannelEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "ChannelEnd {{ state: {}, ordering: {}, remote: {}, connection_hops: {}, version: {} }}",
            self.state,
            self.ordering,
            self.remote,
            PrettySlice(&self.connection_hops),
            self.version
        )
    }
}

impl ChannelEnd {
    /// Creates a new `ChannelEnd` with performing basic validation on its arguments.
    pub fn new(
        state: State,
        ordering: Order,
        remote: Counterparty,
        connection_hops: Vec<ConnectionId>,
        version: Version,
    ) -> Result<Self, ChannelError> {
        let channel_end = Self {
            state,
            ordering,
            remote,
            connection_hops,
            version,
        };
        channel_end.validate_basic()?;
        Ok(channel_end)
    }

    /// Updates the ChannelEnd to assume a new State 's'.
    pub fn set_state(&mut self, s: State) {
        self.state = s;
    }

    pub fn set_version(&mut self, v: Version) {
        self.version = v;
    }

    pub fn set_counterparty_channel_id(&mut self, c: ChannelId) {
        self.remote.channel_id = Some(c);
    }

    /// Returns `true` if this `ChannelEnd` is in state [`State::Open`].
    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn ordering(&self) -> &Order {
        &self.ordering
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.remote
    }

    pub fn connection_hops(&self) -> &Vec<ConnectionId> {
        &self.connection_hops
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn validate_basic(&self) -> Result<(), ChannelError> {
        if self.state == State::Uninitialized {
            return Err(ChannelError::InvalidState {
                expected: "Channel state cannot be Uninitialized".to_string(),
                actual: self.state.to_string(),
            });
        }

        self.verify_connection_hops_length()
    }

    /// Checks if the state of this channel end matches the expected state.
    pub fn verify_state_matches(&self, expected: &State) -> Result<(), ChannelError> {
        if !self.state.eq(expected) {
            return Err(ChannelError::InvalidState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    pub fn connection_hops_matches(&self, other: &Vec<ConnectionId>) -> bool {
        self.connection_hops.eq(other)
    }

    /// Checks if the counterparty of this channel end matches with an expected counterparty.
    pub fn verify_counterparty_matches(&self, expected: &Counterparty) -> Result<(), ChannelError> {
        if !self.counterparty().eq(expected) {
            return Err(ChannelError::InvalidCounterparty {
                expected: expected.clone(),
                actual: self.counterparty().clone(),
            });
        }
        Ok(())
    }

    /// Only single-hop channels are supported.
    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        verify_connection_hops_length(&self.connection_hops, 1)
    }

    pub fn version_matches(&self, other: &Version) -> bool {
        self.version().eq(other)
    }
}

/// Checks if the `connection_hops` has a length of `expected`.
pub(crate) fn verify_connection_hops_length(
    connection_hops: &[ConnectionId],
    expected: u64,
) -> Result<(), ChannelError> {
    let actual = connection_hops.len() as u64;
    if actual != expected {
        return Err(ChannelError::InvalidConnectionHopsLength { expected, actual });
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Counterparty {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
}

impl Counterparty {
    pub fn new(port_id: PortId, channel_id: Option<ChannelId>) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }

    /// Called upon initiating a channel handshake on the host chain to verify
    /// that the counterparty channel id has not been set.
    pub(crate) fn verify_empty_channel_id(&self) -> Result<(), ChannelError> {
        if let Some(channel_id) = self.channel_id() {
            return Err(ChannelError::InvalidChannelId {
                expected: "Counterparty channel id must be empty".to_string(),
                actual: channel_id.to_string(),
            });
        }
        Ok(())
    }
}

impl Display for Counterparty {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match &self.channel_id {
            Some(channel_id) => write!(
                f,
                "Counterparty(port_id: {}, channel_id: {})",
                self.port_id, channel_id
            ),
            None => write!(
                f,
                "Counterparty(port_id: {}, channel_id: None)",
                self.port_id
            ),
        }
    }
}

/// Represents the channel ordering, fixed when the channel is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub enum Order {
    Unordered,
    Ordered,
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl Order {
    /// Yields the Order as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unordered => "ORDER_UNORDERED",
            Self::Ordered => "ORDER_ORDERED",
        }
    }
}

impl FromStr for Order {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches("order_") {
            "unordered" => Ok(Self::Unordered),
            "ordered" => Ok(Self::Ordered),
            _ => Err(ChannelError::InvalidOrderType {
                expected: "Must be one of 'unordered', 'ordered'".to_string(),
                actual: s.to_string(),
            }),
        }
    }
}

/// Represents the state of a [`ChannelEnd`]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, borsh::BorshSerialize, borsh::BorshDeserialize,
)]
pub enum State {
    Uninitialized,
    Init,
    TryOpen,
    Open,
    Closed,
}

impl State {
    /// Yields the state as a string
    pub fn as_string(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns whether or not this channel state is `Open`.
    pub fn is_open(self) -> bool {
        self == State::Open
    }

    /// Returns whether or not the channel with this state
    /// has progressed less or the same than the argument.
    pub fn less_or_equal_progress(self, other: Self) -> bool {
        self <= other
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_string())
    }
}
