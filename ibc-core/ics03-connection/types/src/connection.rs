//! Defines the types that define a connection

use core::fmt::{Display, Error as FmtError, Formatter};
use core::time::Duration;

use ibc_tao_commitment_types::commitment::CommitmentPrefix;
use ibc_tao_host_types::identifiers::{ClientId, ConnectionId};

use crate::error::ConnectionError;
use crate::version::Version;

/// Represents the connection end stored on one chain.
///
/// `versions` reads differently depending on the state: in `Init` it is the
/// set of versions proposed to the counterparty; from `TryOpen` on it holds
/// the single version the handshake settled on.
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct ConnectionEnd {
    pub state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
    // nanoseconds, so the end stays borsh encodable
    delay_period: u64,
}

impl ConnectionEnd {
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
        delay_period: Duration,
    ) -> Result<Self, ConnectionError> {
        if state != State::Init && versions.len() != 1 {
            return Err(ConnectionError::InvalidVersionLength);
        }
        let delay_period = u64::try_from(delay_period.as_nanos())
            .map_err(|_| ConnectionError::InvalidDelayPeriod { delay_period })?;

        Ok(Self {
            state,
            client_id,
            counterparty,
            versions,
            delay_period,
        })
    }

    /// Getter for the state of this connection end.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Setter for the `state` field.
    pub fn set_state(&mut self, new_state: State) {
        self.state = new_state;
    }

    /// Setter for the `counterparty` field.
    pub fn set_counterparty(&mut self, new_cparty: Counterparty) {
        self.counterparty = new_cparty;
    }

    /// Setter for the `version` field.
    pub fn set_version(&mut self, new_version: Version) {
        self.versions = vec![new_version];
    }

    pub fn counterparty_matches(&self, other: &Counterparty) -> bool {
        self.counterparty.eq(other)
    }

    pub fn client_id_matches(&self, other: &ClientId) -> bool {
        self.client_id.eq(other)
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    pub fn is_uninitialized(&self) -> bool {
        self.state == State::Uninitialized
    }

    /// Checks if the state of this connection end matches with an expected state.
    pub fn verify_state_matches(&self, expected: &State) -> Result<(), ConnectionError> {
        if !self.state.eq(expected) {
            return Err(ConnectionError::InvalidState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Checks that the connection is open, the precondition of every channel
    /// operation built on top of it.
    pub fn verify_state_open(&self) -> Result<(), ConnectionError> {
        self.verify_state_matches(&State::Open)
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    /// Minimum time to wait, after the client update that brought a
    /// consensus state, before a proof against that state is accepted.
    pub fn delay_period(&self) -> Duration {
        Duration::from_nanos(self.delay_period)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Counterparty {
    pub client_id: ClientId,
    pub connection_id: Option<ConnectionId>,
    pub prefix: CommitmentPrefix,
}

impl Counterparty {
    pub fn new(
        client_id: ClientId,
        connection_id: Option<ConnectionId>,
        prefix: CommitmentPrefix,
    ) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }

    /// Called upon initiating a connection handshake on the host chain to verify
    /// that the counterparty connection id has not been set.
    pub(crate) fn verify_empty_connection_id(&self) -> Result<(), ConnectionError> {
        if self.connection_id().is_some() {
            return Err(ConnectionError::InvalidCounterparty);
        }
        Ok(())
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub enum State {
    Uninitialized,
    Init,
    TryOpen,
    Open,
}

impl State {
    /// Yields the State as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
        }
    }

    pub fn is_open(self) -> bool {
        self == State::Open
    }

    /// Returns whether or not this connection with this state
    /// has progressed less or the same than the argument.
    ///
    /// ```
    /// # use ibc_tao_connection_types::State;
    /// assert!(State::Init.less_or_equal_progress(State::Open));
    /// assert!(State::TryOpen.less_or_equal_progress(State::TryOpen));
    /// assert!(!State::Open.less_or_equal_progress(State::Uninitialized));
    /// ```
    pub fn less_or_equal_progress(self, other: Self) -> bool {
        self <= other
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}
