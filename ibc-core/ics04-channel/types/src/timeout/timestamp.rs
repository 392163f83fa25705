use core::fmt::{Display, Error as FmtError, Formatter};
use core::ops::{Add, Sub};
use core::time::Duration;

use ibc_tao_primitives::Timestamp;

use crate::error::PacketError;

/// Indicates a timestamp on the destination chain after which the packet will
/// no longer be processed, and will instead count as having timed-out.
///
/// Timestamps commit as u64 nanoseconds, where 0 means "no timeout". The
/// explicit `Never` variant stands for that zero value.
#[derive(
    Clone, Copy, Debug, Default, Hash, Eq, PartialEq, borsh::BorshSerialize, borsh::BorshDeserialize,
)]
pub enum TimeoutTimestamp {
    #[default]
    Never,
    At(Timestamp),
}

impl TimeoutTimestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Self {
        Self::from(nanoseconds)
    }

    /// Returns the timestamp in nanoseconds, where 0 indicates the absence
    /// of a timeout.
    pub fn nanoseconds(&self) -> u64 {
        match self {
            Self::At(timestamp) => timestamp.nanoseconds(),
            Self::Never => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    pub fn no_timeout() -> Self {
        Self::Never
    }

    /// Check if a timestamp has *reached* the timeout timestamp, and thus is
    /// deemed expired.
    pub fn has_expired(&self, timestamp: &Timestamp) -> bool {
        match self {
            Self::At(timeout_timestamp) => timestamp >= timeout_timestamp,
            Self::Never => false,
        }
    }
}

impl From<u64> for TimeoutTimestamp {
    fn from(nanoseconds: u64) -> Self {
        if nanoseconds == 0 {
            Self::Never
        } else {
            Self::At(Timestamp::from_nanoseconds(nanoseconds))
        }
    }
}

impl From<Timestamp> for TimeoutTimestamp {
    fn from(timestamp: Timestamp) -> Self {
        Self::from(timestamp.nanoseconds())
    }
}

impl Display for TimeoutTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(timeout_timestamp) => write!(f, "{timeout_timestamp}"),
            Self::Never => write!(f, "no timeout timestamp"),
        }
    }
}

impl Add<Duration> for TimeoutTimestamp {
    type Output = Result<Self, PacketError>;

    fn add(self, rhs: Duration) -> Self::Output {
        match self {
            Self::At(timestamp) => Ok(Self::At(timestamp.add(rhs)?)),
            Self::Never => Err(PacketError::MissingTimeout),
        }
    }
}

impl Sub<Duration> for TimeoutTimestamp {
    type Output = Result<Self, PacketError>;

    fn sub(self, rhs: Duration) -> Self::Output {
        match self {
            Self::At(timestamp) => Ok(Self::At(timestamp.sub(rhs)?)),
            Self::Never => Err(PacketError::MissingTimeout),
        }
    }
}
