//! Defines the representation of timestamps used in IBC.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::num::ParseIntError;
use core::ops::{Add, Sub};
use core::str::FromStr;
use core::time::Duration;

use displaydoc::Display;

pub const ZERO_DURATION: Duration = Duration::from_secs(0);

/// A point in time, kept as nanoseconds since the Unix epoch.
///
/// This is the clock of a host chain, i.e. the time recorded in its block
/// headers, not wall-clock time.
#[derive(
    PartialEq,
    Eq,
    Copy,
    Clone,
    Debug,
    PartialOrd,
    Ord,
    Hash,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub struct Timestamp {
    time: u64,
}

impl Timestamp {
    pub const fn from_nanoseconds(nanoseconds: u64) -> Self {
        Self { time: nanoseconds }
    }

    pub fn from_unix_timestamp(secs: u64, nanos: u32) -> Result<Self, TimestampError> {
        if nanos > 999_999_999 {
            return Err(TimestampError::DateOutOfRange);
        }

        secs.checked_mul(1_000_000_000)
            .and_then(|n| n.checked_add(u64::from(nanos)))
            .map(Self::from_nanoseconds)
            .ok_or(TimestampError::DateOutOfRange)
    }

    /// Computes the duration elapsed from `other` to `self`, or `None` if
    /// `other` is later.
    pub fn duration_since(&self, other: &Self) -> Option<Duration> {
        self.time.checked_sub(other.time).map(Duration::from_nanos)
    }

    pub fn nanoseconds(self) -> u64 {
        self.time
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "Timestamp({})", self.time)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_nanoseconds(s.parse::<u64>()?))
    }
}

impl From<Timestamp> for u64 {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.time
    }
}

impl Add<Duration> for Timestamp {
    type Output = Result<Timestamp, TimestampError>;

    fn add(self, duration: Duration) -> Self::Output {
        u64::try_from(duration.as_nanos())
            .ok()
            .and_then(|nanos| self.time.checked_add(nanos))
            .map(Timestamp::from_nanoseconds)
            .ok_or(TimestampError::TimestampOverflow)
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Result<Timestamp, TimestampError>;

    fn sub(self, duration: Duration) -> Self::Output {
        u64::try_from(duration.as_nanos())
            .ok()
            .and_then(|nanos| self.time.checked_sub(nanos))
            .map(Timestamp::from_nanoseconds)
            .ok_or(TimestampError::TimestampOverflow)
    }
}

#[derive(Debug, Display, PartialEq, Eq, derive_more::From)]
pub enum TimestampError {
    /// parsing u64 integer from string error: `{0}`
    ParseInt(ParseIntError),
    /// date out of range
    DateOutOfRange,
    /// timestamp overflow when modifying with duration
    TimestampOverflow,
}

impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ParseInt(e) => Some(e),
            _ => None,
        }
    }
}
