use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_tao_client_types::Height;

/// Indicates a consensus height on the destination chain after which the packet
/// will no longer be processed, and will instead count as having timed-out.
///
/// A zero height cannot be represented by [`Height`], so the absence of a
/// height timeout is the explicit `Never` variant. It commits as `0-0`.
#[derive(
    Clone, Copy, Debug, Default, Hash, Eq, PartialEq, borsh::BorshSerialize, borsh::BorshDeserialize,
)]
pub enum TimeoutHeight {
    #[default]
    Never,
    At(Height),
}

impl TimeoutHeight {
    pub fn no_timeout() -> Self {
        Self::Never
    }

    /// Revision number to be used in packet commitment computation
    pub fn commitment_revision_number(&self) -> u64 {
        match self {
            Self::At(height) => height.revision_number(),
            Self::Never => 0,
        }
    }

    /// Revision height to be used in packet commitment computation
    pub fn commitment_revision_height(&self) -> u64 {
        match self {
            Self::At(height) => height.revision_height(),
            Self::Never => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Check if a height has *reached* the timeout height, and thus is deemed
    /// expired. A packet can no longer be received at its timeout height.
    pub fn has_expired(&self, height: Height) -> bool {
        match self {
            Self::At(timeout_height) => height >= *timeout_height,
            Self::Never => false,
        }
    }

    /// Returns the height formatted for an event attribute value.
    pub fn to_event_attribute_value(self) -> String {
        match self {
            Self::At(height) => height.to_string(),
            Self::Never => "0-0".into(),
        }
    }
}

impl From<Height> for TimeoutHeight {
    fn from(height: Height) -> Self {
        Self::At(height)
    }
}

impl Display for TimeoutHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(timeout_height) => write!(f, "{timeout_height}"),
            Self::Never => write!(f, "no timeout"),
        }
    }
}
