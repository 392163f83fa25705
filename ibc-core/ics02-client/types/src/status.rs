use core::fmt::{Debug, Display, Formatter};

use ibc_tao_host_types::identifiers::ClientId;

use crate::error::ClientError;

/// Status of a client, derived from its state and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub enum Status {
    /// The client is active and allowed to be used
    Active,
    /// The client is frozen after misbehaviour and not allowed to be used
    Frozen,
    /// The client is expired and not allowed to be used
    Expired,
    /// The client state could not be interpreted
    Unknown,
}

impl Status {
    pub fn is_active(&self) -> bool {
        *self == Status::Active
    }

    pub fn is_frozen(&self) -> bool {
        *self == Status::Frozen
    }

    pub fn is_expired(&self) -> bool {
        *self == Status::Expired
    }

    /// Checks whether the status is active; returns `Err` if not.
    pub fn verify_is_active(&self, client_id: &ClientId) -> Result<(), ClientError> {
        match self {
            Self::Active => Ok(()),
            &status => Err(ClientError::ClientNotActive {
                client_id: client_id.clone(),
                status,
            }),
        }
    }

    /// Checks whether the client is unusable, which is the precondition of
    /// governance recovery; returns `Err` if it is still active.
    pub fn verify_is_inactive(&self, client_id: &ClientId) -> Result<(), ClientError> {
        match self {
            Self::Active => Err(ClientError::ClientNotInactive {
                client_id: client_id.clone(),
                status: *self,
            }),
            _ => Ok(()),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}
