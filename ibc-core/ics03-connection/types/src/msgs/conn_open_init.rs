use core::time::Duration;

use ibc_tao_host_types::identifiers::ClientId;
use ibc_tao_primitives::Signer;

use super::validate_signer;
use crate::connection::Counterparty;
use crate::error::ConnectionError;
use crate::version::Version;

/// Per our convention, this message is sent to chain A.
/// The handler will check proofs of chain B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenInit {
    /// ClientId on chain A that the connection is being opened for
    pub client_id_on_a: ClientId,
    pub counterparty: Counterparty,
    /// Version to propose; all compatible versions are proposed when unset
    pub version: Option<Version>,
    pub delay_period: Duration,
    pub signer: Signer,
}

impl MsgConnectionOpenInit {
    pub fn validate_basic(&self) -> Result<(), ConnectionError> {
        self.counterparty.verify_empty_connection_id()?;
        if self.counterparty.prefix().as_bytes().is_empty() {
            return Err(ConnectionError::InvalidCounterparty);
        }
        validate_signer(&self.signer)
    }
}
