//! Message definitions for the connection handshake datagrams.
//!
//! Each of the four handshake messages is a `struct`. The three counterparty
//! fields (connection id, prefix and client id) are grouped into a single
//! `Counterparty` in `MsgConnectionOpenInit` and `MsgConnectionOpenTry`.
//! Every message also carries the `signer` of the transaction.

use ibc_tao_client_types::Height;
use ibc_tao_primitives::Signer;

mod conn_open_ack;
mod conn_open_confirm;
mod conn_open_init;
mod conn_open_try;

pub use conn_open_ack::*;
pub use conn_open_confirm::*;
pub use conn_open_init::*;
pub use conn_open_try::*;

use crate::error::ConnectionError;

/// Enumeration of all possible messages that the ICS3 protocol processes.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ConnectionMsg {
    OpenInit(MsgConnectionOpenInit),
    OpenTry(MsgConnectionOpenTry),
    OpenAck(MsgConnectionOpenAck),
    OpenConfirm(MsgConnectionOpenConfirm),
}

impl ConnectionMsg {
    pub fn validate_basic(&self) -> Result<(), ConnectionError> {
        match self {
            Self::OpenInit(msg) => msg.validate_basic(),
            Self::OpenTry(msg) => msg.validate_basic(),
            Self::OpenAck(msg) => msg.validate_basic(),
            Self::OpenConfirm(msg) => msg.validate_basic(),
        }
    }
}

pub(crate) fn validate_signer(signer: &Signer) -> Result<(), ConnectionError> {
    if signer.is_empty() {
        return Err(ConnectionError::EmptySigner);
    }
    Ok(())
}

/// The consensus height a counterparty claims to hold for this chain can
/// never lie in a later revision than the proofs it ships with.
pub(crate) fn validate_consensus_height(
    consensus_height: &Height,
    proofs_height: &Height,
) -> Result<(), ConnectionError> {
    if consensus_height.revision_number() > proofs_height.revision_number() {
        return Err(ConnectionError::InvalidConsensusHeight {
            target_height: *consensus_height,
            current_height: *proofs_height,
        });
    }
    Ok(())
}
