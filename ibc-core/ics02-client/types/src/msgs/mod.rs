//! Defines the client message types that are sent to the chain by the relayer.

use ibc_tao_host_types::identifiers::ClientId;
use ibc_tao_primitives::{Any, Signer};

mod create_client;
mod misbehaviour;
mod recover_client;
mod update_client;
mod upgrade_client;

pub use create_client::*;
pub use misbehaviour::*;
pub use recover_client::*;
pub use update_client::*;
pub use upgrade_client::*;

use crate::error::ClientError;

/// Encodes all the different client messages
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ClientMsg {
    CreateClient(MsgCreateClient),
    UpdateClient(MsgUpdateClient),
    Misbehaviour(MsgSubmitMisbehaviour),
    UpgradeClient(MsgUpgradeClient),
    RecoverClient(MsgRecoverClient),
}

impl ClientMsg {
    pub fn validate_basic(&self) -> Result<(), ClientError> {
        match self {
            Self::CreateClient(msg) => msg.validate_basic(),
            Self::UpdateClient(msg) => msg.validate_basic(),
            Self::Misbehaviour(msg) => msg.validate_basic(),
            Self::UpgradeClient(msg) => msg.validate_basic(),
            Self::RecoverClient(msg) => msg.validate_basic(),
        }
    }
}

/// A header update and a misbehaviour report share one handler; this is
/// what distinguishes them.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum MsgUpdateOrMisbehaviour {
    UpdateClient(MsgUpdateClient),
    Misbehaviour(MsgSubmitMisbehaviour),
}

impl MsgUpdateOrMisbehaviour {
    pub fn client_id(&self) -> &ClientId {
        match self {
            MsgUpdateOrMisbehaviour::UpdateClient(msg) => &msg.client_id,
            MsgUpdateOrMisbehaviour::Misbehaviour(msg) => &msg.client_id,
        }
    }

    pub fn client_message(&self) -> &Any {
        match self {
            MsgUpdateOrMisbehaviour::UpdateClient(msg) => &msg.client_message,
            MsgUpdateOrMisbehaviour::Misbehaviour(msg) => &msg.misbehaviour,
        }
    }

    pub fn signer(&self) -> &Signer {
        match self {
            MsgUpdateOrMisbehaviour::UpdateClient(msg) => &msg.signer,
            MsgUpdateOrMisbehaviour::Misbehaviour(msg) => &msg.signer,
        }
    }
}

pub(crate) fn validate_signer(signer: &Signer) -> Result<(), ClientError> {
    if signer.is_empty() {
        return Err(ClientError::EmptySigner);
    }
    Ok(())
}
