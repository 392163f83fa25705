pub mod localhost;
pub mod mock;

use derive_more::From;
use ibc_tao::client::context::prelude::*;
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::{Height, Status};
use ibc_tao::commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_tao::host::types::identifiers::{ClientId, ClientType};
use ibc_tao::host::types::path::Path;
use ibc_tao::primitives::{Any, Timestamp};

use crate::testapp::ibc::clients::localhost::{
    LocalhostClientState, LOCALHOST_CLIENT_STATE_TYPE_URL,
};
use crate::testapp::ibc::clients::mock::client_state::{
    ConsensusStateConverter, MockClientState, MOCK_CLIENT_STATE_TYPE_URL,
};
use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;

/// Every client type the mock host knows how to run.
#[derive(Clone, Debug, PartialEq, Eq, From)]
pub enum AnyClientState {
    Mock(MockClientState),
    Localhost(LocalhostClientState),
}

impl AnyClientState {
    pub fn is_frozen(&self) -> bool {
        match self {
            Self::Mock(cs) => cs.is_frozen(),
            Self::Localhost(_) => false,
        }
    }
}

impl TryFrom<Any> for AnyClientState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            MOCK_CLIENT_STATE_TYPE_URL => MockClientState::try_from(raw).map(Into::into),
            LOCALHOST_CLIENT_STATE_TYPE_URL => LocalhostClientState::try_from(raw).map(Into::into),
            _ => Err(ClientError::InvalidClientState {
                description: format!("unknown client state type: {}", raw.type_url),
            }),
        }
    }
}

impl From<AnyClientState> for Any {
    fn from(value: AnyClientState) -> Self {
        match value {
            AnyClientState::Mock(cs) => cs.into(),
            AnyClientState::Localhost(cs) => cs.into(),
        }
    }
}

fn into_any_outcome<C, S>(outcome: UpdateOutcome<C, S>) -> UpdateOutcome<AnyClientState, S>
where
    C: Into<AnyClientState>,
{
    match outcome {
        UpdateOutcome::Updated {
            client_state,
            consensus_state,
            consensus_height,
        } => UpdateOutcome::Updated {
            client_state: client_state.into(),
            consensus_state,
            consensus_height,
        },
        UpdateOutcome::Unchanged { consensus_height } => {
            UpdateOutcome::Unchanged { consensus_height }
        }
        UpdateOutcome::MisbehaviourDetected {
            client_state,
            consensus_height,
        } => UpdateOutcome::MisbehaviourDetected {
            client_state: client_state.into(),
            consensus_height,
        },
    }
}

impl ClientStateCommon for AnyClientState {
    fn validate(&self) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.validate(),
            Self::Localhost(cs) => cs.validate(),
        }
    }

    fn verify_consensus_state(&self, consensus_state: Any) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_consensus_state(consensus_state),
            Self::Localhost(cs) => cs.verify_consensus_state(consensus_state),
        }
    }

    fn client_type(&self) -> ClientType {
        match self {
            Self::Mock(cs) => cs.client_type(),
            Self::Localhost(cs) => cs.client_type(),
        }
    }

    fn latest_height(&self) -> Height {
        match self {
            Self::Mock(cs) => ClientStateCommon::latest_height(cs),
            Self::Localhost(cs) => ClientStateCommon::latest_height(cs),
        }
    }

    fn validate_proof_height(&self, proof_height: Height) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.validate_proof_height(proof_height),
            Self::Localhost(cs) => cs.validate_proof_height(proof_height),
        }
    }

    fn verify_upgrade_client(
        &self,
        upgraded_client_state: Any,
        upgraded_consensus_state: Any,
        proof_upgrade_client: CommitmentProofBytes,
        proof_upgrade_consensus_state: CommitmentProofBytes,
        root: &CommitmentRoot,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_upgrade_client(
                upgraded_client_state,
                upgraded_consensus_state,
                proof_upgrade_client,
                proof_upgrade_consensus_state,
                root,
            ),
            Self::Localhost(cs) => cs.verify_upgrade_client(
                upgraded_client_state,
                upgraded_consensus_state,
                proof_upgrade_client,
                proof_upgrade_consensus_state,
                root,
            ),
        }
    }

    fn verify_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_membership(prefix, proof, root, path, value),
            Self::Localhost(cs) => cs.verify_membership(prefix, proof, root, path, value),
        }
    }

    fn verify_non_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_non_membership(prefix, proof, root, path),
            Self::Localhost(cs) => cs.verify_non_membership(prefix, proof, root, path),
        }
    }
}

impl<V> ClientStateValidation<V> for AnyClientState
where
    V: ExtClientValidationContext,
    V::ConsensusStateRef: ConsensusStateConverter,
{
    fn status(&self, ctx: &V, client_id: &ClientId) -> Result<Status, ClientError> {
        match self {
            Self::Mock(cs) => cs.status(ctx, client_id),
            Self::Localhost(cs) => cs.status(ctx, client_id),
        }
    }

    fn verify_client_message(
        &self,
        ctx: &V,
        client_id: &ClientId,
        client_message: Any,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_client_message(ctx, client_id, client_message),
            Self::Localhost(cs) => cs.verify_client_message(ctx, client_id, client_message),
        }
    }

    fn check_header_and_update_state(
        &self,
        ctx: &V,
        client_id: &ClientId,
        header: Any,
    ) -> Result<UpdateOutcome<Self, V::ConsensusStateRef>, ClientError> {
        match self {
            Self::Mock(cs) => cs
                .check_header_and_update_state(ctx, client_id, header)
                .map(into_any_outcome),
            Self::Localhost(cs) => cs
                .check_header_and_update_state(ctx, client_id, header)
                .map(into_any_outcome),
        }
    }

    fn check_misbehaviour_and_update_state(
        &self,
        ctx: &V,
        client_id: &ClientId,
        misbehaviour: Any,
    ) -> Result<(Self, Height), ClientError> {
        match self {
            Self::Mock(cs) => cs
                .check_misbehaviour_and_update_state(ctx, client_id, misbehaviour)
                .map(|(cs, height)| (cs.into(), height)),
            Self::Localhost(cs) => cs
                .check_misbehaviour_and_update_state(ctx, client_id, misbehaviour)
                .map(|(cs, height)| (cs.into(), height)),
        }
    }

    fn check_substitute_and_update_state(
        &self,
        ctx: &V,
        substitute_client_state: Any,
    ) -> Result<Self, ClientError> {
        match self {
            Self::Mock(cs) => cs
                .check_substitute_and_update_state(ctx, substitute_client_state)
                .map(Into::into),
            Self::Localhost(cs) => cs
                .check_substitute_and_update_state(ctx, substitute_client_state)
                .map(Into::into),
        }
    }

    fn verify_upgrade_and_update_state(
        &self,
        ctx: &V,
        client_id: &ClientId,
        upgraded_client_state: Any,
        upgraded_consensus_state: Any,
        proof_upgrade_client: CommitmentProofBytes,
        proof_upgrade_consensus_state: CommitmentProofBytes,
    ) -> Result<(Self, V::ConsensusStateRef), ClientError> {
        match self {
            Self::Mock(cs) => cs
                .verify_upgrade_and_update_state(
                    ctx,
                    client_id,
                    upgraded_client_state,
                    upgraded_consensus_state,
                    proof_upgrade_client,
                    proof_upgrade_consensus_state,
                )
                .map(|(cs, cons)| (cs.into(), cons)),
            Self::Localhost(cs) => cs
                .verify_upgrade_and_update_state(
                    ctx,
                    client_id,
                    upgraded_client_state,
                    upgraded_consensus_state,
                    proof_upgrade_client,
                    proof_upgrade_consensus_state,
                )
                .map(|(cs, cons)| (cs.into(), cons)),
        }
    }
}

impl<E> ClientStateExecution<E> for AnyClientState
where
    E: ExtClientExecutionContext,
    E::ConsensusStateRef: ConsensusStateConverter,
{
    fn initialise(
        &self,
        ctx: &mut E,
        client_id: &ClientId,
        consensus_state: Any,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.initialise(ctx, client_id, consensus_state),
            Self::Localhost(cs) => cs.initialise(ctx, client_id, consensus_state),
        }
    }
}

/// Every consensus state type the mock host stores.
#[derive(Clone, Debug, PartialEq, Eq, From)]
pub enum AnyConsensusState {
    Mock(MockConsensusState),
}

impl TryFrom<Any> for AnyConsensusState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        MockConsensusState::try_from(raw).map(Into::into)
    }
}

impl From<AnyConsensusState> for Any {
    fn from(value: AnyConsensusState) -> Self {
        match value {
            AnyConsensusState::Mock(cs) => cs.into(),
        }
    }
}

impl TryFrom<AnyConsensusState> for MockConsensusState {
    type Error = ClientError;

    fn try_from(value: AnyConsensusState) -> Result<Self, Self::Error> {
        match value {
            AnyConsensusState::Mock(cs) => Ok(cs),
        }
    }
}

impl ConsensusState for AnyConsensusState {
    fn root(&self) -> &CommitmentRoot {
        match self {
            Self::Mock(cs) => cs.root(),
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            Self::Mock(cs) => cs.timestamp(),
        }
    }
}
