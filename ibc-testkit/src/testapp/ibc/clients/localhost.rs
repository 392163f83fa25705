//! A loopback client for channels between two modules of the same host.
//!
//! The host creates it without any consensus state. It is always active and
//! accepts no client messages, so the handlers that need a consensus state
//! at a proof height cannot use it for now.

use borsh::{BorshDeserialize, BorshSerialize};
use ibc_tao::client::context::prelude::*;
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::{Height, Status};
use ibc_tao::commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_tao::commitment_types::merkle::prefixed_path;
use ibc_tao::commitment_types::verifier::ProofVerifier;
use ibc_tao::host::types::identifiers::{ClientId, ClientType};
use ibc_tao::host::types::path::Path;
use ibc_tao::primitives::Any;

use crate::testapp::ibc::clients::mock::proof::SnapshotVerifier;

pub const LOCALHOST_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.localhost.v2.ClientState";

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LocalhostClientState {
    pub latest_height: Height,
}

impl LocalhostClientState {
    pub fn new(latest_height: Height) -> Self {
        Self { latest_height }
    }

    fn unsupported(operation: &str) -> ClientError {
        ClientError::Other {
            description: format!("the localhost client does not support {operation}"),
        }
    }
}

impl TryFrom<Any> for LocalhostClientState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        raw.decode(LOCALHOST_CLIENT_STATE_TYPE_URL)
            .map_err(|e| ClientError::InvalidClientState {
                description: e.to_string(),
            })
    }
}

impl From<LocalhostClientState> for Any {
    fn from(client_state: LocalhostClientState) -> Self {
        Any::new(LOCALHOST_CLIENT_STATE_TYPE_URL, &client_state)
    }
}

impl ClientStateCommon for LocalhostClientState {
    fn validate(&self) -> Result<(), ClientError> {
        Ok(())
    }

    fn verify_consensus_state(&self, _consensus_state: Any) -> Result<(), ClientError> {
        Ok(())
    }

    fn client_type(&self) -> ClientType {
        ClientType::localhost()
    }

    fn latest_height(&self) -> Height {
        self.latest_height
    }

    fn validate_proof_height(&self, proof_height: Height) -> Result<(), ClientError> {
        if self.latest_height < proof_height {
            return Err(ClientError::InvalidProofHeight {
                actual: proof_height,
                latest: self.latest_height,
            });
        }
        Ok(())
    }

    fn verify_upgrade_client(
        &self,
        _upgraded_client_state: Any,
        _upgraded_consensus_state: Any,
        _proof_upgrade_client: CommitmentProofBytes,
        _proof_upgrade_consensus_state: CommitmentProofBytes,
        _root: &CommitmentRoot,
    ) -> Result<(), ClientError> {
        Err(Self::unsupported("upgrades"))
    }

    fn verify_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        SnapshotVerifier
            .verify_membership(root, &prefixed_path(prefix, &path), &value, proof)
            .map_err(ClientError::FailedProofVerification)
    }

    fn verify_non_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
    ) -> Result<(), ClientError> {
        SnapshotVerifier
            .verify_non_membership(root, &prefixed_path(prefix, &path), proof)
            .map_err(ClientError::FailedProofVerification)
    }
}

impl<V> ClientStateValidation<V> for LocalhostClientState
where
    V: ClientValidationContext,
{
    fn status(&self, _ctx: &V, _client_id: &ClientId) -> Result<Status, ClientError> {
        Ok(Status::Active)
    }

    fn verify_client_message(
        &self,
        _ctx: &V,
        _client_id: &ClientId,
        client_message: Any,
    ) -> Result<(), ClientError> {
        Err(ClientError::InvalidHeaderType(client_message.type_url))
    }

    fn check_header_and_update_state(
        &self,
        _ctx: &V,
        _client_id: &ClientId,
        _header: Any,
    ) -> Result<UpdateOutcome<Self, V::ConsensusStateRef>, ClientError> {
        Err(Self::unsupported("updates"))
    }

    fn check_misbehaviour_and_update_state(
        &self,
        _ctx: &V,
        _client_id: &ClientId,
        _misbehaviour: Any,
    ) -> Result<(Self, Height), ClientError> {
        Err(Self::unsupported("misbehaviour"))
    }

    fn check_substitute_and_update_state(
        &self,
        _ctx: &V,
        _substitute_client_state: Any,
    ) -> Result<Self, ClientError> {
        Err(Self::unsupported("recovery"))
    }

    fn verify_upgrade_and_update_state(
        &self,
        _ctx: &V,
        _client_id: &ClientId,
        _upgraded_client_state: Any,
        _upgraded_consensus_state: Any,
        _proof_upgrade_client: CommitmentProofBytes,
        _proof_upgrade_consensus_state: CommitmentProofBytes,
    ) -> Result<(Self, V::ConsensusStateRef), ClientError> {
        Err(Self::unsupported("upgrades"))
    }
}

impl<E> ClientStateExecution<E> for LocalhostClientState
where
    E: ClientExecutionContext,
{
    fn initialise(
        &self,
        _ctx: &mut E,
        _client_id: &ClientId,
        _consensus_state: Any,
    ) -> Result<(), ClientError> {
        Ok(())
    }
}
