use core::str::FromStr;
use core::time::Duration;

use borsh::{BorshDeserialize, BorshSerialize};
use ibc_tao::client::context::prelude::*;
use ibc_tao::client::types::error::{ClientError, UpgradeClientError};
use ibc_tao::client::types::{Height, Status};
use ibc_tao::commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_tao::commitment_types::merkle::prefixed_path;
use ibc_tao::commitment_types::verifier::ProofVerifier;
use ibc_tao::host::types::identifiers::{ClientId, ClientType};
use ibc_tao::host::types::path::{ClientConsensusStatePath, Path, UpgradeClientPath};
use ibc_tao::primitives::{Any, ToVec};

use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use crate::testapp::ibc::clients::mock::header::{MockHeader, MOCK_HEADER_TYPE_URL};
use crate::testapp::ibc::clients::mock::misbehaviour::{Misbehaviour, MOCK_MISBEHAVIOUR_TYPE_URL};
use crate::testapp::ibc::clients::mock::proof::SnapshotVerifier;

pub const MOCK_CLIENT_STATE_TYPE_URL: &str = "/ibc.mock.ClientState";
pub const MOCK_CLIENT_TYPE: &str = "9999-mock";

/// Two weeks.
pub const DEFAULT_TRUSTING_PERIOD: Duration = Duration::from_secs(14 * 24 * 60 * 60);

pub fn client_type() -> ClientType {
    ClientType::from_str(MOCK_CLIENT_TYPE).expect("never fails because it's valid client type")
}

/// Bound on the consensus state type of a host, so that the mock client can
/// read its own consensus states back and hand new ones over.
pub trait ConsensusStateConverter:
    TryInto<MockConsensusState, Error = ClientError> + From<MockConsensusState>
{
}

impl<C> ConsensusStateConverter for C where
    C: TryInto<MockConsensusState, Error = ClientError> + From<MockConsensusState>
{
}

/// Light client of a mock host. Trusts any header of the right chain and
/// verifies proofs against the snapshot roots such headers carry.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MockClientState {
    pub chain_id: String,
    pub latest_height: Height,
    pub trusting_period_nanos: u64,
    pub frozen_height: Option<Height>,
    /// Store prefix under which the tracked chain commits upgrade plans.
    pub upgrade_prefix: CommitmentPrefix,
}

impl MockClientState {
    pub fn new(chain_id: impl Into<String>, latest_height: Height) -> Self {
        Self {
            chain_id: chain_id.into(),
            latest_height,
            trusting_period_nanos: 0,
            frozen_height: None,
            upgrade_prefix: CommitmentPrefix::try_from(b"ibc".to_vec())
                .expect("never fails because the prefix is not empty"),
        }
        .with_trusting_period(DEFAULT_TRUSTING_PERIOD)
    }

    pub fn from_header(header: &MockHeader) -> Self {
        Self::new(header.chain_id.clone(), header.height)
    }

    pub fn with_trusting_period(self, trusting_period: Duration) -> Self {
        Self {
            trusting_period_nanos: u64::try_from(trusting_period.as_nanos()).unwrap_or(u64::MAX),
            ..self
        }
    }

    pub fn with_upgrade_prefix(self, upgrade_prefix: CommitmentPrefix) -> Self {
        Self {
            upgrade_prefix,
            ..self
        }
    }

    pub fn with_latest_height(self, latest_height: Height) -> Self {
        Self {
            latest_height,
            ..self
        }
    }

    pub fn frozen_at(self, height: Height) -> Self {
        Self {
            frozen_height: Some(height),
            ..self
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_height.is_some()
    }

    pub fn trusting_period(&self) -> Duration {
        Duration::from_nanos(self.trusting_period_nanos)
    }

    fn verify_header(&self, header: &MockHeader) -> Result<(), ClientError> {
        if header.chain_id != self.chain_id {
            return Err(ClientError::FailedHeaderVerification {
                description: format!(
                    "header of chain `{}` submitted to a client of chain `{}`",
                    header.chain_id, self.chain_id
                ),
            });
        }

        if header.root.is_empty() {
            return Err(ClientError::FailedHeaderVerification {
                description: format!("header at height {} has an empty root", header.height),
            });
        }

        Ok(())
    }

    fn verify_misbehaviour(&self, misbehaviour: &Misbehaviour) -> Result<(), ClientError> {
        self.verify_header(&misbehaviour.header1)?;
        self.verify_header(&misbehaviour.header2)?;

        if misbehaviour.header1.height != misbehaviour.header2.height {
            return Err(ClientError::InvalidMisbehaviour {
                description: format!(
                    "headers are at different heights: {} and {}",
                    misbehaviour.header1.height, misbehaviour.header2.height
                ),
            });
        }

        if misbehaviour.header1 == misbehaviour.header2 {
            return Err(ClientError::InvalidMisbehaviour {
                description: "headers are identical".to_string(),
            });
        }

        Ok(())
    }

    fn consensus_state_at<V>(
        ctx: &V,
        client_id: &ClientId,
        height: &Height,
    ) -> Result<MockConsensusState, ClientError>
    where
        V: ClientValidationContext,
        V::ConsensusStateRef: ConsensusStateConverter,
    {
        let path = ClientConsensusStatePath::new(
            client_id.clone(),
            height.revision_number(),
            height.revision_height(),
        );
        ctx.consensus_state(&path)?.try_into()
    }
}

impl TryFrom<Any> for MockClientState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        raw.decode(MOCK_CLIENT_STATE_TYPE_URL)
            .map_err(|e| ClientError::InvalidClientState {
                description: e.to_string(),
            })
    }
}

impl From<MockClientState> for Any {
    fn from(client_state: MockClientState) -> Self {
        Any::new(MOCK_CLIENT_STATE_TYPE_URL, &client_state)
    }
}

impl ClientStateCommon for MockClientState {
    fn validate(&self) -> Result<(), ClientError> {
        if self.chain_id.is_empty() {
            return Err(ClientError::InvalidClientState {
                description: "empty chain identifier".to_string(),
            });
        }

        if self.trusting_period_nanos == 0 {
            return Err(ClientError::InvalidClientState {
                description: "zero trusting period".to_string(),
            });
        }

        Ok(())
    }

    fn verify_consensus_state(&self, consensus_state: Any) -> Result<(), ClientError> {
        let consensus_state = MockConsensusState::try_from(consensus_state)?;

        if consensus_state.root.is_empty() {
            return Err(ClientError::InvalidConsensusState {
                description: "empty commitment root".to_string(),
            });
        }

        Ok(())
    }

    fn client_type(&self) -> ClientType {
        client_type()
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
        upgraded_client_state: Any,
        upgraded_consensus_state: Any,
        proof_upgrade_client: CommitmentProofBytes,
        proof_upgrade_consensus_state: CommitmentProofBytes,
        root: &CommitmentRoot,
    ) -> Result<(), ClientError> {
        // The plan is committed under the last height this client has seen.
        let plan_height = self.latest_height.revision_height();

        let client_state_path = prefixed_path(
            &self.upgrade_prefix,
            &Path::UpgradeClient(UpgradeClientPath::UpgradedClientState(plan_height)),
        );
        SnapshotVerifier
            .verify_membership(
                root,
                &client_state_path,
                &upgraded_client_state.to_vec(),
                &proof_upgrade_client,
            )
            .map_err(UpgradeClientError::InvalidUpgradeClientStateProof)?;

        let consensus_state_path = prefixed_path(
            &self.upgrade_prefix,
            &Path::UpgradeClient(UpgradeClientPath::UpgradedClientConsensusState(plan_height)),
        );
        SnapshotVerifier
            .verify_membership(
                root,
                &consensus_state_path,
                &upgraded_consensus_state.to_vec(),
                &proof_upgrade_consensus_state,
            )
            .map_err(UpgradeClientError::InvalidUpgradeConsensusStateProof)?;

        Ok(())
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

impl<V> ClientStateValidation<V> for MockClientState
where
    V: ExtClientValidationContext,
    V::ConsensusStateRef: ConsensusStateConverter,
{
    fn status(&self, ctx: &V, client_id: &ClientId) -> Result<Status, ClientError> {
        if self.is_frozen() {
            return Ok(Status::Frozen);
        }

        let Ok(latest_consensus_state) =
            Self::consensus_state_at(ctx, client_id, &self.latest_height)
        else {
            return Ok(Status::Expired);
        };

        // The two chains advance independently, so the tracked chain may be
        // ahead of the host clock.
        let elapsed = ctx
            .host_timestamp()?
            .duration_since(&latest_consensus_state.timestamp)
            .unwrap_or_default();

        if elapsed > self.trusting_period() {
            return Ok(Status::Expired);
        }

        Ok(Status::Active)
    }

    fn verify_client_message(
        &self,
        _ctx: &V,
        _client_id: &ClientId,
        client_message: Any,
    ) -> Result<(), ClientError> {
        match client_message.type_url.as_str() {
            MOCK_HEADER_TYPE_URL => self.verify_header(&MockHeader::try_from(client_message)?),
            MOCK_MISBEHAVIOUR_TYPE_URL => {
                self.verify_misbehaviour(&Misbehaviour::try_from(client_message)?)
            }
            _ => Err(ClientError::InvalidHeaderType(client_message.type_url)),
        }
    }

    fn check_header_and_update_state(
        &self,
        ctx: &V,
        client_id: &ClientId,
        header: Any,
    ) -> Result<UpdateOutcome<Self, V::ConsensusStateRef>, ClientError> {
        let header = MockHeader::try_from(header)?;
        self.verify_header(&header)?;

        let height = header.height;
        let new_consensus_state = MockConsensusState::from(header);

        if let Ok(existing) = Self::consensus_state_at(ctx, client_id, &height) {
            if existing != new_consensus_state {
                return Ok(UpdateOutcome::MisbehaviourDetected {
                    client_state: self.clone().frozen_at(height),
                    consensus_height: height,
                });
            }

            return Ok(UpdateOutcome::Unchanged {
                consensus_height: height,
            });
        }

        // Consensus timestamps must grow strictly with the height.
        let heights = ctx.consensus_state_heights(client_id)?;

        if let Some(prev_height) = heights.iter().filter(|h| **h < height).max() {
            let prev = Self::consensus_state_at(ctx, client_id, prev_height)?;
            if prev.timestamp >= new_consensus_state.timestamp {
                return Ok(UpdateOutcome::MisbehaviourDetected {
                    client_state: self.clone().frozen_at(height),
                    consensus_height: height,
                });
            }
        }

        if let Some(next_height) = heights.iter().filter(|h| **h > height).min() {
            let next = Self::consensus_state_at(ctx, client_id, next_height)?;
            if next.timestamp <= new_consensus_state.timestamp {
                return Ok(UpdateOutcome::MisbehaviourDetected {
                    client_state: self.clone().frozen_at(height),
                    consensus_height: height,
                });
            }
        }

        let latest_height = core::cmp::max(self.latest_height, height);

        Ok(UpdateOutcome::Updated {
            client_state: self.clone().with_latest_height(latest_height),
            consensus_state: new_consensus_state.into(),
            consensus_height: height,
        })
    }

    fn check_misbehaviour_and_update_state(
        &self,
        _ctx: &V,
        _client_id: &ClientId,
        misbehaviour: Any,
    ) -> Result<(Self, Height), ClientError> {
        let misbehaviour = Misbehaviour::try_from(misbehaviour)?;
        self.verify_misbehaviour(&misbehaviour)?;

        let height = misbehaviour.header1.height;

        Ok((self.clone().frozen_at(height), height))
    }

    fn check_substitute_and_update_state(
        &self,
        _ctx: &V,
        substitute_client_state: Any,
    ) -> Result<Self, ClientError> {
        let substitute = MockClientState::try_from(substitute_client_state)?;

        if substitute.chain_id != self.chain_id
            || substitute.trusting_period_nanos != self.trusting_period_nanos
        {
            return Err(ClientError::InvalidClientState {
                description: format!(
                    "substitute of chain `{}` does not match the parameters of the subject",
                    substitute.chain_id
                ),
            });
        }

        Ok(Self {
            latest_height: substitute.latest_height,
            frozen_height: None,
            ..self.clone()
        })
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
        let upgraded = MockClientState::try_from(upgraded_client_state.clone()).map_err(|e| {
            UpgradeClientError::InvalidUpgradedClientState {
                description: e.to_string(),
            }
        })?;
        let upgraded_consensus = MockConsensusState::try_from(upgraded_consensus_state.clone())?;

        if upgraded.latest_height <= self.latest_height {
            return Err(UpgradeClientError::InsufficientUpgradeHeight {
                upgraded_height: upgraded.latest_height,
                client_height: self.latest_height,
            }
            .into());
        }

        let trusted = Self::consensus_state_at(ctx, client_id, &self.latest_height)?;

        self.verify_upgrade_client(
            upgraded_client_state,
            upgraded_consensus_state,
            proof_upgrade_client,
            proof_upgrade_consensus_state,
            &trusted.root,
        )?;

        // Chain-chosen parameters come from the upgrade; the trusting period
        // stays the one the client was created with.
        let new_client_state = Self {
            chain_id: upgraded.chain_id,
            latest_height: upgraded.latest_height,
            trusting_period_nanos: self.trusting_period_nanos,
            frozen_height: None,
            upgrade_prefix: upgraded.upgrade_prefix,
        };

        Ok((new_client_state, upgraded_consensus.into()))
    }
}

impl<E> ClientStateExecution<E> for MockClientState
where
    E: ExtClientExecutionContext,
    E::ConsensusStateRef: ConsensusStateConverter,
{
    fn initialise(
        &self,
        _ctx: &mut E,
        _client_id: &ClientId,
        consensus_state: Any,
    ) -> Result<(), ClientError> {
        MockConsensusState::try_from(consensus_state).map(|_| ())
    }
}
