//! Defines `ClientState`, the core type to be implemented by light clients

use ibc_tao_client_types::error::ClientError;
use ibc_tao_client_types::{Height, Status};
use ibc_tao_commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_tao_host_types::identifiers::{ClientId, ClientType};
use ibc_tao_host_types::path::Path;
use ibc_tao_primitives::Any;

use crate::context::{ClientExecutionContext, ClientValidationContext};
use crate::Convertible;

/// `ClientState` methods needed in both validation and execution.
///
/// They do not require access to a client `ValidationContext` nor
/// `ExecutionContext`.
pub trait ClientStateCommon: Clone + Convertible<Any> {
    /// Stateless sanity checks of the client state itself.
    fn validate(&self) -> Result<(), ClientError>;

    /// Performs basic validation on the `consensus_state`.
    ///
    /// Notably, an implementation should verify that it can properly
    /// deserialize the object into the expected format.
    fn verify_consensus_state(&self, consensus_state: Any) -> Result<(), ClientError>;

    /// Type of client associated with this state (eg. Tendermint)
    fn client_type(&self) -> ClientType;

    /// Latest height the client was updated to
    fn latest_height(&self) -> Height;

    /// Validate that the client is at a sufficient height
    fn validate_proof_height(&self, proof_height: Height) -> Result<(), ClientError>;

    /// Verify the upgraded client and consensus states and validate proofs
    /// against the given root.
    ///
    /// NOTE: proof heights are not included as upgrade to a new revision is
    /// expected to pass only on the last height committed by the current
    /// revision.
    fn verify_upgrade_client(
        &self,
        upgraded_client_state: Any,
        upgraded_consensus_state: Any,
        proof_upgrade_client: CommitmentProofBytes,
        proof_upgrade_consensus_state: CommitmentProofBytes,
        root: &CommitmentRoot,
    ) -> Result<(), ClientError>;

    // Verify_membership is a generic proof verification method which verifies a
    // proof of the existence of a value at a given Path.
    fn verify_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError>;

    // Verify_non_membership is a generic proof verification method which
    // verifies the absence of a given commitment.
    fn verify_non_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
    ) -> Result<(), ClientError>;
}

/// Result of applying a header to a client.
///
/// A header that conflicts with what the client already trusts (a different
/// consensus state at an existing height, or a non-monotonic timestamp) is
/// evidence of misbehaviour: the client comes back frozen and no new
/// consensus state is produced. A header the client already holds changes
/// nothing, and its update metadata must keep the original processing time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome<C, S> {
    Updated {
        client_state: C,
        consensus_state: S,
        consensus_height: Height,
    },
    Unchanged {
        consensus_height: Height,
    },
    MisbehaviourDetected {
        client_state: C,
        consensus_height: Height,
    },
}

impl<C, S> UpdateOutcome<C, S> {
    /// Height the header resolves to, or conflicts at.
    pub fn consensus_height(&self) -> Height {
        match self {
            Self::Updated {
                consensus_height, ..
            }
            | Self::Unchanged { consensus_height }
            | Self::MisbehaviourDetected {
                consensus_height, ..
            } => *consensus_height,
        }
    }

    pub fn is_misbehaviour(&self) -> bool {
        matches!(self, Self::MisbehaviourDetected { .. })
    }
}

/// `ClientState` methods which require access to the client's validation
/// context
///
/// None of them write to the store: each returns the states the handler
/// persists once every check has passed.
///
/// The generic type `V` enables light client developers to expand the set of
/// methods available under the [`ClientValidationContext`] trait and use them in
/// their implementation for validating a client state transition.
///
/// ```ignore
/// impl<V> ClientStateValidation<V> for MyClientState
/// where
///     V: ClientValidationContext + MyValidationContext,
/// {
///   // `MyValidationContext` methods available
/// }
/// ```
pub trait ClientStateValidation<V>: ClientStateCommon
where
    V: ClientValidationContext,
{
    /// Returns the status of the client. Only Active clients are allowed to process packets.
    fn status(&self, ctx: &V, client_id: &ClientId) -> Result<Status, ClientError>;

    /// verify_client_message must verify a client_message, a header or a
    /// piece of misbehaviour evidence. An error should be returned if the
    /// client_message fails to verify.
    fn verify_client_message(
        &self,
        ctx: &V,
        client_id: &ClientId,
        client_message: Any,
    ) -> Result<(), ClientError>;

    /// Applies a verified header, producing either the advanced client and
    /// its new consensus state, or a frozen client if the header contradicts
    /// the consensus history.
    fn check_header_and_update_state(
        &self,
        ctx: &V,
        client_id: &ClientId,
        header: Any,
    ) -> Result<UpdateOutcome<Self, V::ConsensusStateRef>, ClientError>;

    /// Checks submitted misbehaviour evidence and returns the frozen client
    /// along with the height the evidence conflicts at.
    ///
    /// Fails with `InvalidMisbehaviour` if the evidence does not show two
    /// conflicting commitments for the same height.
    fn check_misbehaviour_and_update_state(
        &self,
        ctx: &V,
        client_id: &ClientId,
        misbehaviour: Any,
    ) -> Result<(Self, Height), ClientError>;

    /// Verifies that the substitute may replace this (subject) client and
    /// returns the subject's new state.
    ///
    /// Status and height preconditions are checked by the recovery handler;
    /// this only covers the client-specific parameters that must agree.
    fn check_substitute_and_update_state(
        &self,
        ctx: &V,
        substitute_client_state: Any,
    ) -> Result<Self, ClientError>;

    /// Verifies, against the consensus root this client trusts at its latest
    /// height, that the counterparty committed the upgraded client and
    /// consensus states, and returns them.
    fn verify_upgrade_and_update_state(
        &self,
        ctx: &V,
        client_id: &ClientId,
        upgraded_client_state: Any,
        upgraded_consensus_state: Any,
        proof_upgrade_client: CommitmentProofBytes,
        proof_upgrade_consensus_state: CommitmentProofBytes,
    ) -> Result<(Self, V::ConsensusStateRef), ClientError>;
}

/// `ClientState` methods which require access to the client's
/// `ExecutionContext`.
pub trait ClientStateExecution<E>: ClientStateValidation<E>
where
    E: ClientExecutionContext,
{
    /// Initialises the client with the initial client and consensus states.
    ///
    /// Most clients will want to call `E::store_client_state` and
    /// `E::store_consensus_state`.
    fn initialise(
        &self,
        ctx: &mut E,
        client_id: &ClientId,
        consensus_state: Any,
    ) -> Result<(), ClientError>;
}

/// Primary client trait. Defines all the methods that clients must implement.
///
/// One only needs to implement [`ClientStateCommon`], [`ClientStateValidation`]
/// and [`ClientStateExecution`]; a blanket implementation will automatically
/// implement `ClientState`.
pub trait ClientState<V: ClientValidationContext, E: ClientExecutionContext>:
    ClientStateCommon + ClientStateValidation<V> + ClientStateExecution<E>
{
}

impl<V: ClientValidationContext, E: ClientExecutionContext, T> ClientState<V, E> for T where
    T: ClientStateCommon + ClientStateValidation<V> + ClientStateExecution<E>
{
}
