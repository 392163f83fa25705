use ibc_tao_client_context::prelude::*;
use ibc_tao_client_types::Height;
use ibc_tao_commitment_types::commitment::{CommitmentPrefix, CommitmentProofBytes};
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_host::types::identifiers::ClientId;
use ibc_tao_host::types::path::{ClientConsensusStatePath, ClientStatePath, Path};
use ibc_tao_host::{ClientStateRef, ConsensusStateRef, ValidationContext};
use ibc_tao_primitives::{Any, ToVec};

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;

/// Loads the local client `client_id` of the counterparty, which must be
/// active, together with the consensus state it trusts at `proof_height`.
///
/// Every handshake proof is checked against that pair.
pub(crate) fn client_at_proof_height<Ctx>(
    ctx: &Ctx,
    client_id: &ClientId,
    proof_height: Height,
) -> Result<(ClientStateRef<Ctx>, ConsensusStateRef<Ctx>), ContextError>
where
    Ctx: ValidationContext,
{
    let client_val_ctx = ctx.get_client_validation_context();

    let client_state = client_val_ctx.client_state(client_id)?;

    client_state
        .status(client_val_ctx, client_id)?
        .verify_is_active(client_id)?;
    client_state.validate_proof_height(proof_height)?;

    let consensus_state = client_val_ctx.consensus_state(&ClientConsensusStatePath::new(
        client_id.clone(),
        proof_height.revision_number(),
        proof_height.revision_height(),
    ))?;

    Ok((client_state, consensus_state))
}

/// What a counterparty claims to know about the host: the state of its
/// client of the host, and the consensus height of the host it holds.
pub(crate) struct HostViewOnCounterparty<'a> {
    pub client_id_on_counterparty: &'a ClientId,
    pub client_state_of_host: &'a Any,
    pub proof_client_state: &'a CommitmentProofBytes,
    pub proof_consensus_state: &'a CommitmentProofBytes,
    pub consensus_height_of_host: Height,
    pub proofs_height: Height,
}

/// Self-client verification shared by `ConnOpenTry` and `ConnOpenAck`.
///
/// The claimed client state must describe this host, the claimed consensus
/// height must have been reached, and both must be provably stored by the
/// counterparty.
pub(crate) fn verify_host_view<Ctx>(
    ctx: &Ctx,
    verifier: &ClientStateRef<Ctx>,
    consensus_state: &ConsensusStateRef<Ctx>,
    prefix_on_counterparty: &CommitmentPrefix,
    view: HostViewOnCounterparty<'_>,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let host_height = ctx.host_height()?;
    if view.consensus_height_of_host > host_height {
        return Err(ConnectionError::InvalidConsensusHeight {
            target_height: view.consensus_height_of_host,
            current_height: host_height,
        }
        .into());
    }

    let client_state_of_host = Ctx::HostClientState::try_from(view.client_state_of_host.clone())?;

    ctx.validate_self_client(client_state_of_host)?;

    verifier
        .verify_membership(
            prefix_on_counterparty,
            view.proof_client_state,
            consensus_state.root(),
            Path::ClientState(ClientStatePath::new(view.client_id_on_counterparty.clone())),
            view.client_state_of_host.to_vec(),
        )
        .map_err(|e| ConnectionError::ClientStateVerificationFailure {
            client_id: view.client_id_on_counterparty.clone(),
            client_error: e,
        })?;

    let expected_consensus_state: Any = ctx
        .host_consensus_state(&view.consensus_height_of_host)?
        .into();

    verifier
        .verify_membership(
            prefix_on_counterparty,
            view.proof_consensus_state,
            consensus_state.root(),
            Path::ClientConsensusState(ClientConsensusStatePath::new(
                view.client_id_on_counterparty.clone(),
                view.consensus_height_of_host.revision_number(),
                view.consensus_height_of_host.revision_height(),
            )),
            expected_consensus_state.to_vec(),
        )
        .map_err(|e| ConnectionError::ConsensusStateVerificationFailure {
            height: view.proofs_height,
            client_error: e,
        })?;

    Ok(())
}
