//! Protocol logic for processing ICS02 messages of type `MsgRecoverClient`.

use ibc_tao_client_context::prelude::*;
use ibc_tao_client_types::error::ClientError;
use ibc_tao_client_types::events::RecoverClient;
use ibc_tao_client_types::msgs::MsgRecoverClient;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_tao_host::{ExecutionContext, ValidationContext};

/// Performs the validation steps associated with the client recovery process. This
/// includes validating that the parameters of the subject and substitute clients match,
/// as well as validating that the substitute client *is* active and that the subject
/// client is *not* active.
pub fn validate<Ctx>(ctx: &Ctx, msg: MsgRecoverClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    let MsgRecoverClient {
        subject_client_id,
        substitute_client_id,
        signer,
    } = msg;

    ctx.validate_message_signer(&signer)?;

    let client_val_ctx = ctx.get_client_validation_context();

    let subject_client_state = client_val_ctx.client_state(&subject_client_id)?;
    let substitute_client_state = client_val_ctx.client_state(&substitute_client_id)?;

    // Verify that the subject client is inactive, i.e., that it is either frozen or expired
    subject_client_state
        .status(client_val_ctx, &subject_client_id)?
        .verify_is_inactive(&subject_client_id)?;

    substitute_client_state
        .status(client_val_ctx, &substitute_client_id)?
        .verify_is_active(&substitute_client_id)?;

    let subject_type = subject_client_state.client_type();
    let substitute_type = substitute_client_state.client_type();

    if subject_type != substitute_type {
        return Err(ClientError::MismatchedClientRecoveryStates {
            subject: subject_type,
            substitute: substitute_type,
        }
        .into());
    }

    let subject_height = subject_client_state.latest_height();
    let substitute_height = substitute_client_state.latest_height();

    if substitute_height <= subject_height {
        return Err(ClientError::NotAllowedClientRecoveryHeights {
            subject_height,
            substitute_height,
        }
        .into());
    }

    subject_client_state
        .check_substitute_and_update_state(client_val_ctx, substitute_client_state.into())?;

    Ok(())
}

/// Replaces the subject client's state with the one derived from the
/// substitute, and copies the substitute's latest consensus state and its
/// processed time and height under the subject.
pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgRecoverClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let MsgRecoverClient {
        subject_client_id,
        substitute_client_id,
        ..
    } = msg;

    let client_exec_ctx = ctx.get_client_execution_context();

    let subject_client_state = client_exec_ctx.client_state_mut(&subject_client_id)?;
    let substitute_client_state = client_exec_ctx.client_state_mut(&substitute_client_id)?;

    let client_type = subject_client_state.client_type();
    let substitute_height = substitute_client_state.latest_height();

    let substitute_consensus_state =
        client_exec_ctx.consensus_state(&ClientConsensusStatePath::new(
            substitute_client_id.clone(),
            substitute_height.revision_number(),
            substitute_height.revision_height(),
        ))?;
    let (processed_time, processed_height) =
        client_exec_ctx.client_update_meta(&substitute_client_id, &substitute_height)?;

    let recovered_client_state = subject_client_state
        .check_substitute_and_update_state(client_exec_ctx, substitute_client_state.into())?;

    client_exec_ctx.store_client_state(
        ClientStatePath::new(subject_client_id.clone()),
        recovered_client_state,
    )?;
    client_exec_ctx.store_consensus_state(
        ClientConsensusStatePath::new(
            subject_client_id.clone(),
            substitute_height.revision_number(),
            substitute_height.revision_height(),
        ),
        substitute_consensus_state,
    )?;
    client_exec_ctx.store_update_meta(
        subject_client_id.clone(),
        substitute_height,
        processed_time,
        processed_height,
    )?;

    let event = IbcEvent::RecoverClient(RecoverClient::new(
        subject_client_id.clone(),
        substitute_client_id,
        client_type,
    ));
    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(event)?;

    ctx.log_message(format!("success: client {subject_client_id} recovered"))?;

    Ok(())
}
