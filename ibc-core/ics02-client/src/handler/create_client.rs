//! Protocol logic specific to processing ICS2 messages of type `MsgCreateClient`.

use ibc_tao_client_context::prelude::*;
use ibc_tao_client_types::error::ClientError;
use ibc_tao_client_types::events::CreateClient;
use ibc_tao_client_types::msgs::MsgCreateClient;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::identifiers::ClientId;
use ibc_tao_host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_tao_host::{ClientStateMut, ClientStateRef, ExecutionContext, ValidationContext};

pub fn validate<Ctx>(ctx: &Ctx, msg: MsgCreateClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let MsgCreateClient {
        client_state,
        consensus_state,
        signer,
    } = msg;

    ctx.validate_message_signer(&signer)?;

    // Construct this client's identifier
    let id_counter = ctx.client_counter()?;

    let client_val_ctx = ctx.get_client_validation_context();

    let client_state = ClientStateRef::<Ctx>::try_from(client_state)?;

    let client_type = client_state.client_type();

    if !ctx.params().is_allowed_client(&client_type) {
        return Err(ClientError::ClientTypeNotAllowed { client_type }.into());
    }

    client_state.validate()?;

    let client_id = client_type.build_client_id(id_counter);

    let status = client_state.status(client_val_ctx, &client_id)?;

    if status.is_frozen() {
        return Err(ClientError::ClientNotActive { client_id, status }.into());
    };

    client_state.verify_consensus_state(consensus_state)?;

    if client_val_ctx.client_state(&client_id).is_ok() {
        return Err(ClientError::DuplicateClientState(client_id).into());
    };

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgCreateClient) -> Result<ClientId, ContextError>
where
    Ctx: ExecutionContext,
{
    let MsgCreateClient {
        client_state,
        consensus_state,
        signer: _,
    } = msg;

    // Construct this client's identifier
    let id_counter = ctx.client_counter()?;
    let host_timestamp = ctx.host_timestamp()?;
    let host_height = ctx.host_height()?;

    let client_state = ClientStateMut::<Ctx>::try_from(client_state)?;

    let client_type = client_state.client_type();
    let client_id = client_type.build_client_id(id_counter);
    let latest_height = client_state.latest_height();

    // Decoded before the first write so that a rejected consensus state
    // leaves no client behind. The localhost client proves against the
    // host's own store and keeps no consensus history.
    let installed_consensus_state = if client_type.is_localhost() {
        None
    } else {
        Some(<Ctx::E as ClientValidationContext>::ConsensusStateRef::try_from(
            consensus_state.clone(),
        )?)
    };

    let client_exec_ctx = ctx.get_client_execution_context();

    client_exec_ctx.store_client_state(ClientStatePath::new(client_id.clone()), client_state.clone())?;

    client_state.initialise(client_exec_ctx, &client_id, consensus_state)?;

    if let Some(consensus_state) = installed_consensus_state {
        client_exec_ctx.store_consensus_state(
            ClientConsensusStatePath::new(
                client_id.clone(),
                latest_height.revision_number(),
                latest_height.revision_height(),
            ),
            consensus_state,
        )?;
        client_exec_ctx.store_update_meta(
            client_id.clone(),
            latest_height,
            host_timestamp,
            host_height,
        )?;
    }

    ctx.increase_client_counter()?;

    let event = IbcEvent::CreateClient(CreateClient::new(
        client_id.clone(),
        client_type,
        latest_height,
    ));
    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(event)?;

    ctx.log_message(format!(
        "success: generated new client identifier: {client_id}"
    ))?;

    Ok(client_id)
}
