//! Protocol logic specific to processing ICS2 messages of type `MsgUpgradeClient`.

use ibc_tao_client_context::prelude::*;
use ibc_tao_client_types::events::UpgradeClient;
use ibc_tao_client_types::msgs::MsgUpgradeClient;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_tao_host::{ExecutionContext, ValidationContext};

pub fn validate<Ctx>(ctx: &Ctx, msg: MsgUpgradeClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    let MsgUpgradeClient {
        client_id,
        upgraded_client_state,
        upgraded_consensus_state,
        proof_upgrade_client,
        proof_upgrade_consensus_state,
        signer,
    } = msg;

    ctx.validate_message_signer(&signer)?;

    let client_val_ctx = ctx.get_client_validation_context();

    // Read the current latest client state from the host chain store.
    let old_client_state = client_val_ctx.client_state(&client_id)?;

    // Check if the client is active.
    old_client_state
        .status(client_val_ctx, &client_id)?
        .verify_is_active(&client_id)?;

    // Validate the upgraded client state and consensus state and verify
    // proofs against the root the old client trusts at its latest height.
    old_client_state.verify_upgrade_and_update_state(
        client_val_ctx,
        &client_id,
        upgraded_client_state,
        upgraded_consensus_state,
        proof_upgrade_client,
        proof_upgrade_consensus_state,
    )?;

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgUpgradeClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let MsgUpgradeClient {
        client_id,
        upgraded_client_state,
        upgraded_consensus_state,
        proof_upgrade_client,
        proof_upgrade_consensus_state,
        ..
    } = msg;

    let host_timestamp = ctx.host_timestamp()?;
    let host_height = ctx.host_height()?;

    let client_exec_ctx = ctx.get_client_execution_context();

    let old_client_state = client_exec_ctx.client_state_mut(&client_id)?;
    let client_type = old_client_state.client_type();

    let (new_client_state, new_consensus_state) = old_client_state
        .verify_upgrade_and_update_state(
            client_exec_ctx,
            &client_id,
            upgraded_client_state,
            upgraded_consensus_state,
            proof_upgrade_client,
            proof_upgrade_consensus_state,
        )?;

    let latest_height = new_client_state.latest_height();

    client_exec_ctx.store_client_state(ClientStatePath::new(client_id.clone()), new_client_state)?;
    client_exec_ctx.store_consensus_state(
        ClientConsensusStatePath::new(
            client_id.clone(),
            latest_height.revision_number(),
            latest_height.revision_height(),
        ),
        new_consensus_state,
    )?;
    client_exec_ctx.store_update_meta(
        client_id.clone(),
        latest_height,
        host_timestamp,
        host_height,
    )?;

    let event = IbcEvent::UpgradeClient(UpgradeClient::new(
        client_id.clone(),
        client_type,
        latest_height,
    ));
    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(event)?;

    ctx.log_message(format!(
        "success: client {client_id} upgraded to height {latest_height}"
    ))?;

    Ok(())
}
