//! Protocol logic specific to processing ICS2 messages of type `MsgUpdateClient`
//! and `MsgSubmitMisbehaviour`.

use ibc_tao_client_context::prelude::*;
use ibc_tao_client_types::events::{ClientMisbehaviour, UpdateClient};
use ibc_tao_client_types::msgs::MsgUpdateOrMisbehaviour;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_primitives::ToVec;

pub fn validate<Ctx>(ctx: &Ctx, msg: MsgUpdateOrMisbehaviour) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.validate_message_signer(msg.signer())?;

    match &msg {
        MsgUpdateOrMisbehaviour::UpdateClient(m) => m.validate_basic()?,
        MsgUpdateOrMisbehaviour::Misbehaviour(m) => m.validate_basic()?,
    }

    let client_id = msg.client_id().clone();

    let client_val_ctx = ctx.get_client_validation_context();

    // Read client state from the host chain store. The client should already exist.
    let client_state = client_val_ctx.client_state(&client_id)?;

    client_state
        .status(client_val_ctx, &client_id)?
        .verify_is_active(&client_id)?;

    client_state.verify_client_message(client_val_ctx, &client_id, msg.client_message().clone())?;

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgUpdateOrMisbehaviour) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_id = msg.client_id().clone();
    let host_timestamp = ctx.host_timestamp()?;
    let host_height = ctx.host_height()?;

    let client_exec_ctx = ctx.get_client_execution_context();

    let client_state = client_exec_ctx.client_state_mut(&client_id)?;
    let client_type = client_state.client_type();

    match msg {
        MsgUpdateOrMisbehaviour::UpdateClient(msg) => {
            let header = msg.client_message;

            let outcome = client_state.check_header_and_update_state(
                client_exec_ctx,
                &client_id,
                header.clone(),
            )?;

            match outcome {
                UpdateOutcome::Updated {
                    client_state,
                    consensus_state,
                    consensus_height,
                } => {
                    client_exec_ctx
                        .store_client_state(ClientStatePath::new(client_id.clone()), client_state)?;
                    client_exec_ctx.store_consensus_state(
                        ClientConsensusStatePath::new(
                            client_id.clone(),
                            consensus_height.revision_number(),
                            consensus_height.revision_height(),
                        ),
                        consensus_state,
                    )?;
                    client_exec_ctx.store_update_meta(
                        client_id.clone(),
                        consensus_height,
                        host_timestamp,
                        host_height,
                    )?;

                    let event = IbcEvent::UpdateClient(UpdateClient::new(
                        client_id.clone(),
                        client_type,
                        consensus_height,
                        header.to_vec(),
                    ));
                    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
                    ctx.emit_ibc_event(event)?;

                    ctx.log_message(format!(
                        "success: client {client_id} updated to height {consensus_height}"
                    ))?;
                }
                // Already installed by an earlier relay. Rewriting the update
                // metadata would restart the connection delay at this height.
                UpdateOutcome::Unchanged { consensus_height } => {
                    let event = IbcEvent::UpdateClient(UpdateClient::new(
                        client_id.clone(),
                        client_type,
                        consensus_height,
                        header.to_vec(),
                    ));
                    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
                    ctx.emit_ibc_event(event)?;

                    ctx.log_message(format!(
                        "success: client {client_id} already holds height {consensus_height}"
                    ))?;
                }
                // The header conflicts with the consensus history: the frozen
                // client is persisted and no consensus state is stored.
                UpdateOutcome::MisbehaviourDetected {
                    client_state,
                    consensus_height,
                } => {
                    client_exec_ctx
                        .store_client_state(ClientStatePath::new(client_id.clone()), client_state)?;

                    emit_misbehaviour(
                        ctx,
                        ClientMisbehaviour::new(
                            client_id,
                            client_type,
                            consensus_height,
                            header.to_vec(),
                        ),
                    )?;
                }
            }
        }
        MsgUpdateOrMisbehaviour::Misbehaviour(msg) => {
            let evidence = msg.misbehaviour;

            let (frozen_client_state, consensus_height) = client_state
                .check_misbehaviour_and_update_state(
                    client_exec_ctx,
                    &client_id,
                    evidence.clone(),
                )?;

            client_exec_ctx
                .store_client_state(ClientStatePath::new(client_id.clone()), frozen_client_state)?;

            emit_misbehaviour(
                ctx,
                ClientMisbehaviour::new(client_id, client_type, consensus_height, evidence.to_vec()),
            )?;
        }
    }

    Ok(())
}

fn emit_misbehaviour<Ctx>(ctx: &mut Ctx, event: ClientMisbehaviour) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_id = event.client_id().clone();

    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(IbcEvent::ClientMisbehaviour(event))?;

    ctx.log_message(format!("success: client {client_id} frozen on misbehaviour"))
}
