//! Protocol logic specific to ICS3 messages of type `MsgConnectionOpenInit`.
use ibc_tao_client_context::prelude::*;
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_connection_types::events::OpenInit;
use ibc_tao_connection_types::msgs::MsgConnectionOpenInit;
use ibc_tao_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::identifiers::ConnectionId;
use ibc_tao_host::types::path::{ClientConnectionPath, ConnectionPath};
use ibc_tao_host::{ExecutionContext, ValidationContext};

pub fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    if !ctx_a.params().outbound_enabled {
        return Err(ConnectionError::OutboundDisabled.into());
    }

    let client_val_ctx_a = ctx_a.get_client_validation_context();

    // An IBC client running on the local (host) chain should exist.
    let client_state_of_b_on_a = client_val_ctx_a.client_state(&msg.client_id_on_a)?;

    client_state_of_b_on_a
        .status(client_val_ctx_a, &msg.client_id_on_a)?
        .verify_is_active(&msg.client_id_on_a)?;

    if let Some(version) = &msg.version {
        version.verify_is_supported(&ctx_a.get_compatible_versions())?;
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    msg: MsgConnectionOpenInit,
) -> Result<ConnectionId, ContextError>
where
    Ctx: ExecutionContext,
{
    // A single proposed version narrows the negotiation; otherwise every
    // supported version is offered.
    let versions = match msg.version {
        Some(version) => vec![version],
        None => ctx_a.get_compatible_versions(),
    };

    let client_id_on_b = msg.counterparty.client_id().clone();

    let conn_end_on_a = ConnectionEnd::new(
        State::Init,
        msg.client_id_on_a.clone(),
        Counterparty::new(client_id_on_b.clone(), None, msg.counterparty.prefix().clone()),
        versions,
        msg.delay_period,
    )?;

    let conn_id_on_a = ConnectionId::new(ctx_a.connection_counter()?);

    ctx_a.increase_connection_counter()?;
    ctx_a.store_connection_to_client(
        &ClientConnectionPath::new(msg.client_id_on_a.clone()),
        conn_id_on_a.clone(),
    )?;
    ctx_a.store_connection(&ConnectionPath::new(&conn_id_on_a), conn_end_on_a)?;

    let event = IbcEvent::OpenInitConnection(OpenInit::new(
        conn_id_on_a.clone(),
        msg.client_id_on_a,
        None,
        client_id_on_b,
    ));
    ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx_a.emit_ibc_event(event)?;

    ctx_a.log_message(format!(
        "success: conn_open_init: generated new connection identifier: {conn_id_on_a}"
    ))?;

    Ok(conn_id_on_a)
}
