//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenConfirm`.

use ibc_tao_client_context::prelude::*;
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_connection_types::events::OpenConfirm;
use ibc_tao_connection_types::msgs::MsgConnectionOpenConfirm;
use ibc_tao_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::identifiers::ConnectionId;
use ibc_tao_host::types::path::{ConnectionPath, Path};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_primitives::ToVec;

use super::client_at_proof_height;

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_b.validate_message_signer(&msg.signer)?;

    let conn_end_on_b = ctx_b.connection_end(&msg.conn_id_on_b)?;

    conn_end_on_b.verify_state_matches(&State::TryOpen)?;

    let client_id_on_b = conn_end_on_b.client_id();
    let conn_id_on_a = counterparty_conn_id(&conn_end_on_b)?;

    let (client_state_of_a_on_b, consensus_state_of_a_on_b) =
        client_at_proof_height(ctx_b, client_id_on_b, msg.proof_height_on_a)?;

    let expected_conn_end_on_a = ConnectionEnd::new(
        State::Open,
        conn_end_on_b.counterparty().client_id().clone(),
        Counterparty::new(
            client_id_on_b.clone(),
            Some(msg.conn_id_on_b.clone()),
            ctx_b.commitment_prefix(),
        ),
        conn_end_on_b.versions().to_vec(),
        conn_end_on_b.delay_period(),
    )?;

    client_state_of_a_on_b
        .verify_membership(
            conn_end_on_b.counterparty().prefix(),
            &msg.proof_conn_end_on_a,
            consensus_state_of_a_on_b.root(),
            Path::Connection(ConnectionPath::new(conn_id_on_a)),
            expected_conn_end_on_a.to_vec(),
        )
        .map_err(ConnectionError::VerifyConnectionState)?;

    Ok(())
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let mut conn_end_on_b = ctx_b.connection_end(&msg.conn_id_on_b)?;

    let event = IbcEvent::OpenConfirmConnection(OpenConfirm::new(
        msg.conn_id_on_b.clone(),
        conn_end_on_b.client_id().clone(),
        counterparty_conn_id(&conn_end_on_b)?.clone(),
        conn_end_on_b.counterparty().client_id().clone(),
    ));

    conn_end_on_b.set_state(State::Open);
    ctx_b.store_connection(&ConnectionPath::new(&msg.conn_id_on_b), conn_end_on_b)?;

    ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx_b.emit_ibc_event(event)?;

    ctx_b.log_message(format!(
        "success: conn_open_confirm: connection {} is open",
        msg.conn_id_on_b
    ))
}

fn counterparty_conn_id(conn_end_on_b: &ConnectionEnd) -> Result<&ConnectionId, ConnectionError> {
    conn_end_on_b
        .counterparty()
        .connection_id()
        .ok_or(ConnectionError::InvalidCounterparty)
}
