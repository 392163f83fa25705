//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenTry`.
use ibc_tao_client_context::prelude::*;
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_connection_types::events::OpenTry;
use ibc_tao_connection_types::msgs::MsgConnectionOpenTry;
use ibc_tao_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::identifiers::{ClientId, ConnectionId};
use ibc_tao_host::types::path::{ClientConnectionPath, ConnectionPath, Path};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_primitives::ToVec;

use super::{client_at_proof_height, verify_host_view, HostViewOnCounterparty};

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_b.validate_message_signer(&msg.signer)?;

    let vars = LocalVars::new(ctx_b, msg)?;

    let (client_state_of_a_on_b, consensus_state_of_a_on_b) =
        client_at_proof_height(ctx_b, &msg.client_id_on_b, msg.proofs_height_on_a)?;

    let prefix_on_a = msg.counterparty.prefix();

    // Chain A must hold an INIT end pointing back at our client.
    let expected_conn_end_on_a = ConnectionEnd::new(
        State::Init,
        vars.client_id_on_a().clone(),
        Counterparty::new(msg.client_id_on_b.clone(), None, ctx_b.commitment_prefix()),
        msg.versions_on_a.clone(),
        msg.delay_period,
    )?;

    client_state_of_a_on_b
        .verify_membership(
            prefix_on_a,
            &msg.proof_conn_end_on_a,
            consensus_state_of_a_on_b.root(),
            Path::Connection(ConnectionPath::new(&vars.conn_id_on_a)),
            expected_conn_end_on_a.to_vec(),
        )
        .map_err(ConnectionError::VerifyConnectionState)?;

    verify_host_view(
        ctx_b,
        &client_state_of_a_on_b,
        &consensus_state_of_a_on_b,
        prefix_on_a,
        HostViewOnCounterparty {
            client_id_on_counterparty: vars.client_id_on_a(),
            client_state_of_host: &msg.client_state_of_b_on_a,
            proof_client_state: &msg.proof_client_state_of_b_on_a,
            proof_consensus_state: &msg.proof_consensus_state_of_b_on_a,
            consensus_height_of_host: msg.consensus_height_of_b_on_a,
            proofs_height: msg.proofs_height_on_a,
        },
    )
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    msg: MsgConnectionOpenTry,
) -> Result<ConnectionId, ContextError>
where
    Ctx: ExecutionContext,
{
    let vars = LocalVars::new(ctx_b, &msg)?;

    let conn_id_on_b = ConnectionId::new(ctx_b.connection_counter()?);
    let client_id_on_a = vars.client_id_on_a().clone();

    ctx_b.increase_connection_counter()?;
    ctx_b.store_connection_to_client(
        &ClientConnectionPath::new(msg.client_id_on_b.clone()),
        conn_id_on_b.clone(),
    )?;
    ctx_b.store_connection(&ConnectionPath::new(&conn_id_on_b), vars.conn_end_on_b)?;

    let event = IbcEvent::OpenTryConnection(OpenTry::new(
        conn_id_on_b.clone(),
        msg.client_id_on_b,
        vars.conn_id_on_a,
        client_id_on_a,
    ));
    ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx_b.emit_ibc_event(event)?;

    ctx_b.log_message(format!(
        "success: conn_open_try: generated new connection identifier: {conn_id_on_b}"
    ))?;

    Ok(conn_id_on_b)
}

struct LocalVars {
    conn_end_on_b: ConnectionEnd,
    conn_id_on_a: ConnectionId,
}

impl LocalVars {
    fn new<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenTry) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        // Fails with `NoCommonVersion` when the offered set and ours are disjoint.
        let version_on_b = ctx_b.pick_version(&msg.versions_on_a)?;

        Ok(Self {
            conn_end_on_b: ConnectionEnd::new(
                State::TryOpen,
                msg.client_id_on_b.clone(),
                msg.counterparty.clone(),
                vec![version_on_b],
                msg.delay_period,
            )?,
            conn_id_on_a: msg
                .counterparty
                .connection_id()
                .ok_or(ConnectionError::InvalidCounterparty)?
                .clone(),
        })
    }

    fn client_id_on_a(&self) -> &ClientId {
        self.conn_end_on_b.counterparty().client_id()
    }
}
