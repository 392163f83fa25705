//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenAck`.

use ibc_tao_client_context::prelude::*;
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_connection_types::events::OpenAck;
use ibc_tao_connection_types::msgs::MsgConnectionOpenAck;
use ibc_tao_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::identifiers::ClientId;
use ibc_tao_host::types::path::{ConnectionPath, Path};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_primitives::ToVec;

use super::{client_at_proof_height, verify_host_view, HostViewOnCounterparty};

pub fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    let vars = LocalVars::new(ctx_a, msg)?;

    // INIT is the regular path; TRYOPEN covers both sides having sent
    // `OpenInit` and `OpenTry` to each other.
    match vars.conn_end_on_a.state() {
        State::Init | State::TryOpen => {}
        state => {
            return Err(ConnectionError::InvalidState {
                expected: format!("{} or {}", State::Init, State::TryOpen),
                actual: state.to_string(),
            }
            .into())
        }
    }

    // The selected version must be one we offered.
    if !vars.conn_end_on_a.versions().contains(&msg.version) {
        return Err(ConnectionError::VersionNotSupported {
            version: msg.version.clone(),
        }
        .into());
    }

    let (client_state_of_b_on_a, consensus_state_of_b_on_a) =
        client_at_proof_height(ctx_a, vars.client_id_on_a(), msg.proofs_height_on_b)?;

    let prefix_on_b = vars.conn_end_on_a.counterparty().prefix();

    let expected_conn_end_on_b = ConnectionEnd::new(
        State::TryOpen,
        vars.client_id_on_b().clone(),
        Counterparty::new(
            vars.client_id_on_a().clone(),
            Some(msg.conn_id_on_a.clone()),
            ctx_a.commitment_prefix(),
        ),
        vec![msg.version.clone()],
        vars.conn_end_on_a.delay_period(),
    )?;

    client_state_of_b_on_a
        .verify_membership(
            prefix_on_b,
            &msg.proof_conn_end_on_b,
            consensus_state_of_b_on_a.root(),
            Path::Connection(ConnectionPath::new(&msg.conn_id_on_b)),
            expected_conn_end_on_b.to_vec(),
        )
        .map_err(ConnectionError::VerifyConnectionState)?;

    verify_host_view(
        ctx_a,
        &client_state_of_b_on_a,
        &consensus_state_of_b_on_a,
        prefix_on_b,
        HostViewOnCounterparty {
            client_id_on_counterparty: vars.client_id_on_b(),
            client_state_of_host: &msg.client_state_of_a_on_b,
            proof_client_state: &msg.proof_client_state_of_a_on_b,
            proof_consensus_state: &msg.proof_consensus_state_of_a_on_b,
            consensus_height_of_host: msg.consensus_height_of_a_on_b,
            proofs_height: msg.proofs_height_on_b,
        },
    )
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let vars = LocalVars::new(ctx_a, &msg)?;

    let client_id_on_a = vars.client_id_on_a().clone();
    let client_id_on_b = vars.client_id_on_b().clone();

    let new_conn_end_on_a = {
        let mut counterparty = vars.conn_end_on_a.counterparty().clone();
        counterparty.connection_id = Some(msg.conn_id_on_b.clone());

        let mut conn_end_on_a = vars.conn_end_on_a;
        conn_end_on_a.set_state(State::Open);
        conn_end_on_a.set_version(msg.version);
        conn_end_on_a.set_counterparty(counterparty);
        conn_end_on_a
    };

    ctx_a.store_connection(&ConnectionPath::new(&msg.conn_id_on_a), new_conn_end_on_a)?;

    let event = IbcEvent::OpenAckConnection(OpenAck::new(
        msg.conn_id_on_a.clone(),
        client_id_on_a,
        msg.conn_id_on_b,
        client_id_on_b,
    ));
    ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx_a.emit_ibc_event(event)?;

    ctx_a.log_message(format!(
        "success: conn_open_ack: connection {} is open",
        msg.conn_id_on_a
    ))
}

struct LocalVars {
    conn_end_on_a: ConnectionEnd,
}

impl LocalVars {
    fn new<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenAck) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        Ok(LocalVars {
            conn_end_on_a: ctx_a.connection_end(&msg.conn_id_on_a)?,
        })
    }

    fn client_id_on_a(&self) -> &ClientId {
        self.conn_end_on_a.client_id()
    }

    fn client_id_on_b(&self) -> &ClientId {
        self.conn_end_on_a.counterparty().client_id()
    }
}
