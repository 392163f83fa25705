//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenAck`.
use ibc_tao_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_tao_channel_types::error::ChannelError;
use ibc_tao_channel_types::events::OpenAck;
use ibc_tao_channel_types::msgs::MsgChannelOpenAck;
use ibc_tao_client_context::prelude::*;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::{ChannelEndPath, Path};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_primitives::ToVec;
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};

use super::{counterparty_client, emit_module_extras, open_connection};

pub fn chan_open_ack_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    chan_cap: &Capability,
    msg: &MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, chan_cap, msg)?;

    module.on_chan_open_ack_validate(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)?;

    Ok(())
}

pub fn chan_open_ack_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras =
        module.on_chan_open_ack_execute(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // state changes
    let chan_end_on_a = {
        let mut chan_end_on_a = chan_end_on_a;

        chan_end_on_a.set_state(State::Open);
        chan_end_on_a.set_version(msg.version_on_b.clone());
        chan_end_on_a.set_counterparty_channel_id(msg.chan_id_on_b.clone());
        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a.clone())?;

        chan_end_on_a
    };

    // emit events and logs
    {
        ctx_a.log_message(format!(
            "success: channel open ack: channel {} is open",
            msg.chan_id_on_a
        ))?;

        let core_event = IbcEvent::OpenAckChannel(OpenAck::new(
            msg.port_id_on_a,
            msg.chan_id_on_a,
            chan_end_on_a.counterparty().port_id().clone(),
            msg.chan_id_on_b,
            chan_end_on_a.connection_hops()[0].clone(),
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, chan_cap: &Capability, msg: &MsgChannelOpenAck) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    ctx_a.authenticate_capability(
        &CapabilityName::channel(&msg.port_id_on_a, &msg.chan_id_on_a),
        chan_cap,
    )?;

    let chan_end_on_a = ctx_a.channel_end(&ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a))?;

    // Validate that the channel end is in a state where it can be ack.
    chan_end_on_a.verify_state_matches(&State::Init)?;

    let conn_end_on_a = open_connection(ctx_a, chan_end_on_a.connection_hops())?;

    // Verify proofs
    {
        let (client_state_of_b_on_a, consensus_state_of_b_on_a) =
            counterparty_client(ctx_a, &conn_end_on_a, msg.proof_height_on_b)?;

        let port_id_on_b = chan_end_on_a.counterparty().port_id();
        let conn_id_on_b = conn_end_on_a
            .counterparty()
            .connection_id()
            .ok_or(ChannelError::MissingCounterparty)?;

        let expected_chan_end_on_b = ChannelEnd::new(
            State::TryOpen,
            *chan_end_on_a.ordering(),
            Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone())),
            vec![conn_id_on_b.clone()],
            msg.version_on_b.clone(),
        )?;
        let chan_end_path_on_b = ChannelEndPath::new(port_id_on_b, &msg.chan_id_on_b);

        client_state_of_b_on_a
            .verify_membership(
                conn_end_on_a.counterparty().prefix(),
                &msg.proof_chan_end_on_b,
                consensus_state_of_b_on_a.root(),
                Path::ChannelEnd(chan_end_path_on_b),
                expected_chan_end_on_b.to_vec(),
            )
            .map_err(ChannelError::FailedProofVerification)?;
    }

    Ok(())
}
