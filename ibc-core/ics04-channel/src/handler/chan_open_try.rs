//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenTry`.

use ibc_tao_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_tao_channel_types::error::ChannelError;
use ibc_tao_channel_types::events::OpenTry;
use ibc_tao_channel_types::msgs::MsgChannelOpenTry;
use ibc_tao_client_context::prelude::*;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::identifiers::ChannelId;
use ibc_tao_host::types::path::{ChannelEndPath, Path, SeqAckPath, SeqRecvPath, SeqSendPath};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_primitives::ToVec;
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};
use ibc_tao_router::types::module::ModuleId;

use super::{counterparty_client, emit_module_extras, open_connection, verify_order_supported};

pub fn chan_open_try_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    port_cap: &Capability,
    msg: &MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_b, port_cap, msg)?;

    let chan_id_on_b = ChannelId::new(ctx_b.channel_counter()?);

    module.on_chan_open_try_validate(
        msg.ordering,
        &msg.connection_hops_on_b,
        &msg.port_id_on_b,
        &chan_id_on_b,
        &Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone())),
        &msg.version_supported_on_a,
    )?;

    Ok(())
}

pub fn chan_open_try_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module_id: &ModuleId,
    module: &mut dyn Module,
    msg: MsgChannelOpenTry,
) -> Result<ChannelId, ContextError>
where
    ExecCtx: ExecutionContext,
{
    let chan_id_on_b = ChannelId::new(ctx_b.channel_counter()?);
    let counterparty = Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone()));

    let cap_name = CapabilityName::channel(&msg.port_id_on_b, &chan_id_on_b);
    let chan_cap = ctx_b.new_capability(cap_name.clone(), module_id.clone())?;

    let callback_result = module.on_chan_open_try_execute(
        msg.ordering,
        &msg.connection_hops_on_b,
        &msg.port_id_on_b,
        &chan_id_on_b,
        &chan_cap,
        &counterparty,
        &msg.version_supported_on_a,
    );

    let (extras, version) = match callback_result {
        Ok(result) => result,
        Err(e) => {
            ctx_b.release_capability(&cap_name)?;
            return Err(e.into());
        }
    };

    let conn_id_on_b = msg.connection_hops_on_b[0].clone();

    // state changes
    {
        let chan_end_on_b = ChannelEnd::new(
            State::TryOpen,
            msg.ordering,
            counterparty,
            msg.connection_hops_on_b,
            version.clone(),
        )?;

        let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &chan_id_on_b);
        ctx_b.store_channel(&chan_end_path_on_b, chan_end_on_b)?;
        ctx_b.increase_channel_counter()?;

        // Initialize send, recv, and ack sequence numbers.
        let seq_send_path = SeqSendPath::new(&msg.port_id_on_b, &chan_id_on_b);
        ctx_b.store_next_sequence_send(&seq_send_path, 1.into())?;

        let seq_recv_path = SeqRecvPath::new(&msg.port_id_on_b, &chan_id_on_b);
        ctx_b.store_next_sequence_recv(&seq_recv_path, 1.into())?;

        let seq_ack_path = SeqAckPath::new(&msg.port_id_on_b, &chan_id_on_b);
        ctx_b.store_next_sequence_ack(&seq_ack_path, 1.into())?;
    }

    // emit events and logs
    {
        ctx_b.log_message(format!(
            "success: channel open try with channel identifier: {chan_id_on_b}"
        ))?;

        let core_event = IbcEvent::OpenTryChannel(OpenTry::new(
            msg.port_id_on_b,
            chan_id_on_b.clone(),
            msg.port_id_on_a,
            msg.chan_id_on_a,
            conn_id_on_b,
            version,
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_b, extras)?;
    }

    Ok(chan_id_on_b)
}

fn validate<Ctx>(ctx_b: &Ctx, port_cap: &Capability, msg: &MsgChannelOpenTry) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_b.validate_message_signer(&msg.signer)?;

    ctx_b.authenticate_capability(&CapabilityName::port(&msg.port_id_on_b), port_cap)?;

    let conn_end_on_b = open_connection(ctx_b, &msg.connection_hops_on_b)?;

    verify_order_supported(&conn_end_on_b, msg.ordering)?;

    // Verify proofs
    {
        let (client_state_of_a_on_b, consensus_state_of_a_on_b) =
            counterparty_client(ctx_b, &conn_end_on_b, msg.proof_height_on_a)?;

        let conn_id_on_a = conn_end_on_b
            .counterparty()
            .connection_id()
            .ok_or(ChannelError::MissingCounterparty)?;

        let expected_chan_end_on_a = ChannelEnd::new(
            State::Init,
            msg.ordering,
            Counterparty::new(msg.port_id_on_b.clone(), None),
            vec![conn_id_on_a.clone()],
            msg.version_supported_on_a.clone(),
        )?;
        let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);

        client_state_of_a_on_b
            .verify_membership(
                conn_end_on_b.counterparty().prefix(),
                &msg.proof_chan_end_on_a,
                consensus_state_of_a_on_b.root(),
                Path::ChannelEnd(chan_end_path_on_a),
                expected_chan_end_on_a.to_vec(),
            )
            .map_err(ChannelError::FailedProofVerification)?;
    }

    Ok(())
}
