//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenInit`.

use ibc_tao_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_tao_channel_types::error::ChannelError;
use ibc_tao_channel_types::events::OpenInit;
use ibc_tao_channel_types::msgs::MsgChannelOpenInit;
use ibc_tao_client_context::prelude::*;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::identifiers::ChannelId;
use ibc_tao_host::types::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};
use ibc_tao_router::types::module::ModuleId;

use super::{emit_module_extras, open_connection, verify_order_supported};

pub fn chan_open_init_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    port_cap: &Capability,
    msg: &MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, port_cap, msg)?;

    let chan_id_on_a = ChannelId::new(ctx_a.channel_counter()?);

    module.on_chan_open_init_validate(
        msg.ordering,
        &msg.connection_hops_on_a,
        &msg.port_id_on_a,
        &chan_id_on_a,
        &Counterparty::new(msg.port_id_on_b.clone(), None),
        &msg.version_proposal,
    )?;

    Ok(())
}

/// Writes the INIT channel end and hands the owning module the capability
/// of the new channel. Returns the generated channel identifier.
pub fn chan_open_init_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module_id: &ModuleId,
    module: &mut dyn Module,
    msg: MsgChannelOpenInit,
) -> Result<ChannelId, ContextError>
where
    ExecCtx: ExecutionContext,
{
    let chan_id_on_a = ChannelId::new(ctx_a.channel_counter()?);
    let counterparty = Counterparty::new(msg.port_id_on_b.clone(), None);

    let cap_name = CapabilityName::channel(&msg.port_id_on_a, &chan_id_on_a);
    let chan_cap = ctx_a.new_capability(cap_name.clone(), module_id.clone())?;

    let callback_result = module.on_chan_open_init_execute(
        msg.ordering,
        &msg.connection_hops_on_a,
        &msg.port_id_on_a,
        &chan_id_on_a,
        &chan_cap,
        &counterparty,
        &msg.version_proposal,
    );

    // Nothing of the channel may outlive a rejected handshake.
    let (extras, version) = match callback_result {
        Ok(result) => result,
        Err(e) => {
            ctx_a.release_capability(&cap_name)?;
            return Err(e.into());
        }
    };

    let conn_id_on_a = msg.connection_hops_on_a[0].clone();

    // state changes
    {
        let chan_end_on_a = ChannelEnd::new(
            State::Init,
            msg.ordering,
            counterparty,
            msg.connection_hops_on_a,
            version.clone(),
        )?;
        let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &chan_id_on_a);
        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a)?;

        ctx_a.increase_channel_counter()?;

        // Initialize send, recv, and ack sequence numbers.
        let seq_send_path = SeqSendPath::new(&msg.port_id_on_a, &chan_id_on_a);
        ctx_a.store_next_sequence_send(&seq_send_path, 1.into())?;

        let seq_recv_path = SeqRecvPath::new(&msg.port_id_on_a, &chan_id_on_a);
        ctx_a.store_next_sequence_recv(&seq_recv_path, 1.into())?;

        let seq_ack_path = SeqAckPath::new(&msg.port_id_on_a, &chan_id_on_a);
        ctx_a.store_next_sequence_ack(&seq_ack_path, 1.into())?;
    }

    // emit events and logs
    {
        ctx_a.log_message(format!(
            "success: channel open init with channel identifier: {chan_id_on_a}"
        ))?;
        let core_event = IbcEvent::OpenInitChannel(OpenInit::new(
            msg.port_id_on_a,
            chan_id_on_a.clone(),
            msg.port_id_on_b,
            conn_id_on_a,
            version,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(chan_id_on_a)
}

fn validate<Ctx>(
    ctx_a: &Ctx,
    port_cap: &Capability,
    msg: &MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    if !ctx_a.params().outbound_enabled {
        return Err(ChannelError::OutboundDisabled.into());
    }

    ctx_a.authenticate_capability(&CapabilityName::port(&msg.port_id_on_a), port_cap)?;

    let conn_end_on_a = open_connection(ctx_a, &msg.connection_hops_on_a)?;

    let client_id_on_a = conn_end_on_a.client_id();
    let client_val_ctx_a = ctx_a.get_client_validation_context();
    let client_state_of_b_on_a = client_val_ctx_a.client_state(client_id_on_a)?;

    client_state_of_b_on_a
        .status(client_val_ctx_a, client_id_on_a)?
        .verify_is_active(client_id_on_a)?;

    verify_order_supported(&conn_end_on_a, msg.ordering)?;

    Ok(())
}
