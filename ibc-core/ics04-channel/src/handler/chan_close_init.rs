//! Protocol logic specific to ICS4 messages of type `MsgChannelCloseInit`.
use ibc_tao_channel_types::channel::State;
use ibc_tao_channel_types::error::ChannelError;
use ibc_tao_channel_types::events::CloseInit;
use ibc_tao_channel_types::msgs::MsgChannelCloseInit;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::ChannelEndPath;
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};

use super::{emit_module_extras, open_connection};

pub fn chan_close_init_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    chan_cap: &Capability,
    msg: &MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, chan_cap, msg)?;

    module.on_chan_close_init_validate(&msg.port_id_on_a, &msg.chan_id_on_a)?;

    Ok(())
}

pub fn chan_close_init_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras = module.on_chan_close_init_execute(&msg.port_id_on_a, &msg.chan_id_on_a)?;
    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // state changes
    {
        let chan_end_on_a = {
            let mut chan_end_on_a = chan_end_on_a.clone();
            chan_end_on_a.set_state(State::Closed);
            chan_end_on_a
        };

        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a)?;
    }

    // emit events and logs
    {
        ctx_a.log_message("success: channel close init".to_string())?;

        let core_event = {
            let port_id_on_b = chan_end_on_a.counterparty().port_id.clone();
            let chan_id_on_b = chan_end_on_a
                .counterparty()
                .channel_id()
                .ok_or(ChannelError::MissingCounterparty)?
                .clone();
            let conn_id_on_a = chan_end_on_a.connection_hops[0].clone();

            IbcEvent::CloseInitChannel(CloseInit::new(
                msg.port_id_on_a.clone(),
                msg.chan_id_on_a.clone(),
                port_id_on_b,
                chan_id_on_b,
                conn_id_on_a,
            ))
        };
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, chan_cap: &Capability, msg: &MsgChannelCloseInit) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    ctx_a.authenticate_capability(
        &CapabilityName::channel(&msg.port_id_on_a, &msg.chan_id_on_a),
        chan_cap,
    )?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // Only an open channel can be closed.
    chan_end_on_a.verify_state_matches(&State::Open)?;

    // A channel that never learned its counterparty cannot be closed yet.
    chan_end_on_a
        .counterparty()
        .channel_id()
        .ok_or(ChannelError::MissingCounterparty)?;

    open_connection(ctx_a, chan_end_on_a.connection_hops())?;

    Ok(())
}
