//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenConfirm`.

use ibc_tao_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_tao_channel_types::error::ChannelError;
use ibc_tao_channel_types::events::OpenConfirm;
use ibc_tao_channel_types::msgs::MsgChannelOpenConfirm;
use ibc_tao_client_context::prelude::*;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::{ChannelEndPath, Path};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_primitives::ToVec;
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};

use super::{counterparty_client, emit_module_extras, open_connection};

pub fn chan_open_confirm_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    chan_cap: &Capability,
    msg: &MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_b, chan_cap, msg)?;

    module.on_chan_open_confirm_validate(&msg.port_id_on_b, &msg.chan_id_on_b)?;

    Ok(())
}

pub fn chan_open_confirm_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras = module.on_chan_open_confirm_execute(&msg.port_id_on_b, &msg.chan_id_on_b)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let mut chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    let chan_id_on_a = chan_end_on_b
        .counterparty()
        .channel_id()
        .ok_or(ChannelError::MissingCounterparty)?
        .clone();
    let port_id_on_a = chan_end_on_b.counterparty().port_id().clone();
    let conn_id_on_b = chan_end_on_b.connection_hops()[0].clone();

    // state changes
    chan_end_on_b.set_state(State::Open);
    ctx_b.store_channel(&chan_end_path_on_b, chan_end_on_b)?;

    // emit events and logs
    {
        ctx_b.log_message(format!(
            "success: channel open confirm: channel {} is open",
            msg.chan_id_on_b
        ))?;

        let core_event = IbcEvent::OpenConfirmChannel(OpenConfirm::new(
            msg.port_id_on_b,
            msg.chan_id_on_b,
            port_id_on_a,
            chan_id_on_a,
            conn_id_on_b,
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_b, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(
    ctx_b: &Ctx,
    chan_cap: &Capability,
    msg: &MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_b.validate_message_signer(&msg.signer)?;

    ctx_b.authenticate_capability(
        &CapabilityName::channel(&msg.port_id_on_b, &msg.chan_id_on_b),
        chan_cap,
    )?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    // Validate that the channel end is in a state where it can be confirmed.
    chan_end_on_b.verify_state_matches(&State::TryOpen)?;

    let conn_end_on_b = open_connection(ctx_b, chan_end_on_b.connection_hops())?;

    // Verify proofs
    {
        let (client_state_of_a_on_b, consensus_state_of_a_on_b) =
            counterparty_client(ctx_b, &conn_end_on_b, msg.proof_height_on_a)?;

        let port_id_on_a = chan_end_on_b.counterparty().port_id();
        let chan_id_on_a = chan_end_on_b
            .counterparty()
            .channel_id()
            .ok_or(ChannelError::MissingCounterparty)?;
        let conn_id_on_a = conn_end_on_b
            .counterparty()
            .connection_id()
            .ok_or(ChannelError::MissingCounterparty)?;

        let expected_chan_end_on_a = ChannelEnd::new(
            State::Open,
            *chan_end_on_b.ordering(),
            Counterparty::new(msg.port_id_on_b.clone(), Some(msg.chan_id_on_b.clone())),
            vec![conn_id_on_a.clone()],
            chan_end_on_b.version().clone(),
        )?;
        let chan_end_path_on_a = ChannelEndPath::new(port_id_on_a, chan_id_on_a);

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
