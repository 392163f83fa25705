use ibc_tao_channel::handler::{
    acknowledgement_packet_execute, acknowledgement_packet_validate, chan_close_confirm_execute,
    chan_close_confirm_validate, chan_close_init_execute, chan_close_init_validate,
    chan_open_ack_execute, chan_open_ack_validate, chan_open_confirm_execute,
    chan_open_confirm_validate, chan_open_init_execute, chan_open_init_validate,
    chan_open_try_execute, chan_open_try_validate, recv_packet_execute, recv_packet_validate,
    timeout_packet_execute, timeout_packet_validate, TimeoutMsgType,
};
use ibc_tao_channel::types::msgs::{
    channel_msg_to_channel_id, channel_msg_to_port_id, packet_msg_to_channel_id,
    packet_msg_to_port_id, ChannelMsg, PacketMsg,
};
use ibc_tao_client::handler::{create_client, recover_client, update_client, upgrade_client};
use ibc_tao_client::types::msgs::{ClientMsg, MsgUpdateOrMisbehaviour};
use ibc_tao_connection::handler::{
    conn_open_ack, conn_open_confirm, conn_open_init, conn_open_try,
};
use ibc_tao_connection::types::msgs::ConnectionMsg;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::msgs::MsgEnvelope;
use ibc_tao_handler_types::response::MsgResponse;
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_router::router::Router;
use ibc_tao_router::types::capability::Capability;
use ibc_tao_router::types::error::RouterError;
use ibc_tao_router::types::module::ModuleId;

/// Entrypoint which performs both validation and message execution
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<MsgResponse, ContextError>
where
    Ctx: ExecutionContext,
{
    validate(ctx, router, msg.clone())?;
    execute(ctx, router, msg)
}

/// Entrypoint which only performs message validation
///
/// If a transaction contains `n` messages `m_1` ... `m_n`, then
/// they MUST be processed as follows:
///     validate(m_1), execute(m_1), ..., validate(m_n), execute(m_n)
/// That is, the state transition of message `i` must be applied before
/// message `i+1` is validated. This is equivalent to calling
/// `dispatch()` on each successively.
pub fn validate<Ctx>(ctx: &Ctx, router: &impl Router, msg: MsgEnvelope) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => create_client::validate(ctx, msg),
            ClientMsg::UpdateClient(msg) => {
                update_client::validate(ctx, MsgUpdateOrMisbehaviour::UpdateClient(msg))
            }
            ClientMsg::Misbehaviour(msg) => {
                update_client::validate(ctx, MsgUpdateOrMisbehaviour::Misbehaviour(msg))
            }
            ClientMsg::UpgradeClient(msg) => upgrade_client::validate(ctx, msg),
            ClientMsg::RecoverClient(msg) => recover_client::validate(ctx, msg),
        },
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => conn_open_init::validate(ctx, &msg),
            ConnectionMsg::OpenTry(msg) => conn_open_try::validate(ctx, &msg),
            ConnectionMsg::OpenAck(msg) => conn_open_ack::validate(ctx, &msg),
            ConnectionMsg::OpenConfirm(msg) => conn_open_confirm::validate(ctx, &msg),
        },
        MsgEnvelope::Channel(msg) => {
            let (module_id, capability) = channel_msg_owner(ctx, &msg)?;
            let module = router
                .get_route(&module_id)
                .ok_or(RouterError::MissingModule { module_id })?;

            match msg {
                ChannelMsg::OpenInit(msg) => chan_open_init_validate(ctx, module, &capability, &msg),
                ChannelMsg::OpenTry(msg) => chan_open_try_validate(ctx, module, &capability, &msg),
                ChannelMsg::OpenAck(msg) => chan_open_ack_validate(ctx, module, &capability, &msg),
                ChannelMsg::OpenConfirm(msg) => {
                    chan_open_confirm_validate(ctx, module, &capability, &msg)
                }
                ChannelMsg::CloseInit(msg) => {
                    chan_close_init_validate(ctx, module, &capability, &msg)
                }
                ChannelMsg::CloseConfirm(msg) => {
                    chan_close_confirm_validate(ctx, module, &capability, &msg)
                }
            }
        }
        MsgEnvelope::Packet(msg) => {
            let (module_id, capability) = packet_msg_owner(ctx, &msg)?;
            let module = router
                .get_route(&module_id)
                .ok_or(RouterError::MissingModule { module_id })?;

            match msg {
                PacketMsg::Recv(msg) => recv_packet_validate(ctx, &capability, &msg),
                PacketMsg::Ack(msg) => {
                    acknowledgement_packet_validate(ctx, module, &capability, &msg)
                }
                PacketMsg::Timeout(msg) => timeout_packet_validate(
                    ctx,
                    module,
                    &capability,
                    &TimeoutMsgType::Timeout(msg),
                ),
                PacketMsg::TimeoutOnClose(msg) => timeout_packet_validate(
                    ctx,
                    module,
                    &capability,
                    &TimeoutMsgType::TimeoutOnClose(msg),
                ),
            }
        }
    }
}

/// Entrypoint which only performs message execution
///
/// A prior call to [`validate`] on the same message MUST have succeeded.
pub fn execute<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<MsgResponse, ContextError>
where
    Ctx: ExecutionContext,
{
    let response = match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => MsgResponse::Client(create_client::execute(ctx, msg)?),
            ClientMsg::UpdateClient(msg) => {
                update_client::execute(ctx, MsgUpdateOrMisbehaviour::UpdateClient(msg))?;
                MsgResponse::Empty
            }
            ClientMsg::Misbehaviour(msg) => {
                update_client::execute(ctx, MsgUpdateOrMisbehaviour::Misbehaviour(msg))?;
                MsgResponse::Empty
            }
            ClientMsg::UpgradeClient(msg) => {
                upgrade_client::execute(ctx, msg)?;
                MsgResponse::Empty
            }
            ClientMsg::RecoverClient(msg) => {
                recover_client::execute(ctx, msg)?;
                MsgResponse::Empty
            }
        },
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => {
                MsgResponse::Connection(conn_open_init::execute(ctx, msg)?)
            }
            ConnectionMsg::OpenTry(msg) => {
                MsgResponse::Connection(conn_open_try::execute(ctx, msg)?)
            }
            ConnectionMsg::OpenAck(msg) => {
                conn_open_ack::execute(ctx, msg)?;
                MsgResponse::Empty
            }
            ConnectionMsg::OpenConfirm(msg) => {
                conn_open_confirm::execute(ctx, msg)?;
                MsgResponse::Empty
            }
        },
        MsgEnvelope::Channel(msg) => {
            let (module_id, _) = channel_msg_owner(ctx, &msg)?;
            let module = router
                .get_route_mut(&module_id)
                .ok_or_else(|| RouterError::MissingModule {
                    module_id: module_id.clone(),
                })?;

            match msg {
                ChannelMsg::OpenInit(msg) => {
                    MsgResponse::Channel(chan_open_init_execute(ctx, &module_id, module, msg)?)
                }
                ChannelMsg::OpenTry(msg) => {
                    MsgResponse::Channel(chan_open_try_execute(ctx, &module_id, module, msg)?)
                }
                ChannelMsg::OpenAck(msg) => {
                    chan_open_ack_execute(ctx, module, msg)?;
                    MsgResponse::Empty
                }
                ChannelMsg::OpenConfirm(msg) => {
                    chan_open_confirm_execute(ctx, module, msg)?;
                    MsgResponse::Empty
                }
                ChannelMsg::CloseInit(msg) => {
                    chan_close_init_execute(ctx, module, msg)?;
                    MsgResponse::Empty
                }
                ChannelMsg::CloseConfirm(msg) => {
                    chan_close_confirm_execute(ctx, module, msg)?;
                    MsgResponse::Empty
                }
            }
        }
        MsgEnvelope::Packet(msg) => {
            let (module_id, _) = packet_msg_owner(ctx, &msg)?;
            let module = router
                .get_route_mut(&module_id)
                .ok_or(RouterError::MissingModule { module_id })?;

            let result = match msg {
                PacketMsg::Recv(msg) => recv_packet_execute(ctx, module, msg)?,
                PacketMsg::Ack(msg) => acknowledgement_packet_execute(ctx, module, msg)?,
                PacketMsg::Timeout(msg) => {
                    timeout_packet_execute(ctx, module, TimeoutMsgType::Timeout(msg))?
                }
                PacketMsg::TimeoutOnClose(msg) => {
                    timeout_packet_execute(ctx, module, TimeoutMsgType::TimeoutOnClose(msg))?
                }
            };

            MsgResponse::Packet(result)
        }
    };

    Ok(response)
}

/// Handshake steps that create a channel end are routed by the owner of the
/// port; every other step by the owner of the channel.
fn channel_msg_owner<Ctx>(
    ctx: &Ctx,
    msg: &ChannelMsg,
) -> Result<(ModuleId, Capability), ContextError>
where
    Ctx: ValidationContext,
{
    let port_id = channel_msg_to_port_id(msg);

    match channel_msg_to_channel_id(msg) {
        Some(channel_id) => ctx.lookup_module_by_channel(port_id, channel_id),
        None => ctx.lookup_module_by_port(port_id),
    }
}

fn packet_msg_owner<Ctx>(
    ctx: &Ctx,
    msg: &PacketMsg,
) -> Result<(ModuleId, Capability), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.lookup_module_by_channel(packet_msg_to_port_id(msg), packet_msg_to_channel_id(msg))
}
