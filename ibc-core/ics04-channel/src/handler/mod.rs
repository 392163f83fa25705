//! This module implements the processing logic for ICS4 (channel) messages.
use ibc_tao_channel_types::channel::Order;
use ibc_tao_channel_types::error::ChannelError;
use ibc_tao_client_context::prelude::*;
use ibc_tao_client_types::Height;
use ibc_tao_connection::types::error::ConnectionError;
use ibc_tao_connection::types::ConnectionEnd;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::IbcEvent;
use ibc_tao_host::types::identifiers::ConnectionId;
use ibc_tao_host::types::path::ClientConsensusStatePath;
use ibc_tao_host::{ClientStateRef, ConsensusStateRef, ExecutionContext, ValidationContext};
use ibc_tao_router::types::module::ModuleExtras;

mod acknowledgement;
mod chan_close_confirm;
mod chan_close_init;
mod chan_open_ack;
mod chan_open_confirm;
mod chan_open_init;
mod chan_open_try;
mod recv_packet;
mod send_packet;
mod timeout;
mod timeout_on_close;
mod write_acknowledgement;

pub use acknowledgement::*;
pub use chan_close_confirm::*;
pub use chan_close_init::*;
pub use chan_open_ack::*;
pub use chan_open_confirm::*;
pub use chan_open_init::*;
pub use chan_open_try::*;
pub use recv_packet::*;
pub use send_packet::*;
pub use timeout::*;
pub use write_acknowledgement::*;

/// Returns the single connection a channel runs over, which must be open.
pub(crate) fn open_connection<Ctx>(
    ctx: &Ctx,
    connection_hops: &[ConnectionId],
) -> Result<ConnectionEnd, ContextError>
where
    Ctx: ValidationContext,
{
    let conn_id = connection_hops
        .first()
        .ok_or(ChannelError::InvalidConnectionHopsLength {
            expected: 1,
            actual: 0,
        })?;

    let conn_end = ctx.connection_end(conn_id)?;

    if !conn_end.is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id.clone(),
        }
        .into());
    }

    Ok(conn_end)
}

/// The ordering must be one of the features the connection negotiated.
pub(crate) fn verify_order_supported(
    conn_end: &ConnectionEnd,
    ordering: Order,
) -> Result<(), ChannelError> {
    conn_end
        .versions()
        .iter()
        .find(|version| version.features().contains(&ordering.to_string()))
        .map(|_| ())
        .ok_or(ChannelError::Connection(ConnectionError::FeatureNotSupported {
            feature: ordering.to_string(),
        }))
}

/// The client behind `conn_end`, which must be active and able to verify
/// proofs at `proof_height`, with the consensus state it trusts there.
pub(crate) fn counterparty_client<Ctx>(
    ctx: &Ctx,
    conn_end: &ConnectionEnd,
    proof_height: Height,
) -> Result<(ClientStateRef<Ctx>, ConsensusStateRef<Ctx>), ContextError>
where
    Ctx: ValidationContext,
{
    let client_id = conn_end.client_id();
    let client_val_ctx = ctx.get_client_validation_context();

    let client_state = client_val_ctx.client_state(client_id)?;

    client_state
        .status(client_val_ctx, client_id)?
        .verify_is_active(client_id)?;
    client_state.validate_proof_height(proof_height)?;

    let consensus_state = client_val_ctx.consensus_state(&ClientConsensusStatePath::new(
        client_id.clone(),
        proof_height.revision_number(),
        proof_height.revision_height(),
    ))?;

    Ok((client_state, consensus_state))
}

/// Forwards the events and log lines an application callback produced.
pub(crate) fn emit_module_extras<Ctx>(ctx: &mut Ctx, extras: ModuleExtras) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    for module_event in extras.events {
        ctx.emit_ibc_event(IbcEvent::Module(module_event))?;
    }

    for log_message in extras.log {
        ctx.log_message(log_message)?;
    }

    Ok(())
}
