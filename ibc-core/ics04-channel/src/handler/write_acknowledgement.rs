//! Asynchronous acknowledgements: a module that deferred the acknowledgement
//! of a received packet commits it here once it is ready.

use ibc_tao_channel_types::acknowledgement::Acknowledgement;
use ibc_tao_channel_types::channel::State;
use ibc_tao_channel_types::commitment::compute_ack_commitment;
use ibc_tao_channel_types::error::PacketError;
use ibc_tao_channel_types::events::WriteAcknowledgement;
use ibc_tao_channel_types::packet::Packet;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::{AckPath, ChannelEndPath};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_router::types::capability::{Capability, CapabilityName};

/// Writes the acknowledgement of a packet received on `(packet.port_id_on_b,
/// packet.chan_id_on_b)`. `chan_cap` must be the capability of that channel.
///
/// Equivalent to calling [`write_acknowledgement_validate`], followed by
/// [`write_acknowledgement_execute`].
pub fn write_acknowledgement<Ctx>(
    ctx_b: &mut Ctx,
    chan_cap: &Capability,
    packet: Packet,
    acknowledgement: Acknowledgement,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    write_acknowledgement_validate(ctx_b, chan_cap, &packet, &acknowledgement)?;
    write_acknowledgement_execute(ctx_b, packet, acknowledgement)
}

pub fn write_acknowledgement_validate<Ctx>(
    ctx_b: &Ctx,
    chan_cap: &Capability,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.authenticate_capability(
        &CapabilityName::channel(&packet.port_id_on_b, &packet.chan_id_on_b),
        chan_cap,
    )?;

    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    chan_end_on_b.verify_state_matches(&State::Open)?;

    if acknowledgement.as_bytes().is_empty() {
        return Err(PacketError::EmptyAcknowledgement.into());
    }

    let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    if ctx_b.get_packet_acknowledgement(&ack_path_on_b)?.is_some() {
        return Err(PacketError::DuplicateAcknowledgement(packet.seq_on_a).into());
    }

    Ok(())
}

pub fn write_acknowledgement_execute<Ctx>(
    ctx_b: &mut Ctx,
    packet: Packet,
    acknowledgement: Acknowledgement,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    ctx_b.store_packet_acknowledgement(&ack_path_on_b, compute_ack_commitment(&acknowledgement))?;

    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;
    let conn_id_on_b = chan_end_on_b.connection_hops()[0].clone();

    ctx_b.log_message(format!(
        "success: packet write acknowledgement with sequence {}",
        packet.seq_on_a
    ))?;

    let event = IbcEvent::WriteAcknowledgement(WriteAcknowledgement::new(
        packet,
        acknowledgement,
        conn_id_on_b,
    ));
    ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
    ctx_b.emit_ibc_event(event)?;

    Ok(())
}
