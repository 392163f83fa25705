use ibc_tao_channel_types::channel::{Counterparty, State};
use ibc_tao_channel_types::commitment::compute_packet_commitment;
use ibc_tao_channel_types::error::PacketError;
use ibc_tao_channel_types::events::SendPacket;
use ibc_tao_channel_types::packet::Packet;
use ibc_tao_client_context::prelude::*;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_host::types::path::{
    ChannelEndPath, ClientConsensusStatePath, CommitmentPath, SeqSendPath,
};
use ibc_tao_router::types::capability::{Capability, CapabilityName};

use crate::context::{SendPacketExecutionContext, SendPacketValidationContext};

/// Send the given packet, including all necessary validation.
///
/// `chan_cap` must be the capability minted for the source channel during
/// its opening handshake. Equivalent to calling [`send_packet_validate`],
/// followed by [`send_packet_execute`].
pub fn send_packet(
    ctx_a: &mut impl SendPacketExecutionContext,
    chan_cap: &Capability,
    packet: Packet,
) -> Result<(), ContextError> {
    send_packet_validate(ctx_a, chan_cap, &packet)?;
    send_packet_execute(ctx_a, packet)
}

/// Validate that sending the given packet would succeed.
pub fn send_packet_validate(
    ctx_a: &impl SendPacketValidationContext,
    chan_cap: &Capability,
    packet: &Packet,
) -> Result<(), ContextError> {
    packet.validate_basic()?;

    ctx_a.authenticate_capability(
        &CapabilityName::channel(&packet.port_id_on_a, &packet.chan_id_on_a),
        chan_cap,
    )?;

    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_state_matches(&State::Open)?;

    let counterparty = Counterparty::new(
        packet.port_id_on_b.clone(),
        Some(packet.chan_id_on_b.clone()),
    );

    chan_end_on_a
        .verify_counterparty_matches(&counterparty)
        .map_err(|_| PacketError::InvalidPacketCounterparty {
            port_id: packet.port_id_on_b.clone(),
            channel_id: packet.chan_id_on_b.clone(),
        })?;

    let conn_id_on_a = &chan_end_on_a.connection_hops()[0];

    let conn_end_on_a = ctx_a.connection_end(conn_id_on_a)?;

    let client_id_on_a = conn_end_on_a.client_id();

    let client_val_ctx_a = ctx_a.get_client_validation_context();

    let client_state_of_b_on_a = client_val_ctx_a.client_state(client_id_on_a)?;

    client_state_of_b_on_a
        .status(client_val_ctx_a, client_id_on_a)?
        .verify_is_active(client_id_on_a)?;

    let latest_height_on_a = client_state_of_b_on_a.latest_height();

    if packet.timeout_height_on_b.has_expired(latest_height_on_a) {
        return Err(PacketError::InsufficientPacketHeight {
            chain_height: latest_height_on_a,
            timeout_height: packet.timeout_height_on_b,
        }
        .into());
    }

    let client_cons_state_path_on_a = ClientConsensusStatePath::new(
        client_id_on_a.clone(),
        latest_height_on_a.revision_number(),
        latest_height_on_a.revision_height(),
    );
    let consensus_state_of_b_on_a =
        client_val_ctx_a.consensus_state(&client_cons_state_path_on_a)?;
    let latest_timestamp = consensus_state_of_b_on_a.timestamp();

    if packet.timeout_timestamp_on_b.has_expired(&latest_timestamp) {
        return Err(PacketError::InsufficientPacketTimestamp {
            chain_timestamp: latest_timestamp,
            timeout_timestamp: packet.timeout_timestamp_on_b,
        }
        .into());
    }

    let seq_send_path_on_a = SeqSendPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

    if packet.seq_on_a != next_seq_send_on_a {
        return Err(PacketError::MismatchedPacketSequences {
            expected: next_seq_send_on_a,
            actual: packet.seq_on_a,
        }
        .into());
    }

    Ok(())
}

/// Send the packet without any validation.
///
/// A prior call to [`send_packet_validate`] MUST have succeeded.
pub fn send_packet_execute(
    ctx_a: &mut impl SendPacketExecutionContext,
    packet: Packet,
) -> Result<(), ContextError> {
    {
        let seq_send_path_on_a = SeqSendPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

        ctx_a.store_next_sequence_send(&seq_send_path_on_a, next_seq_send_on_a.increment())?;
    }

    ctx_a.store_packet_commitment(
        &CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a),
        compute_packet_commitment(
            &packet.data,
            &packet.timeout_height_on_b,
            &packet.timeout_timestamp_on_b,
        ),
    )?;

    // emit events and logs
    {
        let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
        let conn_id_on_a = &chan_end_on_a.connection_hops()[0];

        ctx_a.log_message(format!("success: packet send with sequence {}", packet.seq_on_a))?;
        let event = IbcEvent::SendPacket(SendPacket::new(
            packet,
            chan_end_on_a.ordering,
            conn_id_on_a.clone(),
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;
    }

    Ok(())
}
